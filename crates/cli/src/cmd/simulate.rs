//! Hook trace simulation command
//!
//! Replays a plain-text trace against the hook runtime with a manual
//! clock, so hook behavior can be inspected without an instrumented build.
//!
//! Trace format, one directive per line:
//! - `enter <index>`  - invoke the entry hook with a configuration index
//! - `exit <index>`   - invoke the exit hook with a configuration index
//! - `advance <ms>`   - advance the simulated clock
//! - `#` starts a comment, blank lines are skipped

use anyhow::{bail, Context, Result};
use bytelego_hooks::{Debouncer, ManualClock, MemorySink, MethodHooks};
use owo_colors::OwoColorize;
use std::io::Read;
use std::path::Path;

pub fn run(trace_path: &Path, debounce_ms: u64) -> Result<()> {
    let trace = read_trace(trace_path)
        .with_context(|| format!("could not read trace from {}", trace_path.display()))?;

    // The simulated epoch offset only needs to be large enough that the
    // first debounce check reads as slow.
    let clock = ManualClock::new(1_700_000_000_000);
    let mut hooks = MethodHooks::with_debouncer(Debouncer::with_interval(debounce_ms));
    let mut sink = MemorySink::new();

    for (line_no, line) in trace.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let (directive, arg) = parse_directive(line)
            .with_context(|| format!("bad trace directive at line {}", line_no + 1))?;
        match directive {
            Directive::Enter => hooks.on_method_enter_indexed(arg, &clock),
            Directive::Exit => hooks.on_method_exit_indexed(arg, &clock, &mut sink),
            Directive::Advance => {
                if arg < 0 {
                    bail!("advance takes a non-negative delta at line {}", line_no + 1);
                }
                clock.advance(arg as u64);
            }
        }
    }

    if sink.reports().is_empty() {
        println!("{}", "No reports emitted.".dimmed());
    } else {
        for line in sink.lines() {
            println!("{}", line);
        }
    }
    println!(
        "\n{} last debounce event at {} ms",
        "clock:".dimmed(),
        hooks.debouncer().last_event_ms()
    );

    Ok(())
}

enum Directive {
    Enter,
    Exit,
    Advance,
}

fn parse_directive(line: &str) -> Result<(Directive, i64)> {
    let mut parts = line.split_whitespace();
    let word = parts.next().context("empty directive")?;
    let arg: i64 = parts
        .next()
        .context("directive takes one argument")?
        .parse()
        .context("argument must be an integer")?;
    if parts.next().is_some() {
        bail!("directive takes exactly one argument");
    }

    let directive = match word {
        "enter" => Directive::Enter,
        "exit" => Directive::Exit,
        "advance" => Directive::Advance,
        other => bail!("unknown directive '{}'", other),
    };
    Ok((directive, arg))
}

fn read_trace(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
