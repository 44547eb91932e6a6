//! ByteLego CLI - bytelego command
//!
//! Host-side tooling for the injection rules and hook runtime: dry-run
//! rule matching against a class/method, and trace-driven simulation of
//! the injected hooks.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;

/// ByteLego - rule-driven method instrumentation toolkit
#[derive(Parser)]
#[command(name = "bytelego")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dry-run the rule file against a class and method
    Check {
        /// Path to the rule file (bytelego.json)
        rules: PathBuf,

        /// Class name, dotted or internal form (com/example/Foo)
        #[arg(long)]
        class: String,

        /// Class annotation, dotted or descriptor form
        #[arg(long)]
        class_annotation: Option<String>,

        /// Method name to match (omit to list class-level hits only)
        #[arg(long)]
        method: Option<String>,

        /// Method annotation, dotted or descriptor form
        #[arg(long)]
        method_annotation: Option<String>,
    },
    /// Run a hook trace against the runtime and print the reports
    Simulate {
        /// Trace file (one `enter <idx>` / `exit <idx>` / `advance <ms>` per line, - for stdin)
        trace: PathBuf,

        /// Debounce window in milliseconds
        #[arg(long, default_value = "500")]
        debounce_ms: u64,
    },
    /// Print an example rule file
    Example,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            rules,
            class,
            class_annotation,
            method,
            method_annotation,
        } => cmd::check::run(
            &rules,
            &class,
            class_annotation.as_deref(),
            method.as_deref(),
            method_annotation.as_deref(),
        ),
        Commands::Simulate { trace, debounce_ms } => cmd::simulate::run(&trace, debounce_ms),
        Commands::Example => cmd::example::run(),
    }
}
