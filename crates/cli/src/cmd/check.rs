//! Rule dry-run command
//!
//! Matches a class (and optionally a method) against a rule file and
//! prints the hits the way the injection host would see them, including
//! the configuration index each matched call site would be injected with.

use anyhow::{Context, Result};
use bytelego_hooks::HookAction;
use bytelego_rules::{load_rules, RuleSet};
use owo_colors::OwoColorize;
use std::path::Path;

pub fn run(
    rules_path: &Path,
    class: &str,
    class_annotation: Option<&str>,
    method: Option<&str>,
    method_annotation: Option<&str>,
) -> Result<()> {
    let rules = load_rules(rules_path)
        .with_context(|| format!("could not load rules from {}", rules_path.display()))?;
    let set = RuleSet::new(rules);

    println!("{}", "Rule Check".bold());
    println!(
        "{}: {} ({} rules)\n",
        "Rules".dimmed(),
        rules_path.display(),
        set.rules().len()
    );

    let class_hit = set.match_class(class, class_annotation);
    if class_hit.hits().is_empty() {
        println!("{} no rule applies to class {}", "✗".red(), class.cyan());
        return Ok(());
    }

    println!("{} class {} hit by:", "✓".green(), class.cyan());
    for (index, rule) in class_hit.hits() {
        let reason = if !rule.has_class_criteria() {
            "no class criteria (applies everywhere)".to_string()
        } else if rule.class_name.is_some() {
            "class name".to_string()
        } else {
            "class annotation".to_string()
        };
        println!("  rule {} {}", index.to_string().yellow(), format!("({})", reason).dimmed());
    }

    if class_hit.is_empty() {
        println!(
            "\n{}",
            "Note: none of the hit rules carry method criteria; no call site can match.".yellow()
        );
        return Ok(());
    }

    let Some(method) = method else {
        return Ok(());
    };

    let matched = class_hit.match_method(method, method_annotation);
    if matched.is_empty() {
        println!("\n{} no rule selects method {}", "✗".red(), method.cyan());
        return Ok(());
    }

    println!("\n{} method {} would be injected with:", "✓".green(), method.cyan());
    for (index, rule) in matched {
        let action = HookAction::from_index(index as i64)
            .map(|a| format!("{:?}", a))
            .unwrap_or_else(|| "no runtime behavior".to_string());
        println!(
            "  configuration index {} {} {}",
            index.to_string().yellow(),
            "→".dimmed(),
            action.cyan()
        );
        if let Some(insert) = &rule.insert_code_config {
            println!(
                "    {} {}.{} / {}",
                "hooks:".dimmed(),
                insert.class_name.as_deref().unwrap_or("?"),
                insert.on_method_before.as_deref().unwrap_or("-"),
                insert.on_method_after.as_deref().unwrap_or("-")
            );
        }
    }

    Ok(())
}
