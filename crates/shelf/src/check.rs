// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shelf check` command implementation.
//!
//! Runs discovery, then verifies every resolved plugin settings record and
//! every capability that declared settings which could not be resolved.

use std::io::IsTerminal;

use shelf_config::LoadedConfig;
use shelf_config::validation::pattern_warnings;
use shelf_core::ShelfError;
use shelf_plugin::scanner::resolve_directory;
use shelf_plugin::{CapabilityRegistry, SettingsOrigin, SettingsState};

use crate::serve::{build_registry, module_table};

/// Status of a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    fn new(name: impl Into<String>, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
        }
    }
}

/// Run the `shelf check` command.
///
/// Returns `Ok(false)` when any check failed.
pub fn run_check(loaded: &LoadedConfig, plain: bool) -> Result<bool, ShelfError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let mut results = Vec::new();
    results.extend(check_patterns(loaded));
    results.extend(check_directories(loaded));

    let registry = build_registry(loaded, &module_table());
    results.extend(check_registry(&registry));

    println!();
    println!("  shelf check");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", format_result(result, use_color));
    }
    println!();

    let failures = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count();
    let warnings = results
        .iter()
        .filter(|r| r.status == CheckStatus::Warn)
        .count();
    if failures + warnings == 0 {
        println!("  All checks passed.");
    } else {
        let issues = failures + warnings;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    }
    println!();

    Ok(failures == 0)
}

fn check_patterns(loaded: &LoadedConfig) -> Vec<CheckResult> {
    pattern_warnings(&loaded.config)
        .into_iter()
        .map(|warning| CheckResult::new("Exclusions", CheckStatus::Warn, warning))
        .collect()
}

fn check_directories(loaded: &LoadedConfig) -> Vec<CheckResult> {
    loaded
        .config
        .plugins
        .effective_directories()
        .into_iter()
        .map(|directory| match resolve_directory(&directory) {
            Some(path) => CheckResult::new(
                "Plugin directory",
                CheckStatus::Pass,
                path.display().to_string(),
            ),
            None => CheckResult::new(
                "Plugin directory",
                CheckStatus::Warn,
                format!("{directory} does not exist"),
            ),
        })
        .collect()
}

/// Verify each resolved settings record once, and flag unresolved ones.
pub fn check_registry(registry: &CapabilityRegistry) -> Vec<CheckResult> {
    let mut results = Vec::new();

    if registry.is_empty() {
        results.push(CheckResult::new(
            "Capabilities",
            CheckStatus::Warn,
            "no capabilities registered",
        ));
    }

    for settings in registry.settings().iter() {
        let mut errors = Vec::new();
        let origin = match settings.origin() {
            SettingsOrigin::Configured => "configured",
            SettingsOrigin::Generated => "generated",
        };
        if settings.verify(&mut errors) && errors.is_empty() {
            results.push(CheckResult::new(settings.section(), CheckStatus::Pass, origin));
        } else {
            results.push(CheckResult::new(
                settings.section(),
                CheckStatus::Fail,
                format!("{origin}: {}", errors.join("; ")),
            ));
        }
    }

    for summary in registry.summaries() {
        if summary.settings == SettingsState::Unresolved {
            results.push(CheckResult::new(
                summary.name,
                CheckStatus::Fail,
                format!(
                    "settings {} could not be resolved",
                    summary.settings_section.unwrap_or("-")
                ),
            ));
        }
    }

    results
}

fn format_result(result: &CheckResult, use_color: bool) -> String {
    if !use_color {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        return format!("    {tag} {:<26} {}", result.name, result.message);
    }

    use colored::Colorize;
    let (symbol, message) = match result.status {
        CheckStatus::Pass => ("✓".green(), result.message.normal()),
        CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
        CheckStatus::Fail => ("✗".red(), result.message.red()),
    };
    format!("    {symbol} {:<26} {message}", result.name)
}
