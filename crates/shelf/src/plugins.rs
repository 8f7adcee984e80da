// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shelf plugins` command implementation.
//!
//! Runs discovery exactly as `serve` would and prints the registered
//! capabilities in dispatch order, with their module and settings state.

use std::io::IsTerminal;

use shelf_config::LoadedConfig;
use shelf_core::ShelfError;
use shelf_plugin::{CapabilitySummary, SettingsState};

use crate::serve::{build_registry, module_table};

/// Run the `shelf plugins` command.
pub fn run_plugins(loaded: &LoadedConfig, json: bool, plain: bool) -> Result<(), ShelfError> {
    let registry = build_registry(loaded, &module_table());
    let summaries = registry.summaries();

    if json {
        let rendered = serde_json::to_string_pretty(&to_json(&summaries))
            .map_err(|e| ShelfError::Internal(format!("failed to render plugin list: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    println!();
    println!("  shelf plugins");
    println!("  {}", "-".repeat(60));

    if summaries.is_empty() {
        println!("    no capabilities registered");
        println!(
            "    scanned: {}",
            loaded.config.plugins.effective_directories().join(", ")
        );
    }

    for summary in &summaries {
        println!("{}", format_line(summary, use_color));
    }

    println!();
    Ok(())
}

fn to_json(summaries: &[CapabilitySummary]) -> serde_json::Value {
    summaries
        .iter()
        .map(|s| {
            serde_json::json!({
                "contract": s.contract.to_string(),
                "name": s.name,
                "module": s.module,
                "settings_section": s.settings_section,
                "settings": s.settings.to_string(),
            })
        })
        .collect()
}

fn format_line(summary: &CapabilitySummary, use_color: bool) -> String {
    let settings = match summary.settings_section {
        Some(section) => format!("{section} ({})", summary.settings),
        None => "-".to_string(),
    };
    let settings = if use_color {
        use colored::Colorize;
        match summary.settings {
            SettingsState::Unresolved => settings.red().to_string(),
            SettingsState::Resolved(_) => settings.green().to_string(),
            SettingsState::None => settings,
        }
    } else {
        settings
    };
    format!(
        "    {:<12} {:<16} {:<16} {settings}",
        summary.contract.to_string(),
        summary.name,
        summary.module
    )
}
