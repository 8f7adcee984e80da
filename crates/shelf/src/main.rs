// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shelf - a pluggable file server.
//!
//! This is the binary entry point: it parses the command line, loads the
//! configuration, and hands off to the selected subcommand.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod check;
mod plugins;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Shelf - a pluggable file server.
#[derive(Parser, Debug)]
#[command(name = "shelf", version, about, long_about = None)]
struct Cli {
    /// Configuration file merged over the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the file server (default).
    Serve,
    /// List the discovered capabilities in dispatch order.
    Plugins {
        /// Output JSON instead of a table.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Resolve plugin settings and verify each of them.
    Check {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match shelf_config::load_and_validate(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(errors) => {
            shelf_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&loaded.config.logging.level);

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(loaded).await,
        Commands::Plugins { json, plain } => plugins::run_plugins(&loaded, json, plain),
        Commands::Check { plain } => match check::run_check(&loaded, plain) {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(1),
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber for every subcommand.
///
/// Logs go to stderr so `plugins --json` keeps stdout clean. `RUST_LOG` wins
/// over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

fn default_directives(log_level: &str) -> String {
    format!(
        "shelf={log_level},shelf_plugin={log_level},shelf_dispatch={log_level},\
         shelf_basic={log_level},shelf_gateway={log_level},tower_http=info,warn"
    )
}
