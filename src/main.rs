// src/main.rs

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use semver::Version;
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "garnish")]
#[command(author, version, about = "Resolve install extras and register shell completions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the extras manifest into install groups
    Resolve {
        /// Path to the extras manifest
        #[arg(short, long, default_value = "extra-requirements.txt")]
        manifest: PathBuf,
        /// Target runtime version the install groups discriminate on
        #[arg(long, value_name = "X.Y.Z")]
        runtime_version: Version,
        /// Skip the derived `all` and `match-py-ver` groups
        #[arg(long)]
        no_all: bool,
        /// Print only this group's specs, one per line
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Append autocomplete snippets to shell startup files (idempotent)
    Register,
    /// Emit garnish's own completion script for the given shell
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            manifest,
            runtime_version,
            no_all,
            tag,
        } => {
            info!(
                "Resolving extras from {} for runtime {}",
                manifest.display(),
                runtime_version
            );
            let map = garnish::resolve(&manifest, &runtime_version, !no_all)?;

            match tag {
                Some(tag) => {
                    let specs = map
                        .get(&tag)
                        .ok_or_else(|| anyhow::anyhow!("unknown install group: {}", tag))?;
                    for spec in specs {
                        println!("{}", spec);
                    }
                }
                None => {
                    println!("{}", serde_json::to_string_pretty(&map.to_json())?);
                }
            }
            Ok(())
        }
        Commands::Register => {
            let targets = garnish::default_targets();
            if targets.is_empty() {
                info!("No home directory found, nothing to register");
                return Ok(());
            }
            for (path, outcome) in garnish::register_all(&targets) {
                info!("{}: {}", path.display(), outcome);
            }
            Ok(())
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "garnish", &mut io::stdout());
            Ok(())
        }
    }
}
