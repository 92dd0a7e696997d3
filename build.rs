// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("garnish")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Garnish Contributors")
        .about("Resolve install extras and register shell completions")
        .subcommand(
            Command::new("resolve")
                .about("Resolve the extras manifest into install groups")
                .arg(
                    Arg::new("manifest")
                        .short('m')
                        .long("manifest")
                        .value_name("PATH")
                        .default_value("extra-requirements.txt")
                        .help("Path to the extras manifest"),
                )
                .arg(
                    Arg::new("runtime_version")
                        .long("runtime-version")
                        .value_name("X.Y.Z")
                        .required(true)
                        .help("Target runtime version the install groups discriminate on"),
                )
                .arg(
                    Arg::new("no_all")
                        .long("no-all")
                        .action(clap::ArgAction::SetTrue)
                        .help("Skip the derived `all` and `match-py-ver` groups"),
                )
                .arg(
                    Arg::new("tag")
                        .short('t')
                        .long("tag")
                        .help("Print only this group's specs, one per line"),
                ),
        )
        .subcommand(
            Command::new("register")
                .about("Append autocomplete snippets to shell startup files (idempotent)"),
        )
        .subcommand(
            Command::new("completions")
                .about("Emit garnish's own completion script for the given shell")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .help("Shell to generate completions for"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    // Generate main man page
    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("garnish.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
        return;
    }

    println!("cargo:warning=Man page generated at {}", man_path.display());
}
