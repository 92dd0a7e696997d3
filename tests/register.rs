// tests/register.rs

//! Shell registrar tests: marker-gated append, idempotency, best-effort pass.

use garnish::{register_all, register_target, RegisterOutcome, ShellTarget, MARKER};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SNIPPET: &str = "# Garnish CLI Autocomplete\neval \"$(garnish completions bash)\"\n";

fn target(path: &Path) -> ShellTarget {
    ShellTarget {
        path: path.to_path_buf(),
        snippet: SNIPPET,
        marker: MARKER,
    }
}

#[test]
fn test_first_run_appends_snippet() {
    let dir = TempDir::new().unwrap();
    let rc = dir.path().join(".bashrc");
    fs::write(&rc, "export PATH=$HOME/bin:$PATH\n").unwrap();

    let outcome = register_target(&target(&rc)).unwrap();
    assert_eq!(outcome, RegisterOutcome::Registered);

    let content = fs::read_to_string(&rc).unwrap();
    assert_eq!(
        content,
        format!("export PATH=$HOME/bin:$PATH\n{}", SNIPPET),
        "snippet must be appended after the original content"
    );
}

#[test]
fn test_second_run_leaves_file_unchanged() {
    let dir = TempDir::new().unwrap();
    let rc = dir.path().join(".zshrc");
    fs::write(&rc, "setopt autocd\n").unwrap();

    register_target(&target(&rc)).unwrap();
    let after_first = fs::read_to_string(&rc).unwrap();

    let outcome = register_target(&target(&rc)).unwrap();
    assert_eq!(outcome, RegisterOutcome::AlreadyRegistered);
    assert_eq!(
        fs::read_to_string(&rc).unwrap(),
        after_first,
        "repeat registration must be byte-for-byte idempotent"
    );
}

#[test]
fn test_marker_anywhere_in_file_counts() {
    let dir = TempDir::new().unwrap();
    let rc = dir.path().join(".bashrc");
    fs::write(
        &rc,
        format!("alias ll='ls -l'\n{}\nexport EDITOR=vim\n", MARKER),
    )
    .unwrap();

    let outcome = register_target(&target(&rc)).unwrap();
    assert_eq!(outcome, RegisterOutcome::AlreadyRegistered);
}

#[test]
fn test_missing_file_skipped_not_created() {
    let dir = TempDir::new().unwrap();
    let rc = dir.path().join(".config").join("fish").join("config.fish");

    let outcome = register_target(&target(&rc)).unwrap();
    assert_eq!(outcome, RegisterOutcome::Skipped);
    assert!(!rc.exists(), "skipping must not create the startup file");
}

#[test]
fn test_pass_survives_unpatchable_target() {
    let dir = TempDir::new().unwrap();
    // A directory at the target path makes both the scan and the append fail
    let broken = dir.path().join(".bashrc");
    fs::create_dir(&broken).unwrap();
    let good = dir.path().join(".zshrc");
    fs::write(&good, "setopt autocd\n").unwrap();

    let outcomes = register_all(&[target(&broken), target(&good)]);

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].1, RegisterOutcome::Failed);
    assert_eq!(
        outcomes[1].1,
        RegisterOutcome::Registered,
        "one broken target must not stop the pass"
    );
    assert!(fs::read_to_string(&good).unwrap().contains(MARKER));
}

#[test]
fn test_default_targets_shape() {
    let targets = garnish::default_targets();
    // Empty only on hosts with no resolvable home directory
    if !targets.is_empty() {
        assert_eq!(targets.len(), 3);
        let names: Vec<String> = targets
            .iter()
            .map(|t| t.path.to_string_lossy().into_owned())
            .collect();
        assert!(names[0].ends_with(".zshrc"));
        assert!(names[1].ends_with(".bashrc"));
        assert!(names[2].ends_with("config.fish"));
        for t in &targets {
            assert!(t.snippet.contains(t.marker));
        }
    }
}
