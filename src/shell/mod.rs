// src/shell/mod.rs

//! Shell completion registration
//!
//! Appends an autocomplete snippet to each of the user's shell startup files
//! (zsh, bash, fish), exactly once. A marker comment inside the snippet gates
//! the append: if the startup file already contains the marker on any line,
//! the file is left byte-for-byte untouched, so repeated installs never
//! duplicate the registration.
//!
//! The whole pass is best-effort. A startup file that does not exist means
//! that shell is not installed for this user and the target is skipped; any
//! read or append failure is recorded in the outcome list and otherwise
//! ignored. Shell integration is a convenience and must never fail the
//! surrounding install.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Marker comment carried by every snippet; its presence in a startup file
/// means the snippet was already appended
pub const MARKER: &str = "# Garnish CLI Autocomplete";

const ZSH_SNIPPET: &str = include_str!("../../resources/completions/garnish.zsh");
const BASH_SNIPPET: &str = include_str!("../../resources/completions/garnish.bash");
const FISH_SNIPPET: &str = include_str!("../../resources/completions/garnish.fish");

/// One candidate shell startup file and the snippet to register in it
#[derive(Debug, Clone)]
pub struct ShellTarget {
    /// Startup file to patch
    pub path: PathBuf,
    /// Text appended when the marker is absent
    pub snippet: &'static str,
    /// Substring whose presence means "already registered"
    pub marker: &'static str,
}

/// What happened to one target during a registration pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// Startup file does not exist; that shell is presumed not installed
    Skipped,
    /// Marker already present, file left untouched
    AlreadyRegistered,
    /// Snippet appended
    Registered,
    /// Inspection or append failed; the failure was ignored
    Failed,
}

impl fmt::Display for RegisterOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RegisterOutcome::Skipped => "skipped (shell not installed)",
            RegisterOutcome::AlreadyRegistered => "already registered",
            RegisterOutcome::Registered => "registered",
            RegisterOutcome::Failed => "failed (ignored)",
        };
        f.write_str(s)
    }
}

/// The three conventional per-user targets, checked in zsh, bash, fish order.
///
/// Empty when no home directory can be determined, which turns the whole
/// registration pass into a no-op.
pub fn default_targets() -> Vec<ShellTarget> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };
    vec![
        ShellTarget {
            path: home.join(".zshrc"),
            snippet: ZSH_SNIPPET,
            marker: MARKER,
        },
        ShellTarget {
            path: home.join(".bashrc"),
            snippet: BASH_SNIPPET,
            marker: MARKER,
        },
        ShellTarget {
            path: home.join(".config").join("fish").join("config.fish"),
            snippet: FISH_SNIPPET,
            marker: MARKER,
        },
    ]
}

/// Scan the file line by line for the marker, stopping at the first hit.
fn is_registered(path: &Path, marker: &str) -> io::Result<bool> {
    let file = File::open(path)?;
    for line in BufReader::new(file).lines() {
        if line?.contains(marker) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Register one target: skip if the startup file is absent, append the
/// snippet unless the marker is already present.
pub fn register_target(target: &ShellTarget) -> io::Result<RegisterOutcome> {
    if !target.path.exists() {
        return Ok(RegisterOutcome::Skipped);
    }
    if is_registered(&target.path, target.marker)? {
        return Ok(RegisterOutcome::AlreadyRegistered);
    }
    let mut file = OpenOptions::new().append(true).open(&target.path)?;
    file.write_all(target.snippet.as_bytes())?;
    Ok(RegisterOutcome::Registered)
}

/// Run the registration pass over every target, collecting per-target
/// outcomes. Failures are intentionally ignored, not silently lost: they
/// show up as [`RegisterOutcome::Failed`] in the returned list and at debug
/// level in the log, but never propagate to the caller.
pub fn register_all(targets: &[ShellTarget]) -> Vec<(PathBuf, RegisterOutcome)> {
    let mut outcomes = Vec::with_capacity(targets.len());
    for target in targets {
        let outcome = match register_target(target) {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!("could not patch {}: {}", target.path.display(), e);
                RegisterOutcome::Failed
            }
        };
        outcomes.push((target.path.clone(), outcome));
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippets_carry_marker() {
        // The marker gates idempotency; a snippet without it would be
        // re-appended on every install.
        for snippet in [ZSH_SNIPPET, BASH_SNIPPET, FISH_SNIPPET] {
            assert!(
                snippet.lines().any(|l| l.contains(MARKER)),
                "snippet missing marker comment"
            );
        }
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(RegisterOutcome::Registered.to_string(), "registered");
        assert_eq!(
            RegisterOutcome::Skipped.to_string(),
            "skipped (shell not installed)"
        );
    }
}
