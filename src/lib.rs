// src/lib.rs

//! Garnish Packaging Helper
//!
//! Resolves a tagged optional-dependency manifest into named install groups
//! ("extras") and registers shell autocomplete snippets in the user's shell
//! startup files.
//!
//! # Architecture
//!
//! - Manifest resolver: one fold over manifest lines into a tag -> spec-set
//!   map, then a derivation pass for the `all` aggregate and the
//!   runtime-matched `match-py-ver` alias
//! - Shell registrar: marker-gated, append-only patching of `~/.zshrc`,
//!   `~/.bashrc`, and fish's `config.fish`; best-effort by policy
//! - No persisted state: the resolver is a pure function of (manifest
//!   contents, runtime version); the registrar's appended text is the only
//!   durable output, and it lives in the user's shell configuration

mod error;
pub mod manifest;
pub mod shell;

pub use error::{Error, Result};
pub use manifest::{resolve, runtime_tag, TagMap, ALL, MATCH_PY_VER, PY37, PY38};
pub use shell::{
    default_targets, register_all, register_target, RegisterOutcome, ShellTarget, MARKER,
};
