// src/manifest/mod.rs

//! Extras manifest resolution
//!
//! Reads a line-oriented manifest of optional dependency specifiers and folds
//! it into a mapping from install-group tag to the set of specs installed
//! under that tag. One declaration per line:
//!
//! ```text
//! # comment lines and blank lines are skipped
//! foo>=1.0: extra1
//! bar==2.0
//! baz: py37
//! ```
//!
//! Every spec is additionally tagged with its bare package name, so a group
//! can be looked up either by feature tag or by package name. Specs with no
//! explicit runtime-version tag are installable under either supported
//! runtime and land in both `py37` and `py38`. Two groups are derived after
//! the fold: `all` (the union of everything) and `match-py-ver` (a copy of
//! whichever runtime-version group matches the version the resolver was
//! invoked with).

use crate::error::{Error, Result};
use semver::Version;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

/// Group for specs compatible with the 3.7 runtime line
pub const PY37: &str = "py37";

/// Group for specs compatible with the 3.8 runtime line
pub const PY38: &str = "py38";

/// Derived group: union of every spec across every group
pub const ALL: &str = "all";

/// Derived group: alias of whichever runtime-version group matches the
/// version the resolver was invoked with
pub const MATCH_PY_VER: &str = "match-py-ver";

/// Resolved mapping from install-group tag to dependency spec set.
///
/// Tags are case-sensitive and never normalized. Membership is set
/// semantics: a spec appears at most once per group no matter how often it
/// is declared. Ordered for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl TagMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, tag: &str, spec: &str) {
        self.groups
            .entry(tag.to_string())
            .or_default()
            .insert(spec.to_string());
    }

    /// Look up one group's spec set
    pub fn get(&self, tag: &str) -> Option<&BTreeSet<String>> {
        self.groups.get(tag)
    }

    /// Whether any group exists
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups, derived groups included
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Iterate groups in tag order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.groups.iter()
    }

    /// Render as the extras map handed to the packaging layer:
    /// group name -> sorted list of dependency specifiers
    pub fn to_json(&self) -> serde_json::Value {
        let mut out = serde_json::Map::new();
        for (tag, specs) in &self.groups {
            let list: Vec<serde_json::Value> = specs
                .iter()
                .map(|s| serde_json::Value::String(s.clone()))
                .collect();
            out.insert(tag.clone(), serde_json::Value::Array(list));
        }
        serde_json::Value::Object(out)
    }
}

/// Pick the runtime-version group matching `version`.
///
/// `>= 3.8.0` selects [`PY38`], `>= 3.7.0` selects [`PY37`]. Anything below
/// the minimum supported threshold is fatal; there is no "unsupported but
/// tolerated" case.
pub fn runtime_tag(version: &Version) -> Result<&'static str> {
    if *version >= Version::new(3, 8, 0) {
        Ok(PY38)
    } else if *version >= Version::new(3, 7, 0) {
        Ok(PY37)
    } else {
        Err(Error::UnsupportedRuntime {
            found: version.clone(),
        })
    }
}

/// Split one non-comment manifest line into its dependency spec and the full
/// tag set it lands in (explicit tags plus the implicit package-name tag).
///
/// Tags live between the first and second colon; anything after a second
/// colon on the same line is ignored, and manifest authors rely on that
/// truncation.
fn parse_line(line: &str) -> (String, BTreeSet<String>) {
    let (spec, annotation) = match line.find(':') {
        Some(pos) => (&line[..pos], &line[pos + 1..]),
        None => (line, ""),
    };
    let spec = spec.trim().to_string();

    let mut tags = BTreeSet::new();
    let tag_segment = annotation.split(':').next().unwrap_or("");
    for tag in tag_segment.split(',') {
        let tag = tag.trim();
        if !tag.is_empty() {
            tags.insert(tag.to_string());
        }
    }

    // Implicit package-name tag: everything before the first version
    // comparison operator.
    let name = spec
        .split(['<', '=', '>'])
        .next()
        .unwrap_or_default()
        .trim();
    if !name.is_empty() {
        tags.insert(name.to_string());
    }

    (spec, tags)
}

/// Resolve a manifest file into a [`TagMap`].
///
/// The runtime check runs before any file I/O. A missing manifest is not an
/// error: optional dependencies are simply absent, and the result is empty.
/// With `add_all` the derived [`ALL`] and [`MATCH_PY_VER`] groups are
/// synthesized after the fold; `match-py-ver` is present even when its source
/// group is empty.
pub fn resolve(path: &Path, runtime: &Version, add_all: bool) -> Result<TagMap> {
    let current = runtime_tag(runtime)?;

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(TagMap::new()),
        Err(e) => return Err(e.into()),
    };

    let mut map = TagMap::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (spec, tags) = parse_line(line);
        for tag in &tags {
            map.add(tag, &spec);
        }
        if !tags.contains(PY37) && !tags.contains(PY38) {
            // No specific runtime version required
            map.add(PY37, &spec);
            map.add(PY38, &spec);
        }
    }

    if add_all {
        let union: BTreeSet<String> = map.groups.values().flatten().cloned().collect();
        let matched = map.groups.get(current).cloned().unwrap_or_default();
        map.groups.insert(ALL.to_string(), union);
        map.groups.insert(MATCH_PY_VER.to_string(), matched);
    }

    Ok(map)
}
