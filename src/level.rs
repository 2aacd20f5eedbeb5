//! Flat-text level files.
//!
//! A level file lists one static collider per line as four whitespace
//! separated numbers, `minX minZ maxX maxZ`. Corners may be given in either
//! order. Blank lines and lines starting with `#` or `//` (after leading
//! whitespace) are ignored. A malformed line is logged and skipped; parsing
//! always continues. A load that yields no colliders counts as a failure so
//! the caller can substitute [`fallback_layout`].

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::collision::StaticCollider;

/// Errors raised while loading a level file.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The file could not be opened or read.
    #[error("failed to read level {path}: {source}")]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// A line that did not describe a collider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// One-based line number.
    pub line_number: usize,
    /// The line as it appeared in the file.
    pub content: String,
    /// Why the line was rejected.
    pub reason: String,
}

/// Outcome of parsing a level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelLoad {
    /// Colliders in file order.
    pub colliders: Vec<StaticCollider>,
    /// Malformed lines, in file order.
    pub skipped: Vec<SkippedLine>,
}

impl LevelLoad {
    /// A load with no colliders is a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Consumes the load, returning its colliders or the fallback layout when
    /// the load failed.
    #[must_use]
    pub fn into_colliders_or_fallback(self) -> Vec<StaticCollider> {
        if self.is_failure() {
            fallback_layout()
        } else {
            self.colliders
        }
    }
}

fn is_comment_or_blank(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//")
}

fn parse_collider(line: &str) -> Result<StaticCollider, String> {
    let mut values = [0.0_f32; 4];
    let mut tokens = line.split_whitespace();
    for (slot, name) in values.iter_mut().zip(["minX", "minZ", "maxX", "maxZ"]) {
        let token = tokens.next().ok_or_else(|| format!("missing {name}"))?;
        *slot = token
            .parse::<f32>()
            .map_err(|e| format!("{name} `{token}`: {e}"))?;
        if !slot.is_finite() {
            return Err(format!("{name} `{token}` is not finite"));
        }
    }
    let [min_x, min_z, max_x, max_z] = values;
    Ok(StaticCollider::new(min_x, min_z, max_x, max_z))
}

/// Parses level text. `source` names the text in diagnostics.
///
/// # Examples
/// ```
/// use locomotion::level::parse_level;
/// let load = parse_level("arena", "0 0 5 5\n# comment\nbad line\n-5 -5 0 0\n");
/// assert_eq!(load.colliders.len(), 2);
/// assert_eq!(load.skipped.len(), 1);
/// assert!(!load.is_failure());
/// ```
#[must_use]
pub fn parse_level(source: &str, text: &str) -> LevelLoad {
    let mut load = LevelLoad::default();
    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        if is_comment_or_blank(line) {
            continue;
        }
        match parse_collider(line) {
            Ok(collider) => load.colliders.push(collider),
            Err(reason) => {
                warn!("parse error at {source}:{line_number} -> '{line}' ({reason})");
                load.skipped.push(SkippedLine {
                    line_number,
                    content: line.to_owned(),
                    reason,
                });
            }
        }
    }

    if load.is_failure() {
        warn!("no colliders loaded from '{source}'");
    } else {
        info!("loaded {} colliders from '{source}'", load.colliders.len());
    }
    load
}

/// Reads and parses a level file.
///
/// # Errors
/// Returns [`LevelError::Read`] when the file cannot be read. Malformed lines
/// and empty levels are reported through [`LevelLoad`] instead.
pub fn load_level(path: impl AsRef<Path>) -> Result<LevelLoad, LevelError> {
    let file = path.as_ref();
    let text = fs::read_to_string(file).map_err(|source| LevelError::Read {
        path: file.to_path_buf(),
        source,
    })?;
    Ok(parse_level(&file.display().to_string(), &text))
}

/// A small walled arena used when no level could be loaded.
///
/// Four walls enclose a 40 by 40 metre floor centred on the origin, with two
/// pillars near the middle.
#[must_use]
pub fn fallback_layout() -> Vec<StaticCollider> {
    vec![
        StaticCollider::new(-21.0, -21.0, 21.0, -20.0),
        StaticCollider::new(-21.0, 20.0, 21.0, 21.0),
        StaticCollider::new(-21.0, -20.0, -20.0, 20.0),
        StaticCollider::new(20.0, -20.0, 21.0, 20.0),
        StaticCollider::new(-6.0, 4.0, -4.0, 6.0),
        StaticCollider::new(4.0, -6.0, 6.0, -4.0),
    ]
}
