//! Parser configuration.

use std::path::PathBuf;

/// Knobs for the classification heuristics.
///
/// Different document families key headings and styling differently; the
/// profile makes the thresholds explicit instead of hard-coding one family's
/// conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "cli",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HeuristicProfile {
    /// Lower bound (points, exclusive) for the font-size fallback that
    /// classifies an unstyled paragraph as `h4`.
    pub size_heading_min: u32,
    /// Upper bound (points, exclusive) for the same fallback.
    pub size_heading_max: u32,
    /// Whether emitted tags carry the [`crate::StyleSheet`] attributes.
    /// `false` reproduces the bare-tag output some consumers expect.
    pub styled: bool,
}

impl Default for HeuristicProfile {
    fn default() -> Self {
        Self {
            size_heading_min: 12,
            size_heading_max: 18,
            styled: true,
        }
    }
}

impl HeuristicProfile {
    /// Default thresholds, but tags are emitted without style attributes.
    pub fn unstyled() -> Self {
        Self {
            styled: false,
            ..Self::default()
        }
    }
}

/// Settings supplied when constructing a [`crate::DocxParser`].
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "cli",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ParserConfig {
    /// Destination directory for extracted images. Created if missing; must
    /// end up writable or construction fails.
    pub images_dir: PathBuf,
    /// Paragraphs and runs whose plain text exactly matches one of these
    /// strings are suppressed.
    pub exclude: Vec<String>,
    /// Classification heuristics.
    pub profile: HeuristicProfile,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("images"),
            exclude: Vec::new(),
            profile: HeuristicProfile::default(),
        }
    }
}

impl ParserConfig {
    pub fn with_images_dir(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
            ..Self::default()
        }
    }
}
