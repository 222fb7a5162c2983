//! Key detection modules
//!
//! Detect musical key using:
//! - Krumhansl-Schmuckler templates (24 keys from 2 rotated profiles)
//! - Pearson correlation template matching

pub mod correlation;
pub mod detector;
pub mod templates;

pub use detector::{detect_key, estimate_key};
pub use templates::{KeyTemplates, MAJOR_PROFILE, MINOR_PROFILE};

use crate::analysis::result::Key;

/// Key detection result
#[derive(Debug, Clone)]
pub struct KeyDetectionResult {
    /// Detected key (best match)
    pub key: Key,

    /// Confidence score (0.0-1.0)
    pub confidence: f32,

    /// Raw correlation of the detected key (-1.0-1.0)
    pub correlation: f32,

    /// All 24 key correlations (ranked, highest first)
    ///
    /// Empty for degenerate input.
    pub all_scores: Vec<(Key, f32)>,

    /// Top 3 keys with correlations
    /// Useful for ambiguous cases or DJ key mixing
    pub top_keys: Vec<(Key, f32)>,

    /// Chroma had zero variance; `key` is the C major fallback
    pub degenerate: bool,
}

impl KeyDetectionResult {
    /// Result for chroma with no pitch-class contrast
    pub fn degenerate() -> Self {
        Self {
            key: Key::Major(0),
            confidence: 0.0,
            correlation: 0.0,
            all_scores: Vec::new(),
            top_keys: Vec::new(),
            degenerate: true,
        }
    }
}
