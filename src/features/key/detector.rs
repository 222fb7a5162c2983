//! Key detection algorithm
//!
//! Correlates a clip-level chroma vector against the 24 rotated
//! Krumhansl-Schmuckler templates and picks the best-correlated key.
//!
//! # Reference
//!
//! Krumhansl, C. L. (1990). *Cognitive Foundations of Musical Pitch*. Oxford University Press.

use super::{correlation::pearson, templates::KeyTemplates, KeyDetectionResult};
use crate::analysis::result::{Key, KeyEstimate};
use crate::features::chroma::ChromaVector;

/// Number of ranked alternatives kept in `top_keys`
const TOP_N: usize = 3;

/// Templates shared by every call; read-only
static TEMPLATES: KeyTemplates = KeyTemplates::new();

/// Estimate the key of a clip from its chroma vector
///
/// Confidence is the winning correlation clamped to [0, 1]. A chroma vector
/// with no pitch-class contrast (silence, perfectly flat spectrum) returns
/// [`KeyEstimate::fallback`]: C major with confidence 0.
///
/// # Example
///
/// ```
/// use tonic_dsp::features::chroma::ChromaVector;
/// use tonic_dsp::features::key::{estimate_key, templates::{rotate, MINOR_PROFILE}};
/// use tonic_dsp::Key;
///
/// let chroma = ChromaVector::new(rotate(&MINOR_PROFILE, 9))?;
/// let estimate = estimate_key(&chroma);
/// assert_eq!(estimate.key, Key::Minor(9));
/// assert!(estimate.confidence > 0.999);
/// # Ok::<(), tonic_dsp::AnalysisError>(())
/// ```
pub fn estimate_key(chroma: &ChromaVector) -> KeyEstimate {
    let result = detect_key(chroma, &TEMPLATES);
    KeyEstimate {
        key: result.key,
        confidence: result.confidence,
        correlation: result.correlation,
        degenerate: result.degenerate,
    }
}

/// Detect musical key from a chroma vector, keeping all 24 hypothesis scores
///
/// Major roots 0-11 are searched first, then minor roots 0-11. Within a mode
/// the lowest root wins among equal correlations; across modes minor is only
/// chosen when its best correlation is strictly greater than the best major one.
pub fn detect_key(chroma: &ChromaVector, templates: &KeyTemplates) -> KeyDetectionResult {
    let values = chroma.values();
    log::debug!("Detecting key from chroma {:?}", values);

    let mut major_scores = [0.0f64; 12];
    let mut minor_scores = [0.0f64; 12];
    for root in 0..12u32 {
        let (Some(major), Some(minor)) = (
            pearson(values, &templates.major(root)),
            pearson(values, &templates.minor(root)),
        ) else {
            log::warn!("Chroma has zero variance; falling back to C major with confidence 0");
            return KeyDetectionResult::degenerate();
        };
        major_scores[root as usize] = major;
        minor_scores[root as usize] = minor;
    }

    let (key, correlation) = select_best(&major_scores, &minor_scores);
    let confidence = correlation.clamp(0.0, 1.0) as f32;

    let mut all_scores: Vec<(Key, f32)> = Vec::with_capacity(24);
    all_scores.extend((0..12u32).map(|r| (Key::Major(r), major_scores[r as usize] as f32)));
    all_scores.extend((0..12u32).map(|r| (Key::Minor(r), minor_scores[r as usize] as f32)));
    // Stable sort keeps search order among equal scores.
    all_scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let top_keys: Vec<(Key, f32)> = all_scores.iter().take(TOP_N).cloned().collect();

    log::debug!(
        "Detected key: {}, correlation: {:.4}, confidence: {:.4}",
        key,
        correlation,
        confidence
    );

    KeyDetectionResult {
        key,
        confidence,
        correlation: correlation as f32,
        all_scores,
        top_keys,
        degenerate: false,
    }
}

/// Pick the winning hypothesis from per-root correlations
fn select_best(major_scores: &[f64; 12], minor_scores: &[f64; 12]) -> (Key, f64) {
    let (major_root, best_major) = argmax(major_scores);
    let (minor_root, best_minor) = argmax(minor_scores);

    if best_minor > best_major {
        (Key::Minor(minor_root), best_minor)
    } else {
        (Key::Major(major_root), best_major)
    }
}

/// First index holding the maximum value
fn argmax(scores: &[f64; 12]) -> (u32, f64) {
    let mut best = (0u32, scores[0]);
    for (i, &s) in scores.iter().enumerate().skip(1) {
        if s > best.1 {
            best = (i as u32, s);
        }
    }
    best
}
