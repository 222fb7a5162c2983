//! Chroma modules
//!
//! A chroma vector is the 12-bin pitch-class energy profile (C through B)
//! of a clip, aggregated over time. Extraction is a swappable capability:
//! - [`SpectralChromaExtractor`]: STFT magnitudes folded onto pitch classes
//! - [`UnavailableChromaExtractor`]: the null capability, always fails

pub mod extractor;

pub use extractor::{SpectralChromaExtractor, UnavailableChromaExtractor};

use crate::error::AnalysisError;

/// Number of pitch classes
pub const N_PITCH_CLASSES: usize = 12;

/// Time-aggregated pitch-class energy profile (index 0 = C)
///
/// Entries are finite and non-negative. No normalization is applied; the key
/// estimator is invariant to positive scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromaVector([f32; N_PITCH_CLASSES]);

impl ChromaVector {
    /// Wrap a 12-bin energy array
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if any entry is negative, NaN or infinite.
    pub fn new(values: [f32; N_PITCH_CLASSES]) -> Result<Self, AnalysisError> {
        if let Some((i, v)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(AnalysisError::InvalidInput(format!(
                "Chroma bin {} must be finite and non-negative, got {}",
                i, v
            )));
        }
        Ok(Self(values))
    }

    /// Build from a slice that must hold exactly 12 entries
    pub fn from_slice(values: &[f32]) -> Result<Self, AnalysisError> {
        let array: [f32; N_PITCH_CLASSES] = values.try_into().map_err(|_| {
            AnalysisError::InvalidInput(format!(
                "Chroma vectors must have 12 elements, got {}",
                values.len()
            ))
        })?;
        Self::new(array)
    }

    /// Average per-frame chroma vectors into one clip-level vector
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if `frames` is empty, any frame
    /// does not have 12 elements, or any value is negative or non-finite.
    pub fn mean_of(frames: &[Vec<f32>]) -> Result<Self, AnalysisError> {
        if frames.is_empty() {
            return Err(AnalysisError::InvalidInput("Empty chroma vectors".to_string()));
        }

        let mut sum = [0.0f64; N_PITCH_CLASSES];
        for (i, frame) in frames.iter().enumerate() {
            if frame.len() != N_PITCH_CLASSES {
                return Err(AnalysisError::InvalidInput(format!(
                    "Chroma vector at index {} has {} elements, expected 12",
                    i,
                    frame.len()
                )));
            }
            for (acc, &v) in sum.iter_mut().zip(frame.iter()) {
                *acc += v as f64;
            }
        }

        let n = frames.len() as f64;
        let mut mean = [0.0f32; N_PITCH_CLASSES];
        for (m, s) in mean.iter_mut().zip(sum.iter()) {
            *m = (s / n) as f32;
        }
        Self::new(mean)
    }

    /// Pitch-class energies
    pub fn values(&self) -> &[f32; N_PITCH_CLASSES] {
        &self.0
    }

    /// Multiply every bin by a positive factor
    pub fn scaled(&self, factor: f32) -> Result<Self, AnalysisError> {
        let mut values = self.0;
        for v in values.iter_mut() {
            *v *= factor;
        }
        Self::new(values)
    }

    /// Rotate right by `offset` semitones (bin `i` moves to `i + offset`)
    pub fn rotated(&self, offset: usize) -> Self {
        Self(crate::features::key::templates::rotate(&self.0, offset))
    }
}

/// Chroma extraction capability
///
/// Implementations turn mono PCM into a clip-level [`ChromaVector`]. The
/// null implementation lets callers run the full pipeline when no extractor
/// is available and get a degraded result instead of a crash.
pub trait ChromaExtractor: Send + Sync {
    /// Extract the time-aggregated chroma vector from mono samples
    fn extract_chroma(&self, samples: &[f32], sample_rate: u32) -> Result<ChromaVector, AnalysisError>;

    /// Get the name of this extractor (for logging)
    fn name(&self) -> &'static str;

    /// Whether this extractor can produce chroma at all
    fn is_available(&self) -> bool {
        true
    }
}
