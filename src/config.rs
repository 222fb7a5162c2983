//! Configuration parameters for key analysis

use crate::error::AnalysisError;

/// Analysis window selection within a full track
///
/// The window starts `start_fraction` of the way into the track and lasts
/// `duration_seconds` (or until the end of the track, whichever comes first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExcerptConfig {
    /// Start position as a fraction of the track duration (default: 0.20)
    pub start_fraction: f32,

    /// Excerpt length in seconds (default: 30.0)
    pub duration_seconds: f32,
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        Self {
            start_fraction: 0.20,
            duration_seconds: 30.0,
        }
    }
}

/// Analysis configuration parameters
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Sample rate assumed for raw PCM input (default: 44100)
    pub sample_rate: u32,

    // STFT parameters
    /// Frame size for STFT (default: 4096)
    ///
    /// At 44.1 kHz this gives ~10.8 Hz per bin, enough to separate adjacent
    /// semitones from about C2 upwards.
    pub frame_size: usize,

    /// Hop size for STFT (default: 2048)
    pub hop_size: usize,

    // Chroma extraction
    /// Lowest frequency folded into the chroma (default: 65.0 Hz, ~C2)
    pub min_frequency: f32,

    /// Highest frequency folded into the chroma (default: 2000.0 Hz)
    pub max_frequency: f32,

    /// Reference frequency for pitch class mapping (default: 440.0 Hz, A4)
    pub reference_frequency: f32,

    /// Optional analysis window for full tracks (default: None = whole input)
    pub excerpt: Option<ExcerptConfig>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            frame_size: 4096,
            hop_size: 2048,
            min_frequency: 65.0,
            max_frequency: 2000.0,
            reference_frequency: 440.0,
            excerpt: None,
        }
    }
}

impl AnalysisConfig {
    /// Check that all parameters are usable
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` naming the first offending parameter.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.sample_rate == 0 {
            return Err(AnalysisError::InvalidInput("sample_rate must be > 0".to_string()));
        }
        if self.frame_size == 0 || self.hop_size == 0 {
            return Err(AnalysisError::InvalidInput(format!(
                "frame_size and hop_size must be > 0 (got {} / {})",
                self.frame_size, self.hop_size
            )));
        }
        if self.hop_size > self.frame_size {
            return Err(AnalysisError::InvalidInput(format!(
                "hop_size {} exceeds frame_size {}",
                self.hop_size, self.frame_size
            )));
        }
        if !(self.min_frequency > 0.0) || !(self.max_frequency > self.min_frequency) {
            return Err(AnalysisError::InvalidInput(format!(
                "invalid frequency range {:.1}-{:.1} Hz",
                self.min_frequency, self.max_frequency
            )));
        }
        if !(self.reference_frequency > 0.0) {
            return Err(AnalysisError::InvalidInput(
                "reference_frequency must be > 0".to_string(),
            ));
        }
        if let Some(excerpt) = &self.excerpt {
            if !(0.0..1.0).contains(&excerpt.start_fraction) {
                return Err(AnalysisError::InvalidInput(format!(
                    "excerpt start_fraction must be in [0, 1), got {}",
                    excerpt.start_fraction
                )));
            }
            if !(excerpt.duration_seconds > 0.0) {
                return Err(AnalysisError::InvalidInput(format!(
                    "excerpt duration_seconds must be > 0, got {}",
                    excerpt.duration_seconds
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_hop_larger_than_frame() {
        let config = AnalysisConfig {
            frame_size: 1024,
            hop_size: 2048,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_frequency_range() {
        let config = AnalysisConfig {
            min_frequency: 2000.0,
            max_frequency: 65.0,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_excerpt() {
        let config = AnalysisConfig {
            excerpt: Some(ExcerptConfig {
                start_fraction: 1.0,
                duration_seconds: 30.0,
            }),
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AnalysisConfig {
            excerpt: Some(ExcerptConfig {
                start_fraction: 0.2,
                duration_seconds: 0.0,
            }),
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
