//! # Tonic DSP
//!
//! Musical key estimation for short audio clips: one key label (tonic pitch
//! class + major/minor mode) and a confidence score per clip.
//!
//! ## Features
//!
//! - **Chroma Extraction**: STFT magnitudes folded onto 12 pitch classes, behind a
//!   swappable [`ChromaExtractor`] capability
//! - **Key Estimation**: Krumhansl-Schmuckler template correlation over 24 keys
//! - **Best-Effort Reporting**: failures downgrade to an "Unknown" record instead of aborting
//!
//! ## Quick Start
//!
//! ```no_run
//! use tonic_dsp::{analyze_key, SpectralChromaExtractor};
//!
//! // Load audio samples (mono, f32, normalized)
//! let samples: Vec<f32> = vec![0.0; 44100]; // Your audio data
//! let sample_rate = 44100;
//!
//! let estimate = analyze_key(&samples, sample_rate, &SpectralChromaExtractor::default())?;
//! println!("Key: {} (confidence: {:.2})", estimate.key, estimate.confidence);
//! # Ok::<(), tonic_dsp::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Decoded PCM → Chroma Extraction → Key Estimation → KeyReport
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;

// Re-export main types
pub use analysis::result::{Key, KeyEstimate, KeyReport, Mode};
pub use config::{AnalysisConfig, ExcerptConfig};
pub use error::AnalysisError;
pub use features::chroma::{ChromaExtractor, ChromaVector, SpectralChromaExtractor, UnavailableChromaExtractor};
pub use features::key::estimate_key;

/// Estimate the key of mono audio samples
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 44100 or 48000)
/// * `extractor` - Chroma extraction capability
///
/// # Errors
///
/// - `AnalysisError::NoInputData` if `samples` is empty
/// - `AnalysisError::InvalidInput` if `sample_rate` is 0
/// - `AnalysisError::DependencyUnavailable` if `extractor` is not available
/// - any error raised by the extractor
///
/// Zero-variance chroma is not an error: it yields [`KeyEstimate::fallback`].
pub fn analyze_key(
    samples: &[f32],
    sample_rate: u32,
    extractor: &dyn ChromaExtractor,
) -> Result<KeyEstimate, AnalysisError> {
    log::debug!(
        "Starting key analysis: {} samples at {} Hz ({} extractor)",
        samples.len(),
        sample_rate,
        extractor.name()
    );

    if samples.is_empty() {
        return Err(AnalysisError::NoInputData);
    }

    if sample_rate == 0 {
        return Err(AnalysisError::InvalidInput("Invalid sample rate".to_string()));
    }

    if !extractor.is_available() {
        return Err(AnalysisError::DependencyUnavailable(format!(
            "{} chroma extractor is not available",
            extractor.name()
        )));
    }

    let chroma = extractor.extract_chroma(samples, sample_rate)?;
    Ok(estimate_key(&chroma))
}

/// Estimate the key and return the flat output record, best effort
///
/// Only a total absence of samples is an error. Every other failure is
/// reported as a degraded record (`key: "Unknown"`, confidence 0) carrying
/// the error message.
///
/// # Errors
///
/// Returns `AnalysisError::NoInputData` if `samples` is empty.
pub fn analyze_key_report(
    samples: &[f32],
    sample_rate: u32,
    extractor: &dyn ChromaExtractor,
) -> Result<KeyReport, AnalysisError> {
    match analyze_key(samples, sample_rate, extractor) {
        Ok(estimate) => Ok(KeyReport::from(estimate)),
        Err(AnalysisError::NoInputData) => Err(AnalysisError::NoInputData),
        Err(e) => {
            log::warn!("Key analysis degraded: {}", e);
            Ok(KeyReport::degraded(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedExtractor(ChromaVector);

    impl ChromaExtractor for FixedExtractor {
        fn extract_chroma(&self, _samples: &[f32], _sample_rate: u32) -> Result<ChromaVector, AnalysisError> {
            Ok(self.0)
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    struct FailingExtractor;

    impl ChromaExtractor for FailingExtractor {
        fn extract_chroma(&self, _samples: &[f32], _sample_rate: u32) -> Result<ChromaVector, AnalysisError> {
            Err(AnalysisError::ProcessingError("transform blew up".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn a_minor() -> ChromaVector {
        ChromaVector::new(features::key::templates::rotate(&features::key::MINOR_PROFILE, 9)).unwrap()
    }

    #[test]
    fn test_empty_samples_is_hard_error() {
        let extractor = FixedExtractor(a_minor());
        assert_eq!(analyze_key(&[], 44100, &extractor), Err(AnalysisError::NoInputData));
        assert_eq!(analyze_key_report(&[], 44100, &extractor), Err(AnalysisError::NoInputData));
    }

    #[test]
    fn test_injected_extractor_drives_estimate() {
        let extractor = FixedExtractor(a_minor());
        let report = analyze_key_report(&[0.1; 64], 44100, &extractor).unwrap();
        assert_eq!(report.key, "A minor");
        assert_eq!(report.key_name.as_deref(), Some("A"));
        assert_eq!(report.scale, "minor");
        assert!((report.confidence - 1.0).abs() < 1e-5);
        assert!(report.error.is_none());
    }

    #[test]
    fn test_unavailable_extractor_degrades() {
        let estimate = analyze_key(&[0.1; 64], 44100, &UnavailableChromaExtractor);
        assert!(matches!(estimate, Err(AnalysisError::DependencyUnavailable(_))));

        let report = analyze_key_report(&[0.1; 64], 44100, &UnavailableChromaExtractor).unwrap();
        assert_eq!(report.key, "Unknown");
        assert_eq!(report.scale, "unknown");
        assert_eq!(report.confidence, 0.0);
        assert!(report.error.is_some());
    }

    #[test]
    fn test_extractor_failure_degrades() {
        let report = analyze_key_report(&[0.1; 64], 44100, &FailingExtractor).unwrap();
        assert!(report.is_degraded());
        assert!(report.error.unwrap().contains("transform blew up"));
    }

    #[test]
    fn test_zero_sample_rate_degrades() {
        let extractor = FixedExtractor(a_minor());
        let report = analyze_key_report(&[0.1; 64], 0, &extractor).unwrap();
        assert!(report.is_degraded());
    }

    #[test]
    fn test_flat_chroma_reports_fallback() {
        let extractor = FixedExtractor(ChromaVector::new([1.0; 12]).unwrap());
        let report = analyze_key_report(&[0.1; 64], 44100, &extractor).unwrap();
        assert_eq!(report.key, "C major");
        assert_eq!(report.confidence, 0.0);
        assert!(report.error.is_none());
    }
}
