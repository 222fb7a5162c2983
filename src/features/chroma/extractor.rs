//! Chroma vector extraction
//!
//! Converts an FFT magnitude spectrogram to a 12-element chroma vector.
//!
//! # Algorithm
//!
//! 1. Split the signal into Hann-windowed frames (`frame_size`, `hop_size`);
//!    clips shorter than one frame are zero padded to a single frame
//! 2. FFT each frame and fold the magnitude of every bin inside
//!    `[min_frequency, max_frequency]` onto its nearest pitch class
//! 3. Normalize each frame to a maximum of 1 (silent frames stay at zero)
//! 4. Average the frames

use rustfft::{num_complex::Complex, FftPlanner};

use super::{ChromaExtractor, ChromaVector, N_PITCH_CLASSES};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

/// Frames whose loudest pitch class is below this are treated as silent
const SILENT_FRAME_EPSILON: f32 = 1e-10;

/// MIDI note number of the reference frequency (A4)
const REFERENCE_MIDI: f32 = 69.0;

/// STFT-based chroma extractor
#[derive(Debug, Clone)]
pub struct SpectralChromaExtractor {
    frame_size: usize,
    hop_size: usize,
    min_frequency: f32,
    max_frequency: f32,
    reference_frequency: f32,
}

impl SpectralChromaExtractor {
    /// Create an extractor from the chroma parameters of `config`
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if the configuration is invalid.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self {
            frame_size: config.frame_size,
            hop_size: config.hop_size,
            min_frequency: config.min_frequency,
            max_frequency: config.max_frequency,
            reference_frequency: config.reference_frequency,
        })
    }

    /// Pitch class for every FFT bin, `None` outside the analysed range
    fn bin_pitch_classes(&self, sample_rate: u32) -> Vec<Option<usize>> {
        let bin_hz = sample_rate as f32 / self.frame_size as f32;
        (0..self.frame_size / 2)
            .map(|k| {
                let freq = k as f32 * bin_hz;
                if k == 0 || freq < self.min_frequency || freq > self.max_frequency {
                    return None;
                }
                let midi = REFERENCE_MIDI + 12.0 * (freq / self.reference_frequency).log2();
                Some((midi.round() as i64).rem_euclid(N_PITCH_CLASSES as i64) as usize)
            })
            .collect()
    }
}

impl Default for SpectralChromaExtractor {
    fn default() -> Self {
        let config = AnalysisConfig::default();
        Self {
            frame_size: config.frame_size,
            hop_size: config.hop_size,
            min_frequency: config.min_frequency,
            max_frequency: config.max_frequency,
            reference_frequency: config.reference_frequency,
        }
    }
}

impl ChromaExtractor for SpectralChromaExtractor {
    fn extract_chroma(&self, samples: &[f32], sample_rate: u32) -> Result<ChromaVector, AnalysisError> {
        log::debug!(
            "Extracting chroma: {} samples at {} Hz (frame={}, hop={})",
            samples.len(),
            sample_rate,
            self.frame_size,
            self.hop_size
        );

        if samples.is_empty() {
            return Err(AnalysisError::NoInputData);
        }
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidInput("Invalid sample rate".to_string()));
        }
        if let Some(i) = samples.iter().position(|s| !s.is_finite()) {
            return Err(AnalysisError::ProcessingError(format!(
                "Non-finite sample at index {}",
                i
            )));
        }

        let n = self.frame_size;
        let bin_classes = self.bin_pitch_classes(sample_rate);
        let window: Vec<f32> = (0..n)
            .map(|i| {
                if n == 1 {
                    1.0
                } else {
                    0.5 - 0.5 * (2.0 * std::f32::consts::PI * i as f32 / (n - 1) as f32).cos()
                }
            })
            .collect();

        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(n);
        let mut buffer = vec![Complex::new(0.0f32, 0.0); n];

        let n_frames = if samples.len() <= n {
            1
        } else {
            (samples.len() - n) / self.hop_size + 1
        };

        let mut sum = [0.0f64; N_PITCH_CLASSES];
        for frame_idx in 0..n_frames {
            let start = frame_idx * self.hop_size;
            let frame = &samples[start..(start + n).min(samples.len())];

            for (i, slot) in buffer.iter_mut().enumerate() {
                let s = frame.get(i).copied().unwrap_or(0.0);
                *slot = Complex::new(s * window[i], 0.0);
            }
            fft.process(&mut buffer);

            let mut chroma = [0.0f32; N_PITCH_CLASSES];
            for (bin, pc) in buffer.iter().zip(bin_classes.iter()) {
                if let Some(pc) = pc {
                    chroma[*pc] += bin.norm();
                }
            }

            let peak = chroma.iter().cloned().fold(0.0f32, f32::max);
            if peak > SILENT_FRAME_EPSILON {
                for (acc, c) in sum.iter_mut().zip(chroma.iter()) {
                    *acc += (*c / peak) as f64;
                }
            }
        }

        let mut mean = [0.0f32; N_PITCH_CLASSES];
        for (m, s) in mean.iter_mut().zip(sum.iter()) {
            *m = (s / n_frames as f64) as f32;
        }

        log::debug!("Chroma over {} frames: {:?}", n_frames, mean);
        ChromaVector::new(mean)
    }

    fn name(&self) -> &'static str {
        "spectral"
    }
}

/// Chroma extractor used when no extraction capability is installed
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableChromaExtractor;

impl ChromaExtractor for UnavailableChromaExtractor {
    fn extract_chroma(&self, _samples: &[f32], _sample_rate: u32) -> Result<ChromaVector, AnalysisError> {
        Err(AnalysisError::DependencyUnavailable(
            "chroma extraction not installed".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }
}
