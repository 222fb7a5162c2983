//! Audio decoding using Symphonia

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::AnalysisError;

/// Sample rate assumed when the container does not declare one
const FALLBACK_SAMPLE_RATE: u32 = 44100;

/// Decode an audio file to mono PCM samples
///
/// Decodes the first audio track, averaging all channels to mono. Integer
/// formats are scaled to [-1.0, 1.0]. Corrupt packets are skipped.
///
/// # Arguments
///
/// * `path` - Path to audio file
///
/// # Returns
///
/// Tuple of (mono samples, sample_rate)
///
/// # Errors
///
/// Returns `AnalysisError::DecodingError` if the file cannot be opened, probed
/// or decoded.
pub fn decode_audio<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, u32), AnalysisError> {
    let path = path.as_ref();
    log::debug!("Decoding audio file: {}", path.display());

    let src = File::open(path)
        .map_err(|e| AnalysisError::DecodingError(format!("{}: {}", path.display(), e)))?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| AnalysisError::DecodingError(format!("Unsupported format: {}", e)))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AnalysisError::DecodingError("No supported audio tracks found".to_string()))?;

    let track_id = track.id;
    let sample_rate = track.codec_params.sample_rate.unwrap_or(FALLBACK_SAMPLE_RATE);
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| AnalysisError::DecodingError(format!("Unsupported codec: {}", e)))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        // End of stream surfaces as an error from next_packet.
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(_) => break,
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                let channels = spec.channels.count().max(1);

                let buf = sample_buf
                    .get_or_insert_with(|| SampleBuffer::<f32>::new(decoded.capacity() as u64, spec));
                if buf.capacity() < decoded.capacity() * channels {
                    *buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                }
                buf.copy_interleaved_ref(decoded);

                if channels == 1 {
                    samples.extend_from_slice(buf.samples());
                } else {
                    samples.extend(
                        buf.samples()
                            .chunks_exact(channels)
                            .map(|frame| frame.iter().sum::<f32>() / channels as f32),
                    );
                }
            }
            Err(SymphoniaError::DecodeError(e)) => {
                log::warn!("Skipping corrupt packet in {}: {}", path.display(), e);
                continue;
            }
            Err(e) => {
                return Err(AnalysisError::DecodingError(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        }
    }

    log::debug!(
        "Decoded {} mono samples at {} Hz from {}",
        samples.len(),
        sample_rate,
        path.display()
    );
    Ok((samples, sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let result = decode_audio("/nonexistent/path/to/audio.wav");
        assert!(matches!(result, Err(AnalysisError::DecodingError(_))));
    }
}
