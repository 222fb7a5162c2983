//! Raw PCM stream reading

use std::io::Read;

use crate::error::AnalysisError;

/// Bytes per f32 sample
const SAMPLE_BYTES: usize = 4;

/// Read a raw little-endian f32 mono PCM stream to the end
///
/// An empty stream yields an empty vector; callers decide whether that is an error.
///
/// # Errors
///
/// Returns `AnalysisError::DecodingError` if reading fails or the byte count is
/// not a whole number of samples.
pub fn read_f32le_pcm<R: Read>(mut reader: R) -> Result<Vec<f32>, AnalysisError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| AnalysisError::DecodingError(format!("Failed to read PCM stream: {}", e)))?;

    if bytes.len() % SAMPLE_BYTES != 0 {
        return Err(AnalysisError::DecodingError(format!(
            "PCM stream length {} is not a multiple of {} bytes",
            bytes.len(),
            SAMPLE_BYTES
        )));
    }

    let samples: Vec<f32> = bytes
        .chunks_exact(SAMPLE_BYTES)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    log::debug!("Read {} PCM samples ({} bytes)", samples.len(), bytes.len());
    Ok(samples)
}
