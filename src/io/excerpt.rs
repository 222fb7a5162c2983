//! Analysis window selection

use crate::config::ExcerptConfig;

/// Select the analysis window of a full track
///
/// The window starts at `floor(total_seconds * start_fraction)` seconds and
/// spans `duration_seconds`, clamped to the end of the input. Inputs shorter
/// than the start offset yield an empty slice.
pub fn select_excerpt<'a>(samples: &'a [f32], sample_rate: u32, excerpt: &ExcerptConfig) -> &'a [f32] {
    if samples.is_empty() || sample_rate == 0 {
        return samples;
    }

    let total_seconds = samples.len() as f64 / sample_rate as f64;
    let start_seconds = (total_seconds * excerpt.start_fraction.max(0.0) as f64).floor();
    let start = ((start_seconds * sample_rate as f64) as usize).min(samples.len());
    let len = (excerpt.duration_seconds.max(0.0) as f64 * sample_rate as f64) as usize;
    let end = start.saturating_add(len).min(samples.len());

    log::debug!(
        "Excerpt: samples {}..{} of {} ({:.1}s in)",
        start,
        end,
        samples.len(),
        start_seconds
    );
    &samples[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_inside_track() {
        // 100 s at 10 Hz: start at 20 s, 30 s long
        let samples: Vec<f32> = (0..1000).map(|i| i as f32).collect();
        let window = select_excerpt(&samples, 10, &ExcerptConfig::default());
        assert_eq!(window.len(), 300);
        assert_eq!(window[0], 200.0);
    }

    #[test]
    fn test_window_clamped_to_end() {
        // 10 s track: start at 2 s, only 8 s remain
        let samples = vec![0.0f32; 100];
        let window = select_excerpt(&samples, 10, &ExcerptConfig::default());
        assert_eq!(window.len(), 80);
    }

    #[test]
    fn test_start_is_floored_to_whole_seconds() {
        // 12.5 s track: 20% = 2.5 s -> floored to 2 s
        let samples: Vec<f32> = (0..125).map(|i| i as f32).collect();
        let window = select_excerpt(&samples, 10, &ExcerptConfig::default());
        assert_eq!(window[0], 20.0);
    }

    #[test]
    fn test_empty_input() {
        let window = select_excerpt(&[], 44100, &ExcerptConfig::default());
        assert!(window.is_empty());
    }
}
