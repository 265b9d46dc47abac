//! Waveform summary for visualization.

use crate::buffer::SampleBuffer;

/// Default number of summary points.
pub const DEFAULT_WAVEFORM_POINTS: usize = 800;

/// Mean absolute amplitude over `points` contiguous blocks.
///
/// The block size is `floor(len / points)`; trailing samples that do not fill
/// a block are ignored. When the buffer is shorter than `points` every block
/// is empty and reports `0.0`.
pub fn summarize(buffer: &SampleBuffer, points: usize) -> Vec<f64> {
    let block = if points == 0 { 0 } else { buffer.len() / points };
    if block == 0 {
        return vec![0.0; points];
    }

    buffer
        .chunks_exact(block)
        .take(points)
        .map(|chunk| chunk.iter().map(|s| f64::from(s.abs())).sum::<f64>() / block as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_means() {
        let buffer = SampleBuffer::from_samples(vec![0.5, -0.5, 1.0, 0.0, 0.25]);
        let summary = summarize(&buffer, 2);
        // block of 2, trailing 0.25 dropped
        assert_eq!(summary, vec![0.5, 0.5]);
    }

    #[test]
    fn test_short_buffer_reports_zero() {
        let buffer = SampleBuffer::from_samples(vec![1.0; 10]);
        assert_eq!(summarize(&buffer, 800), vec![0.0; 800]);
        assert!(summarize(&buffer, 0).is_empty());
    }

    #[test]
    fn test_default_length() {
        let summary = summarize(&SampleBuffer::nominal(), DEFAULT_WAVEFORM_POINTS);
        assert_eq!(summary.len(), DEFAULT_WAVEFORM_POINTS);
        assert!(summary.iter().all(|v| *v == 0.0));
    }
}
