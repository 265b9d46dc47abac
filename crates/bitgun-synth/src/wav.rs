//! Deterministic WAV encoder.
//!
//! Writes the canonical 44-byte header followed by 16-bit little-endian PCM.
//! No metadata chunks are emitted, so the bytes are a pure function of the
//! samples and the PCM hash can be used to compare renders.

use std::io::{self, Write};

use crate::buffer::{SampleBuffer, SAMPLE_RATE};

/// Size of the canonical PCM header in bytes.
pub const WAV_HEADER_LEN: usize = 44;

/// WAV format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// 16-bit mono at `sample_rate`.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Bytes per sample frame.
    pub fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// Bytes per second.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.block_align())
    }
}

impl Default for WavFormat {
    fn default() -> Self {
        Self::mono(SAMPLE_RATE)
    }
}

/// Builds the 44-byte header for `data_len` bytes of PCM.
pub fn wav_header(format: &WavFormat, data_len: u32) -> [u8; WAV_HEADER_LEN] {
    let mut header = [0u8; WAV_HEADER_LEN];
    let fields: [(usize, &[u8]); 13] = [
        (0, b"RIFF"),
        (4, &(36 + data_len).to_le_bytes()),
        (8, b"WAVE"),
        (12, b"fmt "),
        (16, &16u32.to_le_bytes()),
        // PCM
        (20, &1u16.to_le_bytes()),
        (22, &format.channels.to_le_bytes()),
        (24, &format.sample_rate.to_le_bytes()),
        (28, &format.byte_rate().to_le_bytes()),
        (32, &format.block_align().to_le_bytes()),
        (34, &format.bits_per_sample.to_le_bytes()),
        (36, b"data"),
        (40, &data_len.to_le_bytes()),
    ];
    for (offset, bytes) in fields {
        header[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
    header
}

/// Converts samples to 16-bit PCM bytes.
///
/// Samples are clipped to `[-1, 1]`, scaled by 32767 and truncated toward
/// zero, so `0.99999` and `0.99997` land on the same code.
pub fn samples_to_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let clipped = f64::from(sample).clamp(-1.0, 1.0);
        let value = (clipped * 32767.0) as i16;
        pcm.extend_from_slice(&value.to_le_bytes());
    }
    pcm
}

/// Writes a complete WAV file.
///
/// # Arguments
/// * `writer` - Output writer
/// * `format` - WAV format parameters
/// * `pcm_data` - Raw PCM samples as bytes
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    writer.write_all(&wav_header(format, pcm_data.len() as u32))?;
    writer.write_all(pcm_data)
}

/// Encodes a buffer as mono 16-bit 44.1 kHz WAV bytes.
pub fn encode_wav(buffer: &SampleBuffer) -> Vec<u8> {
    let pcm = samples_to_pcm16(buffer);
    let mut bytes = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());
    bytes.extend_from_slice(&wav_header(&WavFormat::default(), pcm.len() as u32));
    bytes.extend_from_slice(&pcm);
    bytes
}

/// BLAKE3 hex digest of a buffer's 16-bit PCM.
pub fn pcm_hash(buffer: &SampleBuffer) -> String {
    blake3::hash(&samples_to_pcm16(buffer)).to_hex().to_string()
}

/// Returns the `data` chunk of a WAV file, or `None` if the bytes are not
/// a RIFF/WAVE file.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < WAV_HEADER_LEN || &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let chunk_id = &wav_data[pos..pos + 4];
        let size_bytes = [wav_data[pos + 4], wav_data[pos + 5], wav_data[pos + 6], wav_data[pos + 7]];
        let chunk_size = u32::from_le_bytes(size_bytes) as usize;

        if chunk_id == b"data" {
            let start = pos + 8;
            return wav_data.get(start..start + chunk_size);
        }
        // chunks are word aligned
        pos += 8 + chunk_size + (chunk_size % 2);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_layout() {
        let header = wav_header(&WavFormat::default(), 200);
        assert_eq!(&header[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes([header[4], header[5], header[6], header[7]]), 236);
        assert_eq!(&header[8..16], b"WAVEfmt ");
        assert_eq!(&header[20..22], &[1, 0]);
        assert_eq!(&header[22..24], &[1, 0]);
        assert_eq!(u32::from_le_bytes([header[24], header[25], header[26], header[27]]), 44_100);
        assert_eq!(u32::from_le_bytes([header[28], header[29], header[30], header[31]]), 88_200);
        assert_eq!(&header[32..34], &[2, 0]);
        assert_eq!(&header[34..36], &[16, 0]);
        assert_eq!(&header[36..40], b"data");
        assert_eq!(u32::from_le_bytes([header[40], header[41], header[42], header[43]]), 200);
    }

    #[test]
    fn test_pcm_truncates() {
        let pcm = samples_to_pcm16(&[1.0, -1.0, 0.0, 0.5, -0.5, 2.0]);
        let values: Vec<i16> = pcm
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]))
            .collect();
        // 0.5 * 32767 = 16383.5 truncates toward zero
        assert_eq!(values, vec![32767, -32767, 0, 16383, -16383, 32767]);
    }

    #[test]
    fn test_encode_size_and_extract() {
        let buffer = SampleBuffer::from_samples(vec![0.25; 10]);
        let bytes = encode_wav(&buffer);
        assert_eq!(bytes.len(), WAV_HEADER_LEN + 20);
        assert_eq!(extract_pcm_data(&bytes), Some(&bytes[44..]));
    }

    #[test]
    fn test_write_wav_matches_encode() {
        let buffer = SampleBuffer::from_samples(vec![0.1, -0.2, 0.3]);
        let mut written = Vec::new();
        write_wav(&mut written, &WavFormat::default(), &samples_to_pcm16(&buffer)).unwrap();
        assert_eq!(written, encode_wav(&buffer));
    }

    #[test]
    fn test_extract_rejects_garbage() {
        assert_eq!(extract_pcm_data(b"not a wav"), None);
        assert_eq!(extract_pcm_data(&[0u8; 64]), None);
    }

    #[test]
    fn test_pcm_hash_is_stable() {
        let a = SampleBuffer::from_samples(vec![0.5; 100]);
        let b = SampleBuffer::from_samples(vec![0.5; 100]);
        assert_eq!(pcm_hash(&a), pcm_hash(&b));
        assert_eq!(pcm_hash(&a).len(), 64);
    }
}
