//! Delivery of finished buffers.
//!
//! Playback is outside the engine. Consumers implement [`AudioSink`]; the two
//! provided sinks write WAV files or collect buffers in memory.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use bitgun_seed::Seed;
use tracing::debug;

use crate::buffer::SampleBuffer;
use crate::error::{SynthError, SynthResult};
use crate::wav::{samples_to_pcm16, write_wav, WavFormat};

/// Receives rendered buffers.
pub trait AudioSink {
    /// Accepts one buffer for output.
    fn enqueue(&mut self, buffer: &SampleBuffer) -> SynthResult<()>;
}

/// Export file name for a seed: `bitgun_<SEED>.wav`.
pub fn export_file_name(seed: &Seed) -> String {
    format!("bitgun_{seed}.wav")
}

/// Writes each buffer to `<dir>/bitgun_<SEED>.wav`, overwriting.
#[derive(Debug, Clone)]
pub struct WavFileSink {
    dir: PathBuf,
    seed: Seed,
    last_path: Option<PathBuf>,
}

impl WavFileSink {
    pub fn new(dir: impl Into<PathBuf>, seed: Seed) -> Self {
        Self {
            dir: dir.into(),
            seed,
            last_path: None,
        }
    }

    /// Path the next enqueue writes to.
    pub fn target_path(&self) -> PathBuf {
        self.dir.join(export_file_name(&self.seed))
    }

    /// Path of the last file written, if any.
    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_deref()
    }
}

impl AudioSink for WavFileSink {
    fn enqueue(&mut self, buffer: &SampleBuffer) -> SynthResult<()> {
        if self.dir.exists() && !self.dir.is_dir() {
            return Err(SynthError::sink(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }
        fs::create_dir_all(&self.dir)?;

        let path = self.target_path();
        let mut writer = BufWriter::new(File::create(&path)?);
        write_wav(&mut writer, &WavFormat::default(), &samples_to_pcm16(buffer))?;
        writer.flush()?;

        debug!(path = %path.display(), samples = buffer.len(), "wrote wav");
        self.last_path = Some(path);
        Ok(())
    }
}

/// Collects copies of every buffer it receives.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffers: Vec<SampleBuffer>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffers(&self) -> &[SampleBuffer] {
        &self.buffers
    }
}

impl AudioSink for MemorySink {
    fn enqueue(&mut self, buffer: &SampleBuffer) -> SynthResult<()> {
        self.buffers.push(buffer.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wav::encode_wav;

    #[test]
    fn test_export_file_name() {
        let seed = Seed::from_bytes([0x4A, 0x10, 0xC0, 0xFF]);
        assert_eq!(export_file_name(&seed), "bitgun_4A10C0FF.wav");
    }

    #[test]
    fn test_wav_file_sink_writes_encoded_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = SampleBuffer::from_samples(vec![0.5, -0.25, 0.0]);
        let mut sink = WavFileSink::new(dir.path().join("out"), Seed::from_bytes([0, 0, 0, 1]));
        sink.enqueue(&buffer).unwrap();

        let path = sink.last_path().unwrap().to_path_buf();
        assert!(path.ends_with("bitgun_00000001.wav"));
        assert_eq!(fs::read(path).unwrap(), encode_wav(&buffer));
    }

    #[test]
    fn test_wav_file_sink_rejects_file_as_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taken");
        fs::write(&file, b"x").unwrap();
        let mut sink = WavFileSink::new(&file, Seed::from_bytes([0; 4]));
        let err = sink.enqueue(&SampleBuffer::silent(2)).unwrap_err();
        assert_eq!(err.code(), "SYNTH_002");
        assert!(sink.last_path().is_none());
    }

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::new();
        sink.enqueue(&SampleBuffer::silent(3)).unwrap();
        sink.enqueue(&SampleBuffer::silent(5)).unwrap();
        let lens: Vec<usize> = sink.buffers().iter().map(|b| b.len()).collect();
        assert_eq!(lens, vec![3, 5]);
    }
}
