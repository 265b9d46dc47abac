//! WAV export tests, checked against an independent parser.

use std::io::Cursor;

use bitgun_seed::{Seed, SeedOptions};
use bitgun_synth::{encode_wav, AudioSink, MemorySink, SampleBuffer, SfxEngine, WavFileSink};

fn le16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

#[test]
fn test_header_fields() {
    let buffer = SampleBuffer::from_samples(vec![0.0; 1234]);
    let bytes = encode_wav(&buffer);

    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(le16(&bytes, 20), 1);
    assert_eq!(le16(&bytes, 22), 1);
    assert_eq!(le16(&bytes, 34), 16);
    assert_eq!(bytes.len(), 44 + 2 * 1234);
}

#[test]
fn test_render_parses_with_hound() {
    let mut engine = SfxEngine::default();
    let rendered = engine.render_seed("4A10C0FF", &SeedOptions::default()).unwrap();
    let bytes = encode_wav(&rendered.buffer);

    let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 44_100);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), rendered.buffer.len());
    for (pcm, sample) in samples.iter().zip(rendered.buffer.iter()) {
        assert_eq!(*pcm, (f64::from(*sample) * 32767.0) as i16);
    }
}

#[test]
fn test_file_sink_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = SfxEngine::default();
    let rendered = engine.render_seed("c0ffee", &SeedOptions::default()).unwrap();

    let mut sink = WavFileSink::new(dir.path(), rendered.seed);
    sink.enqueue(&rendered.buffer).unwrap();

    let path = dir.path().join("bitgun_C0FFEE00.wav");
    assert_eq!(sink.last_path(), Some(path.as_path()));
    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.len() as usize, rendered.buffer.len());
}

#[test]
fn test_sinks_are_interchangeable() {
    fn deliver(sink: &mut dyn AudioSink, buffer: &SampleBuffer) {
        sink.enqueue(buffer).unwrap();
    }

    let buffer = SampleBuffer::from_samples(vec![0.1; 8]);
    let mut memory = MemorySink::new();
    deliver(&mut memory, &buffer);

    let dir = tempfile::tempdir().unwrap();
    let mut file = WavFileSink::new(dir.path(), Seed::from_bytes([1, 2, 3, 4]));
    deliver(&mut file, &buffer);

    assert_eq!(memory.buffers(), &[buffer]);
    assert!(dir.path().join("bitgun_01020304.wav").exists());
}
