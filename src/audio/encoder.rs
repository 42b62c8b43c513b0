//! PCM encoding for captured audio
//!
//! The microphone delivers f32 sample buffers; each buffer becomes one
//! PCM16 little-endian fragment for the capture machine, and the
//! concatenated fragments are wrapped into an in-memory WAV container for
//! upload.

use crate::{CharlaError, Result};
use chrono::Utc;
use std::io::Cursor;

/// MIME type of the upload container
pub const AUDIO_MIME: &str = "audio/wav";

/// Convert one buffer of f32 samples to a PCM16-LE fragment
pub fn pcm_chunk(samples: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Wrap concatenated PCM16-LE bytes into a WAV container
pub fn wav_payload(pcm: &[u8], sample_rate: u32, channels: u16) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec)
        .map_err(|e| CharlaError::Io(format!("WAV writer: {}", e)))?;

    for bytes in pcm.chunks_exact(2) {
        let sample = i16::from_le_bytes([bytes[0], bytes[1]]);
        writer
            .write_sample(sample)
            .map_err(|e| CharlaError::Io(format!("WAV write: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| CharlaError::Io(format!("WAV finalize: {}", e)))?;

    Ok(cursor.into_inner())
}

/// Upload file name, by convention `<phone>_<timestamp>.wav`
pub fn upload_filename(phone: &str) -> String {
    format!("{}_{}.wav", phone, Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcm_chunk_is_little_endian_16bit() {
        let bytes = pcm_chunk(&[0.0, 1.0, -1.0]);
        assert_eq!(bytes.len(), 6);
        assert_eq!(i16::from_le_bytes([bytes[0], bytes[1]]), 0);
        assert_eq!(i16::from_le_bytes([bytes[2], bytes[3]]), i16::MAX);
        // -1.0 clamps to -MAX rather than MIN; symmetric scaling
        assert_eq!(i16::from_le_bytes([bytes[4], bytes[5]]), -i16::MAX);
    }

    #[test]
    fn test_out_of_range_samples_clamped() {
        let bytes = pcm_chunk(&[2.0, -3.0]);
        assert_eq!(i16::from_le_bytes([bytes[0], bytes[1]]), i16::MAX);
        assert_eq!(i16::from_le_bytes([bytes[2], bytes[3]]), -i16::MAX);
    }

    #[test]
    fn test_wav_payload_round_trips_through_hound() {
        let samples: Vec<f32> = (0..160).map(|i| (i as f32 * 0.05).sin() * 0.5).collect();
        let pcm = pcm_chunk(&samples);

        let payload = wav_payload(&pcm, 16000, 1).expect("payload");
        let reader = hound::WavReader::new(Cursor::new(payload)).expect("readable WAV");
        assert_eq!(reader.spec().sample_rate, 16000);
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.len(), samples.len() as u32);
    }

    #[test]
    fn test_empty_recording_yields_header_only_wav() {
        let payload = wav_payload(&[], 16000, 1).expect("payload");
        let reader = hound::WavReader::new(Cursor::new(payload)).expect("readable WAV");
        assert_eq!(reader.len(), 0);
    }

    #[test]
    fn test_upload_filename_convention() {
        let name = upload_filename("555");
        assert!(name.starts_with("555_"));
        assert!(name.ends_with(".wav"));
    }
}
