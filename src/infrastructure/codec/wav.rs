//! WAV container codec using hound
//!
//! Clips are 16-bit PCM at the capture channel count and sample rate. A
//! zero-length recording produces a valid header-only file that decodes back
//! to a zero-frame buffer.

use std::io::Cursor;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{AudioCodec, CodecError};
use crate::domain::audio::{ClipFormat, EncodedClip, RawRecording, SampleBuffer};

/// Bits per sample for encoded clips
const BITS_PER_SAMPLE: u16 = 16;

/// WAV codec backed by hound
pub struct WavCodec;

impl WavCodec {
    /// Create a new WAV codec
    pub fn new() -> Self {
        Self
    }
}

impl Default for WavCodec {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioCodec for WavCodec {
    async fn encode(&self, recording: &RawRecording) -> Result<EncodedClip, CodecError> {
        let recording = recording.clone();
        tokio::task::spawn_blocking(move || encode_wav(recording))
            .await
            .map_err(|e| CodecError::Encode(format!("encode task error: {e}")))?
    }

    async fn decode(&self, clip: &EncodedClip) -> Result<SampleBuffer, CodecError> {
        let bytes = clip.data().to_vec();
        tokio::task::spawn_blocking(move || decode_wav(&bytes))
            .await
            .map_err(|e| CodecError::Decode(format!("decode task error: {e}")))?
    }
}

/// Encode a recording, in chunk arrival order, into WAV bytes
fn encode_wav(recording: RawRecording) -> Result<EncodedClip, CodecError> {
    let spec = hound::WavSpec {
        channels: recording.channel_count(),
        sample_rate: recording.sample_rate(),
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer =
        hound::WavWriter::new(&mut cursor, spec).map_err(|e| CodecError::Encode(e.to_string()))?;

    for chunk in recording.chunks() {
        for &sample in chunk {
            writer
                .write_sample(sample)
                .map_err(|e| CodecError::Encode(e.to_string()))?;
        }
    }
    writer
        .finalize()
        .map_err(|e| CodecError::Encode(e.to_string()))?;

    let clip = EncodedClip::new(cursor.into_inner(), ClipFormat::Wav);
    debug!(bytes = clip.size_bytes(), "recording encoded");
    Ok(clip)
}

/// Decode WAV bytes into per-channel f32 samples at the native rate
fn decode_wav(bytes: &[u8]) -> Result<SampleBuffer, CodecError> {
    let mut reader =
        hound::WavReader::new(Cursor::new(bytes)).map_err(|e| CodecError::Decode(e.to_string()))?;
    let spec = reader.spec();

    if spec.channels == 0 {
        return Err(CodecError::Decode("clip reports zero channels".to_string()));
    }

    let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32768.0))
            .collect::<Result<_, _>>()
            .map_err(|e| CodecError::Decode(e.to_string()))?,
        (hound::SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| CodecError::Decode(e.to_string()))?,
        (format, bits) => {
            return Err(CodecError::Decode(format!(
                "unsupported sample format: {bits}-bit {format:?}"
            )))
        }
    };

    let buffer = SampleBuffer::from_interleaved(&interleaved, spec.channels, spec.sample_rate);
    debug!(
        frames = buffer.frames(),
        channels = buffer.channel_count(),
        sample_rate = buffer.sample_rate(),
        "clip decoded"
    );
    Ok(buffer)
}
