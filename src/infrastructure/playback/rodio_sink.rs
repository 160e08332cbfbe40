//! Rodio-based output sink
//!
//! Each call opens its own output stream, builds a fresh source, and waits
//! for the sink to drain, so concurrent playbacks are independent.

use std::io::Cursor;

use async_trait::async_trait;
use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, OutputStream, Sink};

use crate::application::ports::{PlaybackError, PlaybackSink};
use crate::domain::audio::{EncodedClip, SampleBuffer};

/// Output sink implementation using rodio
pub struct RodioSink;

impl RodioSink {
    /// Create a new rodio-based sink
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlaybackSink for RodioSink {
    async fn play_clip(&self, clip: &EncodedClip) -> Result<(), PlaybackError> {
        let bytes = clip.data().to_vec();
        // Run playback in a blocking thread to avoid stalling the async runtime
        tokio::task::spawn_blocking(move || play_clip_sync(bytes))
            .await
            .map_err(|e| PlaybackError::PlaybackFailed(format!("task join error: {e}")))?
    }

    async fn play_samples(&self, buffer: &SampleBuffer) -> Result<(), PlaybackError> {
        if buffer.is_empty() {
            return Ok(());
        }
        let channels = buffer.channel_count();
        let sample_rate = buffer.sample_rate();
        let interleaved = buffer.to_interleaved();
        tokio::task::spawn_blocking(move || play_samples_sync(channels, sample_rate, interleaved))
            .await
            .map_err(|e| PlaybackError::PlaybackFailed(format!("task join error: {e}")))?
    }
}

/// Play encoded clip bytes synchronously (called from spawn_blocking)
fn play_clip_sync(bytes: Vec<u8>) -> Result<(), PlaybackError> {
    let (_stream, stream_handle) = OutputStream::try_default()
        .map_err(|e| PlaybackError::DeviceNotAvailable(e.to_string()))?;
    let sink = Sink::try_new(&stream_handle)
        .map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;

    let source =
        Decoder::new(Cursor::new(bytes)).map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;
    sink.append(source);
    sink.sleep_until_end();

    Ok(())
}

/// Play raw interleaved samples synchronously (called from spawn_blocking)
fn play_samples_sync(
    channels: u16,
    sample_rate: u32,
    interleaved: Vec<f32>,
) -> Result<(), PlaybackError> {
    let (_stream, stream_handle) = OutputStream::try_default()
        .map_err(|e| PlaybackError::DeviceNotAvailable(e.to_string()))?;
    let sink = Sink::try_new(&stream_handle)
        .map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;

    sink.append(SamplesBuffer::new(channels, sample_rate, interleaved));
    sink.sleep_until_end();

    Ok(())
}
