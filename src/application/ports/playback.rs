//! Playback port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::{EncodedClip, SampleBuffer};

/// Playback errors
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("audio output device not available: {0}")]
    DeviceNotAvailable(String),

    #[error("playback failed: {0}")]
    PlaybackFailed(String),
}

/// Port for the audio output sink.
///
/// Each call builds an independent source over its input and resolves when
/// that source has drained; concurrent calls are allowed.
#[async_trait]
pub trait PlaybackSink: Send + Sync {
    /// Play an encoded clip
    async fn play_clip(&self, clip: &EncodedClip) -> Result<(), PlaybackError>;

    /// Play a raw per-channel sample buffer
    async fn play_samples(&self, buffer: &SampleBuffer) -> Result<(), PlaybackError>;
}
