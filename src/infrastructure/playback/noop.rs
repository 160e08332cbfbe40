//! No-op output sink
//!
//! Used for muted runs and machines without an output device.

use async_trait::async_trait;

use crate::application::ports::{PlaybackError, PlaybackSink};
use crate::domain::audio::{EncodedClip, SampleBuffer};

/// Output sink that discards everything
pub struct NoopSink;

impl NoopSink {
    /// Create a new no-op sink
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoopSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlaybackSink for NoopSink {
    async fn play_clip(&self, _clip: &EncodedClip) -> Result<(), PlaybackError> {
        Ok(())
    }

    async fn play_samples(&self, _buffer: &SampleBuffer) -> Result<(), PlaybackError> {
        Ok(())
    }
}
