//! Capture port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::RawRecording;

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("microphone access denied: {0}")]
    PermissionDenied(String),

    #[error("no audio input device available")]
    NoInputDevice,

    #[error("input stream failed: {0}")]
    Stream(String),
}

/// Port for signal-controlled microphone capture.
///
/// `start` resolves once the hardware stream is live (or reports why it
/// could not be acquired); `stop` releases the stream and yields everything
/// captured since `start`.
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Start an unbounded capture session.
    async fn start(&self) -> Result<(), CaptureError>;

    /// Stop the capture, release the device, and return the recording.
    async fn stop(&self) -> Result<RawRecording, CaptureError>;

    /// Check if currently capturing
    fn is_capturing(&self) -> bool;
}
