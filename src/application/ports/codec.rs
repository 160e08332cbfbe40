//! Codec port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::{EncodedClip, RawRecording, SampleBuffer};

/// Codec errors
#[derive(Debug, Clone, Error)]
pub enum CodecError {
    #[error("failed to encode recording: {0}")]
    Encode(String),

    #[error("failed to decode clip: {0}")]
    Decode(String),
}

/// Port for the container codec: finalizing a recording into an encoded
/// clip, and decoding a clip back into per-channel samples for reversal.
#[async_trait]
pub trait AudioCodec: Send + Sync {
    /// Encode a captured recording, in chunk arrival order, into a clip
    async fn encode(&self, recording: &RawRecording) -> Result<EncodedClip, CodecError>;

    /// Decode a clip into per-channel samples at its native rate
    async fn decode(&self, clip: &EncodedClip) -> Result<SampleBuffer, CodecError>;
}
