//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod capture;
pub mod codec;
pub mod config;
pub mod playback;

// Re-export common types
pub use capture::{CaptureDevice, CaptureError};
pub use codec::{AudioCodec, CodecError};
pub use config::ConfigStore;
pub use playback::{PlaybackError, PlaybackSink};
