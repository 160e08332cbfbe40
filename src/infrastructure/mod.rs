//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the audio hardware and the filesystem.

pub mod capture;
pub mod codec;
pub mod config;
pub mod playback;

// Re-export adapters
pub use capture::CpalCapture;
pub use codec::WavCodec;
pub use config::XdgConfigStore;
pub use playback::{NoopSink, RodioSink};
