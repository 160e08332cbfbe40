//! Playback infrastructure module
//!
//! Rodio output sink for clips and raw sample buffers, plus a no-op sink
//! for muted runs.

mod noop;
mod rodio_sink;

pub use noop::NoopSink;
pub use rodio_sink::RodioSink;
