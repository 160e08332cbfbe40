//! Codec infrastructure module
//!
//! Finalizes recordings into WAV clips and decodes them back into
//! per-channel samples for reversal.

mod wav;

pub use wav::WavCodec;
