//! Audio domain module

mod encoded_clip;
mod raw_recording;
mod sample_buffer;

pub use encoded_clip::{ClipFormat, EncodedClip};
pub use raw_recording::RawRecording;
pub use sample_buffer::SampleBuffer;
