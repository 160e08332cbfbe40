//! Capture infrastructure module
//!
//! Cross-platform microphone capture using cpal.

mod cpal_capture;

pub use cpal_capture::CpalCapture;
