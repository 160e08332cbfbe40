//! backspin - record microphone audio, play it forwards or in reverse
//!
//! This crate provides the core functionality for capturing a take from the
//! microphone, finalizing it into a WAV clip, and playing back either the
//! clip itself or a sample-reversed rendition of it.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core value objects, the deck session state machine, and errors
//! - **Application**: The recorder deck use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, hound, rodio, config)
//! - **CLI**: Command-line interface, argument parsing, and the deck loop

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod logging;
