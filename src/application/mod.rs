//! Application layer - Use cases and port interfaces
//!
//! Contains the core deck operations and trait definitions
//! for external system interactions.

pub mod deck;
pub mod ports;

// Re-export use case types
pub use deck::{DeckError, RecorderDeck, StatusObserver};
