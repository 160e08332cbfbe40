//! Deck session entity and capture state machine

use std::fmt;
use thiserror::Error;

use crate::domain::audio::{EncodedClip, SampleBuffer};

use super::status::Status;

/// Capture lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeckState {
    #[default]
    Idle,
    Requesting,
    Recording,
    Finalizing,
}

impl DeckState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::Recording => "recording",
            Self::Finalizing => "finalizing",
        }
    }
}

impl fmt::Display for DeckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidTransition {
    pub current_state: DeckState,
    pub action: String,
}

/// Deck session entity.
///
/// Owns everything the deck observes and mutates: the capture state machine,
/// the current finalized clip, the current reversed buffer, and the status
/// string. Single writer: only deck operations mutate it, and every write
/// happens behind one lock.
///
/// State machine:
///   IDLE -> REQUESTING (begin_request)
///   REQUESTING -> RECORDING (capture_granted)
///   REQUESTING | RECORDING | FINALIZING -> IDLE (capture_failed)
///   RECORDING -> FINALIZING (begin_finalize)
///   FINALIZING -> IDLE (finalize_complete)
///
/// The clip and reversed buffer live outside the state machine: the clip is
/// replaced on finalize, and the reversed buffer is replaced on a successful
/// reversal or cleared on a failed one.
#[derive(Debug, Default)]
pub struct DeckSession {
    state: DeckState,
    status: Status,
    clip: Option<EncodedClip>,
    reversed: Option<SampleBuffer>,
}

impl DeckSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> DeckState {
        self.state
    }

    /// Get the current status
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Check if currently idle
    pub fn is_idle(&self) -> bool {
        self.state == DeckState::Idle
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.state == DeckState::Recording
    }

    /// The most recently finalized clip, if any
    pub fn clip(&self) -> Option<&EncodedClip> {
        self.clip.as_ref()
    }

    /// The reversed buffer for the current clip, if prepared
    pub fn reversed(&self) -> Option<&SampleBuffer> {
        self.reversed.as_ref()
    }

    /// Transition from IDLE to REQUESTING
    pub fn begin_request(&mut self) -> Result<(), InvalidTransition> {
        if self.state != DeckState::Idle {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "request capture".to_string(),
            });
        }
        self.state = DeckState::Requesting;
        self.status = Status::RequestingMic;
        Ok(())
    }

    /// Transition from REQUESTING to RECORDING
    pub fn capture_granted(&mut self) -> Result<(), InvalidTransition> {
        if self.state != DeckState::Requesting {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "grant capture".to_string(),
            });
        }
        self.state = DeckState::Recording;
        self.status = Status::Recording;
        Ok(())
    }

    /// Return to IDLE after a capture or finalize failure.
    /// The session stays startable; the failure is surfaced only as status.
    pub fn capture_failed(&mut self, detail: String) {
        self.state = DeckState::Idle;
        self.status = Status::CaptureFailed(detail);
    }

    /// Transition from RECORDING to FINALIZING
    pub fn begin_finalize(&mut self) -> Result<(), InvalidTransition> {
        if self.state != DeckState::Recording {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "finalize".to_string(),
            });
        }
        self.state = DeckState::Finalizing;
        self.status = Status::Finalizing;
        Ok(())
    }

    /// Transition from FINALIZING to IDLE, replacing the clip.
    /// The reversed buffer is cleared: it belonged to the previous clip.
    pub fn finalize_complete(&mut self, clip: EncodedClip) -> Result<(), InvalidTransition> {
        if self.state != DeckState::Finalizing {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "complete finalize".to_string(),
            });
        }
        self.state = DeckState::Idle;
        self.clip = Some(clip);
        self.reversed = None;
        self.status = Status::Stopped;
        Ok(())
    }

    /// Store a freshly prepared reversed buffer
    pub fn reverse_ready(&mut self, buffer: SampleBuffer) {
        self.reversed = Some(buffer);
        self.status = Status::ReversedReady;
    }

    /// Record a reversal failure. The stored reversed buffer is cleared so a
    /// present buffer always corresponds to the current clip; the clip itself
    /// is untouched and remains playable.
    pub fn reverse_failed(&mut self, detail: String) {
        self.reversed = None;
        self.status = Status::ReverseFailed(detail);
    }

    /// Mark reversed playback as running
    pub fn playback_started(&mut self) {
        self.status = Status::PlayingReversed;
    }

    /// Mark reversed playback as finished
    pub fn playback_finished(&mut self) {
        self.status = Status::Idle;
    }
}
