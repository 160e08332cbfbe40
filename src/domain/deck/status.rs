//! Observable deck status

use std::fmt;

/// The one status string the deck exposes to its UI.
/// Updated on every state transition; error variants carry the detail text
/// of the failure they surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    RequestingMic,
    Recording,
    Finalizing,
    Stopped,
    ReversedReady,
    PlayingReversed,
    /// Capture could not start or finalize (permission or device failure)
    CaptureFailed(String),
    /// The clip could not be decoded for reversal
    ReverseFailed(String),
}

impl Status {
    /// True for the two error-prefixed renderings
    pub fn is_error(&self) -> bool {
        matches!(self, Self::CaptureFailed(_) | Self::ReverseFailed(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::RequestingMic => write!(f, "requesting microphone"),
            Self::Recording => write!(f, "recording"),
            Self::Finalizing => write!(f, "finalizing"),
            Self::Stopped => write!(f, "stopped"),
            Self::ReversedReady => write!(f, "reversed ready"),
            Self::PlayingReversed => write!(f, "playing reversed"),
            Self::CaptureFailed(detail) => write!(f, "error: {}", detail),
            Self::ReverseFailed(detail) => write!(f, "error preparing reversed: {}", detail),
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        assert_eq!(Status::Idle.to_string(), "idle");
        assert_eq!(Status::RequestingMic.to_string(), "requesting microphone");
        assert_eq!(Status::Recording.to_string(), "recording");
        assert_eq!(Status::Finalizing.to_string(), "finalizing");
        assert_eq!(Status::Stopped.to_string(), "stopped");
        assert_eq!(Status::ReversedReady.to_string(), "reversed ready");
        assert_eq!(Status::PlayingReversed.to_string(), "playing reversed");
    }

    #[test]
    fn error_statuses_are_prefixed() {
        let capture = Status::CaptureFailed("mic denied".to_string());
        assert_eq!(capture.to_string(), "error: mic denied");
        assert!(capture.is_error());

        let reverse = Status::ReverseFailed("corrupt clip".to_string());
        assert_eq!(reverse.to_string(), "error preparing reversed: corrupt clip");
        assert!(reverse.is_error());
    }

    #[test]
    fn non_error_statuses() {
        assert!(!Status::Idle.is_error());
        assert!(!Status::ReversedReady.is_error());
    }
}
