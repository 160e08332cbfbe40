//! Encoded clip value object

use std::fmt;

/// Container formats a finalized clip can be tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipFormat {
    Wav,
}

impl ClipFormat {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
        }
    }
}

impl fmt::Display for ClipFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for ClipFormat {
    fn default() -> Self {
        Self::Wav
    }
}

/// Value object representing a finalized recording.
/// Contains the encoded container bytes and their format tag. Replaced as a
/// whole when a new recording is finalized, never mutated in place.
#[derive(Debug, Clone)]
pub struct EncodedClip {
    data: Vec<u8>,
    format: ClipFormat,
}

impl EncodedClip {
    /// Create a clip from encoded bytes
    pub fn new(data: Vec<u8>, format: ClipFormat) -> Self {
        Self { data, format }
    }

    /// Create a clip from a byte slice
    pub fn from_bytes(data: &[u8], format: ClipFormat) -> Self {
        Self {
            data: data.to_vec(),
            format,
        }
    }

    /// Get the encoded bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the encoded bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the container format
    pub fn format(&self) -> ClipFormat {
        self.format
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}
