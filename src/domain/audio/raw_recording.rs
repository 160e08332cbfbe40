//! Captured recording value object

/// A recording as it comes off the capture device: an ordered, append-only
/// list of interleaved i16 sample chunks, one chunk per device callback.
/// Chunks are concatenated in arrival order when the recording is finalized.
#[derive(Debug, Clone)]
pub struct RawRecording {
    chunks: Vec<Vec<i16>>,
    channel_count: u16,
    sample_rate: u32,
}

impl RawRecording {
    /// Create an empty recording for the given stream shape
    pub fn new(channel_count: u16, sample_rate: u32) -> Self {
        Self {
            chunks: Vec::new(),
            channel_count,
            sample_rate,
        }
    }

    /// Create a recording from already-captured chunks
    pub fn from_chunks(chunks: Vec<Vec<i16>>, channel_count: u16, sample_rate: u32) -> Self {
        Self {
            chunks,
            channel_count,
            sample_rate,
        }
    }

    /// Append one capture-callback buffer
    pub fn push_chunk(&mut self, chunk: Vec<i16>) {
        self.chunks.push(chunk);
    }

    /// Number of interleaved channels
    pub fn channel_count(&self) -> u16 {
        self.channel_count
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Captured chunks in arrival order
    pub fn chunks(&self) -> &[Vec<i16>] {
        &self.chunks
    }

    /// Number of chunks captured
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total frames across all chunks (samples per channel)
    pub fn frames(&self) -> usize {
        if self.channel_count == 0 {
            return 0;
        }
        let samples: usize = self.chunks.iter().map(Vec::len).sum();
        samples / self.channel_count as usize
    }

    /// True if no samples were captured
    pub fn is_empty(&self) -> bool {
        self.chunks.iter().all(Vec::is_empty)
    }

    /// Recording length in seconds
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Concatenate all chunks, in arrival order, into one interleaved buffer
    pub fn into_interleaved(self) -> Vec<i16> {
        let total: usize = self.chunks.iter().map(Vec::len).sum();
        let mut samples = Vec::with_capacity(total);
        for chunk in self.chunks {
            samples.extend_from_slice(&chunk);
        }
        samples
    }
}
