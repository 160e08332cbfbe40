//! Decoded sample buffer value object

/// Decoded audio as per-channel f32 sample arrays sharing one sample rate.
/// All channels hold the same number of frames.
///
/// This is the shape both the decoded original and its reversed counterpart
/// take; `reversed` is the only transformation performed on it.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Create a buffer from per-channel sample arrays.
    /// All channels must hold the same number of frames.
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Self {
        debug_assert!(
            channels.windows(2).all(|w| w[0].len() == w[1].len()),
            "channels must share one frame count"
        );
        Self {
            channels,
            sample_rate,
        }
    }

    /// Create a zero-frame buffer with the given channel layout
    pub fn empty(channel_count: u16, sample_rate: u32) -> Self {
        Self {
            channels: vec![Vec::new(); channel_count as usize],
            sample_rate,
        }
    }

    /// De-interleave a flat sample buffer into per-channel arrays.
    /// Trailing samples short of a full frame are dropped.
    pub fn from_interleaved(samples: &[f32], channel_count: u16, sample_rate: u32) -> Self {
        let count = channel_count as usize;
        if count == 0 {
            return Self::new(Vec::new(), sample_rate);
        }
        let frames = samples.len() / count;
        let mut channels = vec![Vec::with_capacity(frames); count];
        for (i, &sample) in samples.iter().take(frames * count).enumerate() {
            channels[i % count].push(sample);
        }
        Self::new(channels, sample_rate)
    }

    /// Number of channels
    pub fn channel_count(&self) -> u16 {
        self.channels.len() as u16
    }

    /// Frames per channel
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples of one channel
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// All channels
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// True if the buffer holds no frames
    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    /// Buffer length in seconds
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Produce a new buffer with each channel's sample order reversed.
    /// For a channel of length L, output index i holds input index L-1-i.
    /// Channel count, frame count, and sample rate are preserved exactly.
    pub fn reversed(&self) -> Self {
        let channels = self
            .channels
            .iter()
            .map(|channel| channel.iter().rev().copied().collect())
            .collect();
        Self {
            channels,
            sample_rate: self.sample_rate,
        }
    }

    /// Interleave all channels into one flat buffer (frame-major order)
    pub fn to_interleaved(&self) -> Vec<f32> {
        let count = self.channels.len();
        let frames = self.frames();
        let mut samples = Vec::with_capacity(count * frames);
        for frame in 0..frames {
            for channel in &self.channels {
                samples.push(channel[frame]);
            }
        }
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversal_mirrors_each_channel() {
        let buffer = SampleBuffer::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]], 44100);
        let reversed = buffer.reversed();

        assert_eq!(reversed.channel(0), &[3.0, 2.0, 1.0]);
        assert_eq!(reversed.channel(1), &[6.0, 5.0, 4.0]);
        assert_eq!(reversed.channel_count(), 2);
        assert_eq!(reversed.frames(), 3);
        assert_eq!(reversed.sample_rate(), 44100);
    }

    #[test]
    fn reversal_index_mapping() {
        let samples: Vec<f32> = (0..100).map(|i| i as f32).collect();
        let buffer = SampleBuffer::new(vec![samples.clone()], 8000);
        let reversed = buffer.reversed();

        let len = samples.len();
        for i in 0..len {
            assert_eq!(reversed.channel(0)[i], samples[len - 1 - i]);
        }
    }

    #[test]
    fn reversal_is_an_involution() {
        let buffer = SampleBuffer::new(
            vec![vec![0.5, -0.25, 0.125, 1.0], vec![-1.0, 0.0, 0.75, 0.5]],
            48000,
        );
        assert_eq!(buffer.reversed().reversed(), buffer);
    }

    #[test]
    fn zero_length_reversal() {
        let buffer = SampleBuffer::empty(2, 44100);
        let reversed = buffer.reversed();

        assert!(reversed.is_empty());
        assert_eq!(reversed.channel_count(), 2);
        assert_eq!(reversed.sample_rate(), 44100);
    }

    #[test]
    fn interleave_round_trip() {
        let interleaved = vec![1.0, -1.0, 2.0, -2.0, 3.0, -3.0];
        let buffer = SampleBuffer::from_interleaved(&interleaved, 2, 44100);

        assert_eq!(buffer.channel(0), &[1.0, 2.0, 3.0]);
        assert_eq!(buffer.channel(1), &[-1.0, -2.0, -3.0]);
        assert_eq!(buffer.to_interleaved(), interleaved);
    }

    #[test]
    fn partial_trailing_frame_is_dropped() {
        let buffer = SampleBuffer::from_interleaved(&[1.0, -1.0, 2.0, -2.0, 3.0], 2, 44100);
        assert_eq!(buffer.frames(), 2);
        assert_eq!(buffer.channel(0), &[1.0, 2.0]);
        assert_eq!(buffer.channel(1), &[-1.0, -2.0]);
    }

    #[test]
    fn duration_from_sample_rate() {
        let buffer = SampleBuffer::new(vec![vec![0.0; 22050]], 44100);
        assert_eq!(buffer.duration_seconds(), 0.5);
    }
}
