//! Recorder deck use case

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::deck::{DeckSession, InvalidTransition, Status};

use super::ports::{AudioCodec, CaptureDevice, PlaybackError, PlaybackSink};

/// Errors from the deck use case.
///
/// Capture and codec failures never appear here: they are caught at the deck
/// boundary and surfaced as status strings, and the session stays startable.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("playback failed: {0}")]
    Playback(#[from] PlaybackError),

    #[error("invalid state transition: {0}")]
    InvalidState(#[from] InvalidTransition),
}

/// Observer called with the new status after every transition.
pub type StatusObserver = Arc<dyn Fn(&Status) + Send + Sync>;

/// Recorder deck use case.
///
/// Wires the capture device, container codec, and output sink into the four
/// user-facing operations: start capture, stop capture (which finalizes the
/// clip and automatically prepares its reversed rendition), play the
/// original clip, and play the reversed buffer.
///
/// All operations run sequentially against one session behind a lock; the
/// lock is never held across a port await, so a long playback does not block
/// status reads.
pub struct RecorderDeck<C, D, P>
where
    C: CaptureDevice,
    D: AudioCodec,
    P: PlaybackSink,
{
    capture: C,
    codec: D,
    sink: P,
    session: Arc<Mutex<DeckSession>>,
    observer: Option<StatusObserver>,
}

impl<C, D, P> RecorderDeck<C, D, P>
where
    C: CaptureDevice,
    D: AudioCodec,
    P: PlaybackSink,
{
    /// Create a new deck instance
    pub fn new(capture: C, codec: D, sink: P) -> Self {
        Self {
            capture,
            codec,
            sink,
            session: Arc::new(Mutex::new(DeckSession::new())),
            observer: None,
        }
    }

    /// Attach a status observer, called after every transition
    pub fn with_observer(mut self, observer: StatusObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get the current status string
    pub async fn status(&self) -> String {
        self.session.lock().await.status().to_string()
    }

    /// Check if currently recording
    pub async fn is_recording(&self) -> bool {
        self.session.lock().await.is_recording()
    }

    /// Human-readable size of the current clip, if one exists
    pub async fn clip_size(&self) -> Option<String> {
        self.session
            .lock()
            .await
            .clip()
            .map(|clip| clip.human_readable_size())
    }

    fn notify(&self, status: &Status) {
        if let Some(observer) = &self.observer {
            observer(status);
        }
    }

    /// Request microphone access and begin accumulating audio.
    ///
    /// An early return while a capture is already underway (the control is
    /// disabled in that state). Permission and device failures are surfaced
    /// as an error status; the session returns to idle and stays startable.
    pub async fn start_capture(&self) -> Result<(), DeckError> {
        {
            let mut session = self.session.lock().await;
            if !session.is_idle() {
                return Ok(());
            }
            session.begin_request()?;
            self.notify(session.status());
        }

        match self.capture.start().await {
            Ok(()) => {
                let mut session = self.session.lock().await;
                session.capture_granted()?;
                self.notify(session.status());
                debug!("capture started");
            }
            Err(err) => {
                warn!(error = %err, "capture could not start");
                let mut session = self.session.lock().await;
                session.capture_failed(err.to_string());
                self.notify(session.status());
            }
        }
        Ok(())
    }

    /// Stop the active capture, finalize the clip, and prepare its reversed
    /// rendition.
    ///
    /// A no-op if no capture is active. The hardware stream is released
    /// before the clip is encoded; the previous clip is replaced as a whole.
    pub async fn stop_capture(&self) -> Result<(), DeckError> {
        {
            let mut session = self.session.lock().await;
            if !session.is_recording() {
                return Ok(());
            }
            session.begin_finalize()?;
            self.notify(session.status());
        }

        let recording = match self.capture.stop().await {
            Ok(recording) => recording,
            Err(err) => {
                warn!(error = %err, "capture stop failed");
                let mut session = self.session.lock().await;
                session.capture_failed(err.to_string());
                self.notify(session.status());
                return Ok(());
            }
        };

        debug!(
            chunks = recording.chunk_count(),
            frames = recording.frames(),
            channels = recording.channel_count(),
            sample_rate = recording.sample_rate(),
            "finalizing recording"
        );

        let clip = match self.codec.encode(&recording).await {
            Ok(clip) => clip,
            Err(err) => {
                warn!(error = %err, "encode failed");
                let mut session = self.session.lock().await;
                session.capture_failed(err.to_string());
                self.notify(session.status());
                return Ok(());
            }
        };

        {
            let mut session = self.session.lock().await;
            session.finalize_complete(clip)?;
            self.notify(session.status());
        }

        self.prepare_reversed().await;
        Ok(())
    }

    /// Decode the current clip and store its reversed rendition.
    /// Runs automatically after every finalize; not independently invokable.
    async fn prepare_reversed(&self) {
        let clip = self.session.lock().await.clip().cloned();
        let Some(clip) = clip else { return };

        match self.codec.decode(&clip).await {
            Ok(decoded) => {
                let reversed = decoded.reversed();
                debug!(
                    frames = reversed.frames(),
                    channels = reversed.channel_count(),
                    "reversed buffer ready"
                );
                let mut session = self.session.lock().await;
                session.reverse_ready(reversed);
                self.notify(session.status());
            }
            Err(err) => {
                warn!(error = %err, "decode failed, reversed buffer unavailable");
                let mut session = self.session.lock().await;
                session.reverse_failed(err.to_string());
                self.notify(session.status());
            }
        }
    }

    /// Play the current clip through the output sink.
    /// A no-op unless a finalized clip exists; independent of reversed state.
    pub async fn play_original(&self) -> Result<(), DeckError> {
        let clip = self.session.lock().await.clip().cloned();
        let Some(clip) = clip else { return Ok(()) };

        debug!(bytes = clip.size_bytes(), "playing original clip");
        self.sink.play_clip(&clip).await?;
        Ok(())
    }

    /// Play the reversed buffer through the output sink.
    ///
    /// A no-op unless a reversed buffer exists. Each call builds an
    /// independent source; the status reads "playing reversed" until the
    /// sink reports completion.
    pub async fn play_reversed(&self) -> Result<(), DeckError> {
        let buffer = self.session.lock().await.reversed().cloned();
        let Some(buffer) = buffer else { return Ok(()) };

        {
            let mut session = self.session.lock().await;
            session.playback_started();
            self.notify(session.status());
        }

        debug!(frames = buffer.frames(), "playing reversed buffer");
        let result = self.sink.play_samples(&buffer).await;

        {
            let mut session = self.session.lock().await;
            session.playback_finished();
            self.notify(session.status());
        }

        result?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{CaptureError, CodecError};
    use crate::domain::audio::{EncodedClip, RawRecording, SampleBuffer};
    use crate::infrastructure::WavCodec;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex as StdMutex;

    const SAMPLE_RATE: u32 = 44100;

    /// One second of a 440 Hz tone, mono i16, split into two chunks
    fn tone_recording() -> RawRecording {
        let samples: Vec<i16> = (0..SAMPLE_RATE as usize)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                (f32::sin(2.0 * std::f32::consts::PI * 440.0 * t) * 16000.0) as i16
            })
            .collect();
        let (first, second) = samples.split_at(samples.len() / 2);
        RawRecording::from_chunks(vec![first.to_vec(), second.to_vec()], 1, SAMPLE_RATE)
    }

    struct MockCapture {
        fail_start: Option<CaptureError>,
        recordings: StdMutex<Vec<RawRecording>>,
        capturing: AtomicBool,
    }

    impl MockCapture {
        fn granting(recordings: Vec<RawRecording>) -> Self {
            Self {
                fail_start: None,
                recordings: StdMutex::new(recordings),
                capturing: AtomicBool::new(false),
            }
        }

        fn denying(err: CaptureError) -> Self {
            Self {
                fail_start: Some(err),
                recordings: StdMutex::new(Vec::new()),
                capturing: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl CaptureDevice for MockCapture {
        async fn start(&self) -> Result<(), CaptureError> {
            if let Some(err) = &self.fail_start {
                return Err(err.clone());
            }
            self.capturing.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn stop(&self) -> Result<RawRecording, CaptureError> {
            self.capturing.store(false, Ordering::SeqCst);
            let mut recordings = self.recordings.lock().unwrap();
            if recordings.is_empty() {
                return Ok(RawRecording::new(1, SAMPLE_RATE));
            }
            Ok(recordings.remove(0))
        }

        fn is_capturing(&self) -> bool {
            self.capturing.load(Ordering::SeqCst)
        }
    }

    /// Codec that encodes normally but refuses to decode
    struct CorruptingCodec {
        inner: WavCodec,
    }

    #[async_trait]
    impl AudioCodec for CorruptingCodec {
        async fn encode(&self, recording: &RawRecording) -> Result<EncodedClip, CodecError> {
            self.inner.encode(recording).await
        }

        async fn decode(&self, _clip: &EncodedClip) -> Result<SampleBuffer, CodecError> {
            Err(CodecError::Decode("corrupt clip".to_string()))
        }
    }

    /// Sink that records what it was asked to play
    #[derive(Clone, Default)]
    struct CollectingSink {
        clips: Arc<StdMutex<Vec<EncodedClip>>>,
        buffers: Arc<StdMutex<Vec<SampleBuffer>>>,
    }

    #[async_trait]
    impl PlaybackSink for CollectingSink {
        async fn play_clip(&self, clip: &EncodedClip) -> Result<(), PlaybackError> {
            self.clips.lock().unwrap().push(clip.clone());
            Ok(())
        }

        async fn play_samples(&self, buffer: &SampleBuffer) -> Result<(), PlaybackError> {
            self.buffers.lock().unwrap().push(buffer.clone());
            Ok(())
        }
    }

    fn status_recorder() -> (StatusObserver, Arc<StdMutex<Vec<String>>>) {
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let observer: StatusObserver =
            Arc::new(move |status: &Status| sink.lock().unwrap().push(status.to_string()));
        (observer, seen)
    }

    #[tokio::test]
    async fn full_cycle_prepares_reversed() {
        let (observer, statuses) = status_recorder();
        let deck = RecorderDeck::new(
            MockCapture::granting(vec![tone_recording()]),
            WavCodec::new(),
            CollectingSink::default(),
        )
        .with_observer(observer);

        deck.start_capture().await.unwrap();
        assert_eq!(deck.status().await, "recording");
        deck.stop_capture().await.unwrap();
        assert_eq!(deck.status().await, "reversed ready");

        let seen = statuses.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                "requesting microphone",
                "recording",
                "finalizing",
                "stopped",
                "reversed ready",
            ]
        );
    }

    #[tokio::test]
    async fn reversed_mirrors_the_decoded_original() {
        let sink = CollectingSink::default();
        let deck = RecorderDeck::new(
            MockCapture::granting(vec![tone_recording()]),
            WavCodec::new(),
            sink.clone(),
        );

        deck.start_capture().await.unwrap();
        deck.stop_capture().await.unwrap();
        deck.play_reversed().await.unwrap();

        // Decode the same recording independently to compare against
        let codec = WavCodec::new();
        let clip = codec.encode(&tone_recording()).await.unwrap();
        let original = codec.decode(&clip).await.unwrap();

        let buffers = sink.buffers.lock().unwrap();
        let reversed = &buffers[0];
        assert_eq!(reversed.frames(), original.frames());
        assert_eq!(reversed.channel_count(), original.channel_count());
        assert_eq!(reversed.sample_rate(), original.sample_rate());

        let last = original.frames() - 1;
        assert_eq!(reversed.channel(0)[0], original.channel(0)[last]);
        assert_eq!(reversed.channel(0)[last], original.channel(0)[0]);
    }

    #[tokio::test]
    async fn stop_without_capture_is_a_noop() {
        let (observer, statuses) = status_recorder();
        let deck = RecorderDeck::new(
            MockCapture::granting(Vec::new()),
            WavCodec::new(),
            CollectingSink::default(),
        )
        .with_observer(observer);

        deck.stop_capture().await.unwrap();

        assert_eq!(deck.status().await, "idle");
        assert!(statuses.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn start_while_recording_is_a_noop() {
        let deck = RecorderDeck::new(
            MockCapture::granting(vec![tone_recording()]),
            WavCodec::new(),
            CollectingSink::default(),
        );

        deck.start_capture().await.unwrap();
        deck.start_capture().await.unwrap();
        assert_eq!(deck.status().await, "recording");
    }

    #[tokio::test]
    async fn play_without_clip_is_a_noop() {
        let sink = CollectingSink::default();
        let deck = RecorderDeck::new(
            MockCapture::granting(Vec::new()),
            WavCodec::new(),
            sink.clone(),
        );

        deck.play_original().await.unwrap();
        deck.play_reversed().await.unwrap();

        assert!(sink.clips.lock().unwrap().is_empty());
        assert!(sink.buffers.lock().unwrap().is_empty());
        assert_eq!(deck.status().await, "idle");
    }

    #[tokio::test]
    async fn permission_denied_surfaces_error_status() {
        let deck = RecorderDeck::new(
            MockCapture::denying(CaptureError::PermissionDenied("access denied".to_string())),
            WavCodec::new(),
            CollectingSink::default(),
        );

        deck.start_capture().await.unwrap();

        assert_eq!(
            deck.status().await,
            "error: microphone access denied: access denied"
        );
        // Start remains available; stop is a no-op in this state
        assert!(!deck.is_recording().await);
        deck.stop_capture().await.unwrap();
        assert!(deck.status().await.starts_with("error:"));
    }

    #[tokio::test]
    async fn second_cycle_replaces_reversed_buffer() {
        let short = RawRecording::from_chunks(vec![vec![100i16; 50]], 1, SAMPLE_RATE);
        let long = RawRecording::from_chunks(vec![vec![-200i16; 80]], 1, SAMPLE_RATE);
        let sink = CollectingSink::default();
        let deck = RecorderDeck::new(
            MockCapture::granting(vec![short, long]),
            WavCodec::new(),
            sink.clone(),
        );

        deck.start_capture().await.unwrap();
        deck.stop_capture().await.unwrap();
        deck.start_capture().await.unwrap();
        deck.stop_capture().await.unwrap();
        deck.play_reversed().await.unwrap();

        let buffers = sink.buffers.lock().unwrap();
        assert_eq!(buffers.len(), 1);
        // Only the second cycle's audio plays; nothing of the first survives
        assert_eq!(buffers[0].frames(), 80);
        assert!(buffers[0].channel(0).iter().all(|&s| s < 0.0));
    }

    #[tokio::test]
    async fn decode_failure_keeps_clip_playable() {
        let sink = CollectingSink::default();
        let deck = RecorderDeck::new(
            MockCapture::granting(vec![tone_recording()]),
            CorruptingCodec {
                inner: WavCodec::new(),
            },
            sink.clone(),
        );

        deck.start_capture().await.unwrap();
        deck.stop_capture().await.unwrap();

        assert_eq!(
            deck.status().await,
            "error preparing reversed: failed to decode clip: corrupt clip"
        );

        // Reversed playback is disabled, original playback still works
        deck.play_reversed().await.unwrap();
        assert!(sink.buffers.lock().unwrap().is_empty());
        deck.play_original().await.unwrap();
        assert_eq!(sink.clips.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn zero_length_recording_reverses_cleanly() {
        let deck = RecorderDeck::new(
            MockCapture::granting(vec![RawRecording::new(1, SAMPLE_RATE)]),
            WavCodec::new(),
            CollectingSink::default(),
        );

        deck.start_capture().await.unwrap();
        deck.stop_capture().await.unwrap();

        assert_eq!(deck.status().await, "reversed ready");
        assert_eq!(deck.clip_size().await.map(|s| s.ends_with("B")), Some(true));
    }

    #[tokio::test]
    async fn reversed_playback_reports_transitions() {
        let (observer, statuses) = status_recorder();
        let deck = RecorderDeck::new(
            MockCapture::granting(vec![tone_recording()]),
            WavCodec::new(),
            CollectingSink::default(),
        )
        .with_observer(observer);

        deck.start_capture().await.unwrap();
        deck.stop_capture().await.unwrap();
        deck.play_reversed().await.unwrap();

        let seen = statuses.lock().unwrap().clone();
        let tail = &seen[seen.len() - 2..];
        assert_eq!(tail, ["playing reversed", "idle"]);
    }
}
