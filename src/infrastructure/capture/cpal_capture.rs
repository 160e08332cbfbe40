//! Cross-platform microphone capture using cpal
//!
//! Captures at the device's native channel count and sample rate (or a
//! configured rate the device supports). Every device callback buffer is
//! appended as one chunk, preserving arrival order for finalization.

use std::sync::atomic::{AtomicBool, AtomicU16, AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use tokio::sync::oneshot;
use tokio::time::Duration as TokioDuration;
use tracing::{debug, warn};

use crate::application::ports::{CaptureDevice, CaptureError};
use crate::domain::audio::RawRecording;

/// Microphone capture using cpal.
///
/// The stream lives entirely on a background thread because cpal::Stream is
/// not Send; the thread drops it when capture stops, which releases the
/// hardware device.
pub struct CpalCapture {
    /// Preferred input device name (substring match); None = system default
    preferred_device: Option<String>,
    /// Preferred sample rate; None = device native rate
    preferred_sample_rate: Option<u32>,
    /// Captured chunks, one per device callback, in arrival order
    chunks: Arc<StdMutex<Vec<Vec<i16>>>>,
    /// Channel count of the live stream
    channel_count: Arc<AtomicU16>,
    /// Sample rate of the live stream
    sample_rate: Arc<AtomicU32>,
    /// Capture state
    capturing: Arc<AtomicBool>,
}

impl CpalCapture {
    /// Create a capture device with optional device/rate preferences
    pub fn new(preferred_device: Option<String>, preferred_sample_rate: Option<u32>) -> Self {
        Self {
            preferred_device,
            preferred_sample_rate,
            chunks: Arc::new(StdMutex::new(Vec::new())),
            channel_count: Arc::new(AtomicU16::new(0)),
            sample_rate: Arc::new(AtomicU32::new(0)),
            capturing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Find the input device, by name when configured
    fn select_device(preferred: Option<&str>) -> Result<cpal::Device, CaptureError> {
        let host = cpal::default_host();
        match preferred {
            Some(name) => {
                let wanted = name.to_lowercase();
                let mut devices = host
                    .input_devices()
                    .map_err(|e| classify_stream_error(&e))?;
                devices
                    .find(|device| {
                        device
                            .name()
                            .map(|n| n.to_lowercase().contains(&wanted))
                            .unwrap_or(false)
                    })
                    .ok_or(CaptureError::NoInputDevice)
            }
            None => host
                .default_input_device()
                .ok_or(CaptureError::NoInputDevice),
        }
    }

    /// Pick a stream config: the device default, with the preferred sample
    /// rate substituted when the device supports it at that shape
    fn select_config(
        device: &cpal::Device,
        preferred_rate: Option<u32>,
    ) -> Result<(StreamConfig, SampleFormat), CaptureError> {
        let default = device
            .default_input_config()
            .map_err(|e| classify_stream_error(&e))?;
        let sample_format = default.sample_format();
        let mut config = default.config();

        if let Some(rate) = preferred_rate {
            let supported = device
                .supported_input_configs()
                .map_err(|e| classify_stream_error(&e))?;
            let fits = supported.into_iter().any(|range| {
                range.sample_format() == sample_format
                    && range.channels() == config.channels
                    && range.min_sample_rate().0 <= rate
                    && range.max_sample_rate().0 >= rate
            });
            if fits {
                config.sample_rate = SampleRate(rate);
            } else {
                warn!(
                    rate,
                    "preferred sample rate not supported, using device default"
                );
            }
        }

        Ok((config, sample_format))
    }

    /// Build the input stream, appending each callback buffer as one chunk
    fn build_stream(
        device: &cpal::Device,
        config: &StreamConfig,
        sample_format: SampleFormat,
        chunks: Arc<StdMutex<Vec<Vec<i16>>>>,
        capturing: Arc<AtomicBool>,
    ) -> Result<cpal::Stream, CaptureError> {
        let err_fn = |err| warn!(error = %err, "input stream error");

        let stream = match sample_format {
            SampleFormat::I16 => device
                .build_input_stream(
                    config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        if capturing.load(Ordering::SeqCst) {
                            if let Ok(mut chunks) = chunks.lock() {
                                chunks.push(data.to_vec());
                            }
                        }
                    },
                    err_fn,
                    None,
                )
                .map_err(|e| classify_stream_error(&e))?,

            SampleFormat::F32 => device
                .build_input_stream(
                    config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        if capturing.load(Ordering::SeqCst) {
                            let converted: Vec<i16> =
                                data.iter().map(|&s| f32_to_i16(s)).collect();
                            if let Ok(mut chunks) = chunks.lock() {
                                chunks.push(converted);
                            }
                        }
                    },
                    err_fn,
                    None,
                )
                .map_err(|e| classify_stream_error(&e))?,

            other => {
                return Err(CaptureError::Stream(format!(
                    "unsupported sample format: {other:?}"
                )))
            }
        };

        Ok(stream)
    }
}

impl Default for CpalCapture {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[async_trait]
impl CaptureDevice for CpalCapture {
    async fn start(&self) -> Result<(), CaptureError> {
        if self.capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::Stream(
                "capture already in progress".to_string(),
            ));
        }

        self.chunks.lock().unwrap().clear();
        self.capturing.store(true, Ordering::SeqCst);

        let chunks = Arc::clone(&self.chunks);
        let channel_count = Arc::clone(&self.channel_count);
        let sample_rate = Arc::clone(&self.sample_rate);
        let capturing = Arc::clone(&self.capturing);
        let preferred_device = self.preferred_device.clone();
        let preferred_rate = self.preferred_sample_rate;
        let (ready_tx, ready_rx) = oneshot::channel();

        std::thread::spawn(move || {
            let startup = (|| {
                let device = Self::select_device(preferred_device.as_deref())?;
                let (config, sample_format) = Self::select_config(&device, preferred_rate)?;
                channel_count.store(config.channels, Ordering::SeqCst);
                sample_rate.store(config.sample_rate.0, Ordering::SeqCst);
                debug!(
                    channels = config.channels,
                    sample_rate = config.sample_rate.0,
                    ?sample_format,
                    "opening input stream"
                );

                let stream = Self::build_stream(
                    &device,
                    &config,
                    sample_format,
                    Arc::clone(&chunks),
                    Arc::clone(&capturing),
                )?;
                stream.play().map_err(|e| classify_stream_error(&e))?;
                Ok(stream)
            })();

            let stream = match startup {
                Ok(stream) => {
                    let _ = ready_tx.send(Ok(()));
                    stream
                }
                Err(err) => {
                    capturing.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(err));
                    return;
                }
            };

            while capturing.load(Ordering::SeqCst) {
                std::thread::sleep(std::time::Duration::from_millis(50));
            }

            // Dropping the stream releases the input device
            drop(stream);
        });

        match ready_rx.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(err),
            Err(_) => {
                self.capturing.store(false, Ordering::SeqCst);
                Err(CaptureError::Stream(
                    "capture thread exited before starting".to_string(),
                ))
            }
        }
    }

    async fn stop(&self) -> Result<RawRecording, CaptureError> {
        if !self.capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::Stream("no capture in progress".to_string()));
        }

        self.capturing.store(false, Ordering::SeqCst);

        // Give the capture thread a moment to drop the stream
        tokio::time::sleep(TokioDuration::from_millis(100)).await;

        let channel_count = self.channel_count.load(Ordering::SeqCst);
        let sample_rate = self.sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Err(CaptureError::Stream(
                "input stream never started".to_string(),
            ));
        }

        let chunks = std::mem::take(&mut *self.chunks.lock().unwrap());
        debug!(chunks = chunks.len(), "capture stopped");

        // An empty chunk list is a valid zero-length recording
        Ok(RawRecording::from_chunks(chunks, channel_count, sample_rate))
    }

    fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }
}

/// Convert one f32 sample to i16 with clipping
fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0) as i16
}

/// Map a stream error to the capture taxonomy. Permission failures are
/// reported by the backends as free-form text, so they are classified by
/// message.
fn classify_stream_error(err: &dyn std::fmt::Display) -> CaptureError {
    let detail = err.to_string();
    let lowered = detail.to_lowercase();
    if lowered.contains("permission") || lowered.contains("denied") {
        CaptureError::PermissionDenied(detail)
    } else {
        CaptureError::Stream(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_default_state() {
        let capture = CpalCapture::default();
        assert!(!capture.is_capturing());
    }

    #[test]
    fn f32_conversion_scales() {
        assert_eq!(f32_to_i16(0.0), 0);
        assert_eq!(f32_to_i16(1.0), 32767);
        assert_eq!(f32_to_i16(-1.0), -32767);
    }

    #[test]
    fn f32_conversion_clips_out_of_range() {
        assert_eq!(f32_to_i16(2.0), 32767);
        assert_eq!(f32_to_i16(-2.0), -32767);
    }

    #[test]
    fn permission_errors_are_classified_by_message() {
        let err = classify_stream_error(&"Permission denied by the OS");
        assert!(matches!(err, CaptureError::PermissionDenied(_)));

        let err = classify_stream_error(&"device disconnected");
        assert!(matches!(err, CaptureError::Stream(_)));
    }

    #[tokio::test]
    async fn stop_without_start_errors() {
        let capture = CpalCapture::default();
        assert!(capture.stop().await.is_err());
    }
}
