//! Microphone capture via cpal
//!
//! Acquires the default input device, downmixes to mono and forwards f32
//! sample buffers over a channel. Exactly one stream may be held at a time.

use crate::{CharlaError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use crossbeam_channel::Sender;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct AudioInput {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    is_capturing: Arc<Mutex<bool>>,
}

impl AudioInput {
    /// Open the default input device. Fails with `DeviceUnavailable` when
    /// no input device exists or its configuration cannot be read.
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();

        let device = host.default_input_device().ok_or_else(|| {
            CharlaError::DeviceUnavailable("no input device available".to_string())
        })?;

        info!(
            "Using input device: {}",
            device.name().unwrap_or_else(|_| "Unknown".to_string())
        );

        let config = device
            .default_input_config()
            .map_err(|e| {
                CharlaError::DeviceUnavailable(format!("failed to get input config: {}", e))
            })?
            .into();

        Ok(Self {
            device,
            config,
            stream: None,
            is_capturing: Arc::new(Mutex::new(false)),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    /// Channels delivered to the consumer; the stream is downmixed to mono
    pub fn output_channels(&self) -> u16 {
        1
    }

    /// Start capturing and forward sample buffers to `sample_tx`
    pub fn start(&mut self, sample_tx: Sender<Vec<f32>>) -> Result<()> {
        if *self.is_capturing.lock() {
            return Err(CharlaError::Capture(
                "capture stream already running".to_string(),
            ));
        }

        let channels = self.config.channels as usize;
        let is_capturing = Arc::clone(&self.is_capturing);

        let err_fn = |err| {
            error!("Audio input stream error: {}", err);
        };

        let stream = self
            .device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if !*is_capturing.lock() {
                        return;
                    }

                    // Downmix to mono by averaging the frame
                    let samples: Vec<f32> = if channels == 1 {
                        data.to_vec()
                    } else {
                        data.chunks(channels)
                            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
                            .collect()
                    };

                    if let Err(e) = sample_tx.try_send(samples) {
                        debug!("Failed to forward samples: {}", e);
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| {
                CharlaError::DeviceUnavailable(format!("failed to build input stream: {}", e))
            })?;

        stream.play().map_err(|e| {
            CharlaError::DeviceUnavailable(format!("failed to start input stream: {}", e))
        })?;

        *self.is_capturing.lock() = true;
        self.stream = Some(stream);

        info!("Microphone capture started");
        Ok(())
    }

    /// Stop capturing and release the stream
    pub fn stop(&mut self) {
        *self.is_capturing.lock() = false;

        if let Some(stream) = self.stream.take() {
            drop(stream);
            info!("Microphone capture stopped");
        }
    }

    pub fn is_capturing(&self) -> bool {
        *self.is_capturing.lock()
    }
}

impl Drop for AudioInput {
    fn drop(&mut self) {
        self.stop();
    }
}
