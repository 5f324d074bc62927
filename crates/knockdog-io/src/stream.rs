//! Live microphone capture via cpal, feeding [`knockdog_core::Analyzer`].

use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Host, Stream};
use knockdog_core::{Analyzer, Detections, Flags, SAMPLE_RATE};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Input device information.
#[derive(Debug, Clone)]
pub struct AudioDevice {
    /// Device name, as reported by the host.
    pub name: String,
    /// Whether the device exposes a 16 kHz mono input configuration.
    pub supports_mono_16k: bool,
}

/// Stream configuration. The detector has no resampling stage, so the
/// selected device must natively offer mono 16 kHz capture.
#[derive(Debug, Clone, Default)]
pub struct StreamConfig {
    /// Device name to capture from; `None` selects the host default.
    pub input_device: Option<String>,
    /// Flags forwarded to every [`Analyzer::process`] call.
    pub flags: Flags,
}

/// List available input devices along with whether each one can serve
/// mono 16 kHz capture without resampling.
pub fn list_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    for device in host.input_devices().map_err(|e| Error::Stream(e.to_string()))? {
        let Ok(name) = device.name() else {
            continue;
        };
        let supports_mono_16k = device
            .supported_input_configs()
            .map(|mut configs| {
                configs.any(|c| c.channels() == 1 && c.min_sample_rate().0 <= SAMPLE_RATE && SAMPLE_RATE <= c.max_sample_rate().0)
            })
            .unwrap_or(false);
        devices.push(AudioDevice { name, supports_mono_16k });
    }

    Ok(devices)
}

/// Name of the host's default input device, if any.
pub fn default_input_device() -> Result<String> {
    cpal::default_host().default_input_device().and_then(|d| d.name().ok()).ok_or(Error::NoDevice)
}

/// A running (or ready-to-run) live capture session.
pub struct AudioStream {
    host: Host,
    device: Device,
    config: StreamConfig,
    running: Arc<AtomicBool>,
    _input_stream: Option<Stream>,
}

impl AudioStream {
    /// Resolve the configured (or default) input device. Does not start
    /// capture yet; call [`AudioStream::run`] to begin.
    pub fn new(config: StreamConfig) -> Result<Self> {
        let host = cpal::default_host();
        let device = match &config.input_device {
            Some(name) => find_input_device(&host, name)?,
            None => host.default_input_device().ok_or(Error::NoDevice)?,
        };

        Ok(Self {
            host,
            device,
            config,
            running: Arc::new(AtomicBool::new(false)),
            _input_stream: None,
        })
    }

    /// Start capturing, running every block of samples through an
    /// `Analyzer` and invoking `on_detections` whenever a block produces
    /// a non-empty detection mask. Blocks the calling thread until
    /// [`AudioStream::stop`] is called from another thread.
    pub fn run<F>(&mut self, mut on_detections: F) -> Result<()>
    where
        F: FnMut(Detections) + Send + 'static,
    {
        let supported_config = self
            .device
            .supported_input_configs()
            .map_err(|e| Error::Stream(e.to_string()))?
            .find(|c| c.channels() == 1 && c.min_sample_rate().0 <= SAMPLE_RATE && SAMPLE_RATE <= c.max_sample_rate().0)
            .ok_or_else(|| Error::UnsupportedDeviceRate(self.device.name().unwrap_or_default()))?
            .with_sample_rate(cpal::SampleRate(SAMPLE_RATE));

        let analyzer = Arc::new(Mutex::new(Analyzer::new()));
        let flags = self.config.flags;
        let running = Arc::clone(&self.running);
        running.store(true, Ordering::SeqCst);

        let stream = self
            .device
            .build_input_stream(
                &supported_config.into(),
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    if !running.load(Ordering::SeqCst) {
                        return;
                    }
                    let detections = {
                        let mut analyzer = analyzer.lock().expect("analyzer mutex poisoned");
                        analyzer.process(data, None, flags, None)
                    };
                    if !detections.is_empty() {
                        on_detections(detections);
                    }
                },
                |err| tracing::error!(%err, "input stream error"),
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        stream.play().map_err(|e| Error::Stream(e.to_string()))?;
        self._input_stream = Some(stream);

        while self.running.load(Ordering::SeqCst) {
            std::thread::sleep(std::time::Duration::from_millis(100));
        }

        Ok(())
    }

    /// Stop capture. Safe to call from another thread while `run` blocks.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Whether capture is currently active.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Name of the resolved input device.
    pub fn device_name(&self) -> String {
        self.device.name().unwrap_or_else(|_| "<unknown>".to_string())
    }

    /// The host backend in use (e.g. ALSA, CoreAudio, WASAPI).
    pub fn host_id(&self) -> cpal::HostId {
        self.host.id()
    }
}

fn find_input_device(host: &Host, name: &str) -> Result<Device> {
    host.input_devices()
        .map_err(|e| Error::Stream(e.to_string()))?
        .find(|d| d.name().map(|n| n == name).unwrap_or(false))
        .ok_or_else(|| Error::DeviceNotFound(name.to_string()))
}
