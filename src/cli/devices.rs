//! List available audio input devices.

use cpal::traits::{DeviceTrait, HostTrait};

use crate::application::ports::CaptureError;

use super::presenter::Presenter;

/// Lists all available audio input devices on the system.
pub fn handle_devices_command(presenter: &Presenter) -> Result<(), CaptureError> {
    let host = cpal::default_host();
    let devices: Vec<cpal::Device> = host
        .input_devices()
        .map_err(|e| CaptureError::Stream(e.to_string()))?
        .filter(|device| device.name().is_ok())
        .collect();

    if devices.is_empty() {
        presenter.output("No audio input devices found on this system.");
        return Ok(());
    }

    let default_name = host.default_input_device().and_then(|d| d.name().ok());

    presenter.output("Available audio input devices:");
    for device in &devices {
        let name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        let marker = if default_name.as_ref() == Some(&name) {
            " [default]"
        } else {
            ""
        };

        let config = match device.default_input_config() {
            Ok(config) => format!(
                "{} Hz, {} channels",
                config.sample_rate().0,
                config.channels()
            ),
            Err(_) => "configuration unavailable".to_string(),
        };

        presenter.key_value(&format!("{}{}", name, marker), &config);
    }

    Ok(())
}
