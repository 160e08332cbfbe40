//! Config subcommand handling

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

use super::args::{ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Run one config subcommand against the store
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => {
            store.init().await?;
            presenter.success(&format!(
                "Config file created at: {}",
                store.path().display()
            ));
        }
        ConfigAction::Set { key, value } => {
            let mut config = store.load().await?;
            apply(&mut config, &key, &value)?;
            store.save(&config).await?;
            presenter.success(&format!("{} = {}", key, value));
        }
        ConfigAction::Get { key } => {
            let config = store.load().await?;
            presenter.output(&render(&config, &key)?);
        }
        ConfigAction::List => {
            let config = store.load().await?;
            for &key in VALID_CONFIG_KEYS {
                presenter.key_value(key, &render(&config, key)?);
            }
        }
        ConfigAction::Path => presenter.output(&store.path().to_string_lossy()),
    }
    Ok(())
}

/// Set one field from its string form
fn apply(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "device" => config.device = Some(value.to_string()),
        "sample_rate" => config.sample_rate = Some(parse_sample_rate(key, value)?),
        _ => return Err(unknown_key(key)),
    }
    Ok(())
}

/// Render one field, "(not set)" when absent
fn render(config: &AppConfig, key: &str) -> Result<String, ConfigError> {
    let value = match key {
        "device" => config.device.clone(),
        "sample_rate" => config.sample_rate.map(|r| r.to_string()),
        _ => return Err(unknown_key(key)),
    };
    Ok(value.unwrap_or_else(|| "(not set)".to_string()))
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    }
}

/// Parse and validate a sample rate value
fn parse_sample_rate(key: &str, value: &str) -> Result<u32, ConfigError> {
    let rate: u32 = value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: "Value must be a sample rate in Hz, e.g. 44100".to_string(),
    })?;
    if rate == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "Sample rate must be greater than zero".to_string(),
        });
    }
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_sets_known_keys() {
        let mut config = AppConfig::empty();
        apply(&mut config, "device", "USB Microphone").unwrap();
        apply(&mut config, "sample_rate", "48000").unwrap();
        assert_eq!(config.device.as_deref(), Some("USB Microphone"));
        assert_eq!(config.sample_rate, Some(48000));
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut config = AppConfig::empty();
        assert!(apply(&mut config, "volume", "11").is_err());
    }

    #[test]
    fn render_unset_field() {
        let config = AppConfig::empty();
        assert_eq!(render(&config, "device").unwrap(), "(not set)");
    }

    #[test]
    fn parse_sample_rate_valid() {
        assert_eq!(parse_sample_rate("sample_rate", "44100").unwrap(), 44100);
        assert_eq!(parse_sample_rate("sample_rate", "48000").unwrap(), 48000);
    }

    #[test]
    fn parse_sample_rate_invalid() {
        assert!(parse_sample_rate("sample_rate", "fast").is_err());
        assert!(parse_sample_rate("sample_rate", "-1").is_err());
        assert!(parse_sample_rate("sample_rate", "0").is_err());
    }
}
