use core::fmt;

use serde::{Deserialize, Serialize};

use crate::notes::Note;
use crate::strobe::STROBE_DURATION;

pub const DEFAULT_POLL_INTERVAL_MICROS: u32 = 20;

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json_core::de::Error),
    ZeroPulseWidth,
    PollIntervalTooLong,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "Config parse error: {}", e),
            ConfigError::ZeroPulseWidth => write!(f, "Pulse width must be above zero"),
            ConfigError::PollIntervalTooLong => {
                write!(f, "Poll interval must be shorter than the pulse width")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunerConfig {
    pub pulse_width_us: u32,
    pub poll_interval_us: u32,
    pub initial_note: Option<Note>, // None = start with the tuner off
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            pulse_width_us: STROBE_DURATION,
            poll_interval_us: DEFAULT_POLL_INTERVAL_MICROS,
            initial_note: None,
        }
    }
}

impl TunerConfig {
    /// Parse a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &[u8]) -> Result<Self, ConfigError> {
        let (config, _) =
            serde_json_core::from_slice::<TunerConfig>(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pulse_width_us == 0 {
            return Err(ConfigError::ZeroPulseWidth);
        }
        // Polling slower than a pulse stretches every flash.
        if self.poll_interval_us >= self.pulse_width_us {
            return Err(ConfigError::PollIntervalTooLong);
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<heapless::String<128>, serde_json_core::ser::Error> {
        serde_json_core::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(TunerConfig::from_json(b"{}").unwrap(), TunerConfig::default());
    }

    #[test]
    fn parses_all_fields() {
        let config = TunerConfig::from_json(
            br#"{"pulse_width_us":400,"poll_interval_us":50,"initial_note":"A2"}"#,
        )
        .unwrap();
        assert_eq!(config.pulse_width_us, 400);
        assert_eq!(config.poll_interval_us, 50);
        assert_eq!(config.initial_note, Some(Note::A2));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            TunerConfig::from_json(br#"{"pulse_width_us":0}"#),
            Err(ConfigError::ZeroPulseWidth)
        ));
        assert!(matches!(
            TunerConfig::from_json(br#"{"poll_interval_us":250}"#),
            Err(ConfigError::PollIntervalTooLong)
        ));
        assert!(matches!(
            TunerConfig::from_json(br#"{"initial_note":"C9"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn writes_json_that_reads_back() {
        let config = TunerConfig {
            initial_note: Some(Note::G3),
            ..TunerConfig::default()
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("\"G3\""));
        assert_eq!(TunerConfig::from_json(json.as_bytes()).unwrap(), config);
    }
}
