use std::path::Path;
use std::time::Duration;

use echo_core::EchoResult;
use echo_synth::SynthConfig;
use echo_visualizer::RenderSettings;
use serde::{Deserialize, Serialize};

/// Everything tunable about one instrument session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentConfig {
    pub synth: SynthConfig,
    pub render: RenderSettings,
    /// Delay between power-on and the first frame. 0 draws immediately.
    pub power_on_delay_ms: u64,
    /// Hold time before a fine-adjust button starts repeating.
    pub adjust_settle_ms: u64,
    pub adjust_period_ms: u64,
    pub schematic_cycle_ms: u64,
    /// Command queue capacity. Senders block when it is full.
    pub command_capacity: usize,
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            synth: SynthConfig::default(),
            render: RenderSettings::default(),
            power_on_delay_ms: 0,
            adjust_settle_ms: echo_synth::repeat::DEFAULT_SETTLE.as_millis() as u64,
            adjust_period_ms: echo_synth::repeat::DEFAULT_PERIOD.as_millis() as u64,
            schematic_cycle_ms: echo_synth::schematic::DEFAULT_CYCLE.as_millis() as u64,
            command_capacity: 256,
        }
    }
}

impl InstrumentConfig {
    pub fn from_json(json: &str) -> EchoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> EchoResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&text)?;
        log::info!("loaded instrument config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn power_on_delay(&self) -> Duration {
        Duration::from_millis(self.power_on_delay_ms)
    }

    pub fn adjust_settle(&self) -> Duration {
        Duration::from_millis(self.adjust_settle_ms)
    }

    pub fn adjust_period(&self) -> Duration {
        Duration::from_millis(self.adjust_period_ms)
    }

    pub fn schematic_cycle(&self) -> Duration {
        Duration::from_millis(self.schematic_cycle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use echo_core::EchoError;
    use echo_synth::PlateShaping;

    #[test]
    fn test_nested_override() {
        let json = r#"{ "power_on_delay_ms": 250, "synth": { "plate_shaping": "SharpenThin" } }"#;
        let config = InstrumentConfig::from_json(json).unwrap();
        assert_eq!(config.power_on_delay(), Duration::from_millis(250));
        assert_eq!(config.synth.plate_shaping, PlateShaping::SharpenThin);
        assert_eq!(config.synth.sample_count, 200);
        assert_eq!(config.adjust_settle(), Duration::from_millis(500));
        assert_eq!(config.adjust_period(), Duration::from_millis(100));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = InstrumentConfig::load("/nonexistent/echo-instrument.json").unwrap_err();
        assert!(matches!(err, EchoError::Io(_)));
    }
}
