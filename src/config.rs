use crate::error::{MonitorError, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use strum::{Display, EnumString};

/// Load environment variables from a .env file in the working directory.
/// Values may contain spaces without quoting; surrounding quotes are stripped.
pub fn load_dotenv() {
    load_dotenv_from(Path::new(".env"));
}

fn load_dotenv_from(env_path: &Path) {
    let content = match fs::read_to_string(env_path) {
        Ok(c) => c,
        Err(_) => return,
    };

    for (key, value) in parse_dotenv(&content) {
        // Variables already present in the environment win
        if std::env::var(key).is_err() {
            // SAFETY: called from main before the tokio runtime is built, while
            // the process is still single-threaded
            unsafe { std::env::set_var(key, value) };
        }
    }
}

fn parse_dotenv(content: &str) -> Vec<(&str, &str)> {
    let mut pairs = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(eq_pos) = line.find('=') {
            let key = line[..eq_pos].trim();
            let mut value = line[eq_pos + 1..].trim();

            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = &value[1..value.len() - 1];
            }

            pairs.push((key, value));
        }
    }
    pairs
}

/// Which sensor backend feeds the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SensorSourceKind {
    /// Two fixed sensors, never changes.
    Dummy,
    /// Simulated sensors that flip at a fixed interval.
    Blinking,
}

impl SensorSourceKind {
    pub fn parse(value: &str) -> Result<Self> {
        Self::from_str(value).map_err(|_| MonitorError::UnknownSensorSource(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self> {
        Self::from_str(value).map_err(|_| MonitorError::UnknownOutputFormat(value.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub sensors: SensorConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    pub source: SensorSourceKind,
    pub blink_interval_ms: u64,
    pub blinking_sensor_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sensors: SensorConfig {
                source: SensorSourceKind::Dummy,
                blink_interval_ms: 1000,
                blinking_sensor_count: 4,
            },
            display: DisplayConfig {
                output: OutputFormat::Text,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from defaults overridden by whatever `lookup` returns.
    /// Unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(source) = lookup("MONITOR_SENSOR_SOURCE") {
            match SensorSourceKind::parse(&source) {
                Ok(kind) => config.sensors.source = kind,
                Err(e) => warn!("[Config] {}, keeping {}", e, config.sensors.source),
            }
        }
        if let Some(interval) = lookup("MONITOR_BLINK_INTERVAL_MS")
            && let Ok(ms) = interval.parse::<u64>()
        {
            if ms == 0 {
                warn!(
                    "[Config] Blink interval must be non-zero, keeping {} ms",
                    config.sensors.blink_interval_ms
                );
            } else {
                config.sensors.blink_interval_ms = ms;
            }
        }
        if let Some(count) = lookup("MONITOR_BLINKING_SENSORS")
            && let Ok(n) = count.parse()
        {
            config.sensors.blinking_sensor_count = n;
        }
        if let Some(output) = lookup("MONITOR_OUTPUT") {
            match OutputFormat::parse(&output) {
                Ok(format) => config.display.output = format,
                Err(e) => warn!("[Config] {}, keeping {}", e, config.display.output),
            }
        }

        config
    }
}
