use crate::data::persistence::Persistable;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Presentation settings read from the `settings` key of config.yaml.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// How long a freshly selected day stays raised.
    pub pulse_ms: u64,
    /// Delay before a newly shown month starts sliding into place.
    pub transition_delay_ms: u64,
    pub transition_ms: u64,
    pub show_legend: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            pulse_ms: 150,
            transition_delay_ms: 50,
            transition_ms: 300,
            show_legend: true,
        }
    }
}

impl AppSettings {
    pub fn load() -> Result<Self> {
        Ok(ConfigFile::load()?.settings)
    }

    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }

    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// Shape of config.yaml on disk.
#[derive(Serialize, Deserialize, Default, Debug)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub settings: AppSettings,
}

impl Persistable for ConfigFile {
    fn filename() -> &'static str {
        "config.yaml"
    }
}
