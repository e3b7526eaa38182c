use serde::{Deserialize, Serialize};

use crate::util::LongitudeConvention;

/* Config */
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub com_settings: ComSettings,
    pub observation_location: Option<ObservingLocation>,
    pub mount_settings: MountSettings,
}

/* Serial Port Settings */
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComSettings {
    pub path: String,
    pub baud_rate: u32,
    pub timeout_millis: u32,
}

impl ComSettings {
    #[cfg(windows)]
    pub const DEFAULT_PATH: &'static str = "COM3";
    #[cfg(not(windows))]
    pub const DEFAULT_PATH: &'static str = "/dev/ttyUSB0";

    pub const DEFAULT_BAUD_RATE: u32 = 19200;
}

impl Default for ComSettings {
    fn default() -> Self {
        Self {
            path: Self::DEFAULT_PATH.to_string(),
            baud_rate: Self::DEFAULT_BAUD_RATE,
            timeout_millis: 1000,
        }
    }
}

/* Location */
/// Kept as text so either notation can be used in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservingLocation {
    pub latitude: String,
    pub longitude: String,
}

/* Mount Settings */
#[derive(Default, Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MountSettings {
    pub longitude_convention: LongitudeConvention,
}
