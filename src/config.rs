//! Configuration file
//!
//! Optional TOML file, by default `~/.config/hidg/config.toml`:
//!
//! ```toml
//! device = "/dev/hidg0"
//! human_speed = true
//! dwell_ms = 80      # overrides the human_speed profile
//! debug = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dispatcher::DwellProfile;
use hidg_transport::DEFAULT_DEVICE_PATH;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HidgConfig {
    /// Gadget device node
    #[serde(default = "default_device")]
    pub device: PathBuf,
    /// Hold keys briefly between press and release
    #[serde(default)]
    pub human_speed: bool,
    /// Explicit hold time in milliseconds, overriding `human_speed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dwell_ms: Option<u64>,
    /// Log every report written
    #[serde(default)]
    pub debug: bool,
}

fn default_device() -> PathBuf {
    PathBuf::from(DEFAULT_DEVICE_PATH)
}

impl Default for HidgConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            human_speed: false,
            dwell_ms: None,
            debug: false,
        }
    }
}

impl HidgConfig {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hidg")
            .join("config.toml")
    }

    /// Load config from a file, or return default if not found
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: HidgConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn profile(&self) -> DwellProfile {
        if self.human_speed {
            DwellProfile::HumanSpeed
        } else {
            DwellProfile::Fast
        }
    }

    /// Hold time between press and release
    pub fn dwell(&self) -> Duration {
        match self.dwell_ms {
            Some(ms) => Duration::from_millis(ms),
            None => self.profile().duration(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = HidgConfig::default();
        assert_eq!(config.device, PathBuf::from("/dev/hidg0"));
        assert_eq!(config.profile(), DwellProfile::Fast);
        assert_eq!(config.dwell(), Duration::ZERO);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config: HidgConfig = toml::from_str("").unwrap();
        assert_eq!(config, HidgConfig::default());
    }

    #[test]
    fn human_speed_profile() {
        let config: HidgConfig = toml::from_str("human_speed = true").unwrap();
        assert_eq!(config.dwell(), DwellProfile::HUMAN_SPEED_DWELL);
    }

    #[test]
    fn dwell_override_wins() {
        let config: HidgConfig = toml::from_str(
            r#"
device = "/dev/hidg1"
human_speed = true
dwell_ms = 25
"#,
        )
        .unwrap();
        assert_eq!(config.device, PathBuf::from("/dev/hidg1"));
        assert_eq!(config.dwell(), Duration::from_millis(25));
    }

    #[test]
    fn unknown_type_is_error() {
        assert!(toml::from_str::<HidgConfig>("human_speed = \"yes\"").is_err());
    }

    #[test]
    fn save_and_load() {
        let dir = std::env::temp_dir().join(format!("hidg_config_{}", std::process::id()));
        let path = dir.join("config.toml");
        let config = HidgConfig {
            human_speed: true,
            debug: true,
            ..HidgConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(HidgConfig::load(&path).unwrap(), config);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_default() {
        let path = std::env::temp_dir().join("hidg_config_does_not_exist.toml");
        assert_eq!(HidgConfig::load(&path).unwrap(), HidgConfig::default());
    }
}
