//! # Scan Settings
//!
//! [`ScanSettings`] is an explicit value handed to the scanner for the
//! duration of one scan. Persisting it is the job of [`SettingsStore`], which
//! front-ends call before and after a scan; the engine itself never touches
//! the disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ScanError, SettingsError};
use crate::network::subnet::SubnetPrefix;

/// Smallest per-attempt deadline accepted. Shorter deadlines starve the
/// concurrency ceiling with attempts that can never succeed.
pub const MIN_TIMEOUT_MS: u64 = 500;

pub const STORE_KEY: &str = "smartroom-finder-settings";
const APP_DIR: &str = "roomfinder";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanSettings {
    /// Dotted `/24` prefixes, each ending in `.`.
    pub subnets: Vec<String>,
    /// Candidate ports, tried in order. First success wins.
    pub ports: Vec<u16>,
    /// Deadline for each stage of each probe attempt.
    pub timeout_ms: u64,
    /// Last address used for a manual probe.
    pub manual_ip: String,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            subnets: vec![
                "192.168.1.".to_string(),
                "192.168.0.".to_string(),
                "10.0.0.".to_string(),
            ],
            ports: vec![80, 443, 3000, 8080],
            timeout_ms: 3000,
            manual_ip: String::new(),
        }
    }
}

impl ScanSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Checks every invariant the scanner relies on.
    pub fn validate(&self) -> Result<(), ScanError> {
        self.validate_probe()?;
        self.prefixes().map(|_| ())
    }

    /// Checks only what a single-address probe needs: ports and deadline.
    pub fn validate_probe(&self) -> Result<(), ScanError> {
        if self.ports.is_empty() {
            return Err(ScanError::InvalidSettings(
                "at least one candidate port is required".into(),
            ));
        }
        if self.ports.contains(&0) {
            return Err(ScanError::InvalidSettings("port 0 cannot be probed".into()));
        }
        if self.timeout_ms < MIN_TIMEOUT_MS {
            return Err(ScanError::InvalidSettings(format!(
                "timeout of {}ms is below the {MIN_TIMEOUT_MS}ms minimum",
                self.timeout_ms
            )));
        }
        Ok(())
    }

    /// Parses the configured subnets, failing on the first malformed prefix.
    pub fn prefixes(&self) -> Result<Vec<SubnetPrefix>, ScanError> {
        self.subnets
            .iter()
            .map(|s| s.parse::<SubnetPrefix>().map_err(ScanError::InvalidSettings))
            .collect()
    }

    /// Applies every field present in `patch`, leaving the rest untouched.
    pub fn merge(&mut self, patch: ScanSettingsPatch) {
        if let Some(subnets) = patch.subnets {
            self.subnets = subnets;
        }
        if let Some(ports) = patch.ports {
            self.ports = ports;
        }
        if let Some(timeout_ms) = patch.timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        if let Some(manual_ip) = patch.manual_ip {
            self.manual_ip = manual_ip;
        }
    }
}

/// A partial update of [`ScanSettings`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSettingsPatch {
    pub subnets: Option<Vec<String>>,
    pub ports: Option<Vec<u16>>,
    pub timeout_ms: Option<u64>,
    pub manual_ip: Option<String>,
}

impl ScanSettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// JSON-file persistence for [`ScanSettings`].
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store in the platform configuration directory.
    pub fn open_default() -> Result<Self, SettingsError> {
        let dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(Self::new(dir.join(APP_DIR).join(format!("{STORE_KEY}.json"))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored settings. A missing file yields the defaults.
    pub fn load(&self) -> Result<ScanSettings, SettingsError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no settings at {}, using defaults", self.path.display());
                Ok(ScanSettings::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, settings: &ScanSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        debug!("saved settings to {}", self.path.display());
        Ok(())
    }

    /// Loads, merges `patch`, saves, and returns the result.
    pub fn update(&self, patch: ScanSettingsPatch) -> Result<ScanSettings, SettingsError> {
        let mut settings = self.load()?;
        settings.merge(patch);
        self.save(&settings)?;
        Ok(settings)
    }

    pub fn reset(&self) -> Result<ScanSettings, SettingsError> {
        let settings = ScanSettings::default();
        self.save(&settings)?;
        Ok(settings)
    }
}
