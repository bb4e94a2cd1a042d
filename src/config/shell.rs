use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::allow_list::{AllowList, AllowListError};

pub const DEFAULT_ALLOWED_URL: &str = "https://streamboxweb.netlify.app/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid allow-list: {0}")]
    AllowList(#[from] AllowListError),
    #[error("Connectivity probe address `{address}` is not a socket address")]
    InvalidProbeAddress { address: String },
    #[error("Connectivity probe timeout must be greater than zero")]
    ZeroProbeTimeout,
}

/// Settings applied to the browser surface when the content screen opens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowserSettings {
    pub javascript_enabled: bool,
    pub dom_storage_enabled: bool,
    pub support_zoom: bool,
    pub builtin_zoom_controls: bool,
    /// On-screen +/- buttons; pinch zoom works without them
    pub display_zoom_controls: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            javascript_enabled: true,
            dom_storage_enabled: true,
            support_zoom: true,
            builtin_zoom_controls: true,
            display_zoom_controls: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectivityConfig {
    pub probe_address: String,
    pub timeout_ms: u64,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_address: "1.1.1.1:443".to_string(),
            timeout_ms: 300,
        }
    }
}

/// Top-level shell configuration, read from a TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    pub allow_list: Vec<String>,
    pub browser: BrowserSettings,
    pub connectivity: ConnectivityConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            allow_list: vec![DEFAULT_ALLOWED_URL.to_string()],
            browser: BrowserSettings::default(),
            connectivity: ConnectivityConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Reads and validates a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Like [`load`](Self::load), falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.allow_list()?;
        self.probe_address()?;
        if self.connectivity.timeout_ms == 0 {
            return Err(ConfigError::ZeroProbeTimeout);
        }
        Ok(())
    }

    pub fn allow_list(&self) -> Result<AllowList, ConfigError> {
        Ok(AllowList::new(self.allow_list.iter().cloned())?)
    }

    pub fn probe_address(&self) -> Result<SocketAddr, ConfigError> {
        self.connectivity
            .probe_address
            .parse()
            .map_err(|_| ConfigError::InvalidProbeAddress {
                address: self.connectivity.probe_address.clone(),
            })
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.connectivity.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = ShellConfig::default();
        config.validate().unwrap();
        assert_eq!(config.allow_list().unwrap().default_url(), DEFAULT_ALLOWED_URL);
        assert!(config.browser.javascript_enabled);
        assert!(!config.browser.display_zoom_controls);
    }

    #[test]
    fn shipped_example_matches_defaults() {
        let config = ShellConfig::from_toml_str(include_str!("../../kiosk-shell.example.toml")).unwrap();
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn default_connectivity_check_is_short() {
        assert!(ShellConfig::default().probe_timeout() <= Duration::from_millis(500));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ShellConfig::from_toml_str(
            r#"
            allow_list = ["https://app.example.com/", "https://cdn.example.com/"]

            [browser]
            support_zoom = false
            "#,
        )
        .unwrap();

        assert_eq!(config.allow_list.len(), 2);
        assert!(!config.browser.support_zoom);
        assert!(config.browser.dom_storage_enabled);
        assert_eq!(config.connectivity, ConnectivityConfig::default());
    }

    #[test]
    fn empty_allow_list_is_rejected() {
        let err = ShellConfig::from_toml_str("allow_list = []").unwrap_err();
        assert!(matches!(err, ConfigError::AllowList(AllowListError::Empty)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ShellConfig::from_toml_str("allowlist = [\"x\"]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_probe_settings_are_rejected() {
        let err = ShellConfig::from_toml_str("[connectivity]\nprobe_address = \"nowhere\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidProbeAddress { .. }));

        let err = ShellConfig::from_toml_str("[connectivity]\ntimeout_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroProbeTimeout));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "allow_list = [\"https://app.example.com/\"]").unwrap();

        let config = ShellConfig::load(file.path()).unwrap();
        assert_eq!(config.allow_list, vec!["https://app.example.com/".to_string()]);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert_eq!(ShellConfig::load_or_default(&path).unwrap(), ShellConfig::default());
        assert!(matches!(ShellConfig::load(&path), Err(ConfigError::Read { .. })));
    }
}
