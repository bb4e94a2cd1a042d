//! Configuration module for kiosk-shell
//!
//! The allow-list, browser settings and connectivity probe are read once at
//! startup from a TOML file and stay fixed for the life of the process.

pub mod shell;

pub use shell::{BrowserSettings, ConfigError, ConnectivityConfig, ShellConfig};
