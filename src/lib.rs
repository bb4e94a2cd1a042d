//! Kiosk-Shell: a gated web shell
//!
//! Signs the user in, then shows one fixed site in an embedded browser
//! surface that may only navigate to allow-listed prefixes.
//!
//! Layers:
//! - `domain`: allow-list, navigation gate, session types (pure)
//! - `app`: lifecycle state machine, controller, login screen
//! - `ui`: fullscreen media handling
//! - `platform`: collaborator traits and host implementations
//! - `config`: TOML settings

pub mod app;
pub mod config;
pub mod domain;
pub mod platform;
pub mod ui;

pub use app::{AppController, AppError, AppState, LifecycleEvent, Screen};
pub use config::ShellConfig;
pub use domain::allow_list::AllowList;
pub use domain::navigation::{NavigationDecision, NavigationGate};
