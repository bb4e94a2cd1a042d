//! Application orchestration layer
//!
//! This module coordinates between the domain, UI, and platform layers.
//! It owns the screen-selection state machine and lifecycle event handling.

pub mod controller;
pub mod login;
pub mod state;

pub use controller::{AppController, AppError};
pub use login::{LoginScreen, LoginStep};
pub use state::{AppState, CloseReason, Effect, LifecycleEvent, Screen, StateMachine};
