//! Presentation-level controllers
//!
//! Screen rendering itself belongs to the host; this layer only decides
//! what the host window should be showing.

pub mod fullscreen;

pub use fullscreen::{ExitCallback, FullscreenController, Orientation, ViewHandle};
