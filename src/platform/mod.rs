//! Platform collaborators
//!
//! The shell never talks to a browser engine, identity provider, or OS
//! directly. It goes through the traits below, so hosts (and tests) supply
//! their own implementations.

pub mod browser;
pub mod connectivity;
pub mod console;
pub mod session_store;

use crate::app::state::Screen;
use crate::config::BrowserSettings;
use crate::domain::navigation::NavigationGate;
use crate::domain::session::{AuthFailure, Credentials, Session};
use crate::ui::fullscreen::{Orientation, ViewHandle};

pub use browser::{BrowserState, HeadlessBrowser};
pub use connectivity::{OverrideConnectivity, SystemConnectivity};
pub use console::ConsoleWindow;
pub use session_store::MemorySessionStore;

/// Answers "is a network path available right now?"
///
/// Every call is a fresh snapshot; nothing is cached between calls.
pub trait ConnectivityOracle {
    fn is_connected(&self) -> bool;
}

/// Identity-provider session access
pub trait SessionStore {
    fn current_session(&self) -> Option<Session>;

    /// Starts the interactive login flow
    ///
    /// The outcome arrives later as a `LoginFinished` event.
    fn launch_login(&mut self);

    /// Verifies credentials with the provider and opens a session
    fn sign_in(&mut self, credentials: &Credentials) -> Result<Session, AuthFailure>;

    fn sign_out(&mut self);
}

/// Embedded browser surface showing the allow-listed site
pub trait BrowserSurface {
    fn apply_settings(&mut self, settings: &BrowserSettings);

    /// Installs the filter consulted for every surface-originated navigation
    fn attach_navigation_gate(&mut self, gate: NavigationGate);

    fn load_url(&mut self, url: &str);
    fn current_url(&self) -> Option<String>;
    fn can_go_back(&self) -> bool;
    fn go_back(&mut self);

    fn save_state(&self) -> Option<BrowserState>;
    fn restore_state(&mut self, state: BrowserState);
}

/// Host window: top-level screens, system chrome, orientation
pub trait WindowHost {
    fn show_screen(&mut self, screen: Screen);

    /// Hides (true) or restores (false) status and navigation bars
    fn set_immersive(&mut self, immersive: bool);

    fn requested_orientation(&self) -> Orientation;
    fn set_requested_orientation(&mut self, orientation: Orientation);

    fn attach_fullscreen_view(&mut self, view: ViewHandle);
    fn detach_fullscreen_view(&mut self, view: ViewHandle);

    /// Visibility of the content surface underneath a fullscreen view
    fn set_content_visible(&mut self, visible: bool);

    /// Short transient message
    fn show_message(&mut self, message: &str);

    fn close(&mut self);
}
