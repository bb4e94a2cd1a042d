//! Terminal-backed host window
//!
//! Screens and messages are written to stdout; window chrome changes are
//! only tracked and logged.

use crate::app::state::Screen;
use crate::platform::WindowHost;
use crate::ui::fullscreen::{Orientation, ViewHandle};

#[derive(Debug)]
pub struct ConsoleWindow {
    screen: Option<Screen>,
    orientation: Orientation,
    immersive: bool,
    content_visible: bool,
    fullscreen_view: Option<ViewHandle>,
    closed: bool,
}

impl Default for ConsoleWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleWindow {
    pub fn new() -> Self {
        Self {
            screen: None,
            orientation: Orientation::Unspecified,
            immersive: false,
            content_visible: true,
            fullscreen_view: None,
            closed: false,
        }
    }

    pub fn screen(&self) -> Option<Screen> {
        self.screen
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_immersive(&self) -> bool {
        self.immersive
    }
}

impl WindowHost for ConsoleWindow {
    fn show_screen(&mut self, screen: Screen) {
        self.screen = Some(screen);
        match screen {
            Screen::NoConnectivity => println!("[no connection] type `retry` once you are back online"),
            Screen::Login => println!("[login] type `login <email> <password>` or `cancel`"),
            Screen::Content => println!("[content]"),
        }
    }

    fn set_immersive(&mut self, immersive: bool) {
        tracing::debug!(immersive, "system bars");
        self.immersive = immersive;
    }

    fn requested_orientation(&self) -> Orientation {
        self.orientation
    }

    fn set_requested_orientation(&mut self, orientation: Orientation) {
        tracing::debug!(?orientation, "orientation requested");
        self.orientation = orientation;
    }

    fn attach_fullscreen_view(&mut self, view: ViewHandle) {
        println!("[fullscreen] view {} (press `back` to leave)", view.0);
        self.fullscreen_view = Some(view);
    }

    fn detach_fullscreen_view(&mut self, view: ViewHandle) {
        if self.fullscreen_view == Some(view) {
            self.fullscreen_view = None;
        }
    }

    fn set_content_visible(&mut self, visible: bool) {
        self.content_visible = visible;
    }

    fn show_message(&mut self, message: &str) {
        println!("  {message}");
    }

    fn close(&mut self) {
        self.screen = None;
        self.closed = true;
    }
}
