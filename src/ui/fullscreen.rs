//! Exclusive fullscreen session for media requested by page content
//!
//! At most one custom view may be fullscreen at a time. The exit callback
//! handed over on entry fires exactly once, whether the session ends from the
//! back button or from the browser's own hide signal.

use crate::platform::WindowHost;

/// Opaque handle for a view the browser engine wants shown fullscreen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(pub u64);

/// Requested screen orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Unspecified,
    Portrait,
    Landscape,
    ReversePortrait,
    ReverseLandscape,
    /// Follows the device sensor in every direction
    Sensor,
    Locked,
}

/// Callback that tells the browser engine its custom view was hidden
pub type ExitCallback = Box<dyn FnOnce()>;

struct ActiveFullscreen {
    view: ViewHandle,
    on_exit: ExitCallback,
    restore_orientation: Orientation,
}

impl std::fmt::Debug for ActiveFullscreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveFullscreen")
            .field("view", &self.view)
            .field("restore_orientation", &self.restore_orientation)
            .finish_non_exhaustive()
    }
}

/// Tracks the single active fullscreen view and the orientation to restore
#[derive(Debug, Default)]
pub struct FullscreenController {
    active: Option<ActiveFullscreen>,
}

impl FullscreenController {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_view(&self) -> Option<ViewHandle> {
        self.active.as_ref().map(|active| active.view)
    }

    /// Orientation recorded just before the current session was entered
    pub fn recorded_orientation(&self) -> Option<Orientation> {
        self.active.as_ref().map(|active| active.restore_orientation)
    }

    /// Starts a fullscreen session for `view`
    ///
    /// A request made while another session is active is rejected by firing
    /// its own `on_exit` right away; the running session is left untouched.
    ///
    /// # Returns
    /// true if the view is now fullscreen
    pub fn enter<W>(&mut self, host: &mut W, view: ViewHandle, on_exit: ExitCallback) -> bool
    where
        W: WindowHost + ?Sized,
    {
        if let Some(active) = &self.active {
            tracing::debug!(
                requested = ?view,
                active = ?active.view,
                "fullscreen already active, rejecting request"
            );
            on_exit();
            return false;
        }

        let restore_orientation = host.requested_orientation();
        self.active = Some(ActiveFullscreen {
            view,
            on_exit,
            restore_orientation,
        });

        host.attach_fullscreen_view(view);
        host.set_content_visible(false);
        host.set_immersive(true);
        host.set_requested_orientation(Orientation::Sensor);

        tracing::info!(?view, ?restore_orientation, "entered fullscreen");
        true
    }

    /// Ends the active session, if any
    ///
    /// # Returns
    /// true if a session was active and has now been closed
    pub fn exit<W>(&mut self, host: &mut W) -> bool
    where
        W: WindowHost + ?Sized,
    {
        // Cleared before the callback runs so a re-entrant hide is a no-op
        let Some(active) = self.active.take() else {
            return false;
        };

        host.set_immersive(false);
        host.detach_fullscreen_view(active.view);
        host.set_content_visible(true);
        (active.on_exit)();
        host.set_requested_orientation(active.restore_orientation);

        tracing::info!(view = ?active.view, "exited fullscreen");
        true
    }

    /// The browser engine asked to hide its custom view
    pub fn on_hide_from_browser<W>(&mut self, host: &mut W) -> bool
    where
        W: WindowHost + ?Sized,
    {
        self.exit(host)
    }
}
