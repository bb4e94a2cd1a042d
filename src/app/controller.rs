//! Application controller and coordination layer
//!
//! The controller owns the collaborators, feeds lifecycle events through the
//! state machine and applies the resulting effects. It also serves as the
//! browser surface's navigation and fullscreen hooks while content is shown.

use thiserror::Error;

use crate::app::login::{LoginScreen, LoginStep};
use crate::app::state::{
    AppState, CloseReason, Effect, LifecycleEvent, Observations, Screen, StateMachine,
};
use crate::config::BrowserSettings;
use crate::domain::allow_list::AllowList;
use crate::domain::navigation::{NavigationDecision, NavigationGate};
use crate::domain::session::AuthFailure;
use crate::platform::{BrowserState, BrowserSurface, ConnectivityOracle, SessionStore, WindowHost};
use crate::ui::fullscreen::{ExitCallback, FullscreenController, ViewHandle};

/// Failures surfaced by the shell
///
/// Each is handled on the screen where it happens; none crosses a screen
/// boundary. The controller exposes the current one for logging and exit codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("No network connection available")]
    NoConnectivity,
    #[error("Authentication rejected: {0}")]
    AuthenticationRejected(AuthFailure),
    #[error("Login flow was abandoned")]
    AuthenticationFlowAbandoned,
    #[error("Login reported success but no session is present")]
    InconsistentSessionState,
}

impl AppError {
    /// Error represented by `state`, if any
    pub fn from_state(state: &AppState) -> Option<Self> {
        match state {
            AppState::NoConnectivity => Some(AppError::NoConnectivity),
            // A login flow that gives up ends the attempt, whatever the cause
            AppState::Closed(
                CloseReason::AuthenticationFlowAbandoned | CloseReason::AuthenticationFailed(_),
            ) => Some(AppError::AuthenticationFlowAbandoned),
            AppState::Closed(CloseReason::InconsistentSessionState) => {
                Some(AppError::InconsistentSessionState)
            }
            AppState::Starting
            | AppState::AwaitingLogin
            | AppState::Content
            | AppState::Closed(CloseReason::BackPropagated) => None,
        }
    }
}

/// Borrowed view of the collaborators handed to the state machine
struct Observed<'a, C, S, B> {
    connectivity: &'a C,
    sessions: &'a S,
    browser: &'a B,
    fullscreen: &'a FullscreenController,
}

impl<C, S, B> Observations for Observed<'_, C, S, B>
where
    C: ConnectivityOracle,
    S: SessionStore,
    B: BrowserSurface,
{
    fn is_connected(&self) -> bool {
        self.connectivity.is_connected()
    }

    fn has_session(&self) -> bool {
        self.sessions.current_session().is_some()
    }

    fn fullscreen_active(&self) -> bool {
        self.fullscreen.is_active()
    }

    fn can_go_back(&self) -> bool {
        self.browser.can_go_back()
    }
}

/// Main application controller
///
/// Single-threaded: every method is expected to run on the host's event loop.
pub struct AppController<C, S, B, W> {
    state: AppState,
    connectivity: C,
    sessions: S,
    browser: B,
    window: W,
    gate: NavigationGate,
    settings: BrowserSettings,
    fullscreen: FullscreenController,
    login: LoginScreen,
    /// Provider refusal currently shown on the login form
    rejection: Option<AuthFailure>,
    /// Saved browser state waiting for the restored content screen
    pending_restore: Option<BrowserState>,
}

impl<C, S, B, W> AppController<C, S, B, W>
where
    C: ConnectivityOracle,
    S: SessionStore,
    B: BrowserSurface,
    W: WindowHost,
{
    pub fn new(
        allow_list: AllowList,
        settings: BrowserSettings,
        connectivity: C,
        sessions: S,
        browser: B,
        window: W,
    ) -> Self {
        Self {
            state: AppState::default(),
            connectivity,
            sessions,
            browser,
            window,
            gate: NavigationGate::new(allow_list),
            settings,
            fullscreen: FullscreenController::new(),
            login: LoginScreen::new(),
            rejection: None,
            pending_restore: None,
        }
    }

    /// Fresh start: runs screen selection
    pub fn start(&mut self) -> &AppState {
        self.handle_event(LifecycleEvent::Created { restored: false })
    }

    /// Recreated with saved browser state: goes straight to content
    ///
    /// Only meaningful before the shell has started; later calls drop `saved`.
    pub fn restore(&mut self, saved: BrowserState) -> &AppState {
        if self.state != AppState::Starting {
            tracing::debug!(state = ?self.state, "already started, discarding saved browser state");
            return &self.state;
        }
        self.pending_restore = Some(saved);
        self.handle_event(LifecycleEvent::Created { restored: true })
    }

    /// Processes one lifecycle event and applies its effects
    ///
    /// # Returns
    /// The state after the event
    pub fn handle_event(&mut self, event: LifecycleEvent) -> &AppState {
        let observed = Observed {
            connectivity: &self.connectivity,
            sessions: &self.sessions,
            browser: &self.browser,
            fullscreen: &self.fullscreen,
        };
        let transition = StateMachine::process_event(self.state.clone(), event, &observed);

        if transition.state != self.state {
            tracing::info!(from = ?self.state, to = ?transition.state, "screen transition");
        }
        self.state = transition.state;
        if self.state != AppState::AwaitingLogin {
            self.rejection = None;
        }

        for effect in transition.effects {
            self.apply(effect);
        }
        &self.state
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ShowScreen(screen) => self.window.show_screen(screen),
            Effect::LaunchLogin => {
                self.login = LoginScreen::new();
                self.sessions.launch_login();
            }
            Effect::EnterContent { restore } => self.enter_content(restore),
            Effect::ExitFullscreen => {
                self.fullscreen.exit(&mut self.window);
            }
            Effect::GoBack => self.browser.go_back(),
            Effect::SignOut => {
                tracing::info!("signing out");
                self.sessions.sign_out();
            }
            Effect::Close(reason) => {
                match &reason {
                    CloseReason::BackPropagated => tracing::info!("closing on back"),
                    other => tracing::warn!(reason = ?other, "closing shell"),
                }
                self.window.close();
            }
        }
    }

    fn enter_content(&mut self, restore: bool) {
        self.browser.apply_settings(&self.settings);
        self.browser.attach_navigation_gate(self.gate.clone());

        if restore {
            if let Some(saved) = self.pending_restore.take() {
                self.browser.restore_state(saved);
            }
        }

        // Existing history wins; the default page is only loaded into an empty surface
        if self.browser.current_url().is_none() {
            let url = self.gate.allow_list().default_url().to_string();
            tracing::info!(%url, "loading default page");
            self.browser.load_url(&url);
        }
    }

    /// Snapshot of the browser to persist before the host tears the shell down
    pub fn save_state(&self) -> Option<BrowserState> {
        match self.state {
            AppState::Content => self.browser.save_state(),
            _ => None,
        }
    }

    /// Navigation hook for the browser surface
    pub fn request_navigation(&self, url: &str) -> NavigationDecision {
        self.gate.decide(url)
    }

    /// Fullscreen request from page content
    ///
    /// Requests outside the content screen are rejected the same way as a
    /// second concurrent request: the callback fires right away.
    pub fn show_fullscreen(&mut self, view: ViewHandle, on_exit: ExitCallback) -> bool {
        if self.state != AppState::Content {
            tracing::debug!(?view, state = ?self.state, "fullscreen request outside content");
            on_exit();
            return false;
        }
        self.fullscreen.enter(&mut self.window, view, on_exit)
    }

    /// Hide signal from the browser engine
    pub fn hide_fullscreen(&mut self) -> bool {
        self.fullscreen.on_hide_from_browser(&mut self.window)
    }

    /// Credentials typed into the login screen
    ///
    /// Rejections are shown and the form stays up; a finished flow is
    /// reported to the state machine. Ignored unless the login screen is up.
    pub fn submit_login(&mut self, email: &str, password: &str) -> Option<LoginStep> {
        if self.state != AppState::AwaitingLogin {
            tracing::debug!(state = ?self.state, "login submitted outside login screen");
            return None;
        }

        let step = self.login.submit(&mut self.sessions, email, password);
        self.rejection = match &step {
            LoginStep::Rejected(failure) => Some(failure.clone()),
            LoginStep::Invalid(_) | LoginStep::Finished(_) => None,
        };
        self.window.show_message(&step.message());
        if let Some(outcome) = step.outcome() {
            self.handle_event(LifecycleEvent::LoginFinished(outcome.clone()));
        }
        Some(step)
    }

    /// User backed out of the login screen
    pub fn cancel_login(&mut self) -> &AppState {
        let outcome = self.login.cancel();
        self.handle_event(LifecycleEvent::LoginFinished(outcome))
    }

    /// Re-checks for a session that appeared while the login screen was opening
    pub fn resume_login(&mut self) -> &AppState {
        if self.state == AppState::AwaitingLogin {
            if let Some(outcome) = self.login.on_start(&self.sessions) {
                return self.handle_event(LifecycleEvent::LoginFinished(outcome));
            }
        }
        &self.state
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn screen(&self) -> Option<Screen> {
        self.state.screen()
    }

    /// Current error, including a credential rejection still shown on the login form
    pub fn error(&self) -> Option<AppError> {
        match &self.rejection {
            Some(failure) => Some(AppError::AuthenticationRejected(failure.clone())),
            None => AppError::from_state(&self.state),
        }
    }

    pub fn gate(&self) -> &NavigationGate {
        &self.gate
    }

    pub fn fullscreen(&self) -> &FullscreenController {
        &self.fullscreen
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    pub fn browser_mut(&mut self) -> &mut B {
        &mut self.browser
    }

    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut S {
        &mut self.sessions
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn connectivity(&self) -> &C {
        &self.connectivity
    }
}

impl<C, S, B, W> Drop for AppController<C, S, B, W> {
    fn drop(&mut self) {
        tracing::debug!(state = ?self.state, "AppController: shutting down");
    }
}
