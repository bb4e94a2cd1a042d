//! Screen-selection state machine
//!
//! Lifecycle events from the host are folded into one transition function.
//! The function is pure: it reads the world through [`Observations`] and
//! returns the new state plus the side effects the controller must apply.

use crate::domain::session::{AuthFailure, LoginOutcome};

/// Top-level view shown by the host window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    NoConnectivity,
    Login,
    Content,
}

/// Why the shell closed itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// Login screen was cancelled or backed out of
    AuthenticationFlowAbandoned,
    /// Login flow ended with a provider failure it could not recover from
    AuthenticationFailed(AuthFailure),
    /// Login reported success but no session could be observed
    InconsistentSessionState,
    /// Back was pressed with nothing left to go back to
    BackPropagated,
}

/// Main application state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppState {
    /// Host has not delivered its creation event yet
    #[default]
    Starting,
    NoConnectivity,
    /// Login flow launched; waiting for its outcome
    AwaitingLogin,
    Content,
    Closed(CloseReason),
}

impl AppState {
    /// Screen the host should be displaying, if any
    pub fn screen(&self) -> Option<Screen> {
        match self {
            AppState::NoConnectivity => Some(Screen::NoConnectivity),
            AppState::AwaitingLogin => Some(Screen::Login),
            AppState::Content => Some(Screen::Content),
            AppState::Starting | AppState::Closed(_) => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, AppState::Closed(_))
    }
}

/// Lifecycle and user events delivered by the host event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Host created the shell; `restored` is true when saved browser state exists
    Created { restored: bool },
    /// Shell came back to the foreground
    Resumed,
    /// Rotation or other configuration change
    ConfigurationChanged,
    /// Retry pressed on the no-connectivity screen
    RetryRequested,
    LoginFinished(LoginOutcome),
    BackPressed,
    SignOutRequested,
}

/// Side effects produced by a transition, applied in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ShowScreen(Screen),
    LaunchLogin,
    /// Wire the browser surface; `restore` reuses saved state instead of loading
    EnterContent { restore: bool },
    ExitFullscreen,
    GoBack,
    SignOut,
    Close(CloseReason),
}

/// Point-in-time answers the transition function may ask for
///
/// Queries are made lazily; a rule that does not need an answer never asks.
pub trait Observations {
    fn is_connected(&self) -> bool;
    fn has_session(&self) -> bool;
    fn fullscreen_active(&self) -> bool;
    fn can_go_back(&self) -> bool;
}

/// Result of processing one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: AppState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(state: AppState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn to(state: AppState, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }

    fn close(reason: CloseReason) -> Self {
        Self::to(AppState::Closed(reason.clone()), vec![Effect::Close(reason)])
    }
}

/// State machine for screen selection
pub struct StateMachine;

impl StateMachine {
    /// Processes a lifecycle event and returns the resulting transition
    ///
    /// # Arguments
    /// * `current_state` - Current application state
    /// * `event` - Event to process
    /// * `observations` - Live view of connectivity, session and browser
    pub fn process_event<O>(current_state: AppState, event: LifecycleEvent, observations: &O) -> Transition
    where
        O: Observations + ?Sized,
    {
        match (current_state, event) {
            (AppState::Closed(reason), event) => {
                tracing::debug!(?event, "shell closed, ignoring event");
                Transition::stay(AppState::Closed(reason))
            }

            (state, LifecycleEvent::ConfigurationChanged) => Transition::stay(state),

            (AppState::Starting, LifecycleEvent::Created { restored: false }) => {
                Self::select_screen(observations)
            }

            // Saved browser state skips screen selection entirely
            (AppState::Starting, LifecycleEvent::Created { restored: true }) => Transition::to(
                AppState::Content,
                vec![
                    Effect::ShowScreen(Screen::Content),
                    Effect::EnterContent { restore: true },
                ],
            ),

            (AppState::Content, LifecycleEvent::Resumed) => {
                if observations.is_connected() {
                    return Transition::stay(AppState::Content);
                }

                let mut effects = Vec::new();
                if observations.fullscreen_active() {
                    effects.push(Effect::ExitFullscreen);
                }
                effects.push(Effect::ShowScreen(Screen::NoConnectivity));
                Transition::to(AppState::NoConnectivity, effects)
            }

            (AppState::NoConnectivity, LifecycleEvent::Resumed)
            | (AppState::NoConnectivity, LifecycleEvent::RetryRequested) => {
                if !observations.is_connected() {
                    tracing::debug!("still offline");
                    return Transition::stay(AppState::NoConnectivity);
                }
                Self::select_screen(observations)
            }

            (AppState::AwaitingLogin, LifecycleEvent::LoginFinished(outcome)) => match outcome {
                LoginOutcome::Success => {
                    if observations.has_session() {
                        Self::enter_content()
                    } else {
                        Transition::close(CloseReason::InconsistentSessionState)
                    }
                }
                LoginOutcome::Cancelled => Transition::close(CloseReason::AuthenticationFlowAbandoned),
                LoginOutcome::Failed(failure) => {
                    Transition::close(CloseReason::AuthenticationFailed(failure))
                }
            },

            (AppState::AwaitingLogin, LifecycleEvent::BackPressed) => {
                Transition::close(CloseReason::AuthenticationFlowAbandoned)
            }

            (AppState::Content, LifecycleEvent::BackPressed) => {
                if observations.fullscreen_active() {
                    Transition::to(AppState::Content, vec![Effect::ExitFullscreen])
                } else if observations.can_go_back() {
                    Transition::to(AppState::Content, vec![Effect::GoBack])
                } else {
                    Transition::close(CloseReason::BackPropagated)
                }
            }

            (AppState::NoConnectivity, LifecycleEvent::BackPressed) => {
                Transition::close(CloseReason::BackPropagated)
            }

            (AppState::Content, LifecycleEvent::SignOutRequested) => {
                let mut effects = Vec::new();
                if observations.fullscreen_active() {
                    effects.push(Effect::ExitFullscreen);
                }
                effects.push(Effect::SignOut);

                if observations.is_connected() {
                    effects.push(Effect::ShowScreen(Screen::Login));
                    effects.push(Effect::LaunchLogin);
                    Transition::to(AppState::AwaitingLogin, effects)
                } else {
                    effects.push(Effect::ShowScreen(Screen::NoConnectivity));
                    Transition::to(AppState::NoConnectivity, effects)
                }
            }

            // Anything else is out of place for the current state
            (state, event) => {
                tracing::debug!(?state, ?event, "event ignored");
                Transition::stay(state)
            }
        }
    }

    /// Connectivity first, then session
    fn select_screen<O>(observations: &O) -> Transition
    where
        O: Observations + ?Sized,
    {
        if !observations.is_connected() {
            return Transition::to(
                AppState::NoConnectivity,
                vec![Effect::ShowScreen(Screen::NoConnectivity)],
            );
        }

        if !observations.has_session() {
            return Transition::to(
                AppState::AwaitingLogin,
                vec![Effect::ShowScreen(Screen::Login), Effect::LaunchLogin],
            );
        }

        Self::enter_content()
    }

    fn enter_content() -> Transition {
        Transition::to(
            AppState::Content,
            vec![
                Effect::ShowScreen(Screen::Content),
                Effect::EnterContent { restore: false },
            ],
        )
    }
}
