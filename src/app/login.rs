//! Login screen logic
//!
//! Bad input and provider rejections keep the user on the login form with a
//! short message; there is no automatic retry. Only success or cancellation
//! ends the flow.

use crate::domain::session::{AuthFailure, CredentialError, Credentials, LoginOutcome};
use crate::platform::SessionStore;

/// What the login form should do after a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep {
    /// Input failed local validation; provider was not contacted
    Invalid(CredentialError),
    /// Provider refused the credentials
    Rejected(AuthFailure),
    /// Flow is over; report the outcome to the controller
    Finished(LoginOutcome),
}

impl LoginStep {
    /// Short message for the user
    pub fn message(&self) -> String {
        match self {
            LoginStep::Invalid(err) => err.to_string(),
            LoginStep::Rejected(failure) => failure.user_message(),
            LoginStep::Finished(LoginOutcome::Success) => "Login Successful".to_string(),
            LoginStep::Finished(LoginOutcome::Cancelled) => "Login cancelled".to_string(),
            LoginStep::Finished(LoginOutcome::Failed(failure)) => failure.user_message(),
        }
    }

    pub fn outcome(&self) -> Option<&LoginOutcome> {
        match self {
            LoginStep::Finished(outcome) => Some(outcome),
            LoginStep::Invalid(_) | LoginStep::Rejected(_) => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct LoginScreen {
    attempts: u32,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// An existing session finishes the screen before any input is taken
    pub fn on_start<S>(&self, sessions: &S) -> Option<LoginOutcome>
    where
        S: SessionStore + ?Sized,
    {
        sessions.current_session().map(|_| LoginOutcome::Success)
    }

    pub fn submit<S>(&mut self, sessions: &mut S, email: &str, password: &str) -> LoginStep
    where
        S: SessionStore + ?Sized,
    {
        let credentials = match Credentials::new(email, password) {
            Ok(credentials) => credentials,
            Err(err) => return LoginStep::Invalid(err),
        };

        self.attempts += 1;
        match sessions.sign_in(&credentials) {
            Ok(_) => {
                tracing::info!(attempts = self.attempts, "sign-in succeeded");
                LoginStep::Finished(LoginOutcome::Success)
            }
            Err(failure) => {
                tracing::info!(attempts = self.attempts, %failure, "sign-in rejected");
                LoginStep::Rejected(failure)
            }
        }
    }

    pub fn cancel(&self) -> LoginOutcome {
        LoginOutcome::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemorySessionStore;

    fn store() -> MemorySessionStore {
        MemorySessionStore::new().with_account("user@example.com", "correct")
    }

    #[test]
    fn existing_session_finishes_immediately() {
        let screen = LoginScreen::new();
        let signed_in = MemorySessionStore::new().signed_in_as("user@example.com");

        assert_eq!(screen.on_start(&signed_in), Some(LoginOutcome::Success));
        assert_eq!(screen.on_start(&store()), None);
    }

    #[test]
    fn invalid_input_never_reaches_provider() {
        let mut screen = LoginScreen::new();
        let mut sessions = store();

        let step = screen.submit(&mut sessions, "nope", "correct");

        assert_eq!(step, LoginStep::Invalid(CredentialError::InvalidEmail));
        assert_eq!(step.message(), "Enter a valid email");
        assert_eq!(screen.attempts(), 0);
        assert!(step.outcome().is_none());
    }

    #[test]
    fn rejection_stays_on_form() {
        let mut screen = LoginScreen::new();
        let mut sessions = store();

        let step = screen.submit(&mut sessions, "user@example.com", "wrong");
        assert_eq!(step, LoginStep::Rejected(AuthFailure::InvalidCredentials));
        assert_eq!(step.message(), "Invalid password");

        let step = screen.submit(&mut sessions, "other@example.com", "x");
        assert_eq!(step.message(), "Invalid email address");
        assert_eq!(screen.attempts(), 2);
        assert!(sessions.current_session().is_none());
    }

    #[test]
    fn success_finishes_flow() {
        let mut screen = LoginScreen::new();
        let mut sessions = store();

        let step = screen.submit(&mut sessions, "user@example.com", "correct");

        assert_eq!(step.outcome(), Some(&LoginOutcome::Success));
        assert_eq!(step.message(), "Login Successful");
        assert!(sessions.current_session().is_some());
    }

    #[test]
    fn cancel_reports_cancelled() {
        assert_eq!(LoginScreen::new().cancel(), LoginOutcome::Cancelled);
    }
}
