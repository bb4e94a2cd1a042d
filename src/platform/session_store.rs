//! In-process identity provider
//!
//! Accounts live in memory. Good enough for the console host and for tests
//! that need a real `SessionStore` rather than a scripted fake.

use std::collections::HashMap;

use crate::domain::session::{AuthFailure, Credentials, Session};
use crate::platform::SessionStore;

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    accounts: HashMap<String, String>,
    current: Option<Session>,
    login_pending: bool,
    login_launches: usize,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.accounts.insert(email.into(), password.into());
        self
    }

    /// Starts with `email` already signed in
    pub fn signed_in_as(mut self, email: impl Into<String>) -> Self {
        self.current = Some(Session::for_user(email));
        self
    }

    /// Replaces the session as if the provider changed it behind our back
    pub fn set_current(&mut self, session: Option<Session>) {
        self.current = session;
    }

    /// True between `launch_login` and the next completed sign-in or `finish_login`
    pub fn login_pending(&self) -> bool {
        self.login_pending
    }

    pub fn login_launches(&self) -> usize {
        self.login_launches
    }

    /// Marks the interactive flow as ended without touching the session
    pub fn finish_login(&mut self) {
        self.login_pending = false;
    }
}

impl SessionStore for MemorySessionStore {
    fn current_session(&self) -> Option<Session> {
        self.current.clone()
    }

    fn launch_login(&mut self) {
        self.login_pending = true;
        self.login_launches += 1;
    }

    fn sign_in(&mut self, credentials: &Credentials) -> Result<Session, AuthFailure> {
        let expected = self
            .accounts
            .get(credentials.email())
            .ok_or(AuthFailure::InvalidUser)?;

        if expected != credentials.password() {
            return Err(AuthFailure::InvalidCredentials);
        }

        let session = Session::for_user(credentials.email());
        self.current = Some(session.clone());
        self.login_pending = false;
        Ok(session)
    }

    fn sign_out(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials::new(email, password).unwrap()
    }

    #[test]
    fn sign_in_with_known_account() {
        let mut store = MemorySessionStore::new().with_account("a@example.com", "pw");
        store.launch_login();

        let session = store.sign_in(&creds("a@example.com", "pw")).unwrap();

        assert_eq!(session.user_id.as_deref(), Some("a@example.com"));
        assert_eq!(store.current_session(), Some(session));
        assert!(!store.login_pending());
    }

    #[test]
    fn unknown_user_and_wrong_password() {
        let mut store = MemorySessionStore::new().with_account("a@example.com", "pw");

        assert_eq!(
            store.sign_in(&creds("b@example.com", "pw")),
            Err(AuthFailure::InvalidUser)
        );
        assert_eq!(
            store.sign_in(&creds("a@example.com", "nope")),
            Err(AuthFailure::InvalidCredentials)
        );
        assert!(store.current_session().is_none());
    }

    #[test]
    fn sign_out_clears_session() {
        let mut store = MemorySessionStore::new().signed_in_as("a@example.com");
        assert!(store.current_session().is_some());
        store.sign_out();
        assert!(store.current_session().is_none());
    }

    #[test]
    fn launch_is_counted() {
        let mut store = MemorySessionStore::new();
        store.launch_login();
        assert!(store.login_pending());
        assert_eq!(store.login_launches(), 1);
        store.finish_login();
        assert!(!store.login_pending());
    }
}
