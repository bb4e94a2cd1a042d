//! Session and login outcome types
//!
//! The identity provider owns the actual token. The shell only sees whether
//! a session is present and, on failure, which kind of failure occurred.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Same shape the mobile platforms accept as an e-mail address
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
    )
    .expect("e-mail pattern is a valid regex")
});

/// Authenticated session as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub user_id: Option<String>,
}

impl Session {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }
}

/// Why the identity provider rejected a sign-in attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    /// No account exists for the address, or it was disabled
    #[error("invalid user")]
    InvalidUser,
    /// Account exists but the password did not match
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    Other(String),
}

impl AuthFailure {
    /// Short message shown on the login screen
    pub fn user_message(&self) -> String {
        match self {
            AuthFailure::InvalidUser => "Invalid email address".to_string(),
            AuthFailure::InvalidCredentials => "Invalid password".to_string(),
            AuthFailure::Other(reason) => format!("Authentication failed: {reason}"),
        }
    }
}

/// Result reported by the login flow when it ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    /// User backed out of the login screen
    Cancelled,
    Failed(AuthFailure),
}

/// Input validation errors caught before contacting the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("Enter a valid email")]
    InvalidEmail,
    #[error("Enter password")]
    MissingPassword,
}

/// E-mail and password pair that passed local validation
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Result<Self, CredentialError> {
        if email.is_empty() || !EMAIL_PATTERN.is_match(email) {
            return Err(CredentialError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(CredentialError::MissingPassword);
        }

        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_credentials() {
        let creds = Credentials::new("user@example.com", "hunter2").unwrap();
        assert_eq!(creds.email(), "user@example.com");
        assert_eq!(creds.password(), "hunter2");
    }

    #[test]
    fn rejects_bad_email() {
        assert_eq!(Credentials::new("", "pw"), Err(CredentialError::InvalidEmail));
        assert_eq!(Credentials::new("not-an-email", "pw"), Err(CredentialError::InvalidEmail));
        assert_eq!(Credentials::new("a@b", "pw"), Err(CredentialError::InvalidEmail));
    }

    #[test]
    fn rejects_missing_password() {
        assert_eq!(
            Credentials::new("user@example.com", ""),
            Err(CredentialError::MissingPassword)
        );
    }

    #[test]
    fn email_is_checked_before_password() {
        assert_eq!(Credentials::new("bad", ""), Err(CredentialError::InvalidEmail));
    }

    #[test]
    fn debug_output_hides_password() {
        let creds = Credentials::new("user@example.com", "secret").unwrap();
        assert!(!format!("{creds:?}").contains("secret"));
    }

    #[test]
    fn failure_messages() {
        assert_eq!(AuthFailure::InvalidUser.user_message(), "Invalid email address");
        assert_eq!(AuthFailure::InvalidCredentials.user_message(), "Invalid password");
        assert_eq!(
            AuthFailure::Other("network".into()).user_message(),
            "Authentication failed: network"
        );
    }
}
