//! Navigation gating for the embedded browser surface
//!
//! Every navigation the surface originates (taps, redirects, script) is run
//! through the gate. The decision is a literal, case-sensitive prefix match
//! against the allow-list: no scheme or host parsing, no wildcards.

use crate::domain::allow_list::AllowList;

/// Outcome of gating a single navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Block,
}

impl NavigationDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, NavigationDecision::Allow)
    }
}

/// Stateless filter over a fixed allow-list
#[derive(Debug, Clone)]
pub struct NavigationGate {
    allow_list: AllowList,
}

impl NavigationGate {
    pub fn new(allow_list: AllowList) -> Self {
        Self { allow_list }
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Decides whether the surface may navigate to `url`
    ///
    /// # Example
    /// ```rust
    /// use kiosk_shell::domain::allow_list::AllowList;
    /// use kiosk_shell::domain::navigation::{NavigationDecision, NavigationGate};
    ///
    /// let gate = NavigationGate::new(AllowList::new(["https://app.example.com/"]).unwrap());
    /// assert_eq!(gate.decide("https://app.example.com/path"), NavigationDecision::Allow);
    /// assert_eq!(gate.decide("http://app.example.com/"), NavigationDecision::Block);
    /// ```
    pub fn decide(&self, url: &str) -> NavigationDecision {
        if self.allow_list.iter().any(|prefix| url.starts_with(prefix)) {
            NavigationDecision::Allow
        } else {
            tracing::debug!(url, "navigation blocked by allow-list");
            NavigationDecision::Block
        }
    }

    /// Browser-hook view of [`decide`](Self::decide): `true` means the
    /// surface must stay where it is
    pub fn should_override(&self, url: &str) -> bool {
        !self.decide(url).is_allowed()
    }
}
