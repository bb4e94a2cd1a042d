//! Headless browser surface
//!
//! Keeps a back/forward history the way an embedded engine does, without
//! rendering anything. Used by the console host and by tests.

use serde::{Deserialize, Serialize};

use crate::config::BrowserSettings;
use crate::domain::navigation::{NavigationDecision, NavigationGate};
use crate::platform::BrowserSurface;

/// Persisted browser state carried across process teardown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserState {
    pub history: Vec<String>,
    pub index: usize,
}

#[derive(Debug, Default)]
pub struct HeadlessBrowser {
    history: Vec<String>,
    index: Option<usize>,
    settings: Option<BrowserSettings>,
    gate: Option<NavigationGate>,
    load_count: usize,
}

impl HeadlessBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follows a link from inside the page
    ///
    /// Without an attached gate nothing is allowed.
    pub fn navigate(&mut self, url: &str) -> NavigationDecision {
        let decision = match &self.gate {
            Some(gate) => gate.decide(url),
            None => NavigationDecision::Block,
        };

        if decision.is_allowed() {
            self.push(url);
        }
        decision
    }

    pub fn settings(&self) -> Option<&BrowserSettings> {
        self.settings.as_ref()
    }

    pub fn has_gate(&self) -> bool {
        self.gate.is_some()
    }

    /// Number of programmatic loads since creation
    pub fn load_count(&self) -> usize {
        self.load_count
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn push(&mut self, url: &str) {
        // Navigating drops any forward entries
        let keep = self.index.map_or(0, |index| index + 1);
        self.history.truncate(keep);
        self.history.push(url.to_string());
        self.index = Some(self.history.len() - 1);
    }
}

impl BrowserSurface for HeadlessBrowser {
    fn apply_settings(&mut self, settings: &BrowserSettings) {
        self.settings = Some(settings.clone());
    }

    fn attach_navigation_gate(&mut self, gate: NavigationGate) {
        self.gate = Some(gate);
    }

    fn load_url(&mut self, url: &str) {
        self.load_count += 1;
        self.push(url);
    }

    fn current_url(&self) -> Option<String> {
        self.index.and_then(|index| self.history.get(index)).cloned()
    }

    fn can_go_back(&self) -> bool {
        matches!(self.index, Some(index) if index > 0)
    }

    fn go_back(&mut self) {
        if let Some(index) = self.index {
            if index > 0 {
                self.index = Some(index - 1);
            }
        }
    }

    fn save_state(&self) -> Option<BrowserState> {
        self.index.map(|index| BrowserState {
            history: self.history.clone(),
            index,
        })
    }

    fn restore_state(&mut self, state: BrowserState) {
        if state.history.is_empty() {
            self.history.clear();
            self.index = None;
            return;
        }

        let index = state.index.min(state.history.len() - 1);
        self.history = state.history;
        self.index = Some(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::allow_list::AllowList;

    fn gated() -> HeadlessBrowser {
        let mut browser = HeadlessBrowser::new();
        browser.attach_navigation_gate(NavigationGate::new(
            AllowList::new(["https://app.example.com/"]).unwrap(),
        ));
        browser
    }

    #[test]
    fn blocked_navigation_leaves_page_unchanged() {
        let mut browser = gated();
        browser.load_url("https://app.example.com/");

        let decision = browser.navigate("https://evil.example.com/");

        assert_eq!(decision, NavigationDecision::Block);
        assert_eq!(browser.current_url().as_deref(), Some("https://app.example.com/"));
        assert!(!browser.can_go_back());
    }

    #[test]
    fn allowed_navigation_builds_history() {
        let mut browser = gated();
        browser.load_url("https://app.example.com/");
        browser.navigate("https://app.example.com/watch");

        assert!(browser.can_go_back());
        browser.go_back();
        assert_eq!(browser.current_url().as_deref(), Some("https://app.example.com/"));
        assert!(!browser.can_go_back());
    }

    #[test]
    fn navigation_without_gate_is_blocked() {
        let mut browser = HeadlessBrowser::new();
        assert_eq!(browser.navigate("https://app.example.com/"), NavigationDecision::Block);
        assert_eq!(browser.current_url(), None);
    }

    #[test]
    fn navigating_after_back_drops_forward_entries() {
        let mut browser = gated();
        browser.load_url("https://app.example.com/");
        browser.navigate("https://app.example.com/a");
        browser.go_back();
        browser.navigate("https://app.example.com/b");

        assert_eq!(
            browser.history(),
            ["https://app.example.com/", "https://app.example.com/b"]
        );
    }

    #[test]
    fn save_and_restore_keep_position() {
        let mut browser = gated();
        browser.load_url("https://app.example.com/");
        browser.navigate("https://app.example.com/a");
        let saved = browser.save_state().unwrap();

        let mut recreated = HeadlessBrowser::new();
        recreated.restore_state(saved);

        assert_eq!(recreated.current_url().as_deref(), Some("https://app.example.com/a"));
        assert!(recreated.can_go_back());
        assert_eq!(recreated.load_count(), 0);
    }

    #[test]
    fn empty_browser_has_nothing_to_save() {
        assert!(HeadlessBrowser::new().save_state().is_none());
    }
}
