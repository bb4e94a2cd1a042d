//! Ordered list of origin prefixes the browser surface may navigate to
//!
//! The list is fixed when the shell starts. Its first entry doubles as the
//! default URL loaded into the content screen.

use thiserror::Error;

/// Errors raised while building an allow-list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllowListError {
    #[error("Allow-list must contain at least one entry")]
    Empty,
    #[error("Allow-list entry {index} is empty")]
    EmptyEntry { index: usize },
}

/// Non-empty, immutable sequence of URL prefixes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    entries: Vec<String>,
}

impl AllowList {
    /// Creates an allow-list from the given prefixes, keeping their order
    ///
    /// # Example
    /// ```rust
    /// use kiosk_shell::domain::allow_list::AllowList;
    ///
    /// let list = AllowList::new(["https://app.example.com/"]).unwrap();
    /// assert_eq!(list.default_url(), "https://app.example.com/");
    /// ```
    pub fn new<I, S>(entries: I) -> Result<Self, AllowListError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries.into_iter().map(Into::into).collect();
        if entries.is_empty() {
            return Err(AllowListError::Empty);
        }

        if let Some(index) = entries.iter().position(|entry| entry.is_empty()) {
            return Err(AllowListError::EmptyEntry { index });
        }

        Ok(Self { entries })
    }

    /// URL loaded when the content screen is first shown
    pub fn default_url(&self) -> &str {
        // Non-empty by construction
        &self.entries[0]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_entry_is_default_url() {
        let list = AllowList::new(["https://a.example/", "https://b.example/"]).unwrap();
        assert_eq!(list.default_url(), "https://a.example/");
        assert_eq!(list.len(), 2);
        assert!(!list.is_empty());
    }

    #[test]
    fn empty_list_is_rejected() {
        let result = AllowList::new(Vec::<String>::new());
        assert_eq!(result, Err(AllowListError::Empty));
    }

    #[test]
    fn empty_entry_is_rejected() {
        let result = AllowList::new(["https://a.example/", ""]);
        assert_eq!(result, Err(AllowListError::EmptyEntry { index: 1 }));
    }

    #[test]
    fn order_is_preserved() {
        let list = AllowList::new(["z", "a", "m"]).unwrap();
        let collected: Vec<&str> = list.iter().collect();
        assert_eq!(collected, vec!["z", "a", "m"]);
    }
}
