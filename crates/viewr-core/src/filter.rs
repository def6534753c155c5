//! Excluded-accounts filter for the order book.
//!
//! Page-lifetime state: created when the market page loads, mutated by the
//! filter controls and the per-account buttons, dropped on navigation.

use serde::{Deserialize, Serialize};

/// Accounts whose orders are hidden from the order book.
///
/// Keeps insertion order and never holds duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountFilter {
    accounts: Vec<String>,
}

impl AccountFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the comma separated value of the filter input.
    ///
    /// Entries are trimmed; empty entries and repeats are dropped.
    pub fn parse(input: &str) -> Self {
        let mut filter = Self::new();
        for account in input.split(',') {
            filter.exclude(account);
        }
        filter
    }

    /// Add an account. Returns false if it was already excluded or empty.
    pub fn exclude(&mut self, account: &str) -> bool {
        let account = account.trim();
        if account.is_empty() || self.contains(account) {
            return false;
        }
        self.accounts.push(account.to_string());
        true
    }

    /// Remove an account. Returns false if it was not excluded.
    pub fn include(&mut self, account: &str) -> bool {
        let before = self.accounts.len();
        self.accounts.retain(|a| a != account.trim());
        self.accounts.len() != before
    }

    /// Flip an account. Returns true if it is excluded afterwards.
    pub fn toggle(&mut self, account: &str) -> bool {
        if self.contains(account.trim()) {
            self.include(account);
            false
        } else {
            self.exclude(account)
        }
    }

    /// Replace the whole list.
    pub fn set(&mut self, other: AccountFilter) {
        *self = other;
    }

    pub fn clear(&mut self) {
        self.accounts.clear();
    }

    pub fn contains(&self, account: &str) -> bool {
        self.accounts.iter().any(|a| a == account)
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn accounts(&self) -> &[String] {
        &self.accounts
    }

    /// Value shown in the filter text input.
    pub fn to_input_value(&self) -> String {
        self.accounts.join(",")
    }

    /// Value of the `exclude` query parameter, `None` when nothing is excluded.
    pub fn query_value(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.to_input_value())
    }
}

impl<S: AsRef<str>> FromIterator<S> for AccountFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut filter = Self::new();
        for account in iter {
            filter.exclude(account.as_ref());
        }
        filter
    }
}
