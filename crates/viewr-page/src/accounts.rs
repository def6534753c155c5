//! Most-active-accounts list.

use viewr_client::ActiveAccount;
use viewr_core::AccountFilter;

/// Text shown when the server sent no account data.
pub const NO_ACCOUNTS_MESSAGE: &str = "No account data available";

/// One entry of the list, with the state of its include/exclude button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountEntry {
    pub account: String,
    pub count: u32,
    /// Whether the account was excluded from the book this entry came with.
    pub excluded: bool,
}

impl AccountEntry {
    /// Tooltip of the toggle button.
    pub fn action_label(&self) -> &'static str {
        if self.excluded {
            "Include account"
        } else {
            "Exclude account"
        }
    }

    /// Icon of the toggle button.
    pub fn action_icon(&self) -> &'static str {
        if self.excluded {
            "bi-plus-circle"
        } else {
            "bi-dash-circle"
        }
    }
}

/// The rendered list, rebuilt on every order book load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountsView {
    entries: Vec<AccountEntry>,
}

impl AccountsView {
    /// Build the list against the filter the book was requested with.
    pub fn build(accounts: &[ActiveAccount], excluded: &AccountFilter) -> Self {
        let entries = accounts
            .iter()
            .map(|a| AccountEntry {
                account: a.account.clone(),
                count: a.count,
                excluded: excluded.contains(&a.account),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[AccountEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Message to show instead of the list, if any.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(NO_ACCOUNTS_MESSAGE)
    }

    pub fn entry(&self, account: &str) -> Option<&AccountEntry> {
        self.entries.iter().find(|e| e.account == account)
    }
}
