//! Account registry collaborators
//!
//! The composer never owns account data. It is handed an
//! [`AccountRegistry`] at construction and only stores the ids the user
//! selects. Two flavours are provided:
//!
//! - [`StaticAccounts`]: a list fetched once (e.g. from the config file)
//! - [`WatchedAccounts`]: a reactive list backed by a `tokio::sync::watch`
//!   channel, for front ends that refresh accounts while composing

use std::sync::Arc;
use tokio::sync::watch;

use crate::types::{Account, AccountId};

/// Source of candidate destination accounts
pub trait AccountRegistry: Send + Sync {
    /// Current candidate accounts, in display order
    fn accounts(&self) -> Vec<Account>;

    /// Look up a single account by id
    fn find(&self, id: &AccountId) -> Option<Account> {
        self.accounts().into_iter().find(|account| &account.id == id)
    }

    /// Change notifications, for registries that can change over time
    ///
    /// Fetch-once registries return `None`.
    fn subscribe(&self) -> Option<watch::Receiver<Vec<Account>>> {
        None
    }
}

/// Fetch-once registry
#[derive(Debug, Clone, Default)]
pub struct StaticAccounts {
    accounts: Arc<Vec<Account>>,
}

impl StaticAccounts {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Arc::new(accounts),
        }
    }
}

impl AccountRegistry for StaticAccounts {
    fn accounts(&self) -> Vec<Account> {
        self.accounts.as_ref().clone()
    }
}

/// Reactive registry
///
/// Cloning shares the same underlying channel.
#[derive(Clone)]
pub struct WatchedAccounts {
    sender: Arc<watch::Sender<Vec<Account>>>,
}

impl WatchedAccounts {
    pub fn new(initial: Vec<Account>) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publish a new account list to every subscriber
    pub fn replace(&self, accounts: Vec<Account>) {
        tracing::debug!(count = accounts.len(), "account registry updated");
        self.sender.send_replace(accounts);
    }
}

impl AccountRegistry for WatchedAccounts {
    fn accounts(&self) -> Vec<Account> {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> Option<watch::Receiver<Vec<Account>>> {
        Some(self.sender.subscribe())
    }
}
