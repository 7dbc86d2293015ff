//! The capability pair the balance feed consumes: read the current player's
//! balance (with change notification) and apply a delta to it.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use tokio::sync::watch;

/// Identifies the entity whose balance a feed is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The authenticated player as seen by the balance feed.
///
/// Implementations own the balance of record. A real backend would sit behind
/// this trait; the feed never assumes anything about how a delta is applied.
pub trait PlayerAccount: Send + Sync {
    /// The balance of record, if the player has one.
    fn balance(&self) -> Option<f64>;

    /// Applies a signed delta to the balance of record. Fire-and-forget.
    fn apply_balance_delta(&self, delta: f64);

    /// A receiver that is notified whenever the balance of record changes.
    ///
    /// The channel closing means the player is gone.
    fn watch_balance(&self) -> watch::Receiver<Option<f64>>;
}

/// A cheaply clonable, comparable reference to a [`PlayerAccount`].
///
/// Equality is identity: two handles are equal when they point at the same
/// account, which is what a UI needs to decide whether to rebind.
#[derive(Clone)]
pub struct AccountHandle(Arc<dyn PlayerAccount>);

impl AccountHandle {
    pub fn new(account: impl PlayerAccount + 'static) -> Self {
        Self(Arc::new(account))
    }
}

impl From<Arc<dyn PlayerAccount>> for AccountHandle {
    fn from(account: Arc<dyn PlayerAccount>) -> Self {
        Self(account)
    }
}

impl Deref for AccountHandle {
    type Target = dyn PlayerAccount;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for AccountHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for AccountHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccountHandle")
            .field(&self.0.balance())
            .finish()
    }
}

/// A process-local account, used by the demo host and by tests.
#[derive(Debug)]
pub struct InMemoryAccount {
    balance: watch::Sender<Option<f64>>,
}

impl InMemoryAccount {
    pub fn new(balance: Option<f64>) -> Self {
        let (tx, _rx) = watch::channel(balance);
        Self { balance: tx }
    }

    /// Overwrites the balance of record, as an external system would.
    pub fn set_balance(&self, balance: Option<f64>) {
        self.balance.send_replace(balance);
    }
}

impl PlayerAccount for InMemoryAccount {
    fn balance(&self) -> Option<f64> {
        *self.balance.borrow()
    }

    fn apply_balance_delta(&self, delta: f64) {
        self.balance.send_modify(|b| *b = Some(b.unwrap_or(0.0) + delta));
    }

    fn watch_balance(&self) -> watch::Receiver<Option<f64>> {
        self.balance.subscribe()
    }
}
