use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// What a balance display shows for one bound entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceState {
    /// Never negative.
    pub balance: f64,
    pub is_connected: bool,
    pub last_update: Option<DateTime<Utc>>,
}

impl BalanceState {
    /// The neutral state exposed when no player is available.
    pub const INERT: Self = Self {
        balance: 0.0,
        is_connected: false,
        last_update: None,
    };

    /// The balance formatted for display with two decimals.
    pub fn balance_label(&self) -> String {
        format!("{:.2}", self.balance)
    }
}

impl Default for BalanceState {
    fn default() -> Self {
        Self::INERT
    }
}

/// The state transition one simulator step produced.
#[derive(Debug, Clone, Copy, PartialEq, strum::EnumIs)]
pub enum FeedEvent {
    /// A delta was drawn and applied.
    BalanceSimulated {
        /// The delta as drawn, before clamping.
        drawn: f64,
        /// The delta actually forwarded to the account.
        applied: f64,
        balance: f64,
    },
    /// The update tick lost its coin flip.
    UpdateSkipped,
    ConnectionChecked { is_connected: bool },
    /// The local balance was overwritten from the account of record.
    ExternalSync { balance: f64 },
    /// Nothing happened because the feed has no account or was torn down.
    Inert,
}
