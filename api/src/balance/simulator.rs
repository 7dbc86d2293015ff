//! The synchronous heart of the balance feed. Every method is one atomic
//! state transition; scheduling lives in [`super::feed`].

use std::sync::Arc;

use super::account::AccountHandle;
use super::account::EntityId;
use super::clock::Clock;
use super::entropy::Entropy;
use super::state::BalanceState;
use super::state::FeedEvent;
use crate::config::FeedConfig;

pub struct BalanceSimulator {
    entity: EntityId,
    account: Option<AccountHandle>,
    entropy: Box<dyn Entropy>,
    clock: Arc<dyn Clock>,
    config: FeedConfig,
    state: BalanceState,
}

impl BalanceSimulator {
    /// Binds a simulator to `entity`. Without an account the simulator is
    /// inert and every operation returns [`FeedEvent::Inert`].
    pub fn new(
        entity: EntityId,
        account: Option<AccountHandle>,
        entropy: Box<dyn Entropy>,
        clock: Arc<dyn Clock>,
        config: FeedConfig,
    ) -> Self {
        let state = match &account {
            Some(account) => BalanceState {
                balance: account.balance().unwrap_or(0.0).max(0.0),
                is_connected: true,
                last_update: Some(clock.now()),
            },
            None => BalanceState::INERT,
        };

        Self {
            entity,
            account,
            entropy,
            clock,
            config,
            state,
        }
    }

    pub fn entity(&self) -> &EntityId {
        &self.entity
    }

    pub fn state(&self) -> BalanceState {
        self.state
    }

    pub fn is_bound(&self) -> bool {
        self.account.is_some()
    }

    /// Draws a delta, applies it to the account's balance of record and
    /// mirrors the clamped result locally.
    ///
    /// The account receives the delta that lands it on the clamped balance,
    /// so the balance of record never drops below zero either. An account
    /// that is already negative is therefore topped up to zero by any
    /// downward draw: at -10, a draw of -1 forwards +10.
    pub fn simulate_balance_update(&mut self) -> FeedEvent {
        let Some(account) = &self.account else {
            return FeedEvent::Inert;
        };

        let drawn = self.entropy.next_delta(self.config.delta_span);
        let current = account.balance().unwrap_or(0.0);
        let (balance, applied) = if current + drawn < 0.0 {
            (0.0, -current)
        } else {
            (current + drawn, drawn)
        };

        self.state.balance = balance;
        self.state.last_update = Some(self.clock.now());
        account.apply_balance_delta(applied);

        FeedEvent::BalanceSimulated {
            drawn,
            applied,
            balance,
        }
    }

    /// One update-cadence tick: simulates an update with the configured
    /// probability.
    pub fn tick_update(&mut self) -> FeedEvent {
        if !self.is_bound() {
            return FeedEvent::Inert;
        }
        if self.entropy.chance(self.config.update_probability) {
            self.simulate_balance_update()
        } else {
            FeedEvent::UpdateSkipped
        }
    }

    /// One liveness tick. No debounce: consecutive ticks may flap.
    pub fn check_connection(&mut self) -> FeedEvent {
        if !self.is_bound() {
            return FeedEvent::Inert;
        }
        let is_connected = self.entropy.chance(self.config.connected_probability);
        self.state.is_connected = is_connected;
        FeedEvent::ConnectionChecked { is_connected }
    }

    /// Overwrites the local balance with the account's balance of record.
    pub fn sync_external(&mut self, balance: Option<f64>) -> FeedEvent {
        if !self.is_bound() {
            return FeedEvent::Inert;
        }
        let balance = balance.unwrap_or(0.0).max(0.0);
        self.state.balance = balance;
        FeedEvent::ExternalSync { balance }
    }
}
