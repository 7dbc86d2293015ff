//! Binds a [`BalanceSimulator`] to its two periodic timers and to the
//! account's change notifications.
//!
//! [`BalanceFeed::bind`] returns the feed handle plus a driver future. The
//! caller spawns the driver on whatever executor it has (tokio, or Dioxus'
//! `spawn` in the UI). Dropping the handle, or calling
//! [`BalanceFeed::shutdown`], stops the driver. If the account's change
//! channel closes, the driver stops on its own and the feed goes inert.

use std::future::Future;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use dioxus_logger::tracing::debug;
use dioxus_logger::tracing::info;
use futures::future::abortable;
use futures::future::AbortHandle;
use tokio::sync::watch;

use super::account::AccountHandle;
use super::account::EntityId;
use super::clock::Clock;
use super::clock::SystemClock;
use super::entropy::Entropy;
use super::entropy::SmallRngEntropy;
use super::simulator::BalanceSimulator;
use super::state::BalanceState;
use super::state::FeedEvent;
use crate::config::FeedConfig;
use crate::timer::Interval;

struct Shared {
    simulator: Mutex<BalanceSimulator>,
    state: watch::Sender<BalanceState>,
    torn_down: AtomicBool,
}

impl Shared {
    /// Runs one simulator transition and publishes the resulting state if it
    /// changed.
    fn step(&self, f: impl FnOnce(&mut BalanceSimulator) -> FeedEvent) -> FeedEvent {
        if self.torn_down.load(Ordering::Acquire) {
            return FeedEvent::Inert;
        }
        let mut simulator = self
            .simulator
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let event = f(&mut simulator);
        let next = simulator.state();
        self.state.send_if_modified(|current| {
            if *current != next {
                *current = next;
                true
            } else {
                false
            }
        });
        debug!(entity = %simulator.entity(), ?event, "balance feed step");
        event
    }

    /// Marks the feed torn down and publishes the inert state.
    fn go_inert(&self) {
        self.torn_down.store(true, Ordering::Release);
        self.state.send_replace(BalanceState::INERT);
    }
}

/// A live (or inert) balance feed for one entity.
pub struct BalanceFeed {
    entity: EntityId,
    shared: Arc<Shared>,
    abort: Option<AbortHandle>,
}

impl BalanceFeed {
    /// Binds a feed using OS-seeded (or `config.seed`-seeded) randomness and
    /// the system clock.
    ///
    /// Returns `None` for the driver when `account` is `None`: an unbound feed
    /// does no timer work and reports [`BalanceState::INERT`].
    pub fn bind(
        entity: impl Into<EntityId>,
        account: Option<AccountHandle>,
        config: FeedConfig,
    ) -> (Self, Option<impl Future<Output = ()> + 'static>) {
        Self::bind_with(
            entity,
            account,
            config,
            Box::new(SmallRngEntropy::new(config.seed)),
            Arc::new(SystemClock),
        )
    }

    /// Like [`BalanceFeed::bind`] with explicit randomness and clock.
    pub fn bind_with(
        entity: impl Into<EntityId>,
        account: Option<AccountHandle>,
        config: FeedConfig,
        entropy: Box<dyn Entropy>,
        clock: Arc<dyn Clock>,
    ) -> (Self, Option<impl Future<Output = ()> + 'static>) {
        let entity = entity.into();
        let balance_rx = account.as_ref().map(|account| account.watch_balance());
        let simulator = BalanceSimulator::new(entity.clone(), account, entropy, clock, config);
        let (state_tx, _state_rx) = watch::channel(simulator.state());
        let shared = Arc::new(Shared {
            simulator: Mutex::new(simulator),
            state: state_tx,
            torn_down: AtomicBool::new(false),
        });

        let Some(balance_rx) = balance_rx else {
            info!(%entity, "no player available; balance feed is inert");
            let feed = Self {
                entity,
                shared,
                abort: None,
            };
            return (feed, None);
        };

        info!(
            %entity,
            update_ms = config.update_interval.as_millis() as u64,
            connection_ms = config.connection_interval.as_millis() as u64,
            "binding balance feed"
        );
        let (driver, abort) = abortable(drive(shared.clone(), balance_rx, config));
        let feed = Self {
            entity,
            shared,
            abort: Some(abort),
        };
        let driver = async move {
            // Err(Aborted) is the normal teardown path.
            let _ = driver.await;
        };
        (feed, Some(driver))
    }

    pub fn entity(&self) -> &EntityId {
        &self.entity
    }

    /// The current state snapshot.
    pub fn state(&self) -> BalanceState {
        *self.shared.state.borrow()
    }

    /// A receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<BalanceState> {
        self.shared.state.subscribe()
    }

    /// Runs one simulated update immediately, outside the timer cadence.
    pub fn force_update(&self) -> FeedEvent {
        self.shared.step(BalanceSimulator::simulate_balance_update)
    }

    /// Whether the feed is bound to a player and not yet torn down.
    pub fn is_live(&self) -> bool {
        self.abort.is_some() && !self.shared.torn_down.load(Ordering::Acquire)
    }

    /// Cancels both timers and the account subscription. Idempotent.
    pub fn shutdown(&self) {
        if self.shared.torn_down.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(abort) = &self.abort {
            abort.abort();
            info!(entity = %self.entity, "balance feed torn down");
        }
    }
}

impl Drop for BalanceFeed {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn drive(
    shared: Arc<Shared>,
    mut balance_rx: watch::Receiver<Option<f64>>,
    config: FeedConfig,
) {
    let mut updates = Interval::new(config.update_interval);
    let mut liveness = Interval::new(config.connection_interval);

    loop {
        tokio::select! {
            _ = updates.tick() => {
                shared.step(BalanceSimulator::tick_update);
            }
            _ = liveness.tick() => {
                shared.step(BalanceSimulator::check_connection);
            }
            changed = balance_rx.changed() => {
                if changed.is_err() {
                    info!("player account closed; stopping balance feed");
                    shared.go_inert();
                    break;
                }
                let balance = *balance_rx.borrow_and_update();
                shared.step(|simulator| simulator.sync_external(balance));
            }
        }
    }
}
