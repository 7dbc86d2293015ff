//=============================================================================
// File: src/hooks/use_balance_updates.rs
//=============================================================================

//! Binds a simulated [`BalanceFeed`] to the current player and mirrors its
//! state into a Dioxus signal.
//!
//! The feed is torn down and rebound whenever the entity id, the account or
//! the feed config changes, and torn down for good when the owning component
//! unmounts.

use api::balance::AccountHandle;
use api::balance::BalanceFeed;
use api::balance::BalanceState;
use api::balance::EntityId;
use api::balance::FeedEvent;
use api::FeedConfig;
use chrono::DateTime;
use chrono::Utc;
use dioxus::prelude::*;
use dioxus::core::Task;

/// A bound feed plus the tasks that drive it and mirror its state.
struct LiveFeed {
    feed: BalanceFeed,
    tasks: Vec<Task>,
}

impl LiveFeed {
    fn teardown(self) {
        self.feed.shutdown();
        for task in self.tasks {
            task.cancel();
        }
    }
}

#[derive(Clone, Copy)]
pub struct BalanceUpdates {
    state: Signal<BalanceState>,
    live: Signal<Option<LiveFeed>>,
}

impl BalanceUpdates {
    /// Returns the signal holding the latest state.
    /// Call .read() on this in a component to subscribe to changes.
    pub fn state(&self) -> Signal<BalanceState> {
        self.state
    }

    pub fn balance(&self) -> f64 {
        self.state.read().balance
    }

    pub fn is_connected(&self) -> bool {
        self.state.read().is_connected
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.state.read().last_update
    }

    /// Triggers one simulated update right away.
    pub fn force_update(&self) -> FeedEvent {
        match &*self.live.peek() {
            Some(live) => live.feed.force_update(),
            None => FeedEvent::Inert,
        }
    }
}

pub fn use_balance_updates(
    entity: Option<EntityId>,
    account: Option<AccountHandle>,
    config: FeedConfig,
) -> BalanceUpdates {
    let mut state = use_signal(BalanceState::default);
    let mut live = use_signal(|| None::<LiveFeed>);

    use_effect(use_reactive(
        (&entity, &account, &config),
        move |(entity, account, config)| {
            if let Some(previous) = live.take() {
                previous.teardown();
            }

            // nothing to display until the host knows which entity to show.
            let Some(entity) = entity else {
                state.set(BalanceState::INERT);
                return;
            };

            let (feed, driver) = BalanceFeed::bind(entity, account, config);
            state.set(feed.state());

            let mut tasks = Vec::new();
            if let Some(driver) = driver {
                tasks.push(spawn(driver));

                let mut rx = feed.subscribe();
                tasks.push(spawn(async move {
                    while rx.changed().await.is_ok() {
                        let next = *rx.borrow_and_update();
                        state.set(next);
                    }
                }));
            }

            live.set(Some(LiveFeed { feed, tasks }));
        },
    ));

    use_drop(move || {
        // The signal may already be gone if the whole scope is being dropped.
        if let Ok(mut slot) = live.try_write() {
            let previous = slot.take();
            if let Some(previous) = previous {
                previous.feed.shutdown();
            }
        }
    });

    BalanceUpdates { state, live }
}
