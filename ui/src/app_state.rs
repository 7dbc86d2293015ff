use api::balance::AccountHandle;
use api::balance::EntityId;
use api::balance::InMemoryAccount;
use api::FeedConfig;
use std::ops::Deref;
use std::sync::Arc;

/// The player whose balance the HUD displays.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub id: EntityId,
    pub account: AccountHandle,
}

#[derive(Debug, PartialEq)]
pub struct AppStateData {
    /// `None` until a player session exists.
    pub player: Option<Player>,
    pub feed_config: FeedConfig,
}

/// Immutable, cheaply clonable state provided as a Dioxus context.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState(Arc<AppStateData>);

impl Deref for AppState {
    type Target = AppStateData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AppState {
    pub fn new(player: Option<Player>, feed_config: FeedConfig) -> Self {
        Self(Arc::new(AppStateData {
            player,
            feed_config,
        }))
    }

    /// A demo session: one local player with a starting balance, and the feed
    /// tuned from the environment.
    pub fn demo() -> Self {
        let player = Player {
            id: EntityId::new("demo-player"),
            account: AccountHandle::new(InMemoryAccount::new(Some(1_000.0))),
        };
        Self::new(Some(player), FeedConfig::from_env())
    }
}
