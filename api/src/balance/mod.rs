//! The simulated balance feed behind a player's currency display.

pub mod account;
pub mod clock;
pub mod entropy;
pub mod feed;
pub mod simulator;
pub mod state;

pub use account::AccountHandle;
pub use account::EntityId;
pub use account::InMemoryAccount;
pub use account::PlayerAccount;
pub use clock::Clock;
pub use clock::SystemClock;
pub use entropy::Entropy;
pub use entropy::SmallRngEntropy;
pub use feed::BalanceFeed;
pub use simulator::BalanceSimulator;
pub use state::BalanceState;
pub use state::FeedEvent;
