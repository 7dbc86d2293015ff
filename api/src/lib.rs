//! This crate contains the platform-independent logic shared by the slot
//! HUD front-ends: feature-panel display math and the simulated balance feed.

pub mod balance;
pub mod config;
pub mod feature;
pub mod timer;

pub use config::FeedConfig;
pub use feature::FeatureSnapshot;
pub use feature::FeatureSnapshotError;
pub use feature::WildProgress;
