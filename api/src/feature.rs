//! Defines the per-render snapshot of slot feature values and the display
//! math derived from it.

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// An error describing a snapshot the panel can only render in degraded form.
#[derive(Error, Debug, PartialEq)]
pub enum FeatureSnapshotError {
    /// The wild-collection capacity is zero, so no progress ratio exists.
    #[error("max wild collection must be greater than zero")]
    ZeroWildCapacity,
    /// The multiplier is NaN or infinite.
    #[error("multiplier must be a finite number, got {0}")]
    NonFiniteMultiplier(f64),
}

/// An immutable bundle of game-feature values, supplied by the caller on every
/// render.
///
/// Field names deserialize from camelCase so a host can hand over the JSON a
/// game feed emits without an intermediate type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSnapshot {
    pub wild_collection: u32,
    pub max_wild_collection: u32,
    pub multiplier: f64,
    pub is_bonus: bool,
    /// Only meaningful while `is_bonus` is set.
    pub free_spins: u32,
}

impl Default for FeatureSnapshot {
    fn default() -> Self {
        Self {
            wild_collection: 0,
            max_wild_collection: 10,
            multiplier: 1.0,
            is_bonus: false,
            free_spins: 0,
        }
    }
}

impl FeatureSnapshot {
    /// Checks the snapshot for inputs that would make the derived values
    /// meaningless.
    pub fn validate(&self) -> Result<(), FeatureSnapshotError> {
        if self.max_wild_collection == 0 {
            return Err(FeatureSnapshotError::ZeroWildCapacity);
        }
        if !self.multiplier.is_finite() {
            return Err(FeatureSnapshotError::NonFiniteMultiplier(self.multiplier));
        }
        Ok(())
    }

    /// Progress of the wild-symbol collection.
    pub fn wild_progress(&self) -> WildProgress {
        WildProgress {
            collected: self.wild_collection,
            capacity: self.max_wild_collection,
        }
    }

    /// The free-spin count, present only during a bonus round.
    pub fn active_free_spins(&self) -> Option<u32> {
        self.is_bonus.then_some(self.free_spins)
    }

    /// The multiplier formatted verbatim (e.g. "2x", "1.5x").
    pub fn multiplier_label(&self) -> String {
        format!("{}x", self.multiplier)
    }
}

/// Wild-collection progress: how many wilds have been gathered out of the
/// number needed to trigger the feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WildProgress {
    collected: u32,
    capacity: u32,
}

impl WildProgress {
    pub fn collected(&self) -> u32 {
        self.collected
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// The raw `collected / capacity` ratio. It may exceed 1.0.
    ///
    /// Returns `None` when the capacity is zero.
    pub fn ratio(&self) -> Option<f64> {
        if self.capacity == 0 {
            return None;
        }
        Some(self.collected as f64 / self.capacity as f64)
    }

    /// The fraction of the progress bar to fill, always within `[0, 1]`.
    pub fn fill(&self) -> f64 {
        self.ratio().map(|r| r.clamp(0.0, 1.0)).unwrap_or(0.0)
    }

    /// The bar fill as a CSS percentage, e.g. "40%". Not rounded, so the
    /// rendered width is the exact collection ratio.
    pub fn fill_percent(&self) -> String {
        if self.capacity == 0 {
            return "0%".to_string();
        }
        let percent = (self.collected as f64 * 100.0 / self.capacity as f64).min(100.0);
        format!("{percent}%")
    }

    /// Whether the collection is full.
    pub fn is_complete(&self) -> bool {
        self.capacity > 0 && self.collected >= self.capacity
    }

    /// The counter text, e.g. "3/10".
    pub fn label(&self) -> String {
        format!("{}/{}", self.collected, self.capacity)
    }
}
