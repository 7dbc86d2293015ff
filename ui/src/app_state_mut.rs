//! Defines the mutable, reactive state for the application's UI.

use api::FeatureSnapshot;
use dioxus::prelude::*;

/// A reactive state provided as a Dioxus context for mutable UI data.
///
/// It is separate from the immutable `AppState`. The feature snapshot lives
/// here because the game, not the panel, owns those values.
#[derive(Clone, Copy)]
pub struct AppStateMut {
    /// The latest feature values reported by the game.
    pub features: Signal<FeatureSnapshot>,
}
