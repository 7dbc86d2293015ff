//=============================================================================
// File: src/screens/table.rs
//=============================================================================
use api::FeatureSnapshot;
use dioxus::prelude::*;
use dioxus_logger::tracing::debug;

use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::components::balance_display::BalanceDisplay;
use crate::components::feature_status_panel::FeatureStatusPanel;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Grid;
use crate::hooks::use_balance_updates::use_balance_updates;

/// Demo controls standing in for the game, which normally owns these values.
fn collect_wild(features: &mut FeatureSnapshot) {
    if features.wild_collection < features.max_wild_collection {
        features.wild_collection += 1;
    }
}

fn toggle_bonus(features: &mut FeatureSnapshot) {
    features.is_bonus = !features.is_bonus;
    features.free_spins = if features.is_bonus { 10 } else { 0 };
    features.multiplier = if features.is_bonus { 2.0 } else { 1.0 };
}

#[component]
pub fn TableScreen() -> Element {
    let app_state = use_context::<AppState>();
    let app_state_mut = use_context::<AppStateMut>();

    let player = app_state.player.clone();
    let updates = use_balance_updates(
        player.as_ref().map(|p| p.id.clone()),
        player.map(|p| p.account),
        app_state.feed_config,
    );

    let mut features = app_state_mut.features;
    let snapshot = *features.read();
    let balance_state = *updates.state().read();

    rsx! {
        Grid {
            BalanceDisplay {
                state: balance_state,
                on_refresh: move |_| {
                    let event = updates.force_update();
                    debug!(?event, "manual balance refresh");
                },
            }
            FeatureStatusPanel { snapshot }
        }
        div {
            class: "demo-controls",
            Button {
                button_type: ButtonType::Secondary,
                on_click: move |_| features.with_mut(collect_wild),
                "Collect wild"
            }
            Button {
                button_type: ButtonType::Contrast,
                outline: true,
                on_click: move |_| features.with_mut(toggle_bonus),
                if snapshot.is_bonus { "End bonus" } else { "Start bonus" }
            }
        }
    }
}
