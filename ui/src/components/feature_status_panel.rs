//! The slot feature panel: wild-collection progress, current multiplier and,
//! during a bonus round only, the remaining free spins.

use api::FeatureSnapshot;
use dioxus::prelude::*;
use dioxus_logger::tracing::warn;

use crate::components::pico::Card;

#[component]
pub fn FeatureStatusPanel(snapshot: FeatureSnapshot) -> Element {
    if let Err(e) = snapshot.validate() {
        warn!("rendering degraded feature snapshot: {}", e);
    }

    let progress = snapshot.wild_progress();
    let counter = progress.label();
    let fill = progress.fill_percent();
    let multiplier = snapshot.multiplier_label();
    let (collected, capacity) = (progress.collected(), progress.capacity());
    let bar_class = if progress.is_complete() {
        "wild-progress-fill complete"
    } else {
        "wild-progress-fill"
    };

    rsx! {
        Card {
            class: "feature-status",
            section {
                class: "wild-collection",
                div {
                    class: "feature-row",
                    span { "Wild Collection" }
                    span { class: "wild-count", "{counter}" }
                }
                div {
                    class: "wild-progress-track",
                    role: "progressbar",
                    "aria-valuemin": "0",
                    "aria-valuemax": "{capacity}",
                    "aria-valuenow": "{collected}",
                    div { class: "{bar_class}", style: "width: {fill};" }
                }
            }
            section {
                class: "feature-row multiplier",
                span { "Multiplier" }
                strong { "{multiplier}" }
            }
            // absent, not hidden, outside a bonus round.
            if let Some(spins) = snapshot.active_free_spins() {
                section {
                    class: "feature-row free-spins",
                    span { "Free Spins" }
                    strong { "{spins}" }
                }
            }
        }
    }
}
