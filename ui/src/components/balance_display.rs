//! Shows a player's balance together with the feed's liveness and the time of
//! the last balance change.

use api::balance::BalanceState;
use chrono::Local;
use dioxus::prelude::*;

use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;

#[component]
pub fn BalanceDisplay(
    state: BalanceState,
    #[props(default = "credits".to_string())] unit: String,
    #[props(optional)] on_refresh: Option<EventHandler<()>>,
) -> Element {
    let amount = state.balance_label();
    let (dot_class, status) = if state.is_connected {
        ("status-dot live", "Live")
    } else {
        ("status-dot offline", "Offline")
    };
    let updated = state
        .last_update
        .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string());

    rsx! {
        Card {
            class: "balance-display",
            div {
                class: "feature-row",
                span { "Balance" }
                span {
                    class: "{dot_class}",
                    title: "Balance feed {status}",
                    "● {status}"
                }
            }
            p {
                class: "balance-amount",
                strong { "{amount}" }
                " {unit}"
            }
            if let Some(updated) = updated {
                small { class: "balance-updated", "Updated {updated}" }
            }
            if let Some(handler) = on_refresh {
                Button {
                    button_type: ButtonType::Secondary,
                    outline: true,
                    on_click: move |_| handler.call(()),
                    "Refresh"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_and_never_updated() {
        let html = dioxus_ssr::render_element(rsx! {
            BalanceDisplay { state: BalanceState::INERT }
        });
        assert!(html.contains("0.00"), "{html}");
        assert!(html.contains("Offline"), "{html}");
        assert!(!html.contains("Updated"), "{html}");
        assert!(!html.contains("Refresh"), "{html}");
    }

    #[test]
    fn live_balance_with_timestamp() {
        let state = BalanceState {
            balance: 1234.5,
            is_connected: true,
            last_update: Some(chrono::Utc::now()),
        };
        let html = dioxus_ssr::render_element(rsx! {
            BalanceDisplay { state, unit: "coins" }
        });
        assert!(html.contains("1234.50"), "{html}");
        assert!(html.contains("coins"), "{html}");
        assert!(html.contains("Live"), "{html}");
        assert!(html.contains("Updated"), "{html}");
    }
}
