// The client-side Dioxus application logic.

use dioxus::prelude::*;

mod app_state;
mod app_state_mut;
pub mod components;
pub mod hooks;
mod screens;

use api::FeatureSnapshot;
use app_state::AppState;
use app_state_mut::AppStateMut;
use components::pico::Container;
use screens::table::TableScreen;

//=============================================================================
// MAIN APPLICATION COMPONENT (Client-side)
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    let hud_css = r#"
    * { box-sizing: border-box; }

    .app-main-container {
        padding: 10px;
        background-color: var(--pico-background-color);
    }

    .feature-row {
        display: flex;
        justify-content: space-between;
        align-items: baseline;
        gap: 1rem;
    }

    /* --- WILD COLLECTION BAR --- */
    .wild-progress-track {
        height: 0.75rem;
        margin-top: 0.25rem;
        border-radius: 0.375rem;
        overflow: hidden;
        background-color: var(--pico-muted-border-color);
    }
    .wild-progress-fill {
        height: 100%;
        background-color: var(--pico-primary-background);
        transition: width 0.3s ease;
    }
    .wild-progress-fill.complete {
        background-color: var(--pico-ins-color);
    }

    .free-spins strong { color: var(--pico-ins-color); }

    /* --- BALANCE --- */
    .balance-amount { font-size: 1.75rem; margin-bottom: 0.25rem; }
    .status-dot.live { color: var(--pico-ins-color); }
    .status-dot.offline { color: var(--pico-del-color); }
    .balance-updated { display: block; color: var(--pico-muted-color); }

    .demo-controls { display: flex; gap: 0.5rem; }
    "#;

    let app_state = use_hook(AppState::demo);

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0"
        }
        document::Stylesheet {
            href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css"
        }
        style { "{hud_css}" }
        LoadedApp { app_state }
    }
}

/// Provides the application contexts and renders the table once the session
/// is known.
#[component]
fn LoadedApp(app_state: AppState) -> Element {
    // Provide the stable, non-reactive AppState.
    use_context_provider(|| app_state.clone());

    let features = use_signal(FeatureSnapshot::default);
    use_context_provider(|| AppStateMut { features });

    rsx! {
        div {
            class: "app-main-container",
            Container {
                header {
                    h1 { style: "margin: 0; font-size: 1.5rem;", "Slot HUD" }
                }
                TableScreen {}
            }
        }
    }
}
