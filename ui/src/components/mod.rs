//! Shared components for the slot HUD. The two widgets are independent of each
//! other; both are laid out with the Pico.css helpers in [`pico`].
pub mod balance_display;
pub mod feature_status_panel;
pub mod pico;
