//! Thin Dioxus wrappers over the Pico.css primitives the HUD is built from.
//! Requires pico.min.css to be linked by the host page.

#![allow(non_snake_case)] // Allow PascalCase for component function names

use dioxus::prelude::*;

/// A centered container: `<main class="container">`.
#[component]
pub fn Container(children: Element) -> Element {
    rsx! { main { class: "container", {children} } }
}

/// Pico's responsive grid; each direct child becomes a column.
#[component]
pub fn Grid(children: Element) -> Element {
    rsx! { div { class: "grid", {children} } }
}

/// An `<article>` card, optionally with a heading in its header.
#[component]
pub fn Card(
    #[props(optional)] title: Option<String>,
    #[props(default)] class: String,
    children: Element,
) -> Element {
    rsx! {
        article {
            class: "{class}",
            if let Some(title) = title {
                header {
                    h4 { style: "margin-bottom: 0;", "{title}" }
                }
            }
            {children}
        }
    }
}

#[derive(PartialEq, Clone, Copy, Default)]
pub enum ButtonType {
    #[default]
    Primary,
    Secondary,
    Contrast,
}

impl ButtonType {
    fn to_class(self, outline: bool) -> &'static str {
        match (self, outline) {
            (ButtonType::Primary, false) => "",
            (ButtonType::Primary, true) => "outline",
            (ButtonType::Secondary, false) => "secondary",
            (ButtonType::Secondary, true) => "secondary outline",
            (ButtonType::Contrast, false) => "contrast",
            (ButtonType::Contrast, true) => "contrast outline",
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ButtonProps {
    children: Element,
    #[props(optional)]
    on_click: Option<EventHandler<MouseEvent>>,
    #[props(default)]
    button_type: ButtonType,
    #[props(default = false)]
    outline: bool,
    #[props(default = false)]
    disabled: bool,
}

pub fn Button(props: ButtonProps) -> Element {
    let class_str = props.button_type.to_class(props.outline);
    rsx! {
        button {
            class: "{class_str}",
            disabled: props.disabled,
            onclick: move |evt| {
                if let Some(handler) = &props.on_click {
                    handler.call(evt);
                }
            },
            {props.children}
        }
    }
}
