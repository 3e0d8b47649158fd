//! Inline notice for recoverable chart errors.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// What the page did instead (e.g., "Using default chart settings.")
    #[props(default = String::new())]
    pub fallback: String,
}

/// Shows what went wrong and, when given, what the page fell back to.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            role: "alert",
            style: "padding: 8px 12px; margin: 8px 0; background: #FFF8E1; color: #8D6E00; border-left: 4px solid #FFB300; font-size: 13px;",
            strong { "Chart problem: " }
            "{props.message}"
            if !props.fallback.is_empty() {
                div {
                    style: "margin-top: 4px; color: #666;",
                    "{props.fallback}"
                }
            }
        }
    }
}
