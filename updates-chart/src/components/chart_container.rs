//! Canvas host for the Chart.js bar chart.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// DOM id of the canvas Chart.js draws on
    pub id: String,
    /// Show the placeholder until the first chart-data event is drawn
    #[props(default = false)]
    pub loading: bool,
    #[props(default = 400)]
    pub min_height: u32,
}

/// Wraps the chart canvas. The canvas stays mounted while `loading` so
/// queued renders can find it; the placeholder sits on top of it.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let wrapper_style = format!(
        "position: relative; width: 100%; min-height: {}px;",
        props.min_height
    );

    rsx! {
        div {
            style: "{wrapper_style}",
            canvas {
                id: "{props.id}",
                aria_label: "Published updates bar chart",
                role: "img",
            }
            if props.loading {
                div {
                    style: "position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; color: #888; font-size: 13px; pointer-events: none;",
                    "Waiting for published update counts..."
                }
            }
        }
    }
}
