//! The mounted updates chart.
//!
//! Owns one `UpdatesChartHook` wired to Chart.js and `window` events. The
//! hook subscribes after the first render (once the canvas is in the DOM) and
//! is torn down, chart included, when the component is dropped.

use super::ChartContainer;
use crate::config::ChartSettings;
use crate::hook::UpdatesChartHook;
use crate::js_bridge::{ChartJsRenderer, WindowEventChannel};
use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Props, Clone, PartialEq)]
pub struct UpdatesChartProps {
    #[props(default)]
    pub settings: ChartSettings,
}

#[component]
pub fn UpdatesChart(props: UpdatesChartProps) -> Element {
    let settings = props.settings.clone();
    // Stays true until the first chart-data event has been drawn
    let waiting = use_signal(|| true);

    let channel = use_hook(|| Rc::new(WindowEventChannel::new()));
    let hook = use_hook(|| {
        let hook = UpdatesChartHook::new(
            settings.container_id.clone(),
            ChartJsRenderer::new(&settings),
            settings.clone(),
        )
        .with_on_render(move || {
            let mut waiting = waiting;
            if *waiting.peek() {
                waiting.set(false);
            }
        });
        Rc::new(RefCell::new(hook))
    });

    use_effect({
        let channel = Rc::clone(&channel);
        let hook = Rc::clone(&hook);
        move || hook.borrow_mut().mounted(channel.as_ref())
    });

    use_drop(move || hook.borrow_mut().destroyed(channel.as_ref()));

    rsx! {
        ChartContainer {
            id: settings.container_id.clone(),
            loading: waiting(),
            min_height: settings.min_height,
        }
    }
}
