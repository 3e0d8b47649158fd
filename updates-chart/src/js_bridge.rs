//! Browser side of the chart: Chart.js calls and `window` events.
//!
//! The Chart.js helpers live in `assets/js/bar-chart.js`, are embedded at
//! compile time and evaluated as globals (no ES modules) once the `Chart`
//! global exists. Every call goes through `call_js`, which wraps it in
//! try/catch so a failing chart never panics the WASM module.

use crate::config::ChartSettings;
use crate::events::{EventChannel, EventHandler, SubscriptionId};
use crate::model::BarChartConfig;
use crate::renderer::ChartRenderer;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

static BAR_CHART_JS: &str = include_str!("../assets/js/bar-chart.js");

/// Quote a Rust string as a JS string literal.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "''".to_string())
}

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('Updates chart JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize the chart helpers once Chart.js has loaded. Safe to call more
/// than once; later calls do nothing.
pub fn init_charts() {
    let store_js = format!(
        "if (!window.__updatesChartsInit) {{ window.__updatesChartScripts = {}; }}",
        js_string(BAR_CHART_JS)
    );
    call_js(&store_js);

    let init_js = r#"
        (function() {
            if (window.__updatesChartsInit) return;
            window.__updatesChartsInit = true;
            var waitForChartJs = setInterval(function() {
                if (typeof Chart !== 'undefined') {
                    clearInterval(waitForChartJs);
                    // Eval at global scope via indirect eval
                    (0, eval)(window.__updatesChartScripts);
                    delete window.__updatesChartScripts;
                    if (typeof renderUpdatesBarChart !== 'undefined') window.renderUpdatesBarChart = renderUpdatesBarChart;
                    if (typeof destroyUpdatesBarChart !== 'undefined') window.destroyUpdatesBarChart = destroyUpdatesBarChart;
                    window.__updatesChartsReady = true;
                    console.log('Updates chart initialized');
                }
            }, 100);
        })();
    "#;
    call_js(init_js);
}

/// Script that queues a chart config for `container_id`.
///
/// Each canvas has one pending slot (`window.__updatesPending[id]`) and at
/// most one poll (`window.__updatesPolls[id]`). A newer config overwrites the
/// slot, so the poll always draws the most recent event.
fn render_script(
    container_id: &str,
    config_json: &str,
    replace_previous: bool,
    poll_interval_ms: u32,
) -> String {
    let id = js_string(container_id);
    let config = js_string(config_json);
    format!(
        r#"
        (function() {{
            var id = {id};
            var pending = window.__updatesPending || (window.__updatesPending = {{}});
            var polls = window.__updatesPolls || (window.__updatesPolls = {{}});
            pending[id] = {{ config: {config}, replace: {replace_previous} }};
            if (polls[id]) return;
            polls[id] = setInterval(function() {{
                if (window.__updatesChartsReady &&
                    typeof window.renderUpdatesBarChart !== 'undefined' &&
                    document.getElementById(id)) {{
                    clearInterval(polls[id]);
                    delete polls[id];
                    var next = pending[id];
                    delete pending[id];
                    if (!next) return;
                    try {{
                        window.renderUpdatesBarChart(id, next.config, next.replace);
                    }} catch(e) {{ console.error('[Updates] renderUpdatesBarChart error:', e); }}
                }}
            }}, {poll_interval_ms});
        }})();
        "#,
    )
}

/// Script that cancels any queued render for `container_id` and destroys
/// the chart drawn on it.
fn destroy_script(container_id: &str) -> String {
    let id = js_string(container_id);
    format!(
        r#"
        (function() {{
            var id = {id};
            if (window.__updatesPolls && window.__updatesPolls[id]) {{
                clearInterval(window.__updatesPolls[id]);
                delete window.__updatesPolls[id];
            }}
            if (window.__updatesPending) delete window.__updatesPending[id];
            if (window.destroyUpdatesBarChart) window.destroyUpdatesBarChart(id);
        }})();
        "#,
    )
}

/// Render a bar chart from a serialized Chart.js config.
///
/// Waits until the helpers are initialized and the canvas exists, then draws
/// the latest config queued for that canvas.
pub fn render_bar_chart(
    container_id: &str,
    config_json: &str,
    replace_previous: bool,
    poll_interval_ms: u32,
) {
    call_js(&render_script(
        container_id,
        config_json,
        replace_previous,
        poll_interval_ms,
    ));
}

/// Destroy the Chart.js instance on the given canvas and drop any render
/// still waiting for it.
pub fn destroy_chart(container_id: &str) {
    call_js(&destroy_script(container_id));
}

/// `ChartRenderer` backed by Chart.js.
#[derive(Debug, Clone)]
pub struct ChartJsRenderer {
    replace_previous: bool,
    poll_interval_ms: u32,
}

impl ChartJsRenderer {
    pub fn new(settings: &ChartSettings) -> Self {
        Self {
            replace_previous: settings.replace_previous,
            poll_interval_ms: settings.poll_interval_ms,
        }
    }
}

impl ChartRenderer for ChartJsRenderer {
    fn render_bar(&self, target: &str, config: &BarChartConfig) {
        match config.to_json() {
            Ok(json) => render_bar_chart(target, &json, self.replace_previous, self.poll_interval_ms),
            Err(e) => log::error!("Could not render chart on '{}': {}", target, e),
        }
    }

    fn destroy(&self, target: &str) {
        destroy_chart(target);
    }
}

type Listener = Closure<dyn FnMut(web_sys::CustomEvent)>;

/// `EventChannel` over `CustomEvent`s dispatched on `window`.
///
/// The page's transport delivers server pushes as
/// `window.dispatchEvent(new CustomEvent(name, {detail: payload}))`. Listeners
/// are removed on unsubscribe and when the channel is dropped.
#[derive(Default)]
pub struct WindowEventChannel {
    next_id: Cell<u64>,
    listeners: RefCell<HashMap<SubscriptionId, (String, Listener)>>,
}

impl WindowEventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn remove_listener(event: &str, listener: &Listener) {
        if let Some(window) = web_sys::window() {
            if let Err(e) =
                window.remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
            {
                log::warn!("Could not remove '{}' listener: {:?}", event, e);
            }
        }
    }
}

impl EventChannel for WindowEventChannel {
    fn subscribe(&self, event: &str, mut handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);

        let event_name = event.to_string();
        let listener = Closure::<dyn FnMut(web_sys::CustomEvent)>::wrap(Box::new(
            move |e: web_sys::CustomEvent| {
                match serde_wasm_bindgen::from_value::<serde_json::Value>(e.detail()) {
                    Ok(payload) => handler(payload),
                    Err(err) => log::error!("Could not read '{}' event detail: {}", event_name, err),
                }
            },
        ));

        match web_sys::window() {
            Some(window) => {
                if let Err(e) = window
                    .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
                {
                    log::error!("Could not subscribe to '{}': {:?}", event, e);
                }
            }
            None => log::error!("No window to subscribe to '{}' on", event),
        }

        self.listeners
            .borrow_mut()
            .insert(id, (event.to_string(), listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if let Some((event, listener)) = self.listeners.borrow_mut().remove(&id) {
            Self::remove_listener(&event, &listener);
        }
    }
}

impl Drop for WindowEventChannel {
    fn drop(&mut self) {
        for (_, (event, listener)) in self.listeners.get_mut().drain() {
            Self::remove_listener(&event, &listener);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_script_uses_one_slot_and_one_poll_per_canvas() {
        let script = render_script("updates-chart", r#"{"type":"bar"}"#, true, 100);
        assert!(script.contains(r#"var id = "updates-chart";"#));
        assert!(script.contains(r#"pending[id] = { config: "{\"type\":\"bar\"}", replace: true };"#));
        // An existing poll picks up the overwritten slot instead of a new timer starting
        assert!(script.contains("if (polls[id]) return;"));
        assert!(script.contains("}, 100);"));
    }

    #[test]
    fn test_destroy_script_cancels_pending_render() {
        let script = destroy_script("updates-chart");
        assert!(script.contains(r#"var id = "updates-chart";"#));
        assert!(script.contains("clearInterval(window.__updatesPolls[id]);"));
        assert!(script.contains("delete window.__updatesPending[id];"));
        assert!(script.contains("window.destroyUpdatesBarChart(id);"));
    }

    #[test]
    fn test_container_id_is_quoted() {
        let script = destroy_script("it's \"odd\"");
        assert!(script.contains(r#"var id = "it's \"odd\"";"#));
    }
}
