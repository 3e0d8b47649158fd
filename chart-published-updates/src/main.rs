//! Published Updates Bar Chart
//!
//! Draws the number of published updates per period as a Chart.js bar chart.
//! The server pushes `{keys, values}` on the `chart_data` event and every push
//! rebuilds the chart.
//!
//! Data flow:
//! 1. `settings.json` is embedded at compile time; missing fields fall back to defaults.
//! 2. On startup: initialize the Chart.js helpers (waits for the `Chart` global).
//! 3. On mount: `UpdatesChart` subscribes its hook to the chart-data event on `window`.
//! 4. On each event: the payload is decoded and handed to Chart.js.

use dioxus::prelude::*;
use updates_chart::components::{ChartHeader, ErrorDisplay, UpdatesChart};
use updates_chart::config::ChartSettings;
use updates_chart::js_bridge;

const SETTINGS_JSON: &str = include_str!("../settings.json");

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("updates-chart-root"))
        .launch(App);
}

/// Parse the embedded settings, keeping the error message for display.
fn load_settings() -> (ChartSettings, Option<String>) {
    match ChartSettings::from_json(SETTINGS_JSON) {
        Ok(settings) => (settings, None),
        Err(e) => {
            log::error!("Falling back to default chart settings: {}", e);
            (ChartSettings::default(), Some(e.to_string()))
        }
    }
}

#[component]
fn App() -> Element {
    let (settings, settings_error) = use_hook(load_settings);

    // Initialize Chart.js helpers (one-time)
    use_effect(js_bridge::init_charts);

    rsx! {
        div {
            style: "max-width: 900px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            if let Some(err) = settings_error {
                ErrorDisplay {
                    message: err,
                    fallback: "Using default chart settings.".to_string(),
                }
            }

            ChartHeader {
                title: "Published Updates".to_string(),
                subtitle: "Number of updates published per period".to_string(),
            }

            UpdatesChart { settings: settings }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_settings_parse() {
        let (settings, error) = load_settings();
        assert!(error.is_none());
        assert_eq!(settings, ChartSettings::default());
    }
}
