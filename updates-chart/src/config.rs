//! Chart settings.
//!
//! Every field has a default matching the values the published-updates page
//! has always used, so an empty JSON object (or no settings at all) yields the
//! stock chart.

use crate::error::ChartError;
use serde::{Deserialize, Serialize};

/// Event name the server pushes chart data on.
pub const CHART_DATA_EVENT: &str = "chart_data";
/// Legend label of the single dataset.
pub const DATASET_LABEL: &str = "# of Published Updates";
/// Fill color of every bar.
pub const BAR_COLOR: &str = "#505050";
/// DOM id of the canvas the chart is drawn on.
pub const CONTAINER_ID: &str = "updates-chart";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Name of the chart-data event to subscribe to
    pub event: String,
    pub dataset_label: String,
    pub bar_color: String,
    /// DOM id of the chart canvas
    pub container_id: String,
    /// Destroy the chart already on the canvas before drawing a new one
    pub replace_previous: bool,
    /// How often the bridge polls for Chart.js and the canvas, in milliseconds
    pub poll_interval_ms: u32,
    /// Minimum height of the chart container in pixels
    pub min_height: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            event: CHART_DATA_EVENT.to_string(),
            dataset_label: DATASET_LABEL.to_string(),
            bar_color: BAR_COLOR.to_string(),
            container_id: CONTAINER_ID.to_string(),
            replace_previous: true,
            poll_interval_ms: 100,
            min_height: 400,
        }
    }
}

impl ChartSettings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        serde_json::from_str(json).map_err(ChartError::Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_chart() {
        let settings = ChartSettings::default();
        assert_eq!(settings.event, "chart_data");
        assert_eq!(settings.dataset_label, "# of Published Updates");
        assert_eq!(settings.bar_color, "#505050");
        assert!(settings.replace_previous);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let settings =
            ChartSettings::from_json(r##"{"bar_color": "#2196F3", "poll_interval_ms": 250}"##)
                .unwrap();
        assert_eq!(settings.bar_color, "#2196F3");
        assert_eq!(settings.poll_interval_ms, 250);
        assert_eq!(settings.event, CHART_DATA_EVENT);
        assert_eq!(settings.container_id, CONTAINER_ID);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(ChartSettings::from_json("{}").unwrap(), ChartSettings::default());
    }

    #[test]
    fn test_malformed_settings_error() {
        let err = ChartSettings::from_json("{\"min_height\": \"tall\"}").unwrap_err();
        assert!(matches!(err, ChartError::Config(_)));
    }
}
