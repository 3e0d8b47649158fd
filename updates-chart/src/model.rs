//! Chart data payload and the Chart.js configuration built from it.

use crate::config::ChartSettings;
use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One chart-render request: category labels paired positionally with values.
///
/// `keys[i]` is the category of the bar whose height is `values[i]`. Entries
/// are kept as raw JSON so whatever the server sends (year numbers, numeric
/// strings, `null` gaps) reaches Chart.js untouched. The two vectors are
/// expected to have the same length, but nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub keys: Vec<Value>,
    pub values: Vec<Value>,
}

impl ChartData {
    pub fn new<K, V>(keys: impl IntoIterator<Item = K>, values: impl IntoIterator<Item = V>) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Decode a `{keys, values}` event payload. Only the outer shape is
    /// checked; the entries themselves are not inspected.
    pub fn from_payload(payload: Value) -> Result<Self, ChartError> {
        serde_json::from_value(payload).map_err(ChartError::Payload)
    }

    /// Whether every key has a value and vice versa.
    pub fn is_aligned(&self) -> bool {
        self.keys.len() == self.values.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
}

/// Chart.js configuration for a single-series bar chart.
///
/// Serializes to the object passed as the second argument of `new Chart(el, config)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: BarChartData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartData {
    pub labels: Vec<Value>,
    pub datasets: Vec<BarDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarDataset {
    pub label: String,
    pub data: Vec<Value>,
    pub background_color: Vec<String>,
}

impl BarChartConfig {
    /// Build a bar chart with one dataset, one color and one legend label.
    pub fn bar(data: ChartData, settings: &ChartSettings) -> Self {
        Self {
            kind: ChartKind::Bar,
            data: BarChartData {
                labels: data.keys,
                datasets: vec![BarDataset {
                    label: settings.dataset_label.clone(),
                    data: data.values,
                    background_color: vec![settings.bar_color.clone()],
                }],
            },
        }
    }

    pub fn labels(&self) -> &[Value] {
        &self.data.labels
    }

    /// Values of the single series.
    pub fn series(&self) -> &[Value] {
        self.data
            .datasets
            .first()
            .map(|d| d.data.as_slice())
            .unwrap_or(&[])
    }

    pub fn to_json(&self) -> Result<String, ChartError> {
        serde_json::to_string(self).map_err(ChartError::Serialize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bar_config_json_shape() {
        let config = BarChartConfig::bar(
            ChartData::new(["Jan", "Feb"], [3, 7]),
            &ChartSettings::default(),
        );
        let value: Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "bar",
                "data": {
                    "labels": ["Jan", "Feb"],
                    "datasets": [{
                        "label": "# of Published Updates",
                        "data": [3, 7],
                        "backgroundColor": ["#505050"],
                    }],
                },
            })
        );
    }

    #[test]
    fn test_bar_config_preserves_order() {
        let config = BarChartConfig::bar(
            ChartData::new(["c", "a", "b"], [30.0, 10.0, 20.0]),
            &ChartSettings::default(),
        );
        assert_eq!(config.labels(), [json!("c"), json!("a"), json!("b")]);
        assert_eq!(config.series(), [json!(30.0), json!(10.0), json!(20.0)]);
        assert_eq!(config.data.datasets.len(), 1);
        assert_eq!(config.data.datasets[0].background_color.len(), 1);
    }

    #[test]
    fn test_from_payload() {
        let data =
            ChartData::from_payload(json!({"keys": ["2023-01", "2023-02"], "values": [4, 9]}))
                .unwrap();
        assert_eq!(data, ChartData::new(["2023-01", "2023-02"], [4, 9]));
        assert!(data.is_aligned());
    }

    #[test]
    fn test_from_payload_keeps_entries_as_sent() {
        let data = ChartData::from_payload(json!({"keys": [2023, 2024], "values": ["3", null]}))
            .unwrap();
        assert_eq!(data.keys, vec![json!(2023), json!(2024)]);
        assert_eq!(data.values, vec![json!("3"), Value::Null]);
    }

    #[test]
    fn test_from_payload_mismatched_lengths_passes() {
        let data = ChartData::from_payload(json!({"keys": ["a", "b", "c"], "values": [1]})).unwrap();
        assert!(!data.is_aligned());
    }

    #[test]
    fn test_from_payload_rejects_missing_values() {
        let err = ChartData::from_payload(json!({"keys": ["a"]})).unwrap_err();
        assert!(matches!(err, ChartError::Payload(_)));
    }

    #[test]
    fn test_from_payload_rejects_non_object() {
        let err = ChartData::from_payload(json!("garbage")).unwrap_err();
        assert!(matches!(err, ChartError::Payload(_)));
    }

    #[test]
    fn test_empty_data() {
        let config = BarChartConfig::bar(
            ChartData::new(Vec::<String>::new(), Vec::<f64>::new()),
            &ChartSettings::default(),
        );
        assert!(config.labels().is_empty());
        assert!(config.series().is_empty());
    }
}
