//! Error type shared by the chart crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    /// The event payload was not a `{keys, values}` object.
    #[error("chart payload could not be decoded: {0}")]
    Payload(#[source] serde_json::Error),

    #[error("invalid chart settings: {0}")]
    Config(#[source] serde_json::Error),

    #[error("chart config could not be serialized: {0}")]
    Serialize(#[source] serde_json::Error),
}
