//! Chart.js bar chart hook and Dioxus components for published update counts.
//!
//! This crate provides:
//! - `model`: the `{keys, values}` payload and the Chart.js bar config built from it
//! - `config`: `ChartSettings` with the fixed defaults (event name, label, color)
//! - `renderer`: the `ChartRenderer` seam over the graphing library
//! - `events`: the `EventChannel` seam plus an in-memory `LocalEventBus`
//! - `hook`: `UpdatesChartHook`, which binds the `chart_data` event to chart construction
//! - `js_bridge`: Chart.js renderer and `window` event channel for the browser
//! - `components`: reusable RSX components (chart container, header, the mounted chart)

pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod hook;
pub mod js_bridge;
pub mod model;
pub mod renderer;

pub use config::ChartSettings;
pub use error::ChartError;
pub use events::{EventChannel, LocalEventBus, SubscriptionId};
pub use hook::{load_chart, UpdatesChartHook};
pub use model::{BarChartConfig, ChartData};
pub use renderer::ChartRenderer;
