//! Reusable Dioxus RSX components for the updates chart.

mod chart_container;
mod chart_header;
mod error_display;
mod updates_chart;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use error_display::ErrorDisplay;
pub use updates_chart::UpdatesChart;
