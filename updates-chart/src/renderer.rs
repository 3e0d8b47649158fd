//! The graphing-library seam.
//!
//! The hook never touches Chart.js directly; it hands a `BarChartConfig` to a
//! `ChartRenderer`. In the browser that is `js_bridge::ChartJsRenderer`, in
//! tests a recorder.

use crate::model::BarChartConfig;
use std::rc::Rc;

pub trait ChartRenderer {
    /// Construct a bar chart on `target` from `config`.
    fn render_bar(&self, target: &str, config: &BarChartConfig);

    /// Tear down whatever chart is currently drawn on `target`.
    fn destroy(&self, _target: &str) {}
}

impl<R: ChartRenderer + ?Sized> ChartRenderer for Rc<R> {
    fn render_bar(&self, target: &str, config: &BarChartConfig) {
        (**self).render_bar(target, config)
    }

    fn destroy(&self, target: &str) {
        (**self).destroy(target)
    }
}
