//! The "update chart" hook.
//!
//! `UpdatesChartHook` is bound to one chart canvas. On mount it subscribes to
//! the chart-data event and rebuilds the bar chart from every payload it
//! receives; on teardown it drops that subscription and the drawn chart.
//! Nothing is raised to the host: payloads that are not `{keys, values}`
//! objects are logged and skipped.

use crate::config::ChartSettings;
use crate::events::{EventChannel, SubscriptionId};
use crate::model::{BarChartConfig, ChartData};
use crate::renderer::ChartRenderer;
use serde_json::Value;
use std::rc::Rc;

/// Called after each chart-data event has been handed to the renderer.
pub type RenderCallback = Rc<dyn Fn()>;

/// Build a single-series bar chart on `target`.
///
/// Issues exactly one construction call. Entries are not inspected and
/// mismatched `keys`/`values` lengths are logged and passed through as-is.
pub fn load_chart<R, K, V>(
    renderer: &R,
    settings: &ChartSettings,
    target: &str,
    keys: impl IntoIterator<Item = K>,
    values: impl IntoIterator<Item = V>,
) where
    R: ChartRenderer + ?Sized,
    K: Into<Value>,
    V: Into<Value>,
{
    render_data(renderer, settings, target, ChartData::new(keys, values));
}

fn render_data<R: ChartRenderer + ?Sized>(
    renderer: &R,
    settings: &ChartSettings,
    target: &str,
    data: ChartData,
) {
    if !data.is_aligned() {
        log::warn!(
            "Chart data for '{}' has {} keys but {} values",
            target,
            data.keys.len(),
            data.values.len()
        );
    }
    log::debug!("Rendering bar chart on '{}' with {} bars", target, data.keys.len());

    let config = BarChartConfig::bar(data, settings);
    renderer.render_bar(target, &config);
}

/// Decode one chart-data payload and render it. Returns whether a chart was
/// built.
fn handle_chart_data<R: ChartRenderer + ?Sized>(
    renderer: &R,
    settings: &ChartSettings,
    target: &str,
    payload: Value,
) -> bool {
    match ChartData::from_payload(payload) {
        Ok(data) => {
            render_data(renderer, settings, target, data);
            true
        }
        Err(e) => {
            log::error!("Ignoring '{}' event for '{}': {}", settings.event, target, e);
            false
        }
    }
}

pub struct UpdatesChartHook<R> {
    target: String,
    renderer: Rc<R>,
    settings: Rc<ChartSettings>,
    on_render: Option<RenderCallback>,
    subscription: Option<SubscriptionId>,
}

impl<R: ChartRenderer + 'static> UpdatesChartHook<R> {
    /// Create a detached hook bound to the `target` element.
    pub fn new(target: impl Into<String>, renderer: R, settings: ChartSettings) -> Self {
        Self {
            target: target.into(),
            renderer: Rc::new(renderer),
            settings: Rc::new(settings),
            on_render: None,
            subscription: None,
        }
    }

    /// Run `callback` after every chart-data event that produced a chart.
    /// Takes effect on the next `mounted`.
    pub fn with_on_render(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_render = Some(Rc::new(callback));
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Build a bar chart on an arbitrary `target` with this hook's renderer.
    pub fn load_chart<K, V>(
        &self,
        target: &str,
        keys: impl IntoIterator<Item = K>,
        values: impl IntoIterator<Item = V>,
    ) where
        K: Into<Value>,
        V: Into<Value>,
    {
        load_chart(self.renderer.as_ref(), &self.settings, target, keys, values);
    }

    /// Subscribe to the chart-data event. Every payload rebuilds the chart on
    /// this hook's own target. Mounting twice keeps the first subscription.
    pub fn mounted<C: EventChannel + ?Sized>(&mut self, channel: &C) {
        if self.subscription.is_some() {
            log::warn!("Chart hook for '{}' is already mounted", self.target);
            return;
        }

        let renderer = Rc::clone(&self.renderer);
        let settings = Rc::clone(&self.settings);
        let on_render = self.on_render.clone();
        let target = self.target.clone();
        let id = channel.subscribe(
            &self.settings.event,
            Box::new(move |payload| {
                if handle_chart_data(renderer.as_ref(), &settings, &target, payload) {
                    if let Some(callback) = &on_render {
                        callback();
                    }
                }
            }),
        );

        log::info!(
            "Chart hook for '{}' subscribed to '{}'",
            self.target,
            self.settings.event
        );
        self.subscription = Some(id);
    }

    /// Drop the chart-data subscription and the chart on the target.
    /// No-op when not mounted.
    pub fn destroyed<C: EventChannel + ?Sized>(&mut self, channel: &C) {
        if let Some(id) = self.subscription.take() {
            channel.unsubscribe(id);
            self.renderer.destroy(&self.target);
            log::info!("Chart hook for '{}' unsubscribed", self.target);
        }
    }
}
