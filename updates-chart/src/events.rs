//! Named event channels.
//!
//! `EventChannel` is the host-side seam: the hook subscribes a handler on
//! mount and hands the returned id back on teardown. `LocalEventBus` is the
//! in-memory implementation; the browser one lives in `js_bridge`.

use std::cell::RefCell;
use std::rc::Rc;

/// Callback invoked with the raw JSON payload of each delivered event.
pub type EventHandler = Box<dyn FnMut(serde_json::Value)>;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

pub trait EventChannel {
    fn subscribe(&self, event: &str, handler: EventHandler) -> SubscriptionId;

    /// Remove a subscription. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

impl<C: EventChannel + ?Sized> EventChannel for Rc<C> {
    fn subscribe(&self, event: &str, handler: EventHandler) -> SubscriptionId {
        (**self).subscribe(event, handler)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        (**self).unsubscribe(id)
    }
}

struct Subscriber {
    id: SubscriptionId,
    event: String,
    handler: Rc<RefCell<EventHandler>>,
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

/// Single-threaded in-memory event bus.
///
/// Cheaply cloneable (via `Rc`); clones share the same subscribers.
#[derive(Clone, Default)]
pub struct LocalEventBus {
    inner: Rc<RefCell<BusInner>>,
}

impl LocalEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `payload` to every handler subscribed to `event`, in
    /// subscription order. Returns the number of handlers invoked.
    ///
    /// Handlers may subscribe or unsubscribe while running; the set of
    /// recipients is fixed when `emit` starts.
    pub fn emit(&self, event: &str, payload: serde_json::Value) -> usize {
        let handlers: Vec<Rc<RefCell<EventHandler>>> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .filter(|s| s.event == event)
            .map(|s| Rc::clone(&s.handler))
            .collect();

        let mut delivered = 0;
        for handler in handlers {
            match handler.try_borrow_mut() {
                Ok(mut handler) => {
                    handler(payload.clone());
                    delivered += 1;
                }
                Err(_) => log::warn!("Skipping re-entrant delivery of '{}'", event),
            }
        }
        delivered
    }

    pub fn subscriber_count(&self, event: &str) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|s| s.event == event)
            .count()
    }
}

impl EventChannel for LocalEventBus {
    fn subscribe(&self, event: &str, handler: EventHandler) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId::new(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push(Subscriber {
            id,
            event: event.to_string(),
            handler: Rc::new(RefCell::new(handler)),
        });
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.borrow_mut().subscribers.retain(|s| s.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emit_reaches_matching_subscribers_only() {
        let bus = LocalEventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        bus.subscribe("chart_data", Box::new(move |p| sink.borrow_mut().push(p)));
        bus.subscribe("other", Box::new(|_| panic!("wrong event delivered")));

        assert_eq!(bus.emit("chart_data", json!({"n": 1})), 1);
        assert_eq!(*seen.borrow(), vec![json!({"n": 1})]);
    }

    #[test]
    fn test_emit_in_subscription_order() {
        let bus = LocalEventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            bus.subscribe("e", Box::new(move |_| order.borrow_mut().push(tag)));
        }
        bus.emit("e", json!(null));
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unsubscribe() {
        let bus = LocalEventBus::new();
        let id = bus.subscribe("e", Box::new(|_| {}));
        assert_eq!(bus.subscriber_count("e"), 1);

        bus.unsubscribe(id);
        assert_eq!(bus.subscriber_count("e"), 0);
        assert_eq!(bus.emit("e", json!(null)), 0);

        // Unknown ids are ignored
        bus.unsubscribe(id);
    }

    #[test]
    fn test_clones_share_subscribers() {
        let bus = LocalEventBus::new();
        let other = bus.clone();
        other.subscribe("e", Box::new(|_| {}));
        assert_eq!(bus.emit("e", json!(1)), 1);
    }

    #[test]
    fn test_handler_can_unsubscribe_during_emit() {
        let bus = LocalEventBus::new();
        let id_slot: Rc<RefCell<Option<SubscriptionId>>> = Rc::new(RefCell::new(None));

        let inner_bus = bus.clone();
        let slot = Rc::clone(&id_slot);
        let id = bus.subscribe(
            "once",
            Box::new(move |_| {
                if let Some(id) = slot.borrow_mut().take() {
                    inner_bus.unsubscribe(id);
                }
            }),
        );
        *id_slot.borrow_mut() = Some(id);

        assert_eq!(bus.emit("once", json!(null)), 1);
        assert_eq!(bus.emit("once", json!(null)), 0);
    }
}
