//! # Event Bus
//!
//! Synchronous publish/subscribe bus coordinating the model and the views.
//! Topics are plain strings (`items:changed`, `order:submit`, ...); a
//! subscription matches either one exact topic or a prefix/suffix wildcard
//! (the form-field topics `order.<field>:change` are the only wildcard
//! users today).
//!
//! The bus is generic over a context `Ctx` that is threaded mutably through
//! every handler. There is no global state: the composition root owns the
//! context and the bus, and hands both to `emit`.
//!
//! Emission is depth-first and re-entrant. A handler may call `emit` again;
//! the nested emission runs to completion before the outer one continues.
//! The subscription list is snapshotted at the start of each `emit`, so
//! handlers registered or removed mid-emission take effect from the next
//! emission onward.
//!
//! Model types cannot hold a bus reference (that would alias the context
//! they live in), so mutators queue their notifications on a [`Changes`]
//! outbox instead. The composition root drains the outbox through the bus
//! after each mutation.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::lot::LotId;
use crate::core::state::{FormErrors, OrderField};

/// Every payload shape carried by the topics in [`topics`]. One enum rather
/// than per-view dynamic objects, so each call site's shape is checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EventData {
    #[default]
    None,
    /// A lot reference, by catalog id (`card:select`, `preview:changed`).
    Lot(LotId),
    /// A placed bid (`auction:changed` when emitted from `place_bid`).
    Bid { id: LotId, price: u64 },
    /// A single order-form field edit (`order.<field>:change`).
    OrderField { field: OrderField, value: String },
    /// The full validation-error mapping (`formErrors:change`).
    FormErrors(FormErrors),
}

/// Application event topics. The contract surface between model and views.
pub mod topics {
    use super::TopicFilter;
    use crate::core::state::OrderField;

    pub const ITEMS_CHANGED: &str = "items:changed";
    pub const CARD_SELECT: &str = "card:select";
    pub const ORDER_OPEN: &str = "order:open";
    pub const FORM_ERRORS_CHANGE: &str = "formErrors:change";
    pub const ORDER_SUBMIT: &str = "order:submit";
    pub const BIDS_OPEN: &str = "bids:open";
    pub const BASKET_OPEN: &str = "basket:open";
    pub const AUCTION_CHANGED: &str = "auction:changed";
    pub const PREVIEW_CHANGED: &str = "preview:changed";
    pub const MODAL_OPEN: &str = "modal:open";
    pub const MODAL_CLOSE: &str = "modal:close";

    /// Topic emitted when a single order-form field changes.
    pub fn order_field_change(field: OrderField) -> String {
        format!("order.{}:change", field.as_str())
    }

    /// Filter matching every `order.<field>:change` topic.
    pub fn order_field_filter() -> TopicFilter {
        TopicFilter::wildcard("order.", ":change")
    }
}

/// Which topics a subscription reacts to: an exact string, or a
/// prefix+suffix pair (`order.` + `:change` matches every
/// `order.<field>:change` topic).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicFilter {
    Exact(String),
    Wildcard { prefix: String, suffix: String },
}

impl TopicFilter {
    pub fn exact(topic: impl Into<String>) -> Self {
        TopicFilter::Exact(topic.into())
    }

    pub fn wildcard(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        TopicFilter::Wildcard {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn matches(&self, topic: &str) -> bool {
        match self {
            TopicFilter::Exact(t) => t == topic,
            TopicFilter::Wildcard { prefix, suffix } => {
                topic.len() >= prefix.len() + suffix.len()
                    && topic.starts_with(prefix.as_str())
                    && topic.ends_with(suffix.as_str())
            }
        }
    }
}

impl From<&str> for TopicFilter {
    fn from(topic: &str) -> Self {
        TopicFilter::Exact(topic.to_string())
    }
}

/// Handle returned by [`EventBus::on`], usable with [`EventBus::off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type HandlerFn<Ctx> = dyn Fn(&EventBus<Ctx>, &mut Ctx, &EventData);
type ObserverFn = dyn Fn(&str, &EventData);

struct Subscription<Ctx> {
    id: SubscriptionId,
    filter: TopicFilter,
    handler: Rc<HandlerFn<Ctx>>,
}

/// The publish/subscribe bus. Single-threaded by construction (handlers are
/// `Rc` closures); all dispatch happens on the UI event loop.
pub struct EventBus<Ctx> {
    next_id: Cell<u64>,
    subscriptions: RefCell<Vec<Subscription<Ctx>>>,
    observers: RefCell<Vec<Rc<ObserverFn>>>,
}

impl<Ctx> EventBus<Ctx> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            subscriptions: RefCell::new(Vec::new()),
            observers: RefCell::new(Vec::new()),
        }
    }

    /// Register a handler for topics matching `filter`. Handlers for the
    /// same topic run in registration order.
    pub fn on<F>(&self, filter: impl Into<TopicFilter>, handler: F) -> SubscriptionId
    where
        F: Fn(&EventBus<Ctx>, &mut Ctx, &EventData) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscriptions.borrow_mut().push(Subscription {
            id,
            filter: filter.into(),
            handler: Rc::new(handler),
        });
        id
    }

    /// Register an observer invoked for every emission, before the matching
    /// handlers. Used for debug logging of event traffic.
    pub fn on_all<F>(&self, observer: F)
    where
        F: Fn(&str, &EventData) + 'static,
    {
        self.observers.borrow_mut().push(Rc::new(observer));
    }

    /// Remove a single subscription. Unknown ids are a no-op.
    pub fn off(&self, id: SubscriptionId) {
        self.subscriptions.borrow_mut().retain(|s| s.id != id);
    }

    /// Drop every subscription and observer. Test isolation hook.
    pub fn clear(&self) {
        self.subscriptions.borrow_mut().clear();
        self.observers.borrow_mut().clear();
    }

    /// Emit `topic` with `data`, invoking every matching handler with the
    /// given context. Synchronous and re-entrant: handlers may emit further
    /// events, which complete before control returns here.
    pub fn emit(&self, ctx: &mut Ctx, topic: &str, data: EventData) {
        let observers: Vec<Rc<ObserverFn>> = self.observers.borrow().iter().cloned().collect();
        for observer in observers {
            observer(topic, &data);
        }

        let matched: Vec<Rc<HandlerFn<Ctx>>> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|s| s.filter.matches(topic))
            .map(|s| Rc::clone(&s.handler))
            .collect();

        log::debug!("emit {topic}: {} handler(s)", matched.len());
        for handler in matched {
            handler(self, ctx, &data);
        }
    }
}

impl<Ctx> Default for EventBus<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

/// Outbox of pending emissions queued by model mutators.
///
/// The model-layer stand-in for "emit a named event with a payload": a
/// mutator pushes `(topic, payload)` pairs here while it holds the state
/// borrow, and the composition root flushes them through the bus once the
/// borrow ends.
#[derive(Debug, Default)]
pub struct Changes {
    pending: Vec<(String, EventData)>,
}

impl Changes {
    pub fn emit(&mut self, topic: impl Into<String>, data: EventData) {
        self.pending.push((topic.into(), data));
    }

    pub fn drain(&mut self) -> Vec<(String, EventData)> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    // The test context is just an ordered log of handler invocations.
    type Log = Vec<String>;

    #[test]
    fn test_exact_topic_dispatch_in_registration_order() {
        let bus: EventBus<Log> = EventBus::new();
        bus.on("items:changed", |_, log, _| log.push("first".into()));
        bus.on("items:changed", |_, log, _| log.push("second".into()));
        bus.on("card:select", |_, log, _| log.push("other".into()));

        let mut log = Log::new();
        bus.emit(&mut log, "items:changed", EventData::None);

        assert_eq!(log, vec!["first", "second"]);
    }

    #[test]
    fn test_wildcard_filter_matches_field_topics() {
        let filter = topics::order_field_filter();
        assert!(filter.matches("order.email:change"));
        assert!(filter.matches("order.phone:change"));
        assert!(!filter.matches("order:open"));
        assert!(!filter.matches("formErrors:change"));
        // Degenerate topic shorter than prefix+suffix combined.
        assert!(!filter.matches("order.:chang"));
    }

    #[test]
    fn test_wildcard_subscription_receives_payload() {
        let bus: EventBus<Log> = EventBus::new();
        bus.on(topics::order_field_filter(), |_, log, data| {
            if let EventData::OrderField { field, value } = data {
                log.push(format!("{}={}", field.as_str(), value));
            }
        });

        let mut log = Log::new();
        bus.emit(
            &mut log,
            &topics::order_field_change(OrderField::Email),
            EventData::OrderField {
                field: OrderField::Email,
                value: "a@b.ru".into(),
            },
        );

        assert_eq!(log, vec!["email=a@b.ru"]);
    }

    #[test]
    fn test_on_all_sees_every_emission() {
        let bus: EventBus<Log> = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_c = Rc::clone(&seen);
        bus.on_all(move |topic, _| seen_c.borrow_mut().push(topic.to_string()));

        let mut log = Log::new();
        bus.emit(&mut log, "items:changed", EventData::None);
        bus.emit(&mut log, "modal:open", EventData::None);
        bus.emit(&mut log, "unsubscribed:topic", EventData::None);

        assert_eq!(
            *seen.borrow(),
            vec!["items:changed", "modal:open", "unsubscribed:topic"]
        );
    }

    #[test]
    fn test_reentrant_emit_is_depth_first() {
        let bus: EventBus<Log> = EventBus::new();
        bus.on("outer", |bus, log, _| {
            log.push("outer:start".into());
            bus.emit(log, "inner", EventData::None);
            log.push("outer:end".into());
        });
        bus.on("inner", |_, log, _| log.push("inner".into()));

        let mut log = Log::new();
        bus.emit(&mut log, "outer", EventData::None);

        assert_eq!(log, vec!["outer:start", "inner", "outer:end"]);
    }

    #[test]
    fn test_off_removes_only_that_subscription() {
        let bus: EventBus<Log> = EventBus::new();
        let keep = bus.on("t", |_, log, _| log.push("keep".into()));
        let drop = bus.on("t", |_, log, _| log.push("drop".into()));
        let _ = keep;
        bus.off(drop);

        let mut log = Log::new();
        bus.emit(&mut log, "t", EventData::None);

        assert_eq!(log, vec!["keep"]);
    }

    #[test]
    fn test_clear_drops_everything() {
        let bus: EventBus<Log> = EventBus::new();
        bus.on("t", |_, log, _| log.push("handler".into()));
        bus.on_all(|_, _| unreachable!("observer survived clear"));
        bus.clear();

        let mut log = Log::new();
        bus.emit(&mut log, "t", EventData::None);

        assert!(log.is_empty());
    }

    #[test]
    fn test_changes_outbox_drains_in_order() {
        let mut changes = Changes::default();
        changes.emit(topics::AUCTION_CHANGED, EventData::None);
        changes.emit(topics::ITEMS_CHANGED, EventData::None);

        let batch = changes.drain();
        assert_eq!(batch[0].0, "auction:changed");
        assert_eq!(batch[1].0, "items:changed");
        assert!(changes.is_empty());
    }
}
