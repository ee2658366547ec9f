//! # Application State
//!
//! Sole source of truth for the catalog, the preview selection and the
//! order draft. Views never touch this directly; every mutation flows
//! through the wiring layer, and every mutation that the views must see
//! queues a change event on the outbox (see `core::events::Changes`).
//!
//! The state object is constructed by the composition root and passed by
//! reference into event handlers. There is no ambient singleton.

use crate::core::events::{topics, Changes, EventData};
use crate::core::lot::{LotId, LotItem, LotStatus};

/// Order-form fields, also naming the `order.<field>:change` topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Email,
    Phone,
}

impl OrderField {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderField::Email => "email",
            OrderField::Phone => "phone",
        }
    }
}

/// Per-field validation messages. `None` = field is fine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none()
    }

    /// Error messages joined for display, phone first as in the form.
    pub fn joined(&self) -> String {
        [self.phone.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// The basket being assembled into an order: selected won-lot ids plus
/// contact details. Selection order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    pub items: Vec<LotId>,
    pub email: String,
    pub phone: String,
}

pub struct AppState {
    /// Ordered catalog; ids unique; replaced wholesale by `set_catalog`.
    pub catalog: Vec<LotItem>,
    /// Currently previewed lot, as a key into the catalog. A stale id
    /// (after catalog replacement) simply resolves to no lot.
    pub preview: Option<LotId>,
    pub order: OrderDraft,
    pub form_errors: FormErrors,
    /// Outbox of change events, flushed through the bus by the wiring.
    pub changes: Changes,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            catalog: Vec::new(),
            preview: None,
            order: OrderDraft::default(),
            form_errors: FormErrors::default(),
            changes: Changes::default(),
        }
    }

    /// Replace the whole catalog, discarding prior lots. Queues
    /// `items:changed`.
    pub fn set_catalog(&mut self, lots: Vec<LotItem>) {
        self.catalog = lots;
        self.changes.emit(topics::ITEMS_CHANGED, EventData::None);
    }

    pub fn lot(&self, id: &str) -> Option<&LotItem> {
        self.catalog.iter().find(|l| l.id == id)
    }

    pub fn lot_mut(&mut self, id: &str) -> Option<&mut LotItem> {
        self.catalog.iter_mut().find(|l| l.id == id)
    }

    /// Point the preview at a lot (or at nothing). Queues
    /// `preview:changed`; the detail fetch is a subscriber's concern.
    pub fn set_preview(&mut self, lot: Option<LotId>) {
        self.preview = lot.clone();
        let data = match lot {
            Some(id) => EventData::Lot(id),
            None => EventData::None,
        };
        self.changes.emit(topics::PREVIEW_CHANGED, data);
    }

    /// Drop the preview without notifying anyone (detail view closed).
    pub fn clear_preview(&mut self) {
        self.preview = None;
    }

    pub fn get_active_lots(&self) -> Vec<&LotItem> {
        self.catalog
            .iter()
            .filter(|l| l.status == LotStatus::Active)
            .collect()
    }

    /// Closed lots are the won ones — the basket's candidate set.
    pub fn get_closed_lots(&self) -> Vec<&LotItem> {
        self.catalog
            .iter()
            .filter(|l| l.status == LotStatus::Closed)
            .collect()
    }

    /// Add or remove a lot id from the order selection. Ids not present in
    /// the catalog are a no-op; double insertion is a no-op.
    pub fn toggle_ordered_lot(&mut self, id: &str, included: bool) {
        if self.lot(id).is_none() {
            return;
        }
        if included {
            if !self.order.items.iter().any(|i| i == id) {
                self.order.items.push(id.to_string());
            }
        } else {
            self.order.items.retain(|i| i != id);
        }
    }

    /// Sum of `price` over the currently selected closed lots.
    pub fn get_total(&self) -> u64 {
        self.catalog
            .iter()
            .filter(|l| {
                l.status == LotStatus::Closed && self.order.items.iter().any(|i| *i == l.id)
            })
            .map(|l| l.price)
            .sum()
    }

    /// Store one form field and re-validate. Queues `formErrors:change`
    /// with the full current error mapping on every call.
    pub fn set_order_field(&mut self, field: OrderField, value: String) {
        match field {
            OrderField::Email => self.order.email = value,
            OrderField::Phone => self.order.phone = value,
        }
        self.validate_order();
    }

    fn validate_order(&mut self) {
        let errors = FormErrors {
            email: if self.order.email.trim().is_empty() {
                Some("Необходимо указать email".to_string())
            } else {
                None
            },
            phone: if self.order.phone.trim().is_empty() {
                Some("Необходимо указать телефон".to_string())
            } else {
                None
            },
        };
        self.form_errors = errors.clone();
        self.changes
            .emit(topics::FORM_ERRORS_CHANGE, EventData::FormErrors(errors));
    }

    /// Blank the contact fields and their errors, keeping the lot
    /// selection. The order form starts empty every time it opens.
    pub fn reset_order_contacts(&mut self) {
        self.order.email.clear();
        self.order.phone.clear();
        self.form_errors = FormErrors::default();
    }

    /// Place a bid on a catalog lot; unknown ids are a no-op.
    pub fn place_bid(&mut self, id: &str, price: u64) {
        let Self {
            catalog, changes, ..
        } = self;
        if let Some(lot) = catalog.iter_mut().find(|l| l.id == id) {
            lot.place_bid(price, changes);
        }
    }

    /// Reset the draft after a successful order, forgetting local bids.
    pub fn clear_basket(&mut self) {
        self.order = OrderDraft::default();
        self.form_errors = FormErrors::default();
        for lot in &mut self.catalog {
            lot.clear_bid();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_catalog, sample_lot};

    fn state_with_catalog() -> AppState {
        let mut state = AppState::new();
        state.catalog = sample_catalog();
        state
    }

    #[test]
    fn test_active_and_closed_partition_the_catalog() {
        let state = state_with_catalog();
        let active = state.get_active_lots();
        let closed = state.get_closed_lots();

        // No overlap.
        for lot in &closed {
            assert!(active.iter().all(|a| a.id != lot.id));
        }
        // Every lot is exactly one of active/closed/wait.
        let waiting = state
            .catalog
            .iter()
            .filter(|l| l.status == LotStatus::Wait)
            .count();
        assert_eq!(active.len() + closed.len() + waiting, state.catalog.len());
        assert!(closed.iter().all(|l| l.status == LotStatus::Closed));
    }

    #[test]
    fn test_set_catalog_replaces_and_queues_items_changed() {
        let mut state = AppState::new();
        state.set_catalog(vec![sample_lot("a", LotStatus::Wait, 100)]);

        assert_eq!(state.catalog.len(), 1);
        let batch = state.changes.drain();
        assert_eq!(batch, vec![("items:changed".to_string(), EventData::None)]);

        // Wholesale replacement discards the prior instances.
        state.set_catalog(vec![sample_lot("b", LotStatus::Active, 200)]);
        assert_eq!(state.catalog.len(), 1);
        assert_eq!(state.catalog[0].id, "b");
    }

    #[test]
    fn test_set_preview_queues_preview_changed() {
        let mut state = state_with_catalog();
        state.changes.drain();

        state.set_preview(Some("active-1".to_string()));
        assert_eq!(state.preview.as_deref(), Some("active-1"));
        let batch = state.changes.drain();
        assert_eq!(
            batch,
            vec![(
                "preview:changed".to_string(),
                EventData::Lot("active-1".to_string())
            )]
        );

        state.set_preview(None);
        let batch = state.changes.drain();
        assert_eq!(
            batch,
            vec![("preview:changed".to_string(), EventData::None)]
        );
    }

    #[test]
    fn test_toggle_ordered_lot_round_trips() {
        let mut state = state_with_catalog();
        let before = state.order.items.clone();

        state.toggle_ordered_lot("closed-1", true);
        assert_eq!(state.order.items, vec!["closed-1"]);

        state.toggle_ordered_lot("closed-1", false);
        assert_eq!(state.order.items, before);
    }

    #[test]
    fn test_toggle_ordered_lot_is_idempotent_and_ignores_unknown_ids() {
        let mut state = state_with_catalog();

        state.toggle_ordered_lot("closed-1", true);
        state.toggle_ordered_lot("closed-1", true);
        assert_eq!(state.order.items.len(), 1);

        state.toggle_ordered_lot("no-such-lot", true);
        assert_eq!(state.order.items.len(), 1);

        state.toggle_ordered_lot("no-such-lot", false);
        assert_eq!(state.order.items.len(), 1);
    }

    #[test]
    fn test_get_total_sums_selected_closed_lots_only() {
        let mut state = state_with_catalog();
        assert_eq!(state.get_total(), 0);

        state.toggle_ordered_lot("closed-1", true);
        state.toggle_ordered_lot("closed-2", true);
        let expected: u64 = state.get_closed_lots().iter().map(|l| l.price).sum();
        assert_eq!(state.get_total(), expected);

        state.toggle_ordered_lot("closed-2", false);
        assert_eq!(state.get_total(), state.lot("closed-1").unwrap().price);
    }

    #[test]
    fn test_validation_blocks_until_both_contacts_present() {
        let mut state = AppState::new();

        state.set_order_field(OrderField::Email, "user@molotok.ru".to_string());
        assert!(state.form_errors.email.is_none());
        assert!(state.form_errors.phone.is_some());

        state.set_order_field(OrderField::Phone, "+7 900 000-00-00".to_string());
        assert!(state.form_errors.is_empty());

        state.set_order_field(OrderField::Email, "   ".to_string());
        assert!(!state.form_errors.is_empty());
        assert_eq!(
            state.form_errors.email.as_deref(),
            Some("Необходимо указать email")
        );
    }

    #[test]
    fn test_every_field_change_queues_form_errors_event() {
        let mut state = AppState::new();
        state.set_order_field(OrderField::Phone, "123".to_string());

        let batch = state.changes.drain();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].0, "formErrors:change");
        match &batch[0].1 {
            EventData::FormErrors(errors) => {
                assert!(errors.phone.is_none());
                assert!(errors.email.is_some());
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_form_errors_joined_puts_phone_first() {
        let errors = FormErrors {
            email: Some("Необходимо указать email".to_string()),
            phone: Some("Необходимо указать телефон".to_string()),
        };
        assert_eq!(
            errors.joined(),
            "Необходимо указать телефон; Необходимо указать email"
        );
    }

    #[test]
    fn test_reset_order_contacts_keeps_the_selection() {
        let mut state = state_with_catalog();
        state.toggle_ordered_lot("closed-1", true);
        state.set_order_field(OrderField::Email, "user@molotok.ru".to_string());
        state.set_order_field(OrderField::Phone, "123".to_string());

        state.reset_order_contacts();

        assert!(state.order.email.is_empty());
        assert!(state.order.phone.is_empty());
        assert!(state.form_errors.is_empty());
        assert_eq!(state.order.items, vec!["closed-1"]);
    }

    #[test]
    fn test_clear_basket_resets_draft_and_local_bids() {
        let mut state = state_with_catalog();
        state.toggle_ordered_lot("closed-1", true);
        state.set_order_field(OrderField::Email, "user@molotok.ru".to_string());
        state.place_bid("active-1", 10_000);
        assert!(state.lot("active-1").unwrap().is_participate());

        state.clear_basket();

        assert!(state.order.items.is_empty());
        assert!(state.order.email.is_empty());
        assert!(state.form_errors.is_empty());
        assert!(!state.lot("active-1").unwrap().is_participate());
    }

    #[test]
    fn test_place_bid_on_unknown_id_is_a_noop() {
        let mut state = state_with_catalog();
        state.changes.drain();

        state.place_bid("no-such-lot", 500);
        assert!(state.changes.is_empty());
    }

    #[test]
    fn test_place_bid_routes_to_the_lot_and_queues_events() {
        let mut state = state_with_catalog();
        state.changes.drain();
        let next = state.lot("active-1").unwrap().next_bid();

        state.place_bid("active-1", next);

        assert_eq!(state.lot("active-1").unwrap().price, next);
        let batch = state.changes.drain();
        assert_eq!(batch[0].0, "auction:changed");
        assert_eq!(batch[1].0, "items:changed");
    }
}
