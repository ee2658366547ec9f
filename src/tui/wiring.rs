//! # Wiring Layer
//!
//! The composition root's glue: it owns the view tree and the application
//! state together in [`AppCtx`], registers every topic handler on the bus,
//! and translates component events into bus emissions.
//!
//! Data flows one way. User input reaches a component, the component emits
//! a typed event, the wiring turns it into a bus emission, a handler
//! mutates the state, the state queues change events on its outbox, and
//! [`flush`] replays those through the bus so the refresh handlers can
//! rebuild the affected views' props. Network work never happens inside a
//! handler; handlers queue an [`Effect`] and the event loop runs it.

use crate::api::{LotDetail, OrderRequest, OrderResult};
use crate::core::events::{topics, EventBus, EventData};
use crate::core::lot::{LotId, LotItem};
use crate::core::state::AppState;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    AuctionCard, AuctionEvent, AuctionPanel, Basket, BasketEvent, Modal, ModalContent, OrderForm,
    OrderFormEvent, Page, PageEvent, Plug, PlugEvent, Tab, Tabs, TabsEvent,
};
use crate::tui::event::UiEvent;

pub type Bus = EventBus<AppCtx>;

/// Deferred network request queued by a handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchCatalog,
    FetchLotDetail(LotId),
    SubmitOrder(OrderRequest),
}

/// Result of a background request, delivered to the event loop over a
/// channel and fed back through [`apply_net_event`].
#[derive(Debug)]
pub enum NetEvent {
    CatalogLoaded(Vec<LotItem>),
    LotDetailLoaded { id: LotId, detail: LotDetail },
    OrderConfirmed(OrderResult),
    RequestFailed(String),
}

/// Every view instance. Built once at startup; the refresh handlers keep
/// their props in sync with the state.
pub struct Views {
    pub page: Page,
    pub modal: Modal,
    pub tabs: Tabs,
    /// Every active lot, as the open-bidding list.
    pub bids: Basket,
    /// Every closed (won) lot, with checkboxes and the order shortcut.
    pub basket: Basket,
    pub order: OrderForm,
    pub auction: AuctionPanel,
    pub preview_card: AuctionCard,
    pub plug: Plug,
}

impl Views {
    pub fn new() -> Self {
        Self {
            page: Page::new(),
            modal: Modal::default(),
            tabs: Tabs::new(),
            bids: Basket::bids(),
            basket: Basket::won(),
            order: OrderForm::default(),
            auction: AuctionPanel::default(),
            preview_card: AuctionCard::default(),
            plug: Plug::default(),
        }
    }
}

impl Default for Views {
    fn default() -> Self {
        Self::new()
    }
}

/// The context threaded through every bus handler.
pub struct AppCtx {
    pub state: AppState,
    pub views: Views,
    pub effects: Vec<Effect>,
}

impl AppCtx {
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
            views: Views::new(),
            effects: Vec::new(),
        }
    }
}

impl Default for AppCtx {
    fn default() -> Self {
        Self::new()
    }
}

/// Drain the state's outbox through the bus until it settles. Handlers may
/// queue further changes, hence the loop.
pub fn flush(bus: &Bus, ctx: &mut AppCtx) {
    loop {
        let batch = ctx.state.changes.drain();
        if batch.is_empty() {
            return;
        }
        for (topic, data) in batch {
            bus.emit(ctx, &topic, data);
        }
    }
}

fn open_modal(bus: &Bus, ctx: &mut AppCtx, content: ModalContent) {
    ctx.views.modal.open(content);
    bus.emit(ctx, topics::MODAL_OPEN, EventData::None);
}

// ---- view refresh (state -> props) ----

fn refresh_catalog(ctx: &mut AppCtx) {
    ctx.views.page.catalog = ctx
        .state
        .catalog
        .iter()
        .map(crate::tui::components::CatalogCard::from_lot)
        .collect();
    // Every closed lot counts as won; the row marker distinguishes ours.
    ctx.views.page.counter = ctx.state.get_closed_lots().len();
    ctx.views.page.clamp_selection();
}

fn refresh_bids(ctx: &mut AppCtx) {
    ctx.views.bids.items = ctx
        .state
        .get_active_lots()
        .into_iter()
        .map(crate::tui::components::BidCard::from_lot)
        .collect();
}

fn refresh_basket(ctx: &mut AppCtx) {
    ctx.views.basket.items = ctx
        .state
        .get_closed_lots()
        .into_iter()
        .map(crate::tui::components::BidCard::from_lot)
        .collect();
    ctx.views.basket.selected_ids = ctx.state.order.items.clone();
    ctx.views.basket.total = ctx.state.get_total();
}

fn refresh_preview(ctx: &mut AppCtx) {
    let Some(id) = ctx.state.preview.clone() else {
        return;
    };
    if let Some(lot) = ctx.state.lot(&id) {
        ctx.views.preview_card = AuctionCard::from_lot(lot);
        ctx.views.auction.update(lot);
    }
}

fn refresh_order_form(ctx: &mut AppCtx) {
    let state = &ctx.state;
    let form = &mut ctx.views.order;
    form.email = state.order.email.clone();
    form.phone = state.order.phone.clone();
    form.errors = state.form_errors.joined();
    form.valid = !state.order.email.trim().is_empty()
        && !state.order.phone.trim().is_empty()
        && !state.order.items.is_empty();
}

/// Register every topic handler. The emission graph mirrors the page's
/// interaction flows, one subscription per topic.
pub fn build_bus() -> Bus {
    let bus = Bus::new();

    bus.on_all(|topic, data| log::debug!("event {topic}: {data:?}"));

    bus.on(topics::ITEMS_CHANGED, |_, ctx, _| {
        refresh_catalog(ctx);
        refresh_bids(ctx);
        refresh_basket(ctx);
    });

    bus.on(topics::CARD_SELECT, |bus, ctx, data| {
        let EventData::Lot(id) = data else {
            return;
        };
        ctx.state.set_preview(Some(id.clone()));
        flush(bus, ctx);
        ctx.effects.push(Effect::FetchLotDetail(id.clone()));
        open_modal(bus, ctx, ModalContent::Preview);
    });

    bus.on(topics::PREVIEW_CHANGED, |_, ctx, _| refresh_preview(ctx));

    bus.on(topics::BIDS_OPEN, |bus, ctx, _| {
        refresh_bids(ctx);
        ctx.views.tabs.selected = Tab::Active;
        open_modal(bus, ctx, ModalContent::Bids);
    });

    bus.on(topics::BASKET_OPEN, |bus, ctx, _| {
        refresh_basket(ctx);
        if ctx.views.basket.items.is_empty() {
            ctx.views.plug = Plug::empty_basket();
            open_modal(bus, ctx, ModalContent::Empty);
            return;
        }
        ctx.views.tabs.selected = Tab::Closed;
        open_modal(bus, ctx, ModalContent::Basket);
    });

    bus.on(topics::ORDER_OPEN, |bus, ctx, _| {
        if ctx.state.order.items.is_empty() {
            ctx.views.plug = Plug::empty_basket();
            open_modal(bus, ctx, ModalContent::Empty);
            return;
        }
        // The form starts blank on every open; only the selection persists.
        ctx.state.reset_order_contacts();
        ctx.views.order.reset();
        refresh_order_form(ctx);
        open_modal(bus, ctx, ModalContent::Order);
    });

    bus.on(topics::order_field_filter(), |bus, ctx, data| {
        let EventData::OrderField { field, value } = data else {
            return;
        };
        ctx.state.set_order_field(*field, value.clone());
        flush(bus, ctx);
    });

    bus.on(topics::FORM_ERRORS_CHANGE, |_, ctx, _| {
        refresh_order_form(ctx);
    });

    bus.on(topics::ORDER_SUBMIT, |_, ctx, _| {
        ctx.effects
            .push(Effect::SubmitOrder(OrderRequest::from(&ctx.state.order)));
    });

    bus.on(topics::AUCTION_CHANGED, |_, ctx, _| {
        refresh_catalog(ctx);
        refresh_bids(ctx);
        refresh_basket(ctx);
        refresh_preview(ctx);
    });

    bus.on(topics::MODAL_OPEN, |_, ctx, _| {
        ctx.views.page.locked = true;
    });

    bus.on(topics::MODAL_CLOSE, |_, ctx, _| {
        ctx.views.modal.close();
        ctx.state.clear_preview();
        ctx.views.page.locked = false;
    });

    bus
}

/// Periodic refresh for time-dependent props (the preview countdown).
pub fn tick(ctx: &mut AppCtx) {
    if ctx.views.modal.content == Some(ModalContent::Preview) {
        refresh_preview(ctx);
    }
}

/// Fold a background result into the context. Called from the event loop
/// between input polls.
pub fn apply_net_event(bus: &Bus, ctx: &mut AppCtx, net: NetEvent) {
    match net {
        NetEvent::CatalogLoaded(lots) => {
            ctx.views.page.status = None;
            ctx.state.set_catalog(lots);
            flush(bus, ctx);
        }
        NetEvent::LotDetailLoaded { id, detail } => {
            if let Some(lot) = ctx.state.lot_mut(&id) {
                lot.description = Some(detail.description);
                lot.history = detail.history;
            }
            if ctx.state.preview.as_deref() == Some(id.as_str()) {
                bus.emit(ctx, topics::PREVIEW_CHANGED, EventData::Lot(id));
            }
        }
        NetEvent::OrderConfirmed(result) => {
            ctx.views.plug = Plug::success(result.total);
            open_modal(bus, ctx, ModalContent::Success);
        }
        NetEvent::RequestFailed(message) => {
            log::error!("request failed: {message}");
            ctx.views.page.status = Some(message);
        }
    }
}

fn dismiss_success(bus: &Bus, ctx: &mut AppCtx) {
    bus.emit(ctx, topics::MODAL_CLOSE, EventData::None);
    ctx.state.clear_basket();
    bus.emit(ctx, topics::AUCTION_CHANGED, EventData::None);
}

/// Route one input event to the focused view and turn its reaction into
/// bus traffic. Returns `true` when the application should exit.
pub fn handle_ui_event(bus: &Bus, ctx: &mut AppCtx, event: &UiEvent) -> bool {
    if matches!(event, UiEvent::ForceQuit) {
        return true;
    }

    let Some(content) = ctx.views.modal.content else {
        match ctx.views.page.handle_event(event) {
            Some(PageEvent::CardActivated(id)) => {
                bus.emit(ctx, topics::CARD_SELECT, EventData::Lot(id));
            }
            Some(PageEvent::OpenBids) => bus.emit(ctx, topics::BIDS_OPEN, EventData::None),
            Some(PageEvent::OpenBasket) => bus.emit(ctx, topics::BASKET_OPEN, EventData::None),
            Some(PageEvent::Quit) => return true,
            None => {}
        }
        return false;
    };

    if matches!(event, UiEvent::Escape) {
        if content == ModalContent::Success {
            dismiss_success(bus, ctx);
        } else {
            bus.emit(ctx, topics::MODAL_CLOSE, EventData::None);
        }
        return false;
    }

    match content {
        ModalContent::Preview => {
            if let Some(AuctionEvent::PlaceBid(price)) = ctx.views.auction.handle_event(event) {
                if let Some(id) = ctx.state.preview.clone() {
                    ctx.state.place_bid(&id, price);
                    flush(bus, ctx);
                }
            }
        }
        ModalContent::Bids | ModalContent::Basket => {
            if let Some(TabsEvent::Selected(tab)) = ctx.views.tabs.handle_event(event) {
                let topic = match tab {
                    Tab::Active => topics::BIDS_OPEN,
                    Tab::Closed => topics::BASKET_OPEN,
                };
                bus.emit(ctx, topic, EventData::None);
                return false;
            }
            let list = if content == ModalContent::Bids {
                &mut ctx.views.bids
            } else {
                &mut ctx.views.basket
            };
            match list.handle_event(event) {
                Some(BasketEvent::Toggle { id, checked }) => {
                    // Selection is view-local bookkeeping; no bus round trip.
                    ctx.state.toggle_ordered_lot(&id, checked);
                    refresh_basket(ctx);
                }
                Some(BasketEvent::OpenPreview(id)) => {
                    bus.emit(ctx, topics::CARD_SELECT, EventData::Lot(id));
                }
                Some(BasketEvent::OpenOrder) => {
                    bus.emit(ctx, topics::ORDER_OPEN, EventData::None);
                }
                None => {}
            }
        }
        ModalContent::Order => match ctx.views.order.handle_event(event) {
            Some(OrderFormEvent::FieldChanged { field, value }) => {
                let topic = topics::order_field_change(field);
                bus.emit(ctx, &topic, EventData::OrderField { field, value });
            }
            Some(OrderFormEvent::Submit) => {
                bus.emit(ctx, topics::ORDER_SUBMIT, EventData::None);
            }
            None => {}
        },
        ModalContent::Success => {
            if let Some(PlugEvent::Dismiss) = ctx.views.plug.handle_event(event) {
                dismiss_success(bus, ctx);
            }
        }
        ModalContent::Empty => {
            if let Some(PlugEvent::Dismiss) = ctx.views.plug.handle_event(event) {
                bus.emit(ctx, topics::MODAL_CLOSE, EventData::None);
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lot::LotStatus;
    use crate::test_support::{sample_catalog, sample_lot};

    fn loaded_ctx() -> (Bus, AppCtx) {
        let bus = build_bus();
        let mut ctx = AppCtx::new();
        apply_net_event(&bus, &mut ctx, NetEvent::CatalogLoaded(sample_catalog()));
        (bus, ctx)
    }

    #[test]
    fn test_catalog_load_populates_page() {
        let (_, ctx) = loaded_ctx();
        assert_eq!(ctx.views.page.catalog.len(), ctx.state.catalog.len());
        // Both fetched closed lots count as won, no bid of ours required.
        assert_eq!(ctx.views.page.counter, 2);
        assert!(ctx.state.changes.is_empty());
    }

    #[test]
    fn test_fetched_closed_lots_fill_the_basket() {
        let (bus, mut ctx) = loaded_ctx();
        bus.emit(&mut ctx, topics::BASKET_OPEN, EventData::None);

        assert_eq!(ctx.views.modal.content, Some(ModalContent::Basket));
        let ids: Vec<_> = ctx.views.basket.items.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["closed-1", "closed-2"]);

        // And they are orderable straight away.
        handle_ui_event(&bus, &mut ctx, &UiEvent::InputChar(' '));
        assert_eq!(ctx.state.order.items, vec!["closed-1".to_string()]);
    }

    #[test]
    fn test_bids_list_shows_every_active_lot() {
        let (bus, mut ctx) = loaded_ctx();
        bus.emit(&mut ctx, topics::BIDS_OPEN, EventData::None);

        assert_eq!(ctx.views.bids.items.len(), 1);
        assert_eq!(ctx.views.bids.items[0].id, "active-1");
        assert!(!ctx.views.bids.items[0].is_my_bid);
    }

    #[test]
    fn test_card_activation_opens_preview_and_fetches_detail() {
        let (bus, mut ctx) = loaded_ctx();
        let first = ctx.views.page.catalog[0].id.clone();

        handle_ui_event(&bus, &mut ctx, &UiEvent::Submit);

        assert_eq!(ctx.views.modal.content, Some(ModalContent::Preview));
        assert!(ctx.views.page.locked);
        assert_eq!(ctx.state.preview.as_deref(), Some(first.as_str()));
        assert_eq!(ctx.effects, vec![Effect::FetchLotDetail(first)]);
    }

    #[test]
    fn test_escape_closes_modal_and_drops_preview() {
        let (bus, mut ctx) = loaded_ctx();
        handle_ui_event(&bus, &mut ctx, &UiEvent::Submit);

        handle_ui_event(&bus, &mut ctx, &UiEvent::Escape);

        assert!(!ctx.views.modal.is_open());
        assert!(ctx.state.preview.is_none());
        assert!(!ctx.views.page.locked);
    }

    #[test]
    fn test_bid_flow_refreshes_lists_and_counter() {
        let (bus, mut ctx) = loaded_ctx();
        // Move the selection onto the active lot and open its preview.
        let active_pos = ctx
            .views
            .page
            .catalog
            .iter()
            .position(|c| c.id == "active-1")
            .unwrap();
        for _ in 0..active_pos {
            handle_ui_event(&bus, &mut ctx, &UiEvent::Down);
        }
        handle_ui_event(&bus, &mut ctx, &UiEvent::Submit);

        // Empty input bids the suggested amount.
        handle_ui_event(&bus, &mut ctx, &UiEvent::Submit);

        let lot = ctx.state.lot("active-1").unwrap();
        assert!(lot.is_my_bid());
        assert_eq!(ctx.views.bids.items[0].id, "active-1");
        assert!(ctx.views.bids.items[0].is_my_bid);
        assert!(ctx.state.changes.is_empty());
    }

    #[test]
    fn test_winning_bid_closes_lot_and_bumps_counter() {
        let (bus, mut ctx) = loaded_ctx();
        let min_price = ctx.state.lot("active-1").unwrap().min_price;
        bus.emit(
            &mut ctx,
            topics::CARD_SELECT,
            EventData::Lot("active-1".to_string()),
        );

        // Over ten times the minimum closes the lot.
        ctx.state.place_bid("active-1", min_price * 10 + 1);
        flush(&bus, &mut ctx);

        assert_eq!(
            ctx.state.lot("active-1").unwrap().status,
            LotStatus::Closed
        );
        assert_eq!(ctx.views.page.counter, 3);
        assert!(ctx.views.basket.items.iter().any(|c| c.id == "active-1"));
    }

    #[test]
    fn test_order_flow_validates_then_submits() {
        let (bus, mut ctx) = loaded_ctx();
        bus.emit(&mut ctx, topics::BASKET_OPEN, EventData::None);
        assert_eq!(ctx.views.modal.content, Some(ModalContent::Basket));

        // Space selects the lot under the cursor.
        handle_ui_event(&bus, &mut ctx, &UiEvent::InputChar(' '));
        assert_eq!(ctx.state.order.items, vec!["closed-1".to_string()]);
        assert_eq!(
            ctx.views.basket.total,
            ctx.state.lot("closed-1").unwrap().price
        );

        handle_ui_event(&bus, &mut ctx, &UiEvent::InputChar('o'));
        assert_eq!(ctx.views.modal.content, Some(ModalContent::Order));
        assert!(!ctx.views.order.valid);

        for c in "a@b.ru".chars() {
            handle_ui_event(&bus, &mut ctx, &UiEvent::InputChar(c));
        }
        assert!(ctx
            .views
            .order
            .errors
            .contains("Необходимо указать телефон"));

        handle_ui_event(&bus, &mut ctx, &UiEvent::Tab);
        for c in "+79000000000".chars() {
            handle_ui_event(&bus, &mut ctx, &UiEvent::InputChar(c));
        }
        assert!(ctx.views.order.valid);
        assert!(ctx.views.order.errors.is_empty());

        handle_ui_event(&bus, &mut ctx, &UiEvent::Submit);
        match ctx.effects.last() {
            Some(Effect::SubmitOrder(order)) => {
                assert_eq!(order.email, "a@b.ru");
                assert_eq!(order.items, vec!["closed-1".to_string()]);
            }
            other => panic!("expected submit effect, got {other:?}"),
        }
    }

    #[test]
    fn test_order_form_opens_blank_every_time() {
        let (bus, mut ctx) = loaded_ctx();
        ctx.state.toggle_ordered_lot("closed-1", true);
        bus.emit(&mut ctx, topics::ORDER_OPEN, EventData::None);
        for c in "a@b.ru".chars() {
            handle_ui_event(&bus, &mut ctx, &UiEvent::InputChar(c));
        }
        assert_eq!(ctx.views.order.email, "a@b.ru");

        handle_ui_event(&bus, &mut ctx, &UiEvent::Escape);
        bus.emit(&mut ctx, topics::ORDER_OPEN, EventData::None);

        // Contacts are gone, the selection survives.
        assert!(ctx.views.order.email.is_empty());
        assert!(ctx.views.order.errors.is_empty());
        assert!(!ctx.views.order.valid);
        assert_eq!(ctx.state.order.items, vec!["closed-1".to_string()]);
    }

    #[test]
    fn test_empty_basket_order_shows_plug() {
        let (bus, mut ctx) = loaded_ctx();
        bus.emit(&mut ctx, topics::ORDER_OPEN, EventData::None);
        assert_eq!(ctx.views.modal.content, Some(ModalContent::Empty));
    }

    #[test]
    fn test_order_confirmation_clears_basket_on_dismiss() {
        let (bus, mut ctx) = loaded_ctx();
        ctx.state.toggle_ordered_lot("closed-1", true);
        let total = ctx.state.get_total();
        apply_net_event(
            &bus,
            &mut ctx,
            NetEvent::OrderConfirmed(OrderResult {
                id: "order-1".to_string(),
                total,
            }),
        );
        assert_eq!(ctx.views.modal.content, Some(ModalContent::Success));

        handle_ui_event(&bus, &mut ctx, &UiEvent::Submit);

        assert!(!ctx.views.modal.is_open());
        assert!(ctx.state.order.items.is_empty());
        assert_eq!(ctx.views.basket.total, 0);
    }

    #[test]
    fn test_detail_load_fills_description_for_open_preview() {
        let (bus, mut ctx) = loaded_ctx();
        bus.emit(
            &mut ctx,
            topics::CARD_SELECT,
            EventData::Lot("active-1".to_string()),
        );

        apply_net_event(
            &bus,
            &mut ctx,
            NetEvent::LotDetailLoaded {
                id: "active-1".to_string(),
                detail: LotDetail {
                    description: "Первый абзац\nВторой абзац".to_string(),
                    history: vec![10, 20, 30],
                },
            },
        );

        assert_eq!(
            ctx.views.preview_card.description,
            vec!["Первый абзац".to_string(), "Второй абзац".to_string()]
        );
        assert_eq!(ctx.views.auction.history, vec![10, 20, 30]);
    }

    #[test]
    fn test_request_failure_surfaces_on_page() {
        let (bus, mut ctx) = loaded_ctx();
        apply_net_event(
            &bus,
            &mut ctx,
            NetEvent::RequestFailed("сервер недоступен".to_string()),
        );
        assert_eq!(ctx.views.page.status.as_deref(), Some("сервер недоступен"));
    }

    #[test]
    fn test_tab_switch_flips_bids_and_basket() {
        let (bus, mut ctx) = loaded_ctx();
        bus.emit(&mut ctx, topics::BIDS_OPEN, EventData::None);
        assert_eq!(ctx.views.tabs.selected, Tab::Active);

        handle_ui_event(&bus, &mut ctx, &UiEvent::Tab);
        assert_eq!(ctx.views.modal.content, Some(ModalContent::Basket));
        assert_eq!(ctx.views.tabs.selected, Tab::Closed);
    }

    #[test]
    fn test_basket_open_with_no_closed_lots_shows_plug() {
        let bus = build_bus();
        let mut ctx = AppCtx::new();
        apply_net_event(
            &bus,
            &mut ctx,
            NetEvent::CatalogLoaded(vec![sample_lot("active-1", LotStatus::Active, 1_000)]),
        );

        bus.emit(&mut ctx, topics::BASKET_OPEN, EventData::None);
        assert_eq!(ctx.views.modal.content, Some(ModalContent::Empty));
    }
}
