//! # TUI Components
//!
//! Each component file is self-contained: its props struct, its event type,
//! rendering and event handling, plus tests. Components receive external
//! data as props set by the wiring layer, never by reading global state,
//! and report user intent upward as typed events.
//!
//! ```text
//! components/
//! ├── card.rs     (catalog card, bid row, preview header)
//! ├── page.rs     (catalog screen)
//! ├── tabs.rs     (active / closed switch)
//! ├── basket.rs   (bid list and won-lot basket)
//! ├── auction.rs  (bidding panel inside the preview)
//! ├── order.rs    (email / phone order form)
//! ├── plug.rs     (confirmation and empty-basket notices)
//! └── modal.rs    (overlay host)
//! ```

pub mod auction;
pub mod basket;
pub mod card;
pub mod modal;
pub mod order;
pub mod page;
pub mod plug;
pub mod tabs;

pub use auction::{AuctionEvent, AuctionPanel};
pub use basket::{Basket, BasketEvent};
pub use card::{AuctionCard, BidCard, CatalogCard};
pub use modal::{Modal, ModalContent};
pub use order::{OrderForm, OrderFormEvent};
pub use page::{Page, PageEvent};
pub use plug::{Plug, PlugEvent};
pub use tabs::{Tab, Tabs, TabsEvent};
