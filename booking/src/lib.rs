//! # Eventure Booking
//!
//! The event booking wizard: a four-step form over an in-memory draft, with
//! derived pricing, a receipt read-back, a simulated payment step and a
//! terminal confirmation.
//!
//! ## Architecture
//!
//! The flow is one reducer over [`types::BookingState`]:
//!
//! ```text
//! field edit ─► draft mutation
//! NextStep ───► contact gate ──► step advance (or blocking notice)
//! Submit ─────► receipt snapshot with derived totals
//! ConfirmPayment ─► Processing + charge effect
//!                       │ (gateway settles, always)
//! PaymentSettled ◄──────┘  draft reset, Confirmed
//! CloseSuccess ─► navigation request for the routing shell
//! ```
//!
//! Catalogs, the clock, the payment gateway and the notice sink are all
//! injected through [`environment::BookingEnvironment`], so the whole flow
//! runs deterministically under test.
//!
//! ## Example
//!
//! ```no_run
//! use eventure_booking::{
//!     BookingAction, BookingConfig, BookingEnvironment, BookingReducer, BookingState,
//! };
//! use eventure_runtime::Store;
//!
//! # async fn example() {
//! let env = BookingEnvironment::production(BookingConfig::from_env());
//! let store = Store::new(BookingState::new(), BookingReducer::new(), env);
//!
//! let _ = store.send(BookingAction::SetName("Jane Doe".into())).await;
//! let name = store.state(|s| s.draft.contact.name.clone()).await;
//! assert_eq!(name, "Jane Doe");
//! # }
//! ```

/// Actions driving the wizard
pub mod actions;
/// Read-only add-on and theme catalogs
pub mod catalog;
/// Scripted planning assistant
pub mod chatbot;
/// Flow configuration
pub mod config;
/// Injected dependencies
pub mod environment;
/// Stand-in payment gateway
pub mod gateway;
/// Transient user-facing notices
pub mod notice;
/// Pure price derivation
pub mod pricing;
/// Receipt snapshots
pub mod receipt;
/// The wizard reducer
pub mod reducer;
/// Domain types
pub mod types;

pub use actions::BookingAction;
pub use catalog::{Addon, AddonCatalog, ThemeCatalog, ThemeOption};
pub use config::BookingConfig;
pub use environment::BookingEnvironment;
pub use gateway::{
    InstantPaymentGateway, PaymentConfirmation, PaymentGateway, SimulatedPaymentGateway,
};
pub use notice::{MemoryNoticeSink, Notice, NoticeSink, Severity, TracingNoticeSink};
pub use receipt::Receipt;
pub use reducer::BookingReducer;
pub use types::{
    AddonId, BookingDraft, BookingPhase, BookingState, ContactInfo, EventType, Money, Route,
    ThemeId, WizardStep,
};
