//! Booking demo binary
//!
//! Walks one booking end to end: fill the wizard, review the receipt,
//! confirm payment, wait for settlement, and hand the navigation request to
//! the (imaginary) routing shell.

use eventure_booking::{
    BookingAction, BookingConfig, BookingEnvironment, BookingReducer, BookingState, EventType,
    ThemeId,
};
use eventure_runtime::Store;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventure_booking=debug,eventure_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Eventure Booking Demo ===\n");

    let config = BookingConfig::from_env();
    let settle_delay = config.settle_delay;
    let env = BookingEnvironment::production(config);

    // The routing shell may carry a pre-selected theme, e.g. /booking?theme=garden-bliss
    let initial = std::env::args().nth(1).map_or_else(BookingState::new, |slug| {
        println!("Pre-selecting theme {slug:?} from the query parameter\n");
        BookingState::with_preselected_theme(ThemeId::new(slug))
    });

    let store = Store::new(initial, BookingReducer::new(), env);

    // Step 1: contact details
    println!(">>> Step 1: contact details");
    for action in [
        BookingAction::SetName("Jane Doe".into()),
        BookingAction::SetEmail("jane@x.com".into()),
        BookingAction::SetPhone("555-1234".into()),
        BookingAction::NextStep,
    ] {
        let _ = store.send(action).await;
    }

    // Step 2: event details
    println!(">>> Step 2: event details");
    let event_date = chrono::Utc::now().date_naive() + chrono::Days::new(30);
    for action in [
        BookingAction::SelectEventType(EventType::Wedding),
        BookingAction::SelectTheme(ThemeId::new("garden-bliss")),
        BookingAction::SetEventDate(event_date),
        BookingAction::SetEventTime("17:00".into()),
        BookingAction::SetLocation("Rosewood Hall".into()),
        BookingAction::SetGuestCount(100),
        BookingAction::NextStep,
    ] {
        let _ = store.send(action).await;
    }

    // Step 3: add-ons
    println!(">>> Step 3: add-ons");
    for action in [
        BookingAction::ToggleAddon(eventure_booking::AddonId::new("photo")),
        BookingAction::ToggleAddon(eventure_booking::AddonId::new("decor")),
        BookingAction::SetMessage("Outdoor ceremony if weather allows.".into()),
        BookingAction::NextStep,
    ] {
        let _ = store.send(action).await;
    }

    // Step 4: review and submit
    println!(">>> Step 4: review\n");
    let _ = store.send(BookingAction::Submit).await;
    if let Some(receipt) = store.state(|s| s.receipt().cloned()).await {
        println!("{receipt}\n");
    }

    // Confirm and wait for the simulated settlement
    println!(">>> Confirming payment (settles in {settle_delay:?})...");
    let settled = store
        .send_and_wait_for(
            BookingAction::ConfirmPayment,
            |a| matches!(a, BookingAction::PaymentSettled(_)),
            settle_delay + Duration::from_secs(5),
        )
        .await;

    match settled {
        Ok(BookingAction::PaymentSettled(confirmation)) => {
            println!(
                "Payment settled: {} for {}\n",
                confirmation.transaction_id, confirmation.amount
            );
        },
        Ok(_) | Err(_) => {
            eprintln!("payment did not settle in time");
            return;
        },
    }

    // Dismiss the confirmation; the shell would navigate now
    let _ = store.send(BookingAction::CloseSuccess).await;
    let route = store.state(|s| s.requested_route).await;
    println!("Navigation requested: {route:?}");

    let draft_empty = store
        .state(|s| s.draft == eventure_booking::BookingDraft::new())
        .await;
    println!("Draft reset after settlement: {draft_empty}");
}
