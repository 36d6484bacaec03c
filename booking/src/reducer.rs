//! Reducer logic for the booking wizard.
//!
//! Field setters store what they are given; the gate on the contact step is
//! the only blocking validation, matching the way the form behaves. The
//! payment runs as a single future effect whose settlement is fed back as
//! [`BookingAction::PaymentSettled`].

use crate::actions::BookingAction;
use crate::environment::BookingEnvironment;
use crate::notice::Notice;
use crate::receipt::Receipt;
use crate::types::{BookingPhase, BookingState, Route, WizardStep};
use eventure_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;

/// Reducer for the booking wizard
#[derive(Clone, Debug, Default)]
pub struct BookingReducer;

impl BookingReducer {
    /// Creates a new `BookingReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Effect that delivers one notice through the environment's sink
    fn notify(env: &BookingEnvironment, notice: Notice) -> Effect<BookingAction> {
        let sink = Arc::clone(&env.notices);
        Effect::future(async move {
            sink.publish(notice);
            None
        })
    }

    /// The blocking notice for an incomplete contact step
    fn incomplete_contact_notice() -> Notice {
        Notice::error(
            "Missing information",
            "Please fill in your name, email and phone number.",
        )
    }

    /// Advance the wizard and raise the validated high-water mark
    fn advance(state: &mut BookingState, next: WizardStep) {
        state.step = next;
        if next > state.furthest_validated {
            state.furthest_validated = next;
        }
    }

    /// Start the payment for a confirmed receipt
    fn charge_effect(env: &BookingEnvironment, receipt: &Receipt) -> Effect<BookingAction> {
        let gateway = Arc::clone(&env.gateway);
        let amount = receipt.quote.grand_total;
        Effect::future(async move {
            let confirmation = gateway.charge(amount).await;
            Some(BookingAction::PaymentSettled(confirmation))
        })
    }
}

impl Reducer for BookingReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per action keeps the flow readable
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Field edits ==========
            BookingAction::SetName(name) => {
                state.draft.contact.name = name;
                smallvec![Effect::None]
            },

            BookingAction::SetEmail(email) => {
                state.draft.contact.email = email;
                smallvec![Effect::None]
            },

            BookingAction::SetPhone(phone) => {
                state.draft.contact.phone = phone;
                smallvec![Effect::None]
            },

            BookingAction::SelectEventType(event_type) => {
                state.draft.event_type = Some(event_type);

                // A previously chosen theme may not belong to the new event
                // type's domain; it is cleared rather than left stale.
                if let Some(theme) = &state.draft.theme {
                    if !env.themes.contains(event_type, theme) {
                        tracing::debug!(
                            %theme,
                            %event_type,
                            "clearing theme outside the new event type's domain"
                        );
                        state.draft.theme = None;
                    }
                }
                smallvec![Effect::None]
            },

            BookingAction::SelectTheme(theme) => {
                state.draft.theme = Some(theme);
                smallvec![Effect::None]
            },

            BookingAction::SetEventDate(date) => {
                if date < env.clock.today() {
                    // The calendar never offers past days; a stray past date
                    // is dropped instead of stored.
                    tracing::debug!(%date, "ignoring past event date");
                } else {
                    state.draft.date = Some(date);
                }
                smallvec![Effect::None]
            },

            BookingAction::SetEventTime(time) => {
                state.draft.time = time;
                smallvec![Effect::None]
            },

            BookingAction::SetLocation(location) => {
                state.draft.location = location;
                smallvec![Effect::None]
            },

            BookingAction::SetGuestCount(count) => {
                if count == 0 {
                    tracing::debug!("ignoring zero guest count");
                } else {
                    state.draft.guest_count = Some(count);
                }
                smallvec![Effect::None]
            },

            BookingAction::SetMessage(message) => {
                state.draft.message = message;
                smallvec![Effect::None]
            },

            BookingAction::ToggleAddon(id) => {
                if !env.addons.contains(&id) {
                    tracing::warn!(%id, "ignoring unknown add-on");
                    return smallvec![Effect::None];
                }
                // Toggling twice restores the original selection.
                if !state.draft.selected_addons.remove(&id) {
                    state.draft.selected_addons.insert(id);
                }
                smallvec![Effect::None]
            },

            // ========== Wizard navigation ==========
            BookingAction::NextStep => {
                if !state.is_editing() {
                    return smallvec![Effect::None];
                }
                match state.step {
                    WizardStep::Contact => {
                        if state.draft.contact.is_complete() {
                            Self::advance(state, WizardStep::EventDetails);
                            smallvec![Effect::None]
                        } else {
                            smallvec![Self::notify(env, Self::incomplete_contact_notice())]
                        }
                    },
                    // Only the contact step is gated; the remaining steps
                    // advance freely, as the form does.
                    WizardStep::EventDetails => {
                        Self::advance(state, WizardStep::Extras);
                        smallvec![Effect::None]
                    },
                    WizardStep::Extras => {
                        Self::advance(state, WizardStep::Review);
                        smallvec![Effect::None]
                    },
                    WizardStep::Review => smallvec![Effect::None],
                }
            },

            BookingAction::PreviousStep => {
                if state.is_editing() {
                    if let Some(previous) = state.step.back() {
                        state.step = previous;
                    }
                }
                smallvec![Effect::None]
            },

            // ========== Submission and payment ==========
            BookingAction::Submit => {
                if !state.is_editing() || !state.step.is_last() {
                    return smallvec![Effect::None];
                }
                // The contact gate holds here too: a draft that skipped it
                // (e.g. restored state) is bounced back with the same notice.
                if !state.draft.contact.is_complete() {
                    return smallvec![Self::notify(env, Self::incomplete_contact_notice())];
                }

                let receipt = Receipt::build(
                    &state.draft,
                    &env.addons,
                    &env.themes,
                    env.config.base_price,
                );
                tracing::info!(grand_total = %receipt.quote.grand_total, "presenting receipt");
                state.phase = BookingPhase::Reviewing { receipt };
                smallvec![Effect::None]
            },

            BookingAction::CloseReceipt => {
                if matches!(state.phase, BookingPhase::Reviewing { .. }) {
                    // The draft stays editable exactly as submitted.
                    state.phase = BookingPhase::Editing;
                }
                smallvec![Effect::None]
            },

            BookingAction::ConfirmPayment => match state.phase.clone() {
                BookingPhase::Reviewing { receipt } => {
                    let effect = Self::charge_effect(env, &receipt);
                    tracing::info!(amount = %receipt.quote.grand_total, "starting payment");
                    state.phase = BookingPhase::Processing { receipt };
                    smallvec![effect]
                },
                BookingPhase::Processing { .. } => {
                    // A charge is already in flight; repeated confirmation
                    // must not start a second one.
                    tracing::debug!("payment already in flight, ignoring");
                    smallvec![Effect::None]
                },
                BookingPhase::Editing | BookingPhase::Confirmed { .. } => {
                    smallvec![Effect::None]
                },
            },

            BookingAction::PaymentSettled(confirmation) => {
                if !matches!(state.phase, BookingPhase::Processing { .. }) {
                    return smallvec![Effect::None];
                }
                tracing::info!(
                    transaction_id = %confirmation.transaction_id,
                    "payment settled, clearing draft"
                );
                state.reset_draft();
                state.phase = BookingPhase::Confirmed {
                    confirmation: confirmation.clone(),
                };
                smallvec![Self::notify(
                    env,
                    Notice::success(
                        "Booking confirmed",
                        format!("Payment {} settled.", confirmation.transaction_id),
                    ),
                )]
            },

            BookingAction::CloseSuccess => {
                if matches!(state.phase, BookingPhase::Confirmed { .. }) {
                    state.phase = BookingPhase::Editing;
                    state.requested_route = Some(Route::Dashboard);
                }
                smallvec![Effect::None]
            },

            // ========== Housekeeping ==========
            BookingAction::Reset => {
                state.reset_draft();
                state.phase = BookingPhase::Editing;
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{AddonCatalog, ThemeCatalog};
    use crate::config::BookingConfig;
    use crate::gateway::{InstantPaymentGateway, PaymentConfirmation};
    use crate::notice::{MemoryNoticeSink, Severity};
    use crate::types::{AddonId, BookingDraft, EventType, Money, ThemeId};
    use eventure_core::environment::Clock;
    use eventure_testing::{ReducerTest, assertions, test_clock};

    fn test_env() -> (BookingEnvironment, Arc<MemoryNoticeSink>) {
        let notices = Arc::new(MemoryNoticeSink::new());
        let env = BookingEnvironment::new(
            Arc::new(test_clock()),
            InstantPaymentGateway::shared(),
            Arc::clone(&notices) as Arc<dyn crate::notice::NoticeSink>,
            AddonCatalog::standard(),
            ThemeCatalog::standard(),
            BookingConfig::default(),
        );
        (env, notices)
    }

    fn complete_contact_state() -> BookingState {
        let mut state = BookingState::new();
        state.draft.contact.name = "Jane Doe".into();
        state.draft.contact.email = "jane@x.com".into();
        state.draft.contact.phone = "555-1234".into();
        state
    }

    fn review_ready_state() -> BookingState {
        let mut state = complete_contact_state();
        state.step = WizardStep::Review;
        state.furthest_validated = WizardStep::Review;
        state.draft.event_type = Some(EventType::Wedding);
        state.draft.theme = Some(ThemeId::new("garden-bliss"));
        state.draft.guest_count = Some(100);
        state.draft.selected_addons.insert(AddonId::new("photo"));
        state.draft.selected_addons.insert(AddonId::new("decor"));
        state
    }

    #[test]
    fn setters_store_fields_without_validation() {
        let (env, _) = test_env();
        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(BookingState::new())
            .when_action(BookingAction::SetName("Jane Doe".into()))
            .when_action(BookingAction::SetEmail("not-an-email".into()))
            .when_action(BookingAction::SetLocation("Rosewood Hall".into()))
            .then_state(|state| {
                assert_eq!(state.draft.contact.name, "Jane Doe");
                assert_eq!(state.draft.contact.email, "not-an-email");
                assert_eq!(state.draft.location, "Rosewood Hall");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn toggle_addon_twice_restores_selection() {
        let (env, _) = test_env();
        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(BookingState::new())
            .when_action(BookingAction::ToggleAddon(AddonId::new("music")))
            .when_action(BookingAction::ToggleAddon(AddonId::new("music")))
            .then_state(|state| {
                assert!(state.draft.selected_addons.is_empty());
            })
            .run();
    }

    #[test]
    fn toggle_unknown_addon_is_ignored() {
        let (env, _) = test_env();
        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(BookingState::new())
            .when_action(BookingAction::ToggleAddon(AddonId::new("fireworks")))
            .then_state(|state| {
                assert!(state.draft.selected_addons.is_empty());
            })
            .run();
    }

    #[test]
    fn event_type_change_clears_foreign_theme() {
        let (env, _) = test_env();
        let mut state = BookingState::new();
        state.draft.event_type = Some(EventType::Wedding);
        state.draft.theme = Some(ThemeId::new("garden-bliss"));

        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(state)
            .when_action(BookingAction::SelectEventType(EventType::Birthday))
            .then_state(|state| {
                assert_eq!(state.draft.event_type, Some(EventType::Birthday));
                assert_eq!(state.draft.theme, None);
            })
            .run();
    }

    #[test]
    fn event_type_change_keeps_theme_in_shared_domain() {
        let (env, _) = test_env();
        let mut state = BookingState::new();
        state.draft.event_type = Some(EventType::Wedding);
        state.draft.theme = Some(ThemeId::new("garden-bliss"));

        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(state)
            .when_action(BookingAction::SelectEventType(EventType::Wedding))
            .then_state(|state| {
                assert_eq!(state.draft.theme, Some(ThemeId::new("garden-bliss")));
            })
            .run();
    }

    #[test]
    fn past_event_date_is_not_stored() {
        let (env, _) = test_env();
        let yesterday = test_clock().today().pred_opt().unwrap();

        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(BookingState::new())
            .when_action(BookingAction::SetEventDate(yesterday))
            .then_state(|state| {
                assert_eq!(state.draft.date, None);
            })
            .run();
    }

    #[test]
    fn todays_event_date_is_stored() {
        let (env, _) = test_env();
        let today = test_clock().today();

        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(BookingState::new())
            .when_action(BookingAction::SetEventDate(today))
            .then_state(move |state| {
                assert_eq!(state.draft.date, Some(today));
            })
            .run();
    }

    #[test]
    fn zero_guest_count_is_rejected() {
        let (env, _) = test_env();
        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(BookingState::new())
            .when_action(BookingAction::SetGuestCount(0))
            .then_state(|state| {
                assert_eq!(state.draft.guest_count, None);
            })
            .run();
    }

    #[test]
    fn contact_gate_blocks_and_notifies_once() {
        let (env, notices) = test_env();
        let reducer = BookingReducer::new();
        let mut state = BookingState::new();
        state.draft.contact.name = "Jane Doe".into();
        // email and phone missing

        let effects = reducer.reduce(&mut state, BookingAction::NextStep, &env);

        assert_eq!(state.step, WizardStep::Contact);
        assertions::assert_effects_count(&effects, 1);
        assertions::assert_has_future_effect(&effects);

        // Run the notice effect to completion and count deliveries.
        for effect in effects {
            if let eventure_core::effect::Effect::Future(fut) = effect {
                assert!(tokio_test::block_on(fut).is_none());
            }
        }
        let published = notices.snapshot();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].severity, Severity::Error);
        assert_eq!(published[0].title, "Missing information");
    }

    #[test]
    fn complete_contact_advances_and_raises_high_water_mark() {
        let (env, notices) = test_env();
        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(complete_contact_state())
            .when_action(BookingAction::NextStep)
            .then_state(|state| {
                assert_eq!(state.step, WizardStep::EventDetails);
                assert_eq!(state.furthest_validated, WizardStep::EventDetails);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
        assert!(notices.is_empty());
    }

    #[test]
    fn later_steps_advance_without_gating() {
        let (env, _) = test_env();
        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(complete_contact_state())
            .when_action(BookingAction::NextStep)
            .when_action(BookingAction::NextStep)
            .when_action(BookingAction::NextStep)
            .then_state(|state| {
                assert_eq!(state.step, WizardStep::Review);
                assert_eq!(state.furthest_validated, WizardStep::Review);
            })
            .run();
    }

    #[test]
    fn back_is_a_no_op_on_the_first_step() {
        let (env, _) = test_env();
        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(BookingState::new())
            .when_action(BookingAction::PreviousStep)
            .then_state(|state| {
                assert_eq!(state.step, WizardStep::Contact);
            })
            .run();
    }

    #[test]
    fn back_does_not_lower_the_high_water_mark() {
        let (env, _) = test_env();
        let mut state = complete_contact_state();
        state.step = WizardStep::Extras;
        state.furthest_validated = WizardStep::Extras;

        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(state)
            .when_action(BookingAction::PreviousStep)
            .then_state(|state| {
                assert_eq!(state.step, WizardStep::EventDetails);
                assert_eq!(state.furthest_validated, WizardStep::Extras);
            })
            .run();
    }

    #[test]
    fn submit_from_review_presents_receipt_with_totals() {
        let (env, _) = test_env();
        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(review_ready_state())
            .when_action(BookingAction::Submit)
            .then_state(|state| {
                let receipt = state.receipt().unwrap();
                assert_eq!(receipt.quote.addons_total, Money::from_cents(79_800));
                assert_eq!(receipt.quote.grand_total, Money::from_cents(279_700));
                // Submission does not consume the draft.
                assert_eq!(state.draft.contact.name, "Jane Doe");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn submit_off_the_review_step_is_ignored() {
        let (env, _) = test_env();
        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(complete_contact_state())
            .when_action(BookingAction::Submit)
            .then_state(|state| {
                assert!(state.receipt().is_none());
                assert!(state.is_editing());
            })
            .run();
    }

    #[test]
    fn close_receipt_returns_to_editing_with_draft_intact() {
        let (env, _) = test_env();
        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(review_ready_state())
            .when_action(BookingAction::Submit)
            .when_action(BookingAction::CloseReceipt)
            .then_state(|state| {
                assert!(state.is_editing());
                assert!(state.receipt().is_none());
                assert_eq!(state.draft.selected_addons.len(), 2);
            })
            .run();
    }

    #[test]
    fn confirm_payment_enters_processing_and_spawns_charge() {
        let (env, _) = test_env();
        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(review_ready_state())
            .when_action(BookingAction::Submit)
            .when_action(BookingAction::ConfirmPayment)
            .then_state(|state| {
                assert!(matches!(state.phase, BookingPhase::Processing { .. }));
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn repeated_confirmation_does_not_start_a_second_charge() {
        let (env, _) = test_env();
        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(review_ready_state())
            .when_action(BookingAction::Submit)
            .when_action(BookingAction::ConfirmPayment)
            .when_action(BookingAction::ConfirmPayment)
            .then_state(|state| {
                assert!(matches!(state.phase, BookingPhase::Processing { .. }));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn settlement_resets_draft_and_confirms() {
        let (env, _) = test_env();
        let confirmation = PaymentConfirmation {
            transaction_id: "txn_test".into(),
            amount: Money::from_cents(279_700),
        };

        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(review_ready_state())
            .when_action(BookingAction::Submit)
            .when_action(BookingAction::ConfirmPayment)
            .when_action(BookingAction::PaymentSettled(confirmation))
            .then_state(|state| {
                assert_eq!(state.draft, BookingDraft::new());
                assert_eq!(state.step, WizardStep::Contact);
                assert!(matches!(state.phase, BookingPhase::Confirmed { .. }));
            })
            .then_effects(|effects| {
                // The confirmation notice
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn stray_settlement_outside_processing_is_ignored() {
        let (env, _) = test_env();
        let confirmation = PaymentConfirmation {
            transaction_id: "txn_test".into(),
            amount: Money::ZERO,
        };

        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(review_ready_state())
            .when_action(BookingAction::PaymentSettled(confirmation))
            .then_state(|state| {
                assert!(state.is_editing());
                assert_eq!(state.draft.contact.name, "Jane Doe");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn close_success_requests_dashboard_navigation() {
        let (env, _) = test_env();
        let confirmation = PaymentConfirmation {
            transaction_id: "txn_test".into(),
            amount: Money::from_cents(199_900),
        };

        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(review_ready_state())
            .when_action(BookingAction::Submit)
            .when_action(BookingAction::ConfirmPayment)
            .when_action(BookingAction::PaymentSettled(confirmation))
            .when_action(BookingAction::CloseSuccess)
            .then_state(|state| {
                assert!(state.is_editing());
                assert_eq!(state.requested_route, Some(Route::Dashboard));
            })
            .run();
    }

    #[test]
    fn reset_discards_everything_but_stays_editable() {
        let (env, _) = test_env();
        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(review_ready_state())
            .when_action(BookingAction::Reset)
            .then_state(|state| {
                assert_eq!(state.draft, BookingDraft::new());
                assert_eq!(state.step, WizardStep::Contact);
                assert!(state.is_editing());
            })
            .run();
    }

    #[test]
    fn navigation_is_inert_while_receipt_is_presented() {
        let (env, _) = test_env();
        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(review_ready_state())
            .when_action(BookingAction::Submit)
            .when_action(BookingAction::NextStep)
            .when_action(BookingAction::PreviousStep)
            .then_state(|state| {
                assert_eq!(state.step, WizardStep::Review);
                assert!(matches!(state.phase, BookingPhase::Reviewing { .. }));
            })
            .run();
    }
}
