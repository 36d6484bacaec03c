//! Property tests for pricing and the add-on selection.

#![allow(clippy::unwrap_used)]

use eventure_booking::{
    AddonCatalog, AddonId, BookingAction, BookingConfig, BookingEnvironment, BookingReducer,
    BookingState, InstantPaymentGateway, Money, ThemeCatalog, TracingNoticeSink, pricing,
};
use eventure_core::reducer::Reducer;
use eventure_testing::test_clock;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

fn test_env() -> BookingEnvironment {
    BookingEnvironment::new(
        Arc::new(test_clock()),
        InstantPaymentGateway::shared(),
        Arc::new(TracingNoticeSink),
        AddonCatalog::standard(),
        ThemeCatalog::standard(),
        BookingConfig::default(),
    )
}

const SLUGS: [&str; 4] = ["photo", "catering", "music", "decor"];

/// Any subset of the standard catalog, as a selection set
fn any_selection() -> impl Strategy<Value = BTreeSet<AddonId>> {
    proptest::collection::btree_set(proptest::sample::select(&SLUGS[..]), 0..=4)
        .prop_map(|set| set.into_iter().map(AddonId::new).collect())
}

proptest! {
    /// The add-ons total is the exact sum of the selected catalog prices,
    /// and the grand total is the base price plus that sum.
    #[test]
    fn addons_total_is_the_exact_catalog_sum(
        selection in any_selection(),
        base_dollars in 0u64..100_000,
    ) {
        let catalog = AddonCatalog::standard();
        let base = Money::from_dollars(base_dollars);

        let expected_cents: u64 = selection
            .iter()
            .map(|id| catalog.get(id).unwrap().price.cents())
            .sum();

        let quote = pricing::quote(&selection, &catalog, base);
        prop_assert_eq!(quote.addons_total.cents(), expected_cents);
        prop_assert_eq!(quote.grand_total.cents(), base.cents() + expected_cents);
    }

    /// Toggling the same add-on twice restores the prior selection.
    #[test]
    fn toggle_addon_is_an_involution(
        selection in any_selection(),
        slug in proptest::sample::select(&SLUGS[..]),
    ) {
        let env = test_env();
        let reducer = BookingReducer::new();

        let mut state = BookingState::new();
        state.draft.selected_addons = selection.clone();

        let id = AddonId::new(slug);
        let _ = reducer.reduce(&mut state, BookingAction::ToggleAddon(id.clone()), &env);
        let _ = reducer.reduce(&mut state, BookingAction::ToggleAddon(id), &env);

        prop_assert_eq!(state.draft.selected_addons, selection);
    }

    /// A displayed amount parses back to the same value.
    #[test]
    fn money_display_round_trips(cents in 0u64..1_000_000_000) {
        let amount = Money::from_cents(cents);
        prop_assert_eq!(Money::parse(&amount.to_string()).unwrap(), amount);
    }

    /// Currency strings in the catalog's format parse exactly.
    #[test]
    fn money_parses_dollar_fraction_pairs(dollars in 0u64..10_000_000, fraction in 0u64..100) {
        let parsed = Money::parse(&format!("${dollars}.{fraction:02}")).unwrap();
        prop_assert_eq!(parsed.cents(), dollars * 100 + fraction);
    }
}
