//! Pure price derivation over the draft and the add-on catalog.
//!
//! All arithmetic is exact (cents-based [`Money`]); rounding to two decimals
//! happens only when amounts are displayed. Totals are recomputed from the
//! current selection every time - nothing here is cached.

use crate::catalog::AddonCatalog;
use crate::types::{AddonId, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Derived amounts for one draft, computed at submit time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// The fixed base package price (configuration)
    pub base_price: Money,
    /// Sum of the selected add-on prices
    pub addons_total: Money,
    /// `base_price + addons_total`
    pub grand_total: Money,
}

/// Sums the catalog prices of the selected add-ons
///
/// An empty selection yields zero - a valid, common case, not an error.
/// Selection ids are admitted against the catalog when toggled, so an id
/// without a catalog entry cannot normally occur; if one does, it simply
/// contributes nothing.
#[must_use]
pub fn addons_total(selection: &BTreeSet<AddonId>, catalog: &AddonCatalog) -> Money {
    selection
        .iter()
        .filter_map(|id| catalog.get(id))
        .fold(Money::ZERO, |sum, addon| sum.add(addon.price))
}

/// Adds the base package price to an add-ons total
#[must_use]
pub const fn grand_total(base_price: Money, addons_total: Money) -> Money {
    base_price.add(addons_total)
}

/// Computes the full quote for a selection
#[must_use]
pub fn quote(
    selection: &BTreeSet<AddonId>,
    catalog: &AddonCatalog,
    base_price: Money,
) -> PriceQuote {
    let addons_total = addons_total(selection, catalog);
    PriceQuote {
        base_price,
        addons_total,
        grand_total: grand_total(base_price, addons_total),
    }
}
