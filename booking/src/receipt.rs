//! Read-only booking summary shown before payment.
//!
//! A receipt is an immutable snapshot: add-on ids are resolved to display
//! names and prices, the theme id to its label, and the totals are derived
//! at build time. Editing the draft afterwards does not touch an already
//! built receipt - a new one is built on the next submit.

use crate::catalog::{AddonCatalog, ThemeCatalog};
use crate::pricing::{self, PriceQuote};
use crate::types::{BookingDraft, Money};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One resolved add-on line on the receipt
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    /// Display name
    pub name: String,
    /// Fixed price
    pub price: Money,
}

/// Immutable snapshot of a draft plus derived totals
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Event type label, or "Event" when none was chosen
    pub event_label: String,
    /// Resolved theme label; falls back to the raw id for an uncatalogued
    /// theme
    pub theme_label: Option<String>,
    /// Event date
    pub date: Option<NaiveDate>,
    /// Free-form time
    pub time: String,
    /// Venue description
    pub location: String,
    /// Expected number of guests
    pub guest_count: Option<u32>,
    /// Resolved add-on lines, in catalog order
    pub addons: Vec<ReceiptLine>,
    /// Derived amounts
    pub quote: PriceQuote,
}

impl Receipt {
    /// Builds a receipt from the current draft
    ///
    /// Add-ons are resolved against the catalog in catalog order; the
    /// selection only ever holds catalogued ids, so every selected add-on
    /// produces a line.
    #[must_use]
    pub fn build(
        draft: &BookingDraft,
        addons: &AddonCatalog,
        themes: &ThemeCatalog,
        base_price: Money,
    ) -> Self {
        let lines: Vec<ReceiptLine> = addons
            .iter()
            .filter(|addon| draft.selected_addons.contains(&addon.id))
            .map(|addon| ReceiptLine {
                name: addon.name.clone(),
                price: addon.price,
            })
            .collect();

        let theme_label = draft.theme.as_ref().map(|theme| {
            themes
                .label_for(theme)
                .map_or_else(|| theme.to_string(), str::to_string)
        });

        Self {
            event_label: draft
                .event_type
                .map_or_else(|| "Event".to_string(), |t| t.label().to_string()),
            theme_label,
            date: draft.date,
            time: draft.time.clone(),
            location: draft.location.clone(),
            guest_count: draft.guest_count,
            addons: lines,
            quote: pricing::quote(&draft.selected_addons, addons, base_price),
        }
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Your Event Booking")?;
        writeln!(f, "  Event:    {}", self.event_label)?;
        if let Some(theme) = &self.theme_label {
            writeln!(f, "  Theme:    {theme}")?;
        }
        if let Some(date) = self.date {
            writeln!(f, "  Date:     {} at {}", date, self.time)?;
        }
        writeln!(f, "  Location: {}", self.location)?;
        if let Some(guests) = self.guest_count {
            writeln!(f, "  Guests:   {guests}")?;
        }
        writeln!(f, "  Base Package Price: {}", self.quote.base_price)?;
        if self.addons.is_empty() {
            writeln!(f, "  No add-ons selected")?;
        } else {
            for line in &self.addons {
                writeln!(f, "  + {}: {}", line.name, line.price)?;
            }
            writeln!(f, "  Add-ons Total: {}", self.quote.addons_total)?;
        }
        write!(f, "  Total Price: {}", self.quote.grand_total)
    }
}
