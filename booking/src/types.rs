//! Domain types for the booking wizard.
//!
//! The draft is plain owned data: every field the form edits lives in
//! [`BookingDraft`], and the wizard's progress lives next to it in
//! [`BookingState`]. Derived amounts are never stored on the draft; they are
//! computed when the receipt is built.

use crate::gateway::PaymentConfirmation;
use crate::receipt::Receipt;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

// ============================================================================
// Money Value Object (cents-based to avoid floating point errors)
// ============================================================================

/// Represents money in cents to avoid floating-point arithmetic errors
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(u64);

/// Error parsing a currency string into [`Money`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    /// The string held no digits at all
    #[error("empty currency amount: {0:?}")]
    Empty(String),

    /// The string held characters other than digits, `$`, `,` and `.`
    #[error("invalid character in currency amount: {0:?}")]
    InvalidCharacter(String),

    /// More than one decimal point, or more than two fraction digits
    #[error("malformed fraction in currency amount: {0:?}")]
    MalformedFraction(String),

    /// The magnitude does not fit into the cents representation
    #[error("currency amount out of range: {0:?}")]
    OutOfRange(String),
}

impl Money {
    /// Zero cents
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Creates a `Money` value from whole dollars
    ///
    /// # Panics
    ///
    /// Panics if the conversion would overflow (dollars * 100 > `u64::MAX`).
    #[must_use]
    #[allow(clippy::panic)]
    pub const fn from_dollars(dollars: u64) -> Self {
        match dollars.checked_mul(100) {
            Some(cents) => Self(cents),
            None => panic!("Money::from_dollars overflow"),
        }
    }

    /// Parses a currency string such as `"$499"`, `"1999.50"` or
    /// `"$1,999.00"` into a `Money` value
    ///
    /// The dollar sign and thousands separators are ignored; at most two
    /// fraction digits are accepted and a single fraction digit counts as
    /// tens of cents (`"$1.5"` is 150 cents).
    ///
    /// # Errors
    ///
    /// Returns [`MoneyParseError`] when the string is empty, holds characters
    /// outside `0-9,$.`, has a malformed fraction, or overflows the cents
    /// representation.
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let raw = input.trim().trim_start_matches('$').replace(',', "");
        if raw.is_empty() {
            return Err(MoneyParseError::Empty(input.to_string()));
        }

        let (whole, fraction) = match raw.split_once('.') {
            None => (raw.as_str(), ""),
            Some((whole, fraction)) => {
                if fraction.contains('.') || fraction.len() > 2 {
                    return Err(MoneyParseError::MalformedFraction(input.to_string()));
                }
                (whole, fraction)
            },
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(MoneyParseError::Empty(input.to_string()));
        }

        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(MoneyParseError::InvalidCharacter(input.to_string()));
        }

        // "$.50" is 50 cents; a bare "." was rejected above.
        let dollars: u64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| MoneyParseError::OutOfRange(input.to_string()))?
        };

        // A single fraction digit means tens of cents: "$1.5" == 150 cents.
        let cents_part: u64 = match fraction.len() {
            0 => 0,
            1 => fraction
                .parse::<u64>()
                .map_err(|_| MoneyParseError::MalformedFraction(input.to_string()))?
                * 10,
            _ => fraction
                .parse()
                .map_err(|_| MoneyParseError::MalformedFraction(input.to_string()))?,
        };

        dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents_part))
            .map(Self)
            .ok_or_else(|| MoneyParseError::OutOfRange(input.to_string()))
    }

    /// Returns the amount in cents
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Returns the amount in whole dollars (rounded down)
    #[must_use]
    pub const fn dollars(&self) -> u64 {
        self.0 / 100
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two money amounts with overflow checking
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Adds two money amounts
    ///
    /// # Panics
    ///
    /// Panics if the addition would overflow.
    /// Use `checked_add` for non-panicking addition.
    #[must_use]
    #[allow(clippy::panic)]
    pub const fn add(self, other: Self) -> Self {
        match self.checked_add(other) {
            Some(result) => result,
            None => panic!("Money::add overflow"),
        }
    }
}

impl fmt::Display for Money {
    /// Renders with a dollar sign, thousands separators and exactly two
    /// decimals: `$2,797.00`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = self.dollars().to_string();
        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, digit) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        write!(f, "${grouped}.{:02}", self.0 % 100)
    }
}

// ============================================================================
// Catalog identifiers
// ============================================================================

/// Identifier of an optional paid add-on (e.g. `photo`, `decor`)
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AddonId(String);

impl AddonId {
    /// Creates an add-on id from a slug
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Returns the slug
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an event theme (e.g. `garden-bliss`)
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ThemeId(String);

impl ThemeId {
    /// Creates a theme id from a slug
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Returns the slug
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Event types
// ============================================================================

/// Kind of event being booked
///
/// Selecting an event type determines which themes can be chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// Wedding celebration
    Wedding,
    /// Birthday party
    Birthday,
    /// Corporate event
    Corporate,
    /// Anniversary celebration
    Anniversary,
    /// Anything else; carries no curated theme domain
    Other,
}

impl EventType {
    /// All event types, in display order
    pub const ALL: [Self; 5] = [
        Self::Wedding,
        Self::Birthday,
        Self::Corporate,
        Self::Anniversary,
        Self::Other,
    ];

    /// Stable identifier used in configuration and serialization
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wedding => "wedding",
            Self::Birthday => "birthday",
            Self::Corporate => "corporate",
            Self::Anniversary => "anniversary",
            Self::Other => "other",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wedding => "Wedding",
            Self::Birthday => "Birthday",
            Self::Corporate => "Corporate Event",
            Self::Anniversary => "Anniversary",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Wizard state
// ============================================================================

/// One step of the booking wizard, in order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WizardStep {
    /// Name, email and phone (the only gated step)
    Contact,
    /// Event type, theme, date, time, location and guest count
    EventDetails,
    /// Add-ons and the free-text message
    Extras,
    /// Read-back of the draft before submitting
    Review,
}

impl WizardStep {
    /// The step a fresh wizard starts on
    pub const FIRST: Self = Self::Contact;

    /// 1-based index of the step, for display
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Contact => 1,
            Self::EventDetails => 2,
            Self::Extras => 3,
            Self::Review => 4,
        }
    }

    /// The following step, if any
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Contact => Some(Self::EventDetails),
            Self::EventDetails => Some(Self::Extras),
            Self::Extras => Some(Self::Review),
            Self::Review => None,
        }
    }

    /// The preceding step, if any
    #[must_use]
    pub const fn back(self) -> Option<Self> {
        match self {
            Self::Contact => None,
            Self::EventDetails => Some(Self::Contact),
            Self::Extras => Some(Self::EventDetails),
            Self::Review => Some(Self::Extras),
        }
    }

    /// Whether this is the review step
    #[must_use]
    pub const fn is_last(self) -> bool {
        matches!(self, Self::Review)
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Where the flow stands relative to submission and payment
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum BookingPhase {
    /// The wizard is visible and the draft is being edited
    #[default]
    Editing,
    /// The receipt is presented over the wizard, awaiting a decision
    Reviewing {
        /// Snapshot of the draft with derived totals
        receipt: Receipt,
    },
    /// The payment gateway call is in flight
    Processing {
        /// The receipt the customer confirmed
        receipt: Receipt,
    },
    /// Payment settled; the confirmation screen is visible
    Confirmed {
        /// Settled transaction details
        confirmation: PaymentConfirmation,
    },
}

/// Navigation request handed to the routing shell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// The post-booking landing view
    Dashboard,
}

// ============================================================================
// Draft
// ============================================================================

/// Contact details collected on the first step
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Full name
    pub name: String,
    /// Email address (no format validation beyond non-emptiness)
    pub email: String,
    /// Phone number
    pub phone: String,
}

impl ContactInfo {
    /// Whether every required contact field is non-empty after trimming
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.phone.trim().is_empty()
    }
}

/// The in-progress booking, owned exclusively by the active wizard
///
/// Setters store what they are given; cross-field rules are the reducer's
/// concern. Totals are derived when the receipt is built, never cached here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    /// Contact details (gated on the first step)
    pub contact: ContactInfo,
    /// Selected event type; determines the valid theme domain
    pub event_type: Option<EventType>,
    /// Selected theme
    pub theme: Option<ThemeId>,
    /// Event date; only present-or-future dates are stored
    pub date: Option<NaiveDate>,
    /// Free-form wall-clock time
    pub time: String,
    /// Venue description
    pub location: String,
    /// Expected number of guests (positive)
    pub guest_count: Option<u32>,
    /// Selected add-on ids; deduplicated and ordered by construction
    pub selected_addons: BTreeSet<AddonId>,
    /// Optional free-text message
    pub message: String,
}

impl BookingDraft {
    /// Creates an empty draft
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Feature state
// ============================================================================

/// Complete state of the booking feature: the draft plus wizard progress
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingState {
    /// The in-progress booking
    pub draft: BookingDraft,
    /// Step currently shown
    pub step: WizardStep,
    /// Monotonic high-water mark of validated steps; gates forward jumps
    pub furthest_validated: WizardStep,
    /// Where the flow stands relative to submission and payment
    pub phase: BookingPhase,
    /// Navigation request for the routing shell, set on success dismissal
    pub requested_route: Option<Route>,
}

impl BookingState {
    /// Creates a fresh state on the first step with an empty draft
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh state with a theme pre-selected
    ///
    /// Used when the routing shell carries a `theme` query parameter. The
    /// theme is stored before any event type is chosen; the usual domain
    /// rules apply once one is.
    #[must_use]
    pub fn with_preselected_theme(theme: ThemeId) -> Self {
        let mut state = Self::new();
        state.draft.theme = Some(theme);
        state
    }

    /// Replaces the draft with a fresh one and rewinds the wizard
    ///
    /// This is the single reset used after settlement and by the explicit
    /// reset action; it intentionally touches both the draft and the wizard
    /// position.
    pub fn reset_draft(&mut self) {
        self.draft = BookingDraft::new();
        self.step = WizardStep::FIRST;
        self.furthest_validated = WizardStep::FIRST;
    }

    /// The receipt currently presented, if any
    #[must_use]
    pub const fn receipt(&self) -> Option<&Receipt> {
        match &self.phase {
            BookingPhase::Reviewing { receipt } | BookingPhase::Processing { receipt } => {
                Some(receipt)
            },
            BookingPhase::Editing | BookingPhase::Confirmed { .. } => None,
        }
    }

    /// Whether the wizard is editable (no receipt, payment or success view)
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.phase, BookingPhase::Editing)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn money_parse_plain_dollars() {
        assert_eq!(Money::parse("$499").unwrap(), Money::from_dollars(499));
        assert_eq!(Money::parse("499").unwrap(), Money::from_dollars(499));
    }

    #[test]
    fn money_parse_thousands_and_fraction() {
        assert_eq!(Money::parse("$1,999.00").unwrap(), Money::from_cents(199_900));
        assert_eq!(Money::parse("$2,797.50").unwrap(), Money::from_cents(279_750));
    }

    #[test]
    fn money_parse_single_fraction_digit_is_tens_of_cents() {
        assert_eq!(Money::parse("$1.5").unwrap(), Money::from_cents(150));
    }

    #[test]
    fn money_parse_rejects_garbage() {
        assert!(matches!(
            Money::parse("twelve"),
            Err(MoneyParseError::InvalidCharacter(_))
        ));
        assert!(matches!(Money::parse("$"), Err(MoneyParseError::Empty(_))));
        assert!(matches!(
            Money::parse("$1.234"),
            Err(MoneyParseError::MalformedFraction(_))
        ));
    }

    #[test]
    fn money_display_groups_thousands() {
        assert_eq!(Money::from_cents(199_900).to_string(), "$1,999.00");
        assert_eq!(Money::from_cents(279_700).to_string(), "$2,797.00");
        assert_eq!(Money::from_cents(99).to_string(), "$0.99");
        assert_eq!(Money::from_cents(123_456_789).to_string(), "$1,234,567.89");
    }

    #[test]
    fn money_display_reparses_exactly() {
        let amount = Money::from_cents(279_800);
        assert_eq!(Money::parse(&amount.to_string()).unwrap(), amount);
    }

    #[test]
    fn contact_completeness_requires_all_fields() {
        let mut contact = ContactInfo::default();
        assert!(!contact.is_complete());

        contact.name = "Jane Doe".into();
        contact.email = "jane@x.com".into();
        assert!(!contact.is_complete());

        contact.phone = "555-1234".into();
        assert!(contact.is_complete());

        contact.email = "   ".into();
        assert!(!contact.is_complete());
    }

    #[test]
    fn wizard_step_ordering() {
        assert_eq!(WizardStep::Contact.index(), 1);
        assert_eq!(WizardStep::Contact.next(), Some(WizardStep::EventDetails));
        assert_eq!(WizardStep::Review.next(), None);
        assert_eq!(WizardStep::Contact.back(), None);
        assert_eq!(WizardStep::Review.back(), Some(WizardStep::Extras));
        assert!(WizardStep::Review.is_last());
    }

    #[test]
    fn reset_rewinds_wizard_and_clears_draft() {
        let mut state = BookingState::new();
        state.draft.contact.name = "Jane".into();
        state.draft.selected_addons.insert(AddonId::new("photo"));
        state.step = WizardStep::Extras;
        state.furthest_validated = WizardStep::Extras;

        state.reset_draft();

        assert_eq!(state.draft, BookingDraft::new());
        assert_eq!(state.step, WizardStep::Contact);
        assert_eq!(state.furthest_validated, WizardStep::Contact);
    }

    #[test]
    fn preselected_theme_lands_on_fresh_draft() {
        let state = BookingState::with_preselected_theme(ThemeId::new("garden-bliss"));
        assert_eq!(state.draft.theme, Some(ThemeId::new("garden-bliss")));
        assert_eq!(state.step, WizardStep::Contact);
        assert!(state.is_editing());
    }
}
