//! Every input the booking reducer processes.
//!
//! Field edits and wizard navigation come from the user; `PaymentSettled`
//! is fed back by the payment effect.

use crate::gateway::PaymentConfirmation;
use crate::types::{AddonId, EventType, ThemeId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Actions driving the booking wizard
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum BookingAction {
    // ========== Field edits ==========
    /// Set the contact name
    SetName(String),
    /// Set the contact email
    SetEmail(String),
    /// Set the contact phone number
    SetPhone(String),
    /// Choose the event type; a theme outside the new domain is cleared
    SelectEventType(EventType),
    /// Choose a theme
    SelectTheme(ThemeId),
    /// Pick the event date; past dates are ignored
    SetEventDate(NaiveDate),
    /// Set the free-form event time
    SetEventTime(String),
    /// Set the venue description
    SetLocation(String),
    /// Set the expected guest count; zero is rejected
    SetGuestCount(u32),
    /// Set the optional message
    SetMessage(String),
    /// Add the add-on to the selection if absent, remove it otherwise
    ToggleAddon(AddonId),

    // ========== Wizard navigation ==========
    /// Advance to the next step (gated on the contact step)
    NextStep,
    /// Return to the previous step; no-op on the first
    PreviousStep,

    // ========== Submission and payment ==========
    /// Snapshot the draft into a receipt and present it
    Submit,
    /// Dismiss the receipt without touching the draft
    CloseReceipt,
    /// Confirm the presented receipt and start the payment
    ConfirmPayment,
    /// Fed back by the payment effect once the charge settles
    PaymentSettled(PaymentConfirmation),
    /// Dismiss the confirmation screen and request navigation away
    CloseSuccess,

    // ========== Housekeeping ==========
    /// Discard the draft and rewind the wizard
    Reset,
}
