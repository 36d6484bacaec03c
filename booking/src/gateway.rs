//! Stand-in payment gateway.
//!
//! The booking flow never talks to a real payment processor: settlement is a
//! fixed-delay asynchronous operation that always succeeds. The trait is
//! deliberately infallible - there is no failure path, no retry and no
//! timeout handling anywhere in this flow, and adding one would change
//! observable behavior.

use crate::types::Money;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Settled transaction details returned by a gateway
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    /// Gateway transaction identifier
    pub transaction_id: String,
    /// Amount charged
    pub amount: Money,
}

/// Abstraction over the payment step
///
/// Injected through the environment so tests can settle instantly.
pub trait PaymentGateway: Send + Sync {
    /// Charge the given amount; resolves once the payment settles
    fn charge(&self, amount: Money) -> Pin<Box<dyn Future<Output = PaymentConfirmation> + Send>>;
}

/// Gateway that settles after a fixed delay, standing in for a real
/// payment processor
#[derive(Clone, Debug)]
pub struct SimulatedPaymentGateway {
    settle_delay: Duration,
}

impl SimulatedPaymentGateway {
    /// Creates a gateway with the given settle delay
    #[must_use]
    pub const fn new(settle_delay: Duration) -> Self {
        Self { settle_delay }
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(settle_delay: Duration) -> Arc<dyn PaymentGateway> {
        Arc::new(Self::new(settle_delay))
    }
}

impl PaymentGateway for SimulatedPaymentGateway {
    fn charge(&self, amount: Money) -> Pin<Box<dyn Future<Output = PaymentConfirmation> + Send>> {
        let settle_delay = self.settle_delay;
        Box::pin(async move {
            tokio::time::sleep(settle_delay).await;

            let transaction_id = format!("txn_{}", uuid::Uuid::new_v4());
            tracing::info!(
                amount = %amount,
                transaction_id = %transaction_id,
                "simulated payment settled"
            );

            PaymentConfirmation {
                transaction_id,
                amount,
            }
        })
    }
}

/// Gateway that settles immediately, for tests and demos
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantPaymentGateway;

impl InstantPaymentGateway {
    /// Creates an instant gateway
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared() -> Arc<dyn PaymentGateway> {
        Arc::new(Self::new())
    }
}

impl PaymentGateway for InstantPaymentGateway {
    fn charge(&self, amount: Money) -> Pin<Box<dyn Future<Output = PaymentConfirmation> + Send>> {
        Box::pin(async move {
            PaymentConfirmation {
                transaction_id: format!("txn_{}", uuid::Uuid::new_v4()),
                amount,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simulated_gateway_settles_with_charged_amount() {
        let gateway = SimulatedPaymentGateway::new(Duration::from_millis(1));
        let amount = Money::from_dollars(100);

        let confirmation = gateway.charge(amount).await;

        assert_eq!(confirmation.amount, amount);
        assert!(confirmation.transaction_id.starts_with("txn_"));
    }

    #[tokio::test]
    async fn instant_gateway_settles_without_waiting() {
        let gateway = InstantPaymentGateway::new();
        let confirmation = gateway.charge(Money::from_cents(279_700)).await;
        assert_eq!(confirmation.amount, Money::from_cents(279_700));
    }

    #[tokio::test]
    async fn transaction_ids_are_unique() {
        let gateway = InstantPaymentGateway::new();
        let first = gateway.charge(Money::from_dollars(1)).await;
        let second = gateway.charge(Money::from_dollars(1)).await;
        assert_ne!(first.transaction_id, second.transaction_id);
    }
}
