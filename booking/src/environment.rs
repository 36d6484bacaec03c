//! Injected dependencies for the booking reducer.

use crate::catalog::{AddonCatalog, ThemeCatalog};
use crate::config::BookingConfig;
use crate::gateway::{PaymentGateway, SimulatedPaymentGateway};
use crate::notice::{NoticeSink, TracingNoticeSink};
use eventure_core::environment::{Clock, SystemClock};
use std::sync::Arc;

/// Environment dependencies for the booking reducer
///
/// Everything the reducer needs beyond its own state arrives here: the
/// clock (date validation), the payment gateway, the notice sink, and the
/// read-only catalogs the flow validates and prices against.
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Clock for date validation
    pub clock: Arc<dyn Clock>,
    /// Payment step
    pub gateway: Arc<dyn PaymentGateway>,
    /// Transient-message surface
    pub notices: Arc<dyn NoticeSink>,
    /// Bookable add-ons
    pub addons: Arc<AddonCatalog>,
    /// Event-type theme domains
    pub themes: Arc<ThemeCatalog>,
    /// Flow configuration
    pub config: BookingConfig,
}

impl BookingEnvironment {
    /// Creates an environment from explicit parts
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        gateway: Arc<dyn PaymentGateway>,
        notices: Arc<dyn NoticeSink>,
        addons: AddonCatalog,
        themes: ThemeCatalog,
        config: BookingConfig,
    ) -> Self {
        Self {
            clock,
            gateway,
            notices,
            addons: Arc::new(addons),
            themes: Arc::new(themes),
            config,
        }
    }

    /// Production wiring: system clock, simulated gateway with the
    /// configured settle delay, tracing notices, standard catalogs
    #[must_use]
    pub fn production(config: BookingConfig) -> Self {
        Self::new(
            Arc::new(SystemClock),
            SimulatedPaymentGateway::shared(config.settle_delay),
            Arc::new(TracingNoticeSink),
            AddonCatalog::standard(),
            ThemeCatalog::standard(),
            config,
        )
    }
}

impl std::fmt::Debug for BookingEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingEnvironment")
            .field("addons", &self.addons.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
