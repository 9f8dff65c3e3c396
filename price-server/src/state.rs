use std::sync::Arc;

use price_core::MarketStore;
use price_core::PricingTables;

/// Shared state handed to every handler.
///
/// The store is behind a trait object so the same handlers serve the
/// in-memory and SQLite backends. Pricing tables are immutable after
/// startup, so a plain `Arc` is enough.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MarketStore>,
    pub pricing: Arc<PricingTables>,
}

impl AppState {
    pub fn new(store: Arc<dyn MarketStore>, pricing: PricingTables) -> Self {
        Self {
            store,
            pricing: Arc::new(pricing),
        }
    }
}
