use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "INR")]
    Inr,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Inr => "INR",
        }
    }
}

/// Low/high bounds around an estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: Decimal,
    pub high: Decimal,
}

/// The computed answer for one query. Never persisted; recomputed on
/// every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    /// Estimated price, rounded to the whole currency unit.
    pub estimated_price: Decimal,

    /// Probability-like scalar in [0, 1]. Not a statistical fit; a fixed
    /// baseline plus a small random addition.
    pub confidence: f64,

    /// Textual market-comparison label shown beside the figure.
    pub market_comparison: String,

    pub price_range: PriceRange,

    pub currency: Currency,
}
