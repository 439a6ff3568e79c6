//! Delivery order pricing: distance, tiered delivery fee and small-order surcharge.
//!
//! Everything here is pure and synchronous. Inputs are expected to be validated
//! by the caller (see `crate::venue` for the provider boundary).

pub mod engine;
pub mod fee;

use thiserror::Error;

pub use engine::{calculate_price, small_order_surcharge, PriceBreakdown, PricingInput};
pub use fee::{delivery_fee, DistanceTier, FEE_ROUNDING};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("delivery is not available for a distance of {distance:.0} m")]
    DeliveryUnavailable { distance: f64 },

    #[error("order amount exceeds the supported range")]
    AmountOverflow,
}
