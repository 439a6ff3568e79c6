use serde::{Deserialize, Serialize};

use super::PricingError;

/// Rounding for the per-distance component `b * distance / 10`: half away from zero
pub const FEE_ROUNDING: fn(f64) -> f64 = f64::round;

/// A distance range [min, max) in meters with its linear fee coefficients.
/// `max == 0` leaves the range open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceTier {
    pub min: u32,
    pub max: u32,
    /// Constant part, in minor units
    pub a: i64,
    /// Rate per 10 meters, in minor units
    pub b: i64,
}

impl DistanceTier {
    pub fn contains(&self, distance: f64) -> bool {
        distance >= f64::from(self.min) && (self.max == 0 || distance < f64::from(self.max))
    }

    fn fee(&self, base_price: i64, distance: f64) -> Result<i64, PricingError> {
        let per_distance = FEE_ROUNDING(self.b as f64 * distance / 10.0);
        // i64::MAX as f64 rounds up to 2^63, which no longer fits
        if !per_distance.is_finite() || per_distance.abs() >= i64::MAX as f64 {
            return Err(PricingError::AmountOverflow);
        }

        base_price
            .checked_add(self.a)
            .and_then(|fee| fee.checked_add(per_distance as i64))
            .ok_or(PricingError::AmountOverflow)
    }
}

/// Delivery fee for `distance` meters.
///
/// Tiers are scanned in the given order and the first one containing the
/// distance is used, even if later tiers overlap it.
pub fn delivery_fee(
    base_price: i64,
    distance: f64,
    tiers: &[DistanceTier],
) -> Result<i64, PricingError> {
    tiers
        .iter()
        .find(|tier| tier.contains(distance))
        .ok_or(PricingError::DeliveryUnavailable { distance })?
        .fee(base_price, distance)
}
