use serde::Serialize;

use super::fee::{delivery_fee, DistanceTier};
use super::PricingError;
use crate::utils::geo::{haversine_distance, GeoPoint};

/// Everything needed to price one order. Money is in minor units.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingInput {
    pub cart_value: i64,
    pub base_price: i64,
    pub order_minimum_no_surcharge: i64,
    pub distance_ranges: Vec<DistanceTier>,
    pub venue_location: GeoPoint,
    pub shopper_location: GeoPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub cart_value: i64,
    pub small_order_surcharge: i64,
    pub delivery_fee: i64,
    /// Meters
    pub delivery_distance: f64,
    pub total_price: i64,
}

/// Amount needed to bring the cart up to the order minimum
pub fn small_order_surcharge(order_minimum: i64, cart_value: i64) -> i64 {
    order_minimum.saturating_sub(cart_value).max(0)
}

/// Price an order
pub fn calculate_price(input: &PricingInput) -> Result<PriceBreakdown, PricingError> {
    let delivery_distance = haversine_distance(input.venue_location, input.shopper_location);
    let delivery_fee = delivery_fee(input.base_price, delivery_distance, &input.distance_ranges)?;
    let small_order_surcharge =
        small_order_surcharge(input.order_minimum_no_surcharge, input.cart_value);
    let total_price = input
        .cart_value
        .checked_add(small_order_surcharge)
        .and_then(|total| total.checked_add(delivery_fee))
        .ok_or(PricingError::AmountOverflow)?;

    Ok(PriceBreakdown {
        cart_value: input.cart_value,
        small_order_surcharge,
        delivery_fee,
        delivery_distance,
        total_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_input(cart_value: i64) -> PricingInput {
        PricingInput {
            cart_value,
            base_price: 199,
            order_minimum_no_surcharge: 1000,
            distance_ranges: vec![DistanceTier { min: 0, max: 500, a: 0, b: 0 }],
            venue_location: GeoPoint::new_unchecked(24.931749, 60.170087),
            shopper_location: GeoPoint::new_unchecked(24.932906, 60.169818),
        }
    }

    #[test]
    fn test_cart_at_minimum() {
        let breakdown = calculate_price(&flat_input(1000)).unwrap();

        assert!(breakdown.delivery_distance > 70.0 && breakdown.delivery_distance < 71.0);
        assert_eq!(breakdown.small_order_surcharge, 0);
        assert_eq!(breakdown.delivery_fee, 199);
        assert_eq!(breakdown.total_price, 1199);
    }

    #[test]
    fn test_small_order_surcharge_applied() {
        let breakdown = calculate_price(&flat_input(500)).unwrap();

        assert_eq!(breakdown.small_order_surcharge, 500);
        assert_eq!(breakdown.total_price, 500 + 500 + 199);
    }

    #[test]
    fn test_surcharge_never_negative() {
        assert_eq!(small_order_surcharge(1000, 1000), 0);
        assert_eq!(small_order_surcharge(1000, 5000), 0);
        assert_eq!(small_order_surcharge(1000, 999), 1);
        assert_eq!(small_order_surcharge(1000, 0), 1000);
    }

    #[test]
    fn test_total_is_sum_of_components() {
        let mut input = flat_input(0);
        input.distance_ranges = vec![
            DistanceTier { min: 0, max: 50, a: 0, b: 0 },
            DistanceTier { min: 50, max: 0, a: 100, b: 3 },
        ];

        for cart_value in [0, 1, 890, 1000, 12_345] {
            input.cart_value = cart_value;
            let b = calculate_price(&input).unwrap();
            assert_eq!(
                b.total_price,
                b.cart_value + b.small_order_surcharge + b.delivery_fee
            );
            assert_eq!(b.cart_value, cart_value);
        }
    }

    #[test]
    fn test_undeliverable_distance_propagates() {
        let mut input = flat_input(1000);
        // About 82 km away
        input.shopper_location = GeoPoint::new_unchecked(24.7536, 59.4370);

        match calculate_price(&input) {
            Err(PricingError::DeliveryUnavailable { distance }) => {
                assert!(distance > 80_000.0);
            }
            other => panic!("expected DeliveryUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let mut input = flat_input(i64::MAX);
        input.distance_ranges = vec![DistanceTier { min: 0, max: 0, a: 0, b: 0 }];

        assert_eq!(calculate_price(&input), Err(PricingError::AmountOverflow));
    }

    #[test]
    fn test_same_location_uses_first_tier() {
        let mut input = flat_input(1000);
        input.shopper_location = input.venue_location;

        let breakdown = calculate_price(&input).unwrap();
        assert_eq!(breakdown.delivery_distance, 0.0);
        assert_eq!(breakdown.delivery_fee, 199);
    }
}
