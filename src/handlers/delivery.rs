use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::pricing::{calculate_price, PriceBreakdown, PricingInput};
use crate::utils::geo::GeoPoint;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DeliveryOrderPriceQuery {
    pub venue_slug: String,
    /// Minor units
    pub cart_value: i64,
    pub user_lat: f64,
    pub user_lon: f64,
}

#[derive(Debug, Serialize)]
pub struct DeliveryOrderPriceResponse {
    pub total_price: i64,
    pub small_order_surcharge: i64,
    pub cart_value: i64,
    pub delivery: DeliveryInfo,
}

#[derive(Debug, Serialize)]
pub struct DeliveryInfo {
    pub fee: i64,
    /// Whole meters
    pub distance: i64,
}

impl From<PriceBreakdown> for DeliveryOrderPriceResponse {
    fn from(breakdown: PriceBreakdown) -> Self {
        Self {
            total_price: breakdown.total_price,
            small_order_surcharge: breakdown.small_order_surcharge,
            cart_value: breakdown.cart_value,
            delivery: DeliveryInfo {
                fee: breakdown.delivery_fee,
                distance: breakdown.delivery_distance.round() as i64,
            },
        }
    }
}

/// Price a delivery order for a venue and shopper location
pub async fn delivery_order_price(
    State(state): State<AppState>,
    query: Result<Query<DeliveryOrderPriceQuery>, QueryRejection>,
) -> AppResult<Json<DeliveryOrderPriceResponse>> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let venue_slug = query.venue_slug.trim();
    if venue_slug.is_empty() {
        return Err(AppError::BadRequest("venue_slug must not be empty".to_string()));
    }
    if query.cart_value < 0 {
        return Err(AppError::BadRequest(
            "cart_value must not be negative".to_string(),
        ));
    }
    let shopper_location = GeoPoint::new(query.user_lon, query.user_lat)
        .map_err(|e| AppError::BadRequest(format!("Invalid user location: {}", e)))?;

    let venue = state.venues.fetch_pricing(venue_slug).await?;

    let breakdown = calculate_price(&PricingInput {
        cart_value: query.cart_value,
        base_price: venue.base_price,
        order_minimum_no_surcharge: venue.order_minimum_no_surcharge,
        distance_ranges: venue.distance_ranges,
        venue_location: venue.location,
        shopper_location,
    })?;

    tracing::info!(
        venue_slug = %venue_slug,
        distance_m = breakdown.delivery_distance,
        delivery_fee = breakdown.delivery_fee,
        small_order_surcharge = breakdown.small_order_surcharge,
        total_price = breakdown.total_price,
        "Delivery order priced"
    );

    Ok(Json(breakdown.into()))
}
