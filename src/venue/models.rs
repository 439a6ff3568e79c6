//! Wire shapes of the venue data provider and their conversion into typed
//! pricing values.

use serde::Deserialize;

use super::VenueError;
use crate::pricing::DistanceTier;
use crate::utils::geo::GeoPoint;

#[derive(Debug, Deserialize)]
pub struct StaticVenueResponse {
    pub venue_raw: StaticVenueRaw,
}

#[derive(Debug, Deserialize)]
pub struct StaticVenueRaw {
    pub location: Location,
}

#[derive(Debug, Deserialize)]
pub struct Location {
    /// [longitude, latitude]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct DynamicVenueResponse {
    pub venue_raw: DynamicVenueRaw,
}

#[derive(Debug, Deserialize)]
pub struct DynamicVenueRaw {
    pub delivery_specs: DeliverySpecs,
}

#[derive(Debug, Deserialize)]
pub struct DeliverySpecs {
    pub order_minimum_no_surcharge: i64,
    pub delivery_pricing: DeliveryPricing,
}

#[derive(Debug, Deserialize)]
pub struct DeliveryPricing {
    pub base_price: i64,
    pub distance_ranges: Vec<DistanceTier>,
}

/// Venue location and pricing rules, validated and ready for the pricing engine
#[derive(Debug, Clone, PartialEq)]
pub struct VenuePricing {
    pub location: GeoPoint,
    pub order_minimum_no_surcharge: i64,
    pub base_price: i64,
    pub distance_ranges: Vec<DistanceTier>,
}

impl TryFrom<(StaticVenueResponse, DynamicVenueResponse)> for VenuePricing {
    type Error = VenueError;

    fn try_from(
        (static_data, dynamic_data): (StaticVenueResponse, DynamicVenueResponse),
    ) -> Result<Self, Self::Error> {
        let location = match static_data.venue_raw.location.coordinates.as_slice() {
            &[lon, lat] => GeoPoint::new(lon, lat)
                .map_err(|e| VenueError::InvalidData(format!("venue location: {}", e)))?,
            other => {
                return Err(VenueError::InvalidData(format!(
                    "expected [longitude, latitude], got {} coordinates",
                    other.len()
                )));
            }
        };

        let specs = dynamic_data.venue_raw.delivery_specs;
        if specs.order_minimum_no_surcharge < 0 {
            return Err(VenueError::InvalidData(
                "negative order_minimum_no_surcharge".to_string(),
            ));
        }
        if specs.delivery_pricing.distance_ranges.is_empty() {
            return Err(VenueError::InvalidData(
                "venue has no delivery distance ranges".to_string(),
            ));
        }

        Ok(Self {
            location,
            order_minimum_no_surcharge: specs.order_minimum_no_surcharge,
            base_price: specs.delivery_pricing.base_price,
            distance_ranges: specs.delivery_pricing.distance_ranges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn static_body(coordinates: serde_json::Value) -> StaticVenueResponse {
        serde_json::from_value(json!({
            "venue_raw": {
                "id": "5d1b3d3a9ae36be5c2ec5a4c",
                "location": { "type": "Point", "coordinates": coordinates }
            }
        }))
        .unwrap()
    }

    fn dynamic_body(ranges: serde_json::Value) -> DynamicVenueResponse {
        serde_json::from_value(json!({
            "venue_raw": {
                "delivery_specs": {
                    "order_minimum_no_surcharge": 1000,
                    "delivery_pricing": {
                        "base_price": 190,
                        "distance_ranges": ranges
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_parses_provider_records() {
        let venue = VenuePricing::try_from((
            static_body(json!([24.92813512, 60.17012143])),
            dynamic_body(json!([
                { "min": 0, "max": 500, "a": 0, "b": 0, "flag": null },
                { "min": 500, "max": 1000, "a": 100, "b": 1, "flag": null },
                { "min": 1000, "max": 0, "a": 0, "b": 0, "flag": null }
            ])),
        ))
        .unwrap();

        assert_eq!(venue.location, GeoPoint::new_unchecked(24.92813512, 60.17012143));
        assert_eq!(venue.order_minimum_no_surcharge, 1000);
        assert_eq!(venue.base_price, 190);
        assert_eq!(venue.distance_ranges.len(), 3);
        assert_eq!(
            venue.distance_ranges[1],
            DistanceTier { min: 500, max: 1000, a: 100, b: 1 }
        );
    }

    #[test]
    fn test_rejects_malformed_coordinates() {
        let ranges = json!([{ "min": 0, "max": 0, "a": 0, "b": 0 }]);

        let result = VenuePricing::try_from((static_body(json!([24.9])), dynamic_body(ranges.clone())));
        assert!(matches!(result, Err(VenueError::InvalidData(_))));

        let result = VenuePricing::try_from((
            static_body(json!([24.9, 95.0])),
            dynamic_body(ranges),
        ));
        assert!(matches!(result, Err(VenueError::InvalidData(_))));
    }

    #[test]
    fn test_rejects_empty_ranges() {
        let result = VenuePricing::try_from((
            static_body(json!([24.92813512, 60.17012143])),
            dynamic_body(json!([])),
        ));
        assert!(matches!(result, Err(VenueError::InvalidData(_))));
    }

    #[test]
    fn test_untyped_range_fields_fail_to_deserialize() {
        let result: Result<DynamicVenueResponse, _> = serde_json::from_value(json!({
            "venue_raw": {
                "delivery_specs": {
                    "order_minimum_no_surcharge": 1000,
                    "delivery_pricing": {
                        "base_price": 190,
                        "distance_ranges": [{ "min": "zero", "max": 500, "a": 0, "b": 0 }]
                    }
                }
            }
        }));
        assert!(result.is_err());
    }
}
