use serde::{Deserialize, Serialize};
use std::fmt;

/// Radius applied when a request does not specify one.
pub const DEFAULT_RADIUS_MILES: f64 = 100.0;

/// US postal code. Kept as a string so leading zeros survive.
pub type ZipCode = String;

/// A point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// Radius query, independent of the transport that carries it
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiusRequest {
    pub zip_code: ZipCode,
    #[serde(default = "default_radius")]
    pub radius: f64,
}

impl RadiusRequest {
    pub fn new(zip_code: impl Into<ZipCode>, radius: f64) -> Self {
        Self {
            zip_code: zip_code.into(),
            radius,
        }
    }
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS_MILES
}

/// Successful query result, in table order
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiusResponse {
    pub zip_codes: Vec<ZipCode>,
}

/// Error body returned to clients
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_default_radius() {
        let req: RadiusRequest = serde_json::from_str(r#"{"zipCode": "02134"}"#).unwrap();
        assert_eq!(req.zip_code, "02134");
        assert_eq!(req.radius, DEFAULT_RADIUS_MILES);
    }

    #[test]
    fn test_request_explicit_radius() {
        let req: RadiusRequest =
            serde_json::from_str(r#"{"zipCode": "10001", "radius": 2.5}"#).unwrap();
        assert_eq!(req.radius, 2.5);
    }

    #[test]
    fn test_request_missing_zip_rejected() {
        assert!(serde_json::from_str::<RadiusRequest>(r#"{"radius": 5}"#).is_err());
        assert!(serde_json::from_str::<RadiusRequest>(r#"{"zipCode": 10001}"#).is_err());
    }

    #[test]
    fn test_response_field_names() {
        let resp = RadiusResponse {
            zip_codes: vec!["10002".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            serde_json::json!({ "zipCodes": ["10002"] })
        );
    }
}
