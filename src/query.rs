use crate::distance::haversine_miles;
use crate::error::{Result, ZipError};
use crate::table::CoordinateTable;
use crate::types::{RadiusRequest, RadiusResponse, ZipCode};

/// Find every ZIP code within `radius_miles` of `origin_zip`.
///
/// Results follow table order and never include the origin itself. A
/// negative radius yields an empty result rather than an error.
pub fn find_within_radius(
    table: &CoordinateTable,
    origin_zip: &str,
    radius_miles: f64,
) -> Result<Vec<ZipCode>> {
    let origin = table
        .get(origin_zip)
        .ok_or_else(|| ZipError::NotFound(origin_zip.to_string()))?;

    let zips = table
        .iter()
        .filter(|(zip, _)| *zip != origin_zip)
        .filter(|(_, coord)| haversine_miles(origin, *coord) <= radius_miles)
        .map(|(zip, _)| zip.to_string())
        .collect();

    Ok(zips)
}

/// A ZIP code within range of an origin, with its distance
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyZip {
    pub zip_code: ZipCode,
    pub distance_miles: f64,
}

/// Like [`find_within_radius`], but keeps each match's distance and orders
/// the matches nearest first. Equal distances keep table order.
pub fn find_nearby(
    table: &CoordinateTable,
    origin_zip: &str,
    radius_miles: f64,
) -> Result<Vec<NearbyZip>> {
    let origin = table
        .get(origin_zip)
        .ok_or_else(|| ZipError::NotFound(origin_zip.to_string()))?;

    let mut nearby: Vec<NearbyZip> = table
        .iter()
        .filter(|(zip, _)| *zip != origin_zip)
        .map(|(zip, coord)| NearbyZip {
            zip_code: zip.to_string(),
            distance_miles: haversine_miles(origin, coord),
        })
        .filter(|n| n.distance_miles <= radius_miles)
        .collect();
    nearby.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));

    Ok(nearby)
}

/// Render a distance for display, e.g. "2.4 mi" or "< 0.1 mi"
pub fn format_distance(miles: f64) -> String {
    if miles < 0.1 {
        "< 0.1 mi".to_string()
    } else {
        format!("{:.1} mi", miles)
    }
}

/// Answer a structured radius request.
pub fn handle_request(table: &CoordinateTable, request: &RadiusRequest) -> Result<RadiusResponse> {
    let zip_codes = find_within_radius(table, &request.zip_code, request.radius)?;
    tracing::debug!(
        "{} ZIP codes within {} miles of {}",
        zip_codes.len(),
        request.radius,
        request.zip_code
    );
    Ok(RadiusResponse { zip_codes })
}
