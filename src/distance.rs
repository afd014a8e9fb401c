use crate::types::Coordinate;

/// Mean Earth radius in miles used for all distance calculations.
pub const EARTH_RADIUS_MILES: f64 = 3956.0;

/// Great-circle distance in miles between two coordinates (haversine formula).
pub fn haversine_miles(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.lat.to_radians();
    let lon1 = from.lng.to_radians();
    let lat2 = to.lat.to_radians();
    let lon2 = to.lng.to_radians();

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    c * EARTH_RADIUS_MILES
}
