pub mod config;
pub mod distance;
pub mod error;
pub mod query;
pub mod table;
pub mod types;
pub mod zipcode;

pub use config::Config;
pub use distance::{EARTH_RADIUS_MILES, haversine_miles};
pub use error::ZipError;
pub use query::{NearbyZip, find_nearby, find_within_radius, format_distance, handle_request};
pub use table::CoordinateTable;
pub use types::{Coordinate, DEFAULT_RADIUS_MILES, RadiusRequest, RadiusResponse, ZipCode};
pub use zipcode::describe_zip;
