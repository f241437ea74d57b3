use super::error::MapsError;
use super::types::{GeocodeResult, RouteResult, TravelMode};
use crate::sdk::types::Coordinate;

pub trait MapsProvider: Send + Sync {
    /// Reverse-geocodes a coordinate. An empty list means the service knows no place there.
    fn reverse_geocode(&self, point: Coordinate) -> Result<Vec<GeocodeResult>, MapsError>;

    /// Requests routes between two points for one travel mode.
    fn directions(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<Vec<RouteResult>, MapsError>;

    /// Returns the element status of a single origin/destination distance-matrix query.
    fn distance_matrix_status(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<String, MapsError>;
}
