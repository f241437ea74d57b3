use super::types::Coordinate;
use rand::Rng;
use std::f64::consts::PI;

/// Meters per degree of latitude, also applied to longitude before the cosine correction.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Draws a point uniformly over the disk of `radius_m` meters around `center`.
///
/// The radial fraction is `sqrt(u)` so that density is uniform per unit area
/// rather than per unit radius. Longitude offsets are stretched by
/// `1 / cos(lat)` to account for meridians converging away from the equator.
pub fn sample_point_in_radius<R: Rng + ?Sized>(
    rng: &mut R,
    center: Coordinate,
    radius_m: f64,
) -> Coordinate {
    let radius_deg = radius_m / METERS_PER_DEGREE;

    let angle: f64 = rng.random_range(0.0..2.0 * PI);
    let distance = rng.random::<f64>().sqrt() * radius_deg;

    let delta_lat = distance * angle.cos();
    let delta_lng = distance * angle.sin() / center.lat.to_radians().cos();

    Coordinate::new(center.lat + delta_lat, center.lng + delta_lng)
}
