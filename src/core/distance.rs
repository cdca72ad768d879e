use crate::models::{Coordinate, Institution, PairDistances, Triplet};

/// Earth's radius in miles
pub const EARTH_RADIUS_MILES: f64 = 3961.0;

/// Calculate the Haversine distance between two coordinates in miles
///
/// # Arguments
/// * `a` - First coordinate in degrees
/// * `b` - Second coordinate in degrees
///
/// # Returns
/// Distance in miles
#[inline]
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    haversine_distance_with_radius(a, b, EARTH_RADIUS_MILES)
}

/// Haversine distance on a sphere of the given radius
///
/// The result is in whatever unit `radius` is expressed in.
#[inline]
pub fn haversine_distance_with_radius(a: Coordinate, b: Coordinate, radius: f64) -> f64 {
    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = lat2_rad - lat1_rad;
    let delta_lon = b.longitude.to_radians() - a.longitude.to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    radius * c
}

/// Distance between two institutions
#[inline]
pub fn institution_distance(a: &Institution, b: &Institution, radius: f64) -> f64 {
    haversine_distance_with_radius(a.coordinate, b.coordinate, radius)
}

/// The three pairwise distances of a triplet
pub fn pair_distances(triplet: &Triplet<'_>, radius: f64) -> PairDistances {
    PairDistances {
        ab: institution_distance(triplet.medical, triplet.pharmacy, radius),
        bc: institution_distance(triplet.pharmacy, triplet.mfa, radius),
        ac: institution_distance(triplet.medical, triplet.mfa, radius),
    }
}
