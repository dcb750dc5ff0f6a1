use crate::entities::VehicleProfile;

pub const BASE_FARE: f64 = 30.0;

// Rounded half-up. Negative or non-finite distances are priced as zero.
pub fn compute_fare(distance_km: f64, profile: VehicleProfile) -> u64 {
    let distance_km = if distance_km.is_finite() && distance_km > 0.0 {
        distance_km
    } else {
        0.0
    };

    (BASE_FARE + distance_km * profile.rate_per_km()).round() as u64
}
