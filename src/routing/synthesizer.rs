use crate::entities::{Coordinates, RouteArtifact, RouteKind, VehicleProfile};
use crate::geo;

pub fn synthesize(
    pickup: Coordinates,
    dropoff: Coordinates,
    profile: VehicleProfile,
) -> RouteArtifact {
    let distance_km = geo::distance(pickup, dropoff);
    let duration_minutes = distance_km * profile.minutes_per_km();

    RouteArtifact {
        kind: RouteKind::Synthetic,
        profile,
        distance_meters: distance_km * 1000.0,
        duration_seconds: duration_minutes * 60.0,
        path: vec![pickup, dropoff],
    }
}
