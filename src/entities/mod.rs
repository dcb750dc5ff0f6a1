mod coordinates;
mod profile;
mod route;
mod trip;

pub use coordinates::Coordinates;
pub use profile::VehicleProfile;
pub use route::{RouteArtifact, RouteKind};
pub use trip::{Phase, ResetPolicy, RouteRequest, TripSession};
