use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, VehicleProfile};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    Real,
    Synthetic,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteArtifact {
    pub kind: RouteKind,
    pub profile: VehicleProfile,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub path: Vec<Coordinates>,
}

impl RouteArtifact {
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds / 60.0
    }

    pub fn is_synthetic(&self) -> bool {
        self.kind == RouteKind::Synthetic
    }
}
