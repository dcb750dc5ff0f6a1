use geo_types::LineString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Coordinates, Phase, RouteArtifact, RouteKind, TripSession, VehicleProfile};
use crate::error::{route_display_error, Error};

pub const CURRENCY_SYMBOL: &str = "₹";
pub const NOT_SET: &str = "Not set";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance: String,
    pub eta: String,
    pub fare: String,
}

impl RouteSummary {
    pub fn new(route: &RouteArtifact, fare: u64) -> Self {
        Self {
            distance: format!("{:.2} km", route.distance_km()),
            eta: format!("{} min", route.duration_minutes().round()),
            fare: format!("{}{}", CURRENCY_SYMBOL, fare),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteLine {
    pub kind: RouteKind,
    pub simplified: bool,
    pub positions: Vec<[f64; 2]>,
}

impl From<LineString<f64>> for RouteLine {
    fn from(line: LineString<f64>) -> Self {
        Self {
            kind: RouteKind::Synthetic,
            simplified: false,
            positions: line.0.iter().map(|c| [c.x, c.y]).collect(),
        }
    }
}

pub fn route_geometry(route: &RouteArtifact) -> Result<LineString<f64>, Error> {
    if route.path.len() < 2 {
        return Err(route_display_error());
    }

    Ok(route
        .path
        .iter()
        .map(|c| (c.longitude(), c.latitude()))
        .collect::<Vec<_>>()
        .into())
}

pub fn route_line(route: &RouteArtifact, pickup: Coordinates, dropoff: Coordinates) -> RouteLine {
    match route_geometry(route) {
        Ok(line) => RouteLine {
            kind: route.kind,
            ..RouteLine::from(line)
        },
        Err(err) => {
            tracing::warn!(code = err.code, "{}, drawing straight line", err.message);

            let line: LineString<f64> = vec![
                (pickup.longitude(), pickup.latitude()),
                (dropoff.longitude(), dropoff.latitude()),
            ]
            .into();

            RouteLine {
                kind: route.kind,
                simplified: true,
                ..RouteLine::from(line)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripView {
    pub id: Uuid,
    pub phase: Phase,
    pub profile: VehicleProfile,
    pub routing: bool,
    pub pickup: Option<Coordinates>,
    pub dropoff: Option<Coordinates>,
    pub pickup_label: String,
    pub dropoff_label: String,
    pub center: Coordinates,
    pub route: Option<RouteLine>,
    pub summary: Option<RouteSummary>,
    pub fare: Option<u64>,
}

impl TripView {
    pub fn new(session: &TripSession, center: Coordinates) -> Self {
        let label =
            |c: Option<Coordinates>| c.map_or_else(|| NOT_SET.to_string(), |c| c.to_string());

        let (route, summary) = match (
            session.current_route(),
            session.pickup(),
            session.dropoff(),
            session.current_fare(),
        ) {
            (Some(route), Some(pickup), Some(dropoff), Some(fare)) => (
                Some(route_line(route, pickup, dropoff)),
                Some(RouteSummary::new(route, fare)),
            ),
            _ => (None, None),
        };

        Self {
            id: session.id,
            phase: session.phase(),
            profile: session.profile(),
            routing: session.is_routing(),
            pickup: session.pickup(),
            dropoff: session.dropoff(),
            pickup_label: label(session.pickup()),
            dropoff_label: label(session.dropoff()),
            center,
            route,
            summary,
            fare: session.current_fare(),
        }
    }
}
