use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{
    entities::{Coordinates, RouteArtifact, RouteKind, VehicleProfile},
    error::{route_fetch_error, Error},
};

// shipped in .env.example, treated as no key
pub const PLACEHOLDER_API_KEY: &str = "YOUR_ORS_API_KEY";

#[derive(Clone, Debug, Serialize)]
struct DirectionsRequest {
    coordinates: [[f64; 2]; 2],
    format: &'static str,
    preference: &'static str,
    units: &'static str,
}

#[derive(Clone, Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Clone, Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
    properties: Option<Properties>,
}

#[derive(Clone, Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<Vec<f64>>,
}

#[derive(Clone, Debug, Deserialize)]
struct Properties {
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
struct Segment {
    distance: f64,
    duration: f64,
}

#[derive(Clone, Debug)]
pub struct Client {
    inner: reqwest::Client,
    base: String,
    api_key: String,
}

impl Client {
    pub fn new(base: &str, api_key: String, timeout: Duration) -> Result<Self, Error> {
        let inner = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner,
            base: base.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    pub fn is_usable_key(key: &str) -> bool {
        let key = key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }

    #[tracing::instrument(skip(self))]
    pub async fn directions(
        &self,
        pickup: Coordinates,
        dropoff: Coordinates,
        profile: VehicleProfile,
    ) -> Result<RouteArtifact, Error> {
        let url = format!("{}/v2/directions/{}/geojson", self.base, profile.name());

        let body = DirectionsRequest {
            coordinates: [pickup.lon_lat(), dropoff.lon_lat()],
            format: "geojson",
            preference: "fastest",
            units: "m",
        };

        let res = self
            .inner
            .post(url)
            .header("Authorization", &self.api_key)
            .header("Accept", "application/json, application/geo+json")
            .json(&body)
            .send()
            .await?;

        let status = res.status();

        if !status.is_success() {
            return Err(route_fetch_error(format!(
                "routing service returned {}",
                status.as_u16()
            )));
        }

        let data: FeatureCollection = res
            .json()
            .await
            .map_err(|err| route_fetch_error(format!("malformed route response: {}", err)))?;

        into_artifact(data, profile)
    }
}

fn into_artifact(data: FeatureCollection, profile: VehicleProfile) -> Result<RouteArtifact, Error> {
    let feature = data
        .features
        .into_iter()
        .next()
        .ok_or_else(|| route_fetch_error("route response has no features"))?;

    let geometry = feature
        .geometry
        .ok_or_else(|| route_fetch_error("route response has no geometry"))?;

    if geometry.kind != "LineString" {
        return Err(route_fetch_error(format!(
            "unexpected route geometry {}",
            geometry.kind
        )));
    }

    let path = geometry
        .coordinates
        .iter()
        .map(|position| match position.as_slice() {
            [lon, lat, ..] => Coordinates::new(*lat, *lon),
            _ => Err(route_fetch_error("route position has fewer than two values")),
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| route_fetch_error("route geometry has invalid positions"))?;

    if path.len() < 2 {
        return Err(route_fetch_error("route geometry has fewer than two points"));
    }

    let segment = feature
        .properties
        .and_then(|properties| properties.segments.first().copied())
        .ok_or_else(|| route_fetch_error("route response has no segments"))?;

    if !(segment.distance.is_finite() && segment.distance >= 0.0)
        || !(segment.duration.is_finite() && segment.duration >= 0.0)
    {
        return Err(route_fetch_error("route segment has invalid distance or duration"));
    }

    Ok(RouteArtifact {
        kind: RouteKind::Real,
        profile,
        distance_meters: segment.distance,
        duration_seconds: segment.duration,
        path,
    })
}
