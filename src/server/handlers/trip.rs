use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::display::TripView;
use crate::entities::{Coordinates, VehicleProfile};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct PointParams {
    coordinates: Coordinates,
}

#[derive(Serialize, Deserialize)]
pub struct ProfileParams {
    profile: VehicleProfile,
}

pub async fn find(Extension(api): Extension<DynAPI>) -> Result<Json<TripView>, Error> {
    let trip = api.find_trip().await?;

    Ok(trip.into())
}

pub async fn set_pickup(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<PointParams>,
) -> Result<Json<TripView>, Error> {
    let trip = api.set_pickup(params.coordinates).await?;

    Ok(trip.into())
}

pub async fn set_dropoff(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<PointParams>,
) -> Result<Json<TripView>, Error> {
    let trip = api.set_dropoff(params.coordinates).await?;

    Ok(trip.into())
}

pub async fn set_profile(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<ProfileParams>,
) -> Result<Json<TripView>, Error> {
    let trip = api.set_profile(params.profile).await?;

    Ok(trip.into())
}

pub async fn reset(Extension(api): Extension<DynAPI>) -> Result<Json<TripView>, Error> {
    let trip = api.reset().await?;

    Ok(trip.into())
}
