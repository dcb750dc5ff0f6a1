use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::display::TripView;
use crate::error::Error;
use crate::geolocation::{Position, Reported};

#[derive(Serialize, Deserialize)]
pub struct ReportParams {
    position: Option<Position>,
}

pub async fn report(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<ReportParams>,
) -> Result<Json<TripView>, Error> {
    let trip = api.locate(&Reported(params.position)).await?;

    Ok(trip.into())
}
