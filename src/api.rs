use async_trait::async_trait;
use std::sync::Arc;

use crate::display::TripView;
use crate::entities::{Coordinates, VehicleProfile};
use crate::error::Error;
use crate::geolocation::PositionSource;

#[async_trait]
pub trait TripAPI {
    async fn find_trip(&self) -> Result<TripView, Error>;
    async fn set_pickup(&self, pickup: Coordinates) -> Result<TripView, Error>;
    async fn set_dropoff(&self, dropoff: Coordinates) -> Result<TripView, Error>;
    async fn set_profile(&self, profile: VehicleProfile) -> Result<TripView, Error>;
    async fn reset(&self) -> Result<TripView, Error>;
}

#[async_trait]
pub trait LocationAPI {
    async fn locate(&self, source: &dyn PositionSource) -> Result<TripView, Error>;
}

pub trait API: TripAPI + LocationAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
