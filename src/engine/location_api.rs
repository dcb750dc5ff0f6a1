use super::Engine;

use async_trait::async_trait;

use crate::{
    api::LocationAPI,
    display::TripView,
    error::Error,
    geolocation::{self, PositionSource},
};

#[async_trait]
impl LocationAPI for Engine {
    #[tracing::instrument(skip_all)]
    async fn locate(&self, source: &dyn PositionSource) -> Result<TripView, Error> {
        let position = match geolocation::locate(source, &self.position_options).await {
            Ok(position) => position,
            Err(err) => {
                tracing::info!(code = err.code, "could not get user location: {}", err.message);
                return Err(err);
            }
        };

        let mut state = self.state.lock().await;
        state.user_location = Some(position.coordinates);
        state.session.set_pickup(position.coordinates)?;

        tracing::info!(pickup = %position.coordinates, "pickup set to user location");

        Ok(self.updated(&state))
    }
}
