use super::Engine;

use async_trait::async_trait;

use crate::{
    api::TripAPI,
    display::TripView,
    entities::{Coordinates, VehicleProfile},
    error::Error,
};

#[async_trait]
impl TripAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_trip(&self) -> Result<TripView, Error> {
        let state = self.state.lock().await;

        Ok(self.view(&state))
    }

    #[tracing::instrument(skip(self))]
    async fn set_pickup(&self, pickup: Coordinates) -> Result<TripView, Error> {
        let mut state = self.state.lock().await;
        state.session.set_pickup(pickup)?;

        Ok(self.updated(&state))
    }

    #[tracing::instrument(skip(self))]
    async fn set_dropoff(&self, dropoff: Coordinates) -> Result<TripView, Error> {
        let request = {
            let mut state = self.state.lock().await;
            let request = state.session.request_dropoff(dropoff)?;
            self.updated(&state);
            request
        };

        Ok(self.route(request).await)
    }

    #[tracing::instrument(skip(self))]
    async fn set_profile(&self, profile: VehicleProfile) -> Result<TripView, Error> {
        let request = {
            let mut state = self.state.lock().await;

            match state.session.request_profile(profile) {
                Some(request) => request,
                None => return Ok(self.updated(&state)),
            }
        };

        tracing::info!("profile changed, recomputing route");

        Ok(self.route(request).await)
    }

    #[tracing::instrument(skip(self))]
    async fn reset(&self) -> Result<TripView, Error> {
        let mut state = self.state.lock().await;
        state.session.reset();

        Ok(self.updated(&state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Phase, ResetPolicy, RouteKind};
    use crate::error::INVALID_PHASE_TRANSITION;
    use crate::events::TripEvent;
    use crate::routing::RouteProvider;

    fn engine() -> Engine {
        Engine::with_provider(
            RouteProvider::synthetic(),
            Coordinates::new(40.7128, -74.006).unwrap(),
            ResetPolicy::RevertProfile,
        )
    }

    fn pickup() -> Coordinates {
        Coordinates::new(40.7128, -74.006).unwrap()
    }

    fn dropoff() -> Coordinates {
        Coordinates::new(40.7228, -74.016).unwrap()
    }

    #[tokio::test]
    async fn pickup_dropoff_fare() {
        let engine = engine();

        let view = engine.set_pickup(pickup()).await.unwrap();
        assert_eq!(view.phase, Phase::AwaitingDropoff);

        let view = engine.set_dropoff(dropoff()).await.unwrap();
        assert_eq!(view.phase, Phase::RouteReady);
        assert_eq!(view.fare, Some(51));
        assert_eq!(view.route.unwrap().kind, RouteKind::Synthetic);

        let summary = view.summary.unwrap();
        assert_eq!(summary.distance, "1.40 km");
        assert_eq!(summary.eta, "3 min");
        assert_eq!(summary.fare, "₹51");
    }

    #[tokio::test]
    async fn profile_switch_reprices() {
        let engine = engine();
        engine.set_pickup(pickup()).await.unwrap();
        engine.set_dropoff(dropoff()).await.unwrap();

        let view = engine.set_profile(VehicleProfile::Bicycle).await.unwrap();

        assert_eq!(view.phase, Phase::RouteReady);
        assert_eq!(view.profile, VehicleProfile::Bicycle);
        // 30 + 1.395 * 10
        assert_eq!(view.fare, Some(44));
        assert_eq!(view.summary.unwrap().eta, "6 min");
    }

    #[tokio::test]
    async fn dropoff_after_reset_is_rejected() {
        let engine = engine();
        engine.set_pickup(pickup()).await.unwrap();
        engine.set_dropoff(dropoff()).await.unwrap();

        let view = engine.reset().await.unwrap();
        assert_eq!(view.phase, Phase::AwaitingPickup);
        assert!(view.pickup.is_none());
        assert!(view.dropoff.is_none());
        assert!(view.route.is_none());

        let err = engine.set_dropoff(dropoff()).await.unwrap_err();
        assert_eq!(err.code, INVALID_PHASE_TRANSITION);
    }

    #[tokio::test]
    async fn publishes_updates() {
        let engine = engine();
        let events = engine.subscribe().unwrap();

        engine.set_pickup(pickup()).await.unwrap();

        match events.recv().await.unwrap() {
            TripEvent::Updated { trip } => assert_eq!(trip.pickup, Some(pickup())),
            other => panic!("unexpected event {:?}", other),
        }
    }
}
