mod location_api;
mod trip_api;

use std::sync::atomic::{AtomicBool, Ordering};

use async_channel::{Receiver, Sender, TrySendError};
use tokio::sync::Mutex;

use crate::{
    api::API,
    config::Config,
    display::TripView,
    entities::{Coordinates, ResetPolicy, RouteArtifact, RouteRequest, TripSession},
    error::Error,
    events::{Notice, TripEvent},
    geolocation::PositionOptions,
    routing::RouteProvider,
};

const EVENT_BUFFER: usize = 64;

struct State {
    session: TripSession,
    user_location: Option<Coordinates>,
}

// The session lock is never held while a route is being fetched.
pub struct Engine {
    state: Mutex<State>,
    provider: RouteProvider,
    default_location: Coordinates,
    position_options: PositionOptions,
    sender: Sender<TripEvent>,
    // only used to evict the oldest event when the buffer is full
    backlog: Receiver<TripEvent>,
    subscribed: AtomicBool,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(config: &Config) -> Result<Self, Error> {
        let provider = RouteProvider::new(&config.routing)?;

        Ok(Self::with_provider(
            provider,
            config.default_location,
            config.reset_policy,
        ))
    }

    pub fn with_provider(
        provider: RouteProvider,
        default_location: Coordinates,
        reset_policy: ResetPolicy,
    ) -> Self {
        let (sender, backlog) = async_channel::bounded(EVENT_BUFFER);

        Self {
            state: Mutex::new(State {
                session: TripSession::default().with_reset_policy(reset_policy),
                user_location: None,
            }),
            provider,
            default_location,
            position_options: PositionOptions::default(),
            sender,
            backlog,
            subscribed: AtomicBool::new(false),
        }
    }

    /// Hands out the event stream. There is a single subscriber: every call
    /// after the first returns `None`. Events published before subscribing
    /// are kept, newest last, up to the buffer size.
    pub fn subscribe(&self) -> Option<Receiver<TripEvent>> {
        if self.subscribed.swap(true, Ordering::SeqCst) {
            return None;
        }

        Some(self.backlog.clone())
    }

    fn view(&self, state: &State) -> TripView {
        let center = state.user_location.unwrap_or(self.default_location);
        TripView::new(&state.session, center)
    }

    fn publish(&self, mut event: TripEvent) {
        loop {
            match self.sender.try_send(event) {
                Ok(()) | Err(TrySendError::Closed(_)) => return,
                Err(TrySendError::Full(rejected)) => {
                    if self.backlog.try_recv().is_ok() {
                        tracing::debug!("event buffer full, dropped oldest event");
                    }
                    event = rejected;
                }
            }
        }
    }

    fn updated(&self, state: &State) -> TripView {
        let view = self.view(state);
        self.publish(TripEvent::Updated { trip: view.clone() });

        if view.route.as_ref().map_or(false, |line| line.simplified) {
            self.notify("Failed to display route, showing a straight line");
        }

        view
    }

    fn notify(&self, message: impl Into<String>) {
        self.publish(TripEvent::Notice {
            notice: Notice::new(message),
        });
    }

    async fn route(&self, request: RouteRequest) -> TripView {
        let route = self
            .provider
            .fetch_route(request.pickup, request.dropoff, request.profile)
            .await;

        self.announce_fallback(&route);

        let mut state = self.state.lock().await;
        state.session.apply_route(request.id, route);

        self.updated(&state)
    }

    fn announce_fallback(&self, route: &RouteArtifact) {
        if self.provider.is_remote() && route.is_synthetic() {
            self.notify("Live routing unavailable, showing an estimated straight-line route");
        }
    }
}

impl API for Engine {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TripAPI;
    use crate::entities::{Phase, RouteKind, VehicleProfile};

    fn point(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates::new(latitude, longitude).unwrap()
    }

    fn engine() -> Engine {
        Engine::with_provider(
            RouteProvider::synthetic(),
            point(40.7128, -74.006),
            ResetPolicy::RevertProfile,
        )
    }

    fn drain(events: &Receiver<TripEvent>) -> Vec<TripEvent> {
        std::iter::from_fn(|| events.try_recv().ok()).collect()
    }

    #[tokio::test]
    async fn late_subscriber_ends_on_current_state() {
        let engine = engine();

        for _ in 0..40 {
            engine.set_pickup(point(1.0, 1.0)).await.unwrap();
            engine.reset().await.unwrap();
        }
        engine.set_pickup(point(2.0, 2.0)).await.unwrap();

        let events = engine.subscribe().unwrap();
        let received = drain(&events);

        assert_eq!(received.len(), EVENT_BUFFER);
        match received.last() {
            Some(TripEvent::Updated { trip }) => {
                assert_eq!(trip.phase, Phase::AwaitingDropoff);
                assert_eq!(trip.pickup, Some(point(2.0, 2.0)));
            }
            other => panic!("unexpected last event {:?}", other),
        }
    }

    #[tokio::test]
    async fn slow_subscriber_keeps_newest_events() {
        let engine = engine();
        let events = engine.subscribe().unwrap();

        for i in 0..100 {
            engine.set_pickup(point(1.0, i as f64)).await.unwrap();
            engine.reset().await.unwrap();
        }
        engine.set_pickup(point(3.0, 3.0)).await.unwrap();

        match drain(&events).last() {
            Some(TripEvent::Updated { trip }) => assert_eq!(trip.pickup, Some(point(3.0, 3.0))),
            other => panic!("unexpected last event {:?}", other),
        }
    }

    #[test]
    fn single_subscriber() {
        let engine = engine();

        assert!(engine.subscribe().is_some());
        assert!(engine.subscribe().is_none());
    }

    #[tokio::test]
    async fn undrawable_route_raises_notice() {
        let engine = engine();
        let events = engine.subscribe().unwrap();
        let pickup = point(40.7128, -74.006);
        let dropoff = point(40.7228, -74.016);

        let view = {
            let mut state = engine.state.lock().await;
            state.session.set_pickup(pickup).unwrap();
            let request = state.session.request_dropoff(dropoff).unwrap();
            state.session.apply_route(
                request.id,
                RouteArtifact {
                    kind: RouteKind::Real,
                    profile: VehicleProfile::Car,
                    distance_meters: 1400.0,
                    duration_seconds: 170.0,
                    path: vec![pickup],
                },
            );
            engine.updated(&state)
        };

        assert_eq!(view.phase, Phase::RouteReady);
        assert!(view.route.unwrap().simplified);

        let notices: Vec<_> = drain(&events)
            .into_iter()
            .filter_map(|event| match event {
                TripEvent::Notice { notice } => Some(notice.message),
                _ => None,
            })
            .collect();

        assert_eq!(notices, vec!["Failed to display route, showing a straight line"]);
    }
}
