use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Coordinates, RouteArtifact, VehicleProfile};
use crate::error::{invalid_phase_transition_error, Error};
use crate::fare::compute_fare;
use crate::routing::RouteProvider;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    AwaitingPickup,
    AwaitingDropoff,
    RouteReady,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    #[default]
    RevertProfile,
    KeepProfile,
}

// Only the most recent request may be applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteRequest {
    pub id: u64,
    pub pickup: Coordinates,
    pub dropoff: Coordinates,
    pub profile: VehicleProfile,
}

#[derive(Clone, Debug)]
pub struct TripSession {
    pub id: Uuid,
    phase: Phase,
    profile: VehicleProfile,
    pickup: Option<Coordinates>,
    dropoff: Option<Coordinates>,
    current_route: Option<RouteArtifact>,
    pending: Option<Pending>,
    last_request_id: u64,
    reset_policy: ResetPolicy,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    id: u64,
    dropoff: Coordinates,
}

impl Default for TripSession {
    fn default() -> Self {
        Self::new(VehicleProfile::default())
    }
}

impl TripSession {
    pub fn new(profile: VehicleProfile) -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: Phase::AwaitingPickup,
            profile,
            pickup: None,
            dropoff: None,
            current_route: None,
            pending: None,
            last_request_id: 0,
            reset_policy: ResetPolicy::default(),
        }
    }

    pub fn with_reset_policy(mut self, reset_policy: ResetPolicy) -> Self {
        self.reset_policy = reset_policy;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn profile(&self) -> VehicleProfile {
        self.profile
    }

    pub fn pickup(&self) -> Option<Coordinates> {
        self.pickup
    }

    pub fn dropoff(&self) -> Option<Coordinates> {
        self.dropoff
    }

    pub fn current_route(&self) -> Option<&RouteArtifact> {
        self.current_route.as_ref()
    }

    pub fn is_routing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn current_fare(&self) -> Option<u64> {
        match (self.phase, &self.current_route) {
            (Phase::RouteReady, Some(route)) => {
                Some(compute_fare(route.distance_km(), self.profile))
            }
            _ => None,
        }
    }

    #[tracing::instrument(skip(self), fields(trip_id = %self.id))]
    pub fn set_pickup(&mut self, pickup: Coordinates) -> Result<(), Error> {
        if self.phase != Phase::AwaitingPickup {
            return Err(invalid_phase_transition_error());
        }

        self.pickup = Some(pickup);
        self.phase = Phase::AwaitingDropoff;

        Ok(())
    }

    // the phase stays AwaitingDropoff until the route is applied
    #[tracing::instrument(skip(self), fields(trip_id = %self.id))]
    pub fn request_dropoff(&mut self, dropoff: Coordinates) -> Result<RouteRequest, Error> {
        let pickup = match (self.phase, self.pickup, &self.pending) {
            (Phase::AwaitingDropoff, Some(pickup), None) => pickup,
            _ => return Err(invalid_phase_transition_error()),
        };

        Ok(self.issue(pickup, dropoff))
    }

    #[tracing::instrument(skip(self), fields(trip_id = %self.id))]
    pub fn request_profile(&mut self, profile: VehicleProfile) -> Option<RouteRequest> {
        self.profile = profile;

        let dropoff = self
            .pending
            .map(|pending| pending.dropoff)
            .or(self.dropoff)?;
        let pickup = self.pickup?;

        Some(self.issue(pickup, dropoff))
    }

    /// Applies a route if it answers the latest request. Stale results are
    /// dropped and `false` is returned.
    #[tracing::instrument(skip(self, route), fields(trip_id = %self.id))]
    pub fn apply_route(&mut self, request_id: u64, route: RouteArtifact) -> bool {
        let pending = match self.pending {
            Some(pending) if pending.id == request_id => pending,
            _ => {
                tracing::debug!(request_id, "discarding stale route");
                return false;
            }
        };

        self.pending = None;
        self.dropoff = Some(pending.dropoff);
        self.current_route = Some(route);
        self.phase = Phase::RouteReady;

        true
    }

    #[tracing::instrument(skip(self), fields(trip_id = %self.id))]
    pub fn reset(&mut self) {
        self.id = Uuid::new_v4();
        self.phase = Phase::AwaitingPickup;
        self.pickup = None;
        self.dropoff = None;
        self.current_route = None;
        self.pending = None;

        if self.reset_policy == ResetPolicy::RevertProfile {
            self.profile = VehicleProfile::default();
        }
    }

    pub async fn set_dropoff(
        &mut self,
        dropoff: Coordinates,
        provider: &RouteProvider,
    ) -> Result<(), Error> {
        let request = self.request_dropoff(dropoff)?;
        self.run(request, provider).await;

        Ok(())
    }

    pub async fn set_profile(&mut self, profile: VehicleProfile, provider: &RouteProvider) {
        if let Some(request) = self.request_profile(profile) {
            self.run(request, provider).await;
        }
    }

    async fn run(&mut self, request: RouteRequest, provider: &RouteProvider) {
        let route = provider
            .fetch_route(request.pickup, request.dropoff, request.profile)
            .await;
        self.apply_route(request.id, route);
    }

    fn issue(&mut self, pickup: Coordinates, dropoff: Coordinates) -> RouteRequest {
        self.last_request_id += 1;

        self.pending = Some(Pending {
            id: self.last_request_id,
            dropoff,
        });

        RouteRequest {
            id: self.last_request_id,
            pickup,
            dropoff,
            profile: self.profile,
        }
    }
}
