use crate::{
    config::RoutingConfig,
    entities::{Coordinates, RouteArtifact, VehicleProfile},
    error::Error,
    external::openrouteservice,
    routing::synthesize,
};

#[derive(Clone, Debug)]
pub struct RouteProvider {
    client: Option<openrouteservice::Client>,
}

impl RouteProvider {
    pub fn new(config: &RoutingConfig) -> Result<Self, Error> {
        let client = match &config.api_key {
            Some(key) if openrouteservice::Client::is_usable_key(key) => Some(
                openrouteservice::Client::new(&config.api_base, key.clone(), config.timeout)?,
            ),
            _ => {
                tracing::info!("no routing credential configured, routes will be synthesized");
                None
            }
        };

        Ok(Self { client })
    }

    pub fn synthetic() -> Self {
        Self { client: None }
    }

    pub fn is_remote(&self) -> bool {
        self.client.is_some()
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_route(
        &self,
        pickup: Coordinates,
        dropoff: Coordinates,
        profile: VehicleProfile,
    ) -> RouteArtifact {
        let client = match &self.client {
            Some(client) => client,
            None => return synthesize(pickup, dropoff, profile),
        };

        match client.directions(pickup, dropoff, profile).await {
            Ok(route) => {
                tracing::info!(
                    distance_meters = route.distance_meters,
                    duration_seconds = route.duration_seconds,
                    "route received"
                );
                route
            }
            Err(err) => {
                tracing::warn!(code = err.code, "{}, using synthetic route", err.message);
                synthesize(pickup, dropoff, profile)
            }
        }
    }
}

#[test]
fn placeholder_credential_means_offline() {
    use std::time::Duration;

    let config = RoutingConfig {
        api_key: Some(openrouteservice::PLACEHOLDER_API_KEY.into()),
        api_base: "https://api.openrouteservice.org".into(),
        timeout: Duration::from_secs(10),
    };

    let provider = RouteProvider::new(&config).unwrap();
    assert!(!provider.is_remote());

    let config = RoutingConfig {
        api_key: Some("a-real-looking-key".into()),
        ..config
    };

    let provider = RouteProvider::new(&config).unwrap();
    assert!(provider.is_remote());
}

#[test]
fn offline_provider_synthesizes() {
    use crate::entities::RouteKind;
    use tokio_test::block_on;

    let pickup = Coordinates::new(40.7128, -74.006).unwrap();
    let dropoff = Coordinates::new(40.7228, -74.016).unwrap();

    let provider = RouteProvider::synthetic();
    let route = block_on(provider.fetch_route(pickup, dropoff, VehicleProfile::Car));

    assert_eq!(route.kind, RouteKind::Synthetic);
    assert_eq!(route.path, vec![pickup, dropoff]);
}
