use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::entities::Coordinates;
use crate::error::{geolocation_timeout_error, geolocation_unavailable_error, Error};

#[derive(Clone, Debug)]
pub struct PositionOptions {
    pub timeout: Duration,
    pub maximum_age: chrono::Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            maximum_age: chrono::Duration::seconds(60),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub coordinates: Coordinates,
    pub timestamp: DateTime<Utc>,
}

impl Position {
    pub fn is_stale(&self, maximum_age: chrono::Duration) -> bool {
        Utc::now() - self.timestamp > maximum_age
    }
}

#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, Error>;
}

// no location capability, or access was denied
pub struct Unavailable;

#[async_trait]
impl PositionSource for Unavailable {
    async fn current_position(&self, _: &PositionOptions) -> Result<Position, Error> {
        Err(geolocation_unavailable_error())
    }
}

pub struct Reported(pub Option<Position>);

#[async_trait]
impl PositionSource for Reported {
    async fn current_position(&self, _: &PositionOptions) -> Result<Position, Error> {
        self.0.ok_or_else(geolocation_unavailable_error)
    }
}

#[tracing::instrument(skip(source))]
pub async fn locate(
    source: &dyn PositionSource,
    options: &PositionOptions,
) -> Result<Position, Error> {
    let fix = tokio::time::timeout(options.timeout, source.current_position(options));

    let position = match fix.await {
        Ok(result) => result?,
        Err(_) => {
            tracing::info!("no position fix within {:?}", options.timeout);
            return Err(geolocation_timeout_error());
        }
    };

    if position.is_stale(options.maximum_age) {
        tracing::info!(timestamp = %position.timestamp, "position fix is too old");
        return Err(geolocation_unavailable_error());
    }

    Ok(position)
}
