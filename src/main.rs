use futures::StreamExt;

use minicab::config::Config;
use minicab::engine::Engine;
use minicab::events::TripEvent;
use minicab::server::serve;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("failed to load configuration: {}", err);
            std::process::exit(1);
        }
    };

    let engine = match Engine::new(&config) {
        Ok(engine) => engine,
        Err(err) => {
            tracing::error!("failed to start engine: {}", err);
            std::process::exit(1);
        }
    };

    if let Some(mut events) = engine.subscribe() {
        tokio::spawn(async move {
            while let Some(event) = events.next().await {
                match event {
                    TripEvent::Updated { trip } => match &trip.summary {
                        Some(summary) => tracing::info!(
                            phase = ?trip.phase,
                            "{} | {} | {}",
                            summary.distance,
                            summary.eta,
                            summary.fare
                        ),
                        None => tracing::info!(
                            phase = ?trip.phase,
                            "pickup: {} | dropoff: {}",
                            trip.pickup_label,
                            trip.dropoff_label
                        ),
                    },
                    TripEvent::Notice { notice } => tracing::warn!("{}", notice.message),
                }
            }
        });
    }

    if let Err(err) = serve(engine, config.server_addr).await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}
