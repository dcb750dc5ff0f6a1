mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{position, trip};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/trip", get(trip::find))
        .route("/trip/pickup", post(trip::set_pickup))
        .route("/trip/dropoff", post(trip::set_dropoff))
        .route("/trip/profile", patch(trip::set_profile))
        .route("/trip/reset", post(trip::reset))
        .route("/trip/position", post(position::report))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!("server error: {}", err);
            unexpected_error()
        })
}
