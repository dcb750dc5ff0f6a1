pub mod api;
pub mod config;
pub mod display;
pub mod engine;
pub mod entities;
pub mod error;
pub mod events;
pub mod external;
pub mod fare;
pub mod geo;
pub mod geolocation;
pub mod routing;
pub mod server;
