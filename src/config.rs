use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::entities::{Coordinates, ResetPolicy};
use crate::error::{config_error, Error};

pub const DEFAULT_API_BASE: &str = "https://api.openrouteservice.org";
pub const DEFAULT_ROUTE_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct RoutingConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.into(),
            timeout: Duration::from_secs(DEFAULT_ROUTE_TIMEOUT_SECS),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub routing: RoutingConfig,
    pub server_addr: SocketAddr,
    pub default_location: Coordinates,
    pub reset_policy: ResetPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let routing = RoutingConfig {
            api_key: env::var("ORS_API_KEY").ok(),
            api_base: env::var("ORS_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into()),
            timeout: Duration::from_secs(parse_or(
                "ROUTE_TIMEOUT_SECS",
                DEFAULT_ROUTE_TIMEOUT_SECS,
            )?),
        };

        let default_location = Coordinates::new(
            parse_or("DEFAULT_LATITUDE", 40.7128)?,
            parse_or("DEFAULT_LONGITUDE", -74.0060)?,
        )
        .map_err(|err| config_error("DEFAULT_LATITUDE/DEFAULT_LONGITUDE", err))?;

        let reset_policy = match parse_or("KEEP_PROFILE_ON_RESET", false)? {
            true => ResetPolicy::KeepProfile,
            false => ResetPolicy::RevertProfile,
        };

        Ok(Self {
            routing,
            server_addr: parse_or("SERVER_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?,
            default_location,
            reset_policy,
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::fmt::Debug,
{
    match env::var(key) {
        Ok(value) => value.trim().parse().map_err(|err| config_error(key, err)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err.into()),
    }
}

#[test]
fn parse_or_falls_back_and_validates() {
    env::remove_var("MINICAB_TEST_UNSET");
    assert_eq!(parse_or("MINICAB_TEST_UNSET", 7u64).unwrap(), 7);

    env::set_var("MINICAB_TEST_TIMEOUT", " 8 ");
    assert_eq!(parse_or("MINICAB_TEST_TIMEOUT", 10u64).unwrap(), 8);

    env::set_var("MINICAB_TEST_BAD", "soon");
    let err = parse_or("MINICAB_TEST_BAD", 10u64).unwrap_err();
    assert_eq!(err.code, crate::error::CONFIG);
}
