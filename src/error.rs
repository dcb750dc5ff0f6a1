use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};

pub const UNEXPECTED: i32 = 0;
pub const ENV_VAR: i32 = 1;
pub const CONFIG: i32 = 2;
pub const ROUTE_FETCH_FAILED: i32 = 3;
pub const ROUTE_DISPLAY_FAILED: i32 = 4;
pub const INVALID_PHASE_TRANSITION: i32 = 100;
pub const INVALID_INPUT: i32 = 101;
pub const GEOLOCATION_UNAVAILABLE: i32 = 102;
pub const GEOLOCATION_TIMEOUT: i32 = 103;

#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            0..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_phase_transition_error() -> Error {
    Error {
        code: INVALID_PHASE_TRANSITION,
        message: "invalid phase transition".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: INVALID_INPUT,
        message: "invalid input".into(),
    }
}

pub fn geolocation_unavailable_error() -> Error {
    Error {
        code: GEOLOCATION_UNAVAILABLE,
        message: "geolocation unavailable".into(),
    }
}

pub fn geolocation_timeout_error() -> Error {
    Error {
        code: GEOLOCATION_TIMEOUT,
        message: "geolocation timeout".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: ENV_VAR,
        message: "environment variable error".into(),
    }
}

pub fn config_error<T: Debug>(key: &str, _: T) -> Error {
    Error {
        code: CONFIG,
        message: format!("invalid value for {}", key),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    let message = if err.is_timeout() {
        "route fetch timed out".to_string()
    } else {
        format!("route fetch failed: {}", err)
    };

    Error {
        code: ROUTE_FETCH_FAILED,
        message,
    }
}

pub fn route_fetch_error(message: impl Into<String>) -> Error {
    Error {
        code: ROUTE_FETCH_FAILED,
        message: message.into(),
    }
}

pub fn route_display_error() -> Error {
    Error {
        code: ROUTE_DISPLAY_FAILED,
        message: "route display failed".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: UNEXPECTED,
        message: "unexpected error".into(),
    }
}

#[test]
fn client_errors_keep_their_message() {
    use axum::body::HttpBody;

    let response = invalid_phase_transition_error().into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut body = response.into_body();
    let bytes = tokio_test::block_on(body.data()).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(value["code"], INVALID_PHASE_TRANSITION);
    assert_eq!(value["error"], "invalid phase transition");
}

#[test]
fn internal_errors_are_masked() {
    let response = unexpected_error().into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = config_error("ROUTE_TIMEOUT_SECS", "x").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
