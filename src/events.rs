use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::display::TripView;

pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub dismiss_after: Duration,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            dismiss_after: NOTICE_TTL,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum TripEvent {
    Updated { trip: TripView },
    Notice { notice: Notice },
}
