use crate::models::health::HealthStatus;
use crate::service::booking_service::BookingApi;

pub const DEBUG_BANNER: &str = "🔧 Running in debug mode with mock data";
pub const DEGRADED_BANNER: &str =
    "⚠ Booking service integrations are degraded; event creation may fail";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Hidden,
    DebugMode,
    Degraded,
}

impl Banner {
    pub fn from_status(status: &HealthStatus) -> Banner {
        if status.debug_mode {
            Banner::DebugMode
        } else if !status.integrations.luma {
            Banner::Degraded
        } else {
            Banner::Hidden
        }
    }

    /// One health read per run. A failed read counts as degraded rather
    /// than healthy.
    pub async fn check(api: &dyn BookingApi) -> Banner {
        match api.health().await {
            Ok(status) => Banner::from_status(&status),
            Err(_) => Banner::Degraded,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Banner::Hidden => None,
            Banner::DebugMode => Some(DEBUG_BANNER),
            Banner::Degraded => Some(DEGRADED_BANNER),
        }
    }
}
