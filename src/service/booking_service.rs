use async_trait::async_trait;

use crate::clients::booking_client::{self, ClientError, CreateOutcome};
use crate::models::event::{EventDetails, EventDraft, Room};
use crate::models::health::HealthStatus;

/// Seam over the booking service endpoints so flows can run against a
/// fake in tests.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn locations(&self) -> Result<Vec<Room>, ClientError>;
    async fn health(&self) -> Result<HealthStatus, ClientError>;
    async fn create_event(&self, draft: &EventDraft) -> Result<CreateOutcome, ClientError>;
    async fn event_details(&self, event_id: &str) -> Result<EventDetails, ClientError>;
}

pub struct BookingService {
    base_url: String,
}

impl BookingService {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }
}

#[async_trait]
impl BookingApi for BookingService {
    async fn locations(&self) -> Result<Vec<Room>, ClientError> {
        booking_client::fetch_locations(&self.base_url).await
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        booking_client::fetch_health(&self.base_url).await
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<CreateOutcome, ClientError> {
        booking_client::create_event(&self.base_url, draft).await
    }

    async fn event_details(&self, event_id: &str) -> Result<EventDetails, ClientError> {
        booking_client::fetch_event_details(&self.base_url, event_id).await
    }
}
