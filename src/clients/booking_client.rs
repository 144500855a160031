use reqwest;
use serde_json;

use crate::models::event::{
    ConflictingEvent, CreatedEvent, ErrorBody, EventDetails, EventDraft, Room, RoomRecord,
};
use crate::models::health::HealthStatus;

pub type ClientError = Box<dyn std::error::Error + Send + Sync>;

/// What the booking service said about a create request. Transport and
/// body-parse failures surface as `Err`; everything the server actually
/// answered, including rejections, is an `Ok` variant.
#[derive(Debug)]
pub enum CreateOutcome {
    Created(CreatedEvent),
    Conflict(Vec<ConflictingEvent>),
    Rejected { status: u16, detail: Option<String> },
}

pub async fn fetch_locations(base_url: &str) -> Result<Vec<Room>, ClientError> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/locations", base_url))
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?; // read the body once
    if !status.is_success() {
        return Err(format!("Request failed with status {}", status).into());
    }

    let records: Vec<RoomRecord> = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse JSON: {}\nRaw body: {}", e, text))?;
    Ok(records.into_iter().map(Room::from).collect())
}

pub async fn fetch_health(base_url: &str) -> Result<HealthStatus, ClientError> {
    let client = reqwest::Client::new();
    let response = client.get(format!("{}/health", base_url)).send().await?;

    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(format!("Request failed with status {}", status).into());
    }

    let health: HealthStatus = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse JSON: {}\nRaw body: {}", e, text))?;
    Ok(health)
}

pub async fn create_event(
    base_url: &str,
    draft: &EventDraft,
) -> Result<CreateOutcome, ClientError> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/events/create", base_url))
        .header("Content-Type", "application/json")
        .json(draft)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if status.is_success() {
        let created: CreatedEvent = serde_json::from_str(&text)
            .map_err(|e| format!("Failed to parse JSON: {}\nRaw body: {}", e, text))?;
        return Ok(CreateOutcome::Created(created));
    }

    if status == reqwest::StatusCode::CONFLICT {
        return Ok(CreateOutcome::Conflict(parse_conflicts(&text)));
    }

    let detail = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.detail);
    Ok(CreateOutcome::Rejected {
        status: status.as_u16(),
        detail,
    })
}

pub async fn fetch_event_details(
    base_url: &str,
    event_id: &str,
) -> Result<EventDetails, ClientError> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/events/{}", base_url, event_id))
        .header("Content-Type", "application/json")
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(format!("Request failed with status {}", status).into());
    }

    let details: EventDetails = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse JSON: {}\nRaw body: {}", e, text))?;
    Ok(details)
}

// 409 bodies vary: `{"conflicts": [...]}` from newer deployments, or the
// list nested under FastAPI's `detail` key, or a plain detail string with
// no list at all. Anything unreadable is treated as an empty list; the
// caller still renders the generic slot-taken message.
fn parse_conflicts(body: &str) -> Vec<ConflictingEvent> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return Vec::new(),
    };
    let list = value
        .get("conflicts")
        .or_else(|| value.get("detail").and_then(|detail| detail.get("conflicts")));
    match list {
        Some(list) => serde_json::from_value(list.clone()).unwrap_or_default(),
        None => Vec::new(),
    }
}
