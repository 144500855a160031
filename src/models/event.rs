use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// The /locations endpoint is inconsistent across deployments: some return
// full room records, older ones return bare room names. Both shapes are
// accepted on the wire and normalized to `Room`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RoomRecord {
    Detailed {
        name: String,
        #[serde(default)]
        building: String,
        #[serde(default)]
        description: String,
    },
    Bare(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: String,
    pub building: String,
    pub description: String,
}

impl From<RoomRecord> for Room {
    fn from(record: RoomRecord) -> Self {
        match record {
            RoomRecord::Detailed {
                name,
                building,
                description,
            } => Room {
                name,
                building,
                description,
            },
            RoomRecord::Bare(name) => Room {
                name,
                building: String::new(),
                description: String::new(),
            },
        }
    }
}

/// One booking request, built at submit time and dropped afterwards.
/// Optional fields that are empty are omitted from the body entirely
/// rather than sent as empty strings.
#[derive(Debug, Clone, Serialize)]
pub struct EventDraft {
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub host_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_hosts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatedEvent {
    pub event_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConflictingEvent {
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventDetails {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}
