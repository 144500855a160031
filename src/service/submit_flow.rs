use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::clients::booking_client::CreateOutcome;
use crate::models::event::{ConflictingEvent, EventDraft};
use crate::service::booking_service::BookingApi;
use crate::service::form_options::FormOptions;
use crate::service::host_list::HostEmailSet;
use crate::service::time_range::TimeRange;

pub const SUCCESS_MESSAGE: &str = "Event created successfully!";
pub const SHARE_NOTE: &str = "Share this link with attendees so they can register.";
pub const CONFLICT_HEADER: &str = "Cannot create event due to conflicts:";
pub const SLOT_TAKEN_MESSAGE: &str = "Time slot is already booked";
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to create event";
pub const CONNECT_ERROR_MESSAGE: &str = "Error: Could not connect to the server";
pub const NO_HOSTS_MESSAGE: &str = "Add at least one host email before submitting";
pub const TITLE_SEPARATOR: &str = " - ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    AlreadySubmitting,
    NoHostEmails,
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::AlreadySubmitting => write!(f, "A submission is already in progress"),
            SubmitError::NoHostEmails => write!(f, "{}", NO_HOSTS_MESSAGE),
        }
    }
}

impl std::error::Error for SubmitError {}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Success {
        event_id: String,
        url: Option<String>,
    },
    Conflict {
        conflicts: Vec<ConflictingEvent>,
    },
    Rejected {
        detail: Option<String>,
    },
    ConnectionFailed,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Success { .. })
    }
}

/// Builds the request body from the live form state. With title
/// composition on, the free-text name and the selected category join with
/// a fixed separator; empty optionals are left out of the body.
pub fn build_draft(
    options: &FormOptions,
    name: &str,
    category: Option<&str>,
    range: TimeRange,
    location: &str,
    hosts: &HostEmailSet,
    description: &str,
) -> EventDraft {
    let name = match category {
        Some(category) if options.compose_title => {
            format!("{}{}{}", name.trim(), TITLE_SEPARATOR, category)
        }
        _ => name.trim().to_string(),
    };

    let description = description.trim();
    let additional = hosts.additional();

    EventDraft {
        name,
        start_time: range.start,
        end_time: range.end,
        location: location.to_string(),
        host_email: hosts.primary().unwrap_or_default().to_string(),
        additional_hosts: if additional.is_empty() {
            None
        } else {
            Some(additional.to_vec())
        },
        description: if description.is_empty() {
            None
        } else {
            Some(description.to_string())
        },
    }
}

/// Drives one submission through idle -> submitting -> terminal and back
/// to idle, so the next attempt is always possible after any outcome.
pub struct SubmissionHandler {
    state: SubmitState,
}

impl Default for SubmissionHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionHandler {
    pub fn new() -> Self {
        Self {
            state: SubmitState::Idle,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// Posts the draft and, on success, follows up with the detail fetch
    /// for a shareable URL. The detail fetch failing is non-fatal: the
    /// outcome is still a success, just without the link. The host guard
    /// runs before anything touches the network.
    pub async fn submit(
        &mut self,
        api: &dyn BookingApi,
        options: &FormOptions,
        draft: &EventDraft,
        hosts: &HostEmailSet,
    ) -> Result<SubmitOutcome, SubmitError> {
        if self.state != SubmitState::Idle {
            return Err(SubmitError::AlreadySubmitting);
        }
        if options.collect_hosts && hosts.is_empty() {
            return Err(SubmitError::NoHostEmails);
        }

        self.state = SubmitState::Submitting;
        let outcome = match api.create_event(draft).await {
            Ok(CreateOutcome::Created(created)) => {
                let url = match api.event_details(&created.event_id).await {
                    Ok(details) => details.url,
                    Err(_) => None,
                };
                SubmitOutcome::Success {
                    event_id: created.event_id,
                    url,
                }
            }
            Ok(CreateOutcome::Conflict(conflicts)) => SubmitOutcome::Conflict { conflicts },
            Ok(CreateOutcome::Rejected { detail, .. }) => SubmitOutcome::Rejected { detail },
            Err(_) => SubmitOutcome::ConnectionFailed,
        };
        self.state = SubmitState::Idle;
        Ok(outcome)
    }
}

fn format_local_time(t: DateTime<Utc>, tz: Tz) -> String {
    t.with_timezone(&tz).format("%-I:%M %p").to_string()
}

/// The terminal's result panel.
pub fn render_outcome(outcome: &SubmitOutcome, tz: Tz) -> String {
    match outcome {
        SubmitOutcome::Success { url: Some(url), .. } => format!(
            "{}\nView your event: {}\n{}",
            SUCCESS_MESSAGE, url, SHARE_NOTE
        ),
        SubmitOutcome::Success { url: None, .. } => SUCCESS_MESSAGE.to_string(),
        SubmitOutcome::Conflict { conflicts } if conflicts.is_empty() => {
            format!("{}\n{}", CONFLICT_HEADER, SLOT_TAKEN_MESSAGE)
        }
        SubmitOutcome::Conflict { conflicts } => {
            let lines: Vec<String> = conflicts
                .iter()
                .map(|conflict| {
                    format!(
                        "• {} ({} - {})",
                        conflict.name,
                        format_local_time(conflict.start_time, tz),
                        format_local_time(conflict.end_time, tz)
                    )
                })
                .collect();
            format!("{}\n{}", CONFLICT_HEADER, lines.join("\n"))
        }
        SubmitOutcome::Rejected { detail } => detail
            .clone()
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
        SubmitOutcome::ConnectionFailed => CONNECT_ERROR_MESSAGE.to_string(),
    }
}
