use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use bookerBot::clients::booking_client::{ClientError, CreateOutcome};
use bookerBot::models::event::{ConflictingEvent, CreatedEvent, EventDetails, EventDraft, Room};
use bookerBot::models::health::HealthStatus;
use bookerBot::service::booking_service::BookingApi;
use bookerBot::service::form_options::FormOptions;
use bookerBot::service::host_list::HostEmailSet;
use bookerBot::service::submit_flow::{
    self, SubmissionHandler, SubmitError, SubmitOutcome, SubmitState,
};
use bookerBot::service::time_range::TimeRange;

enum CreateScript {
    Created { event_id: &'static str },
    Conflicts(Vec<ConflictingEvent>),
    Rejected { detail: Option<String> },
    Transport,
}

struct FakeBookingApi {
    create_script: CreateScript,
    detail_response: Result<Option<String>, String>,
    create_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl FakeBookingApi {
    fn new(create_script: CreateScript, detail_response: Result<Option<String>, String>) -> Self {
        Self {
            create_script,
            detail_response,
            create_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl BookingApi for FakeBookingApi {
    async fn locations(&self) -> Result<Vec<Room>, ClientError> {
        Ok(Vec::new())
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        Ok(HealthStatus::default())
    }

    async fn create_event(&self, _draft: &EventDraft) -> Result<CreateOutcome, ClientError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        match &self.create_script {
            CreateScript::Created { event_id } => Ok(CreateOutcome::Created(CreatedEvent {
                event_id: event_id.to_string(),
                message: None,
            })),
            CreateScript::Conflicts(conflicts) => Ok(CreateOutcome::Conflict(conflicts.clone())),
            CreateScript::Rejected { detail } => Ok(CreateOutcome::Rejected {
                status: 422,
                detail: detail.clone(),
            }),
            CreateScript::Transport => Err("connection refused".to_string().into()),
        }
    }

    async fn event_details(&self, _event_id: &str) -> Result<EventDetails, ClientError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        match &self.detail_response {
            Ok(url) => Ok(EventDetails {
                url: url.clone(),
                name: None,
            }),
            Err(err) => Err(err.clone().into()),
        }
    }
}

fn hosts_with(emails: &[&str]) -> HostEmailSet {
    let mut hosts = HostEmailSet::new();
    for email in emails {
        hosts.add(email).expect("test emails should be valid");
    }
    hosts
}

fn draft_with(hosts: &HostEmailSet) -> EventDraft {
    let range = TimeRange {
        start: Utc.with_ymd_and_hms(2026, 9, 1, 18, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2026, 9, 1, 19, 0, 0).unwrap(),
    };
    submit_flow::build_draft(
        &FormOptions::rich(),
        "Demo night",
        Some("Social"),
        range,
        "Willow",
        hosts,
        "",
    )
}

#[tokio::test]
async fn successful_create_with_detail_url_renders_link() {
    let api = FakeBookingApi::new(
        CreateScript::Created { event_id: "evt_42" },
        Ok(Some("https://lu.ma/evt_42".to_string())),
    );
    let hosts = hosts_with(&["host@example.com"]);
    let mut handler = SubmissionHandler::new();

    let outcome = handler
        .submit(&api, &FormOptions::rich(), &draft_with(&hosts), &hosts)
        .await
        .unwrap();

    assert_eq!(api.detail_calls.load(Ordering::SeqCst), 1);
    assert!(outcome.is_success());
    let rendered = submit_flow::render_outcome(&outcome, chrono_tz::UTC);
    assert!(rendered.contains("https://lu.ma/evt_42"));
    assert!(rendered.contains(submit_flow::SUCCESS_MESSAGE));
}

#[tokio::test]
async fn failed_detail_fetch_degrades_to_plain_success() {
    let api = FakeBookingApi::new(
        CreateScript::Created { event_id: "evt_42" },
        Err("detail unavailable".to_string()),
    );
    let hosts = hosts_with(&["host@example.com"]);
    let mut handler = SubmissionHandler::new();

    let outcome = handler
        .submit(&api, &FormOptions::rich(), &draft_with(&hosts), &hosts)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Success {
            event_id: "evt_42".to_string(),
            url: None,
        }
    );
    let rendered = submit_flow::render_outcome(&outcome, chrono_tz::UTC);
    assert_eq!(rendered, submit_flow::SUCCESS_MESSAGE);
    assert!(!rendered.contains("http"));
}

#[tokio::test]
async fn conflict_response_renders_one_bullet_per_booking() {
    let conflicts = vec![
        ConflictingEvent {
            name: "Daily Standup".to_string(),
            start_time: Utc.with_ymd_and_hms(2026, 9, 1, 17, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2026, 9, 1, 17, 30, 0).unwrap(),
        },
        ConflictingEvent {
            name: "Team Lunch".to_string(),
            start_time: Utc.with_ymd_and_hms(2026, 9, 1, 19, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2026, 9, 1, 20, 0, 0).unwrap(),
        },
    ];
    let api = FakeBookingApi::new(CreateScript::Conflicts(conflicts), Ok(None));
    let hosts = hosts_with(&["host@example.com"]);
    let mut handler = SubmissionHandler::new();

    let outcome = handler
        .submit(&api, &FormOptions::rich(), &draft_with(&hosts), &hosts)
        .await
        .unwrap();

    let rendered = submit_flow::render_outcome(&outcome, chrono_tz::UTC);
    let bullets: Vec<&str> = rendered.lines().filter(|l| l.starts_with('•')).collect();
    assert_eq!(bullets.len(), 2);
    assert!(bullets[0].contains("Daily Standup"));
    assert!(bullets[1].contains("Team Lunch"));
    // No detail fetch on a conflict.
    assert_eq!(api.detail_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn transport_failure_shows_fixed_message_and_reenables_submission() {
    let api = FakeBookingApi::new(CreateScript::Transport, Ok(None));
    let hosts = hosts_with(&["host@example.com"]);
    let mut handler = SubmissionHandler::new();

    let outcome = handler
        .submit(&api, &FormOptions::rich(), &draft_with(&hosts), &hosts)
        .await
        .unwrap();

    assert_eq!(outcome, SubmitOutcome::ConnectionFailed);
    assert_eq!(
        submit_flow::render_outcome(&outcome, chrono_tz::UTC),
        submit_flow::CONNECT_ERROR_MESSAGE
    );
    assert_eq!(handler.state(), SubmitState::Idle);
}

#[tokio::test]
async fn empty_host_set_blocks_submission_before_the_network() {
    let api = FakeBookingApi::new(CreateScript::Created { event_id: "evt_1" }, Ok(None));
    let hosts = HostEmailSet::new();
    let mut handler = SubmissionHandler::new();

    let result = handler
        .submit(&api, &FormOptions::rich(), &draft_with(&hosts), &hosts)
        .await;

    assert_eq!(result, Err(SubmitError::NoHostEmails));
    assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
    assert_eq!(handler.state(), SubmitState::Idle);
}

#[tokio::test]
async fn plain_variant_does_not_require_a_host_list() {
    let api = FakeBookingApi::new(CreateScript::Created { event_id: "evt_1" }, Ok(None));
    let hosts = hosts_with(&["host@example.com"]);
    let mut handler = SubmissionHandler::new();

    let outcome = handler
        .submit(&api, &FormOptions::plain(), &draft_with(&hosts), &hosts)
        .await
        .unwrap();
    assert!(outcome.is_success());
}

#[tokio::test]
async fn server_rejection_surfaces_the_detail_message() {
    let api = FakeBookingApi::new(
        CreateScript::Rejected {
            detail: Some("Event name is required".to_string()),
        },
        Ok(None),
    );
    let hosts = hosts_with(&["host@example.com"]);
    let mut handler = SubmissionHandler::new();

    let outcome = handler
        .submit(&api, &FormOptions::rich(), &draft_with(&hosts), &hosts)
        .await
        .unwrap();

    assert_eq!(
        submit_flow::render_outcome(&outcome, chrono_tz::UTC),
        "Event name is required"
    );
}
