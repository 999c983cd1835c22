use crate::error::NormalizeError;
use crate::payload::*;
use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use entity::sea_orm_active_enums::EventAction;
use hookfeed_store::Event;
use hookfeed_store::timestamp::{parse as parse_rfc3339, to_storage_precision};
use serde::Deserialize;
use serde_json::Value;

const UNKNOWN_AUTHOR: &str = "Unknown";
const REF_PREFIXES: [&str; 2] = ["refs/heads/", "refs/tags/"];
const ZERO_SHA: &str = "0000000000000000000000000000000000000000";

/// Event types that produce a stored event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Push,
    PullRequest,
}

impl EventKind {
    pub fn from_header(event_type: &str) -> Option<Self> {
        match event_type.trim().to_ascii_lowercase().as_str() {
            "push" => Some(EventKind::Push),
            "pull_request" => Some(EventKind::PullRequest),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Push => "push",
            EventKind::PullRequest => "pull_request",
        }
    }
}

/// Turns a GitHub webhook body into an [`Event`].
///
/// `received_at` is used when the payload carries no usable timestamp. The
/// function does no I/O.
pub fn normalize(
    event_type: &str,
    payload: &Value,
    received_at: DateTime<Utc>,
) -> Result<Event, NormalizeError> {
    let kind = EventKind::from_header(event_type)
        .ok_or_else(|| NormalizeError::UnsupportedEvent(event_type.trim().to_string()))?;

    if !payload.is_object() {
        return Err(malformed(kind, "payload is not a JSON object"));
    }

    match kind {
        EventKind::Push => normalize_push(decode(kind, payload)?, received_at),
        EventKind::PullRequest => normalize_pull_request(decode(kind, payload)?, received_at),
    }
}

fn decode<'de, T: Deserialize<'de>>(kind: EventKind, payload: &'de Value) -> Result<T, NormalizeError> {
    T::deserialize(payload).map_err(|e| malformed(kind, e.to_string()))
}

fn normalize_push(payload: PushPayload, received_at: DateTime<Utc>) -> Result<Event, NormalizeError> {
    let kind = EventKind::Push;
    let PushPayload {
        git_ref,
        after,
        deleted,
        head_commit,
        commits,
        pusher,
        sender,
        repository,
    } = payload;

    let git_ref = present(git_ref).ok_or_else(|| malformed(kind, "missing ref"))?;
    let branch = branch_name(&git_ref);
    if branch.is_empty() {
        return Err(malformed(kind, format!("ref {git_ref:?} names no branch")));
    }

    // Deleting a ref has no head commit and nothing to replay
    if deleted == Some(true) || after.as_deref() == Some(ZERO_SHA) {
        return Err(NormalizeError::BranchDeleted(branch.to_string()));
    }

    let head_commit = head_commit.unwrap_or_default();
    let request_id = present(head_commit.id)
        .or_else(|| present(after))
        .ok_or_else(|| malformed(kind, "missing head_commit.id and after"))?;

    let pusher = pusher.unwrap_or_default();
    let author = present(pusher.name)
        .or_else(|| present(pusher.username))
        .or_else(|| sender.and_then(|s| present(s.login)))
        .or_else(|| {
            commits
                .unwrap_or_default()
                .into_iter()
                .next()
                .and_then(|c| c.author)
                .and_then(|a| present(a.name))
        })
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

    let timestamp = match present(head_commit.timestamp) {
        Some(raw) => parse_payload_timestamp(kind, "head_commit.timestamp", &raw)?,
        None => match repository.and_then(|r| r.pushed_at) {
            Some(PushedAt::Epoch(secs)) => DateTime::from_timestamp(secs, 0).ok_or_else(|| {
                malformed(kind, format!("repository.pushed_at out of range: {secs}"))
            })?,
            Some(PushedAt::Text(raw)) if !raw.trim().is_empty() => {
                parse_payload_timestamp(kind, "repository.pushed_at", &raw)?
            }
            _ => received_at,
        },
    };
    let timestamp = within_rfc3339_range(kind, timestamp)?;

    Ok(Event {
        request_id,
        author,
        action: EventAction::Push,
        from_branch: branch.to_string(),
        to_branch: branch.to_string(),
        timestamp: to_storage_precision(timestamp),
    })
}

fn normalize_pull_request(
    payload: PullRequestPayload,
    received_at: DateTime<Utc>,
) -> Result<Event, NormalizeError> {
    let kind = EventKind::PullRequest;
    let PullRequestPayload {
        number,
        pull_request,
        sender,
    } = payload;

    let pr = pull_request.ok_or_else(|| malformed(kind, "missing pull_request"))?;
    let number = number
        .or(pr.number)
        .ok_or_else(|| malformed(kind, "missing pull request number"))?;

    let from_branch = pr
        .head
        .and_then(|h| present(h.git_ref))
        .ok_or_else(|| malformed(kind, "missing pull_request.head.ref"))?;
    let to_branch = pr
        .base
        .and_then(|b| present(b.git_ref))
        .ok_or_else(|| malformed(kind, "missing pull_request.base.ref"))?;

    let submitter = pr
        .user
        .and_then(|u| present(u.login))
        .or_else(|| sender.and_then(|s| present(s.login)));

    let (action, author, raw_timestamp) = if pr.merged == Some(true) {
        let merger = pr.merged_by.and_then(|u| present(u.login));
        let raw = present(pr.merged_at)
            .map(|v| ("pull_request.merged_at", v))
            .or_else(|| present(pr.updated_at).map(|v| ("pull_request.updated_at", v)));
        (EventAction::Merge, merger.or(submitter), raw)
    } else {
        let raw = present(pr.updated_at)
            .map(|v| ("pull_request.updated_at", v))
            .or_else(|| present(pr.created_at).map(|v| ("pull_request.created_at", v)));
        (EventAction::PullRequest, submitter, raw)
    };

    let timestamp = match raw_timestamp {
        Some((field, raw)) => parse_payload_timestamp(kind, field, &raw)?,
        None => received_at,
    };
    let timestamp = within_rfc3339_range(kind, timestamp)?;

    Ok(Event {
        request_id: number.to_string(),
        author: author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        action,
        from_branch,
        to_branch,
        timestamp: to_storage_precision(timestamp),
    })
}

/// `refs/heads/main` -> `main`. Refs outside the known namespaces pass through.
pub fn branch_name(git_ref: &str) -> &str {
    REF_PREFIXES
        .iter()
        .find_map(|prefix| git_ref.strip_prefix(prefix))
        .unwrap_or(git_ref)
}

/// Offsets are converted to UTC. Timestamps without an offset are taken as UTC.
fn parse_payload_timestamp(
    kind: EventKind,
    field: &str,
    raw: &str,
) -> Result<DateTime<Utc>, NormalizeError> {
    let raw = raw.trim();

    if let Ok(ts) = parse_rfc3339(raw) {
        return Ok(ts);
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| malformed(kind, format!("{field} is not an ISO-8601 timestamp: {raw:?}")))
}

/// Stored timestamps double as `since` cursors, which only accept four digit years.
fn within_rfc3339_range(
    kind: EventKind,
    timestamp: DateTime<Utc>,
) -> Result<DateTime<Utc>, NormalizeError> {
    if (0..=9999).contains(&timestamp.year()) {
        Ok(timestamp)
    } else {
        Err(malformed(
            kind,
            format!("timestamp {timestamp} is outside years 0000-9999"),
        ))
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn malformed(kind: EventKind, detail: impl Into<String>) -> NormalizeError {
    NormalizeError::MalformedPayload {
        event_type: kind.as_str(),
        detail: detail.into(),
    }
}
