//! The subset of GitHub webhook payloads the normalizer reads.
//!
//! Every field is optional so a missing field surfaces as a targeted
//! `MalformedPayload` from the normalizer instead of a generic serde error.
//! A field present with the wrong JSON type still fails deserialization.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct PushPayload {
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub after: Option<String>,
    pub deleted: Option<bool>,
    pub head_commit: Option<Commit>,
    pub commits: Option<Vec<Commit>>,
    pub pusher: Option<Pusher>,
    pub sender: Option<Account>,
    pub repository: Option<Repository>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Commit {
    pub id: Option<String>,
    pub timestamp: Option<String>,
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommitAuthor {
    pub name: Option<String>,
}

/// GitHub sends `name`; Gitea-compatible senders use `username`.
#[derive(Debug, Default, Deserialize)]
pub struct Pusher {
    pub name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Account {
    pub login: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Repository {
    pub pushed_at: Option<PushedAt>,
}

/// Push payloads carry `repository.pushed_at` as Unix seconds; other events
/// use an ISO-8601 string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PushedAt {
    Epoch(i64),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
pub struct PullRequestPayload {
    pub number: Option<u64>,
    pub pull_request: Option<PullRequest>,
    pub sender: Option<Account>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PullRequest {
    pub number: Option<u64>,
    pub user: Option<Account>,
    pub merged: Option<bool>,
    pub merged_by: Option<Account>,
    pub head: Option<BranchRef>,
    pub base: Option<BranchRef>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub merged_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
}
