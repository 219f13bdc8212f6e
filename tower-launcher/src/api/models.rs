use std::fmt::{self, Display};

use serde::Deserialize;
use serde_json::Value;

/// Renders the `detail` field the API uses to explain a rejected request.
/// It is usually a string but some endpoints return a list or an object.
pub fn detail_to_string(detail: &Value) -> String {
    match detail {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Response of the job template launch endpoint.
///
/// Every field is optional because the same endpoint answers with `detail` alone
/// when the launch is refused.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct LaunchResponse {
    #[serde(default)]
    pub job: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub detail: Option<Value>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct JobRelated {
    #[serde(default)]
    pub stdout: Option<String>,
}

/// Response of the job detail endpoint, as returned by the server.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct JobStatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub related: Option<JobRelated>,
    #[serde(default)]
    pub result_traceback: Option<String>,
    #[serde(default)]
    pub detail: Option<Value>,
}

/// Where a job is in its lifecycle, as far as waiting for it is concerned.
///
/// The server reports many intermediate statuses (`new`, `pending`, `waiting`, `running`, ...),
/// anything that isn't one of the three final ones is [`JobState::NonTerminal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobState {
    NonTerminal,
    Successful,
    Failed,
    Error,
}

impl JobState {
    pub fn from_status(status: &str) -> Self {
        match status {
            "successful" => JobState::Successful,
            "failed" => JobState::Failed,
            "error" => JobState::Error,
            _ => JobState::NonTerminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobState::NonTerminal)
    }
}

/// A job status known to contain a `status` field.
///
/// Each poll produces a fresh snapshot which replaces the previous one entirely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobStatusSnapshot {
    pub status: String,
    pub id: u64,
    pub url: Option<String>,
    pub stdout_url: Option<String>,
    pub result_traceback: Option<String>,
}

impl JobStatusSnapshot {
    pub fn state(&self) -> JobState {
        JobState::from_status(&self.status)
    }
}

impl Display for JobStatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job {} ({})", self.id, self.status)
    }
}
