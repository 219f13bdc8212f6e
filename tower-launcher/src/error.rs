use std::{io, path::PathBuf};

use thiserror::Error;

/// Message reported to the pipeline when the additional vars are not valid JSON
pub const INVALID_EXTRA_VARS_MESSAGE: &str =
    "Extra vars invalid format, please provide a valid JSON.";

/// Message reported to the pipeline for every other failure
pub const GENERIC_FAILURE_MESSAGE: &str = "error";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Additional vars are not valid JSON: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Failed to read certificate {0:?}: {1}")]
    CertificateRead(PathBuf, io::Error),
    #[error("Template ID {template_id} couldn't be launched: {detail}")]
    LaunchRejected { template_id: String, detail: String },
    #[error("Template ID {0} couldn't be launched, the Ansible API is not working")]
    LaunchUnavailable(String),
    #[error("Failed to get job status from Ansible Tower: {0}")]
    StatusFetchRejected(String),
    #[error("Failed to get job status from Ansible Tower.")]
    StatusFetchUnavailable,
    #[error("Ansible tower job {0} execution failed")]
    JobFailed(u64),
    #[error("An error has occurred on Ansible tower trying to launch job {0}")]
    JobErrored(u64),
    #[error(transparent)]
    Transport(#[from] common::Error),
    #[error("Failed to publish pipeline output: {0}")]
    Output(#[from] io::Error),
}

impl Error {
    /// Whether the failure was caused by malformed additional vars. These get a dedicated
    /// message in the pipeline so the user knows what to fix.
    pub fn is_invalid_extra_vars(&self) -> bool {
        matches!(self, Error::ParseError(_))
    }

    /// The short message reported to the pipeline host
    pub fn pipeline_message(&self) -> &'static str {
        if self.is_invalid_extra_vars() {
            INVALID_EXTRA_VARS_MESSAGE
        } else {
            GENERIC_FAILURE_MESSAGE
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(common::Error::Http(e))
    }
}
