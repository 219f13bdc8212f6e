//! Launches a job template on an Ansible Tower/AWX server from a CI pipeline, waits for the
//! job to finish, prints its output and publishes the resource name found in that output
//! as a pipeline variable.

pub mod api;
pub mod cli;
mod error;
pub mod job;
pub mod output;
pub mod pipeline;
pub mod request;
pub mod resource_name;
pub mod run;

pub use error::{Error, GENERIC_FAILURE_MESSAGE, INVALID_EXTRA_VARS_MESSAGE};
