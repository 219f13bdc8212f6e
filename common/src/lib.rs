//! The `common` crate provides the plumbing shared by the pipeline tools: an authenticated
//! HTTP session with response helpers ([`clients`]), redaction of secrets passed on the command
//! line ([`clap`]) and tracing initialisation ([`tracing`]).

pub mod clap;
pub mod clients;
mod error;
pub mod tracing;

pub use error::Error;
