use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {0}: {1}")]
    Api(reqwest::StatusCode, String),
    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, String),
}
