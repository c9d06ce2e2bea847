//! Error types for burphttp

use thiserror::Error;

/// Everything that can go wrong while parsing, translating or replaying a request.
///
/// Parse and translation errors are returned before the target model is
/// touched. `Transport` wraps the HTTP client's error as-is.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed request line: {0:?}")]
    MalformedRequestLine(String),

    #[error("Malformed header line: {0:?}")]
    MalformedHeaderLine(String),

    #[error("Unterminated quote in curl command")]
    UnterminatedQuote,

    #[error("No http(s) URL found in curl command")]
    MissingUrl,

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
