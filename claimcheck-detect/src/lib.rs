//! Client side of the `/detect` verification contract.
//!
//! The verification service takes a claim and answers with a verdict, a
//! one-line explanation, the search query it used and the sources it read.
//! This crate owns the wire types, the [`Detector`] seam used by the checker
//! (and mocked in its tests), and [`DetectClient`], the HTTP implementation.
//!
//! ```no_run
//! use claimcheck_detect::{Claim, DetectClient, Detector};
//!
//! # async fn demo() -> Result<(), claimcheck_detect::CheckError> {
//! let client = DetectClient::new("http://localhost:8000")?;
//! let claim = Claim::parse("NASA confirms aliens exist").expect("non-empty");
//! let verdict = client.detect(&claim).await?;
//! println!("{}: {}", verdict.verdict, verdict.explanation);
//! # Ok(()) }
//! ```
pub mod claim;
pub mod client;
pub mod verdict;

pub use claim::{Claim, EmptyClaim};
pub use client::{DetectClient, Detector};
pub use verdict::{DetectRequest, VerdictLabel, VerdictResponse};

/// Why a submission that reached the network did not produce a verdict.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// No response at all: connection refused, DNS, timeout, reset.
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-2xx status.
    #[error("{status}: {body}")]
    Status { status: u16, body: String },

    /// A 2xx answer whose body was not a verdict.
    #[error("unreadable verdict ({message}): {body_snippet}")]
    Decode {
        message: String,
        body_snippet: String,
    },

    /// The configured service address is unusable.
    #[error("invalid service address: {0}")]
    Address(String),
}

impl From<claimcheck_http::HttpError> for CheckError {
    fn from(err: claimcheck_http::HttpError) -> Self {
        use claimcheck_http::HttpError;
        match err {
            HttpError::Url(msg) => CheckError::Address(msg),
            HttpError::Build(msg) | HttpError::Network(msg) => CheckError::Transport(msg),
            HttpError::Decode {
                message,
                body_snippet,
            } => CheckError::Decode {
                message,
                body_snippet,
            },
            HttpError::Api {
                status,
                body,
                message,
                request_id,
            } => {
                tracing::debug!(
                    status = status.as_u16(),
                    %message,
                    %request_id,
                    "detect.service_error"
                );
                CheckError::Status {
                    status: status.as_u16(),
                    body,
                }
            }
        }
    }
}
