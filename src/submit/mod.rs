//! Submission pipeline: payload assembly and the ingestion endpoint client.

mod assembler;
mod client;
mod traits;

pub use assembler::*;
pub use client::*;
pub use traits::*;

use thiserror::Error;

/// A failed submission attempt. The aggregate is always retained for retry;
/// the user sees the server-reported reason when one was parseable.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("could not encode form data: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("could not read attachment {file_name}: {source}")]
    Attachment {
        file_name: String,
        #[source]
        source: std::io::Error,
    },
    /// The endpoint answered and reported a reason.
    #[error("{0}")]
    Rejected(String),
    #[error("could not reach the ingestion endpoint: {0}")]
    Transport(#[from] reqwest::Error),
}
