use thiserror::Error;

/// Failures surfaced by the client library.
///
/// Transport and backend rejections are distinct variants so a caller that
/// has already confirmed an on-chain mutation can tell "the mirror write
/// never arrived" apart from "the backend refused it" when deciding what to
/// show the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("mirror backend rejected request ({status}): {message}")]
    Mirror { status: u16, message: String },

    #[error("failed to decode account data: {0}")]
    Decode(String),

    #[error("failed to compile renewal task: {0}")]
    Scheduling(String),
}
