use thiserror::Error;

use crate::{metadata::error::LookupError, session::RequestId};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("metadata lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("submission service reported an error for request {request_id}: {message}")]
    Submission {
        request_id: RequestId,
        message: String,
    },

    #[error("submitter error: {0}")]
    Submitter(#[from] anyhow::Error),
}
