use super::item::ItemsQueryBuilderError;
use thiserror::Error;

/// Everything that can stop a GitLab operation. Each variant renders as the
/// single diagnostic line shown to the user.
#[derive(Debug, Error)]
pub enum GitlabError {
    #[error("User '{0}' not found.")]
    UserNotFound(String),

    #[error("Project or group '{0}' not found.")]
    EntityNotFound(String),

    #[error("Invalid role '{role}'. Valid roles: {valid}")]
    InvalidRole { role: String, valid: String },

    #[error("Invalid year {0}.")]
    InvalidYear(i32),

    /// A non-success status at a point where the operation cannot go on.
    #[error("{action}: {status}, {body}")]
    RemoteFailure {
        action: &'static str,
        status: u16,
        body: String,
    },

    #[error("Unexpected response: {status}, {body}")]
    UnexpectedResponse { status: u16, body: String },

    #[error("Invalid query: {0}")]
    Query(#[from] ItemsQueryBuilderError),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}
