use std::io;
use std::path::PathBuf;

/// Conditions that end a notifier run early.
#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("DISCORD_WEBHOOK_URL is not set")]
    MissingWebhook,

    #[error("event payload not found at {}", .0.display())]
    EventNotFound(PathBuf),

    #[error("failed to read event payload {}: {source}", .path.display())]
    EventRead { path: PathBuf, source: io::Error },

    #[error("failed to parse event payload: {0}")]
    EventParse(#[from] serde_json::Error),

    #[error("webhook delivery failed with status {status}: {body}")]
    DeliveryFailed { status: u16, body: String },

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl NotifierError {
    /// Setup problems exit with 1 before any network call; everything else exits with 2.
    pub fn exit_code(&self) -> u8 {
        match self {
            NotifierError::MissingWebhook
            | NotifierError::EventNotFound(_)
            | NotifierError::EventRead { .. }
            | NotifierError::EventParse(_) => 1,
            NotifierError::DeliveryFailed { .. } | NotifierError::Unexpected(_) => 2,
        }
    }

    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            NotifierError::MissingWebhook => Some(
                "Add DISCORD_WEBHOOK_URL as a repository secret, or export it locally:\n  \
                 export DISCORD_WEBHOOK_URL=\"https://discord.com/api/webhooks/...\"\n  \
                 export GITHUB_EVENT_PATH=\"$PWD/event.sample.json\"",
            ),
            NotifierError::EventNotFound(_) => Some(
                "For local runs, point GITHUB_EVENT_PATH at event.sample.json or another saved payload.",
            ),
            NotifierError::EventRead { .. } | NotifierError::EventParse(_) => Some(
                "Check that GITHUB_EVENT_PATH points at a readable JSON webhook payload such as event.sample.json.",
            ),
            NotifierError::DeliveryFailed { .. } | NotifierError::Unexpected(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, NotifierError>;
