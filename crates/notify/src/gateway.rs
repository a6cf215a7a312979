use async_trait::async_trait;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("SMS gateway is not configured")]
    NotConfigured,

    #[error("HTTP error sending SMS: {0}")]
    Http(#[from] reqwest::Error),

    #[error("SMS gateway returned {status}: {body}")]
    Gateway { status: u16, body: String },
}

/// What the gateway reported for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReceipt {
    pub sid: String,
    pub status: Option<String>,
}

#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send(&self, to: &str, body: &str) -> Result<MessageReceipt, NotifyError>;

    /// Sends the same body to every recipient concurrently. Fails on the first
    /// error; messages already accepted are not recalled.
    async fn send_batch(
        &self,
        recipients: &[String],
        body: &str,
    ) -> Result<Vec<MessageReceipt>, NotifyError> {
        try_join_all(recipients.iter().map(|to| self.send(to, body))).await
    }
}
