use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use crate::config::TwilioConfig;
use crate::gateway::{MessageReceipt, NotifyError, SmsGateway};

#[derive(Debug, Deserialize)]
struct TwilioMessage {
    sid: String,
    status: Option<String>,
}

/// Sends SMS through the Twilio Messages API.
///
/// Holds one `reqwest::Client` for the life of the process.
#[derive(Debug, Clone)]
pub struct TwilioSms {
    config: TwilioConfig,
    client: Client,
}

impl TwilioSms {
    pub fn new(config: TwilioConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &TwilioConfig {
        &self.config
    }
}

#[async_trait]
impl SmsGateway for TwilioSms {
    async fn send(&self, to: &str, body: &str) -> Result<MessageReceipt, NotifyError> {
        let params = [
            ("To", to),
            ("From", self.config.phone_number.as_str()),
            ("Body", body),
        ];

        info!("Sending SMS to {}", to);
        let resp = self
            .client
            .post(self.config.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!("Twilio returned {}: {}", status, body);
            return Err(NotifyError::Gateway {
                status: status.as_u16(),
                body,
            });
        }

        let message: TwilioMessage = resp.json().await?;
        info!("SMS {} accepted for {}", message.sid, to);

        Ok(MessageReceipt {
            sid: message.sid,
            status: message.status,
        })
    }
}
