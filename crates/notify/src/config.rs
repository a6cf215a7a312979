use std::env;

/// Twilio credentials and sender number.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub phone_number: String,
    /// REST API root, overridable for tests
    pub api_base: String,
}

impl TwilioConfig {
    pub const DEFAULT_API_BASE: &'static str = "https://api.twilio.com";

    /// Loads the Twilio settings from the environment.
    ///
    /// Returns `None` when any of `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN` or
    /// `TWILIO_PHONE_NUMBER` is missing or empty, which disables SMS.
    pub fn from_env() -> Option<Self> {
        let var = |name: &str| env::var(name).ok().filter(|value| !value.trim().is_empty());

        let account_sid = var("TWILIO_ACCOUNT_SID")?;
        let auth_token = var("TWILIO_AUTH_TOKEN")?;
        let phone_number = var("TWILIO_PHONE_NUMBER")?;
        let api_base = var("TWILIO_API_BASE").unwrap_or_else(|| Self::DEFAULT_API_BASE.to_string());

        Some(Self {
            account_sid,
            auth_token,
            phone_number,
            api_base,
        })
    }

    pub fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base.trim_end_matches('/'),
            self.account_sid
        )
    }
}
