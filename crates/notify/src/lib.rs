//! # Slotwise Notify
//!
//! Outbound SMS for appointment notifications. The API depends only on the
//! [`SmsGateway`] trait; [`TwilioSms`] is the production implementation.
//! Message bodies come from [`templates`].

pub mod config;
pub mod gateway;
pub mod templates;
pub mod twilio;

pub use config::TwilioConfig;
pub use gateway::{MessageReceipt, NotifyError, SmsGateway};
pub use twilio::TwilioSms;
