use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use slotwise_core::errors::SchedulingError;
use slotwise_notify::NotifyError;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Debug, Deserialize)]
pub struct SmsRequest {
    pub to: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SmsResponse {
    pub success: bool,
    pub sid: String,
}

#[axum::debug_handler]
pub async fn send_sms(
    State(state): State<Arc<ApiState>>,
    request: Result<Json<SmsRequest>, JsonRejection>,
) -> Result<Json<SmsResponse>, AppError> {
    let Json(request) = request?;
    let (Some(to), Some(message)) = (
        request.to.filter(|to| !to.trim().is_empty()),
        request.message.filter(|message| !message.trim().is_empty()),
    ) else {
        return Err(AppError(SchedulingError::Validation(
            "to and message are required".to_string(),
        )));
    };

    let gateway = state.sms.as_ref().ok_or(NotifyError::NotConfigured)?;
    let receipt = gateway.send(to.trim(), &message).await?;

    Ok(Json(SmsResponse {
        success: true,
        sid: receipt.sid,
    }))
}
