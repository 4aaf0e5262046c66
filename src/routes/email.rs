use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use validator::Validate;

use crate::{
    error::AppError,
    rate_limit::RateLimitDecision,
    routes::{AppState, ClientAddr},
};

#[derive(Deserialize, Validate)]
pub struct ConfirmationInput {
    #[validate(email)]
    pub email: String,
}

/// POST /api/email/confirmation
///
/// Every attempt counts against the caller's window, valid or not.
pub async fn confirmation(
    State(state): State<AppState>,
    ClientAddr(client): ClientAddr,
    Json(mut input): Json<ConfirmationInput>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if let RateLimitDecision::Limited { retry_after } = state.rate_limiter.check(&client) {
        tracing::warn!(client = %client, "Confirmation email rate limited");
        return Err(AppError::RateLimited { retry_after });
    }

    input.email = input.email.trim().to_owned();
    input.validate()?;

    state.email.send_confirmation(&input.email).await?;

    Ok((StatusCode::ACCEPTED, Json(json!({"status": "sent"}))))
}
