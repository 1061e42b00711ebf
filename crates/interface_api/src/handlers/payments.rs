//! Payment record lookups

use axum::{
    extract::{Path, State},
    Json,
};
use core_kernel::PaymentId;
use uuid::Uuid;

use crate::dto::billing::PaymentResponse;
use crate::error::ApiError;
use crate::AppState;

pub async fn list_payments(
    State(state): State<AppState>,
) -> Result<Json<Vec<PaymentResponse>>, ApiError> {
    let payments = state.billing.list_payments().await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment = state
        .billing
        .get_payment(PaymentId::from_uuid(id))
        .await
        .map_err(|e| {
            if e.is_not_found() {
                ApiError::NotFound("Payment not found".to_string())
            } else {
                e.into()
            }
        })?;
    Ok(Json(payment.into()))
}
