//! Invoice handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use core_kernel::InvoiceId;
use domain_billing::InvoiceType;

use crate::dto::billing::{CreateInvoiceRequest, InvoiceResponse};
use crate::error::ApiError;
use crate::pdf;
use crate::AppState;

pub async fn create_invoice(
    State(state): State<AppState>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceResponse>), ApiError> {
    let command = request.into_command()?;
    let invoice = state
        .invoices
        .create_invoice(command)
        .await
        .map_err(ApiError::from_create_flow)?;
    Ok((StatusCode::CREATED, Json(invoice.into())))
}

#[derive(Debug, Deserialize)]
pub struct ListInvoicesQuery {
    #[serde(rename = "type")]
    pub invoice_type: Option<String>,
}

pub async fn list_invoices(
    State(state): State<AppState>,
    Query(query): Query<ListInvoicesQuery>,
) -> Result<Json<Vec<InvoiceResponse>>, ApiError> {
    let filter = match query.invoice_type.as_deref() {
        Some(raw) => Some(
            raw.parse::<InvoiceType>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        ),
        None => None,
    };

    let invoices = state.billing.list_invoices(filter).await?;
    Ok(Json(invoices.into_iter().map(Into::into).collect()))
}

pub async fn download_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let invoice = state
        .billing
        .get_invoice(InvoiceId::from_uuid(invoice_id))
        .await
        .map_err(|e| {
            if e.is_not_found() {
                ApiError::NotFound("Invoice not found".to_string())
            } else {
                e.into()
            }
        })?;

    // The counterparty enriches the document with contact details, but a
    // deleted party must not break the download: fall back to the name
    // snapshot on the invoice.
    let party = match state.parties.get(invoice.party_id).await {
        Ok(party) => Some(party),
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e.into()),
    };

    let bytes = pdf::render_invoice(&invoice, party.as_ref())
        .map_err(|e| ApiError::Internal(format!("failed to render invoice: {e}")))?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"invoice-{invoice_id}.pdf\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}
