//! Customer and vendor handlers
//!
//! The two party kinds share one implementation; the route wrappers pin the
//! kind so `/api/customers/:id` can never address a vendor and vice versa.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use core_kernel::{Money, PartyId};
use domain_party::PartyKind;
use uuid::Uuid;
use validator::Validate;

use crate::dto::billing::{PaymentResponse, PaymentResultResponse};
use crate::dto::party::{
    CreatePartyRequest, MessageResponse, PartyResponse, PayRequest, RenamePartyRequest,
};
use crate::error::ApiError;
use crate::AppState;

async fn create_party(
    kind: PartyKind,
    state: AppState,
    request: CreatePartyRequest,
) -> Result<(StatusCode, Json<PartyResponse>), ApiError> {
    request.validate()?;
    let party = request.into_party(kind);
    state.parties.insert(&party).await?;
    Ok((StatusCode::CREATED, Json(party.into())))
}

async fn list_parties(
    kind: PartyKind,
    state: AppState,
) -> Result<Json<Vec<PartyResponse>>, ApiError> {
    let parties = state.parties.list(kind).await?;
    Ok(Json(parties.into_iter().map(Into::into).collect()))
}

/// Fetches a party and answers 404 when the id resolves to the other kind,
/// the same as when it resolves to nothing.
async fn get_party_of_kind(
    kind: PartyKind,
    state: &AppState,
    id: Uuid,
) -> Result<domain_party::Party, ApiError> {
    let party = state
        .parties
        .get(PartyId::from_uuid(id))
        .await
        .map_err(|e| {
            if e.is_not_found() {
                ApiError::NotFound(format!("{} not found", kind.label()))
            } else {
                e.into()
            }
        })?;
    if party.kind != kind {
        return Err(ApiError::NotFound(format!("{} not found", kind.label())));
    }
    Ok(party)
}

async fn get_party(
    kind: PartyKind,
    state: AppState,
    id: Uuid,
) -> Result<Json<PartyResponse>, ApiError> {
    let party = get_party_of_kind(kind, &state, id).await?;
    Ok(Json(party.into()))
}

async fn rename_party(
    kind: PartyKind,
    state: AppState,
    id: Uuid,
    request: RenamePartyRequest,
) -> Result<Json<PartyResponse>, ApiError> {
    request.validate()?;
    let mut party = get_party_of_kind(kind, &state, id).await?;
    party.name = request.name;
    state.parties.update(&party).await?;
    Ok(Json(party.into()))
}

async fn delete_party(
    kind: PartyKind,
    state: AppState,
    id: Uuid,
) -> Result<Json<MessageResponse>, ApiError> {
    get_party_of_kind(kind, &state, id).await?;
    state.parties.delete(PartyId::from_uuid(id)).await?;
    Ok(Json(MessageResponse {
        message: format!("{} deleted successfully", kind.label()),
    }))
}

async fn pay_party(
    kind: PartyKind,
    state: AppState,
    id: Uuid,
    request: PayRequest,
) -> Result<Json<PaymentResultResponse>, ApiError> {
    let amount = request.amount.ok_or_else(|| {
        ApiError::BadRequest("payment amount must be a positive number".to_string())
    })?;

    let receipt = state
        .payments
        .pay(kind, PartyId::from_uuid(id), Money::new(amount))
        .await?;

    Ok(Json(PaymentResultResponse {
        message: "Payment successful".to_string(),
        payment: PaymentResponse::from(receipt.payment),
    }))
}

// Customer routes

pub async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreatePartyRequest>,
) -> Result<(StatusCode, Json<PartyResponse>), ApiError> {
    create_party(PartyKind::Customer, state, request).await
}

pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<PartyResponse>>, ApiError> {
    list_parties(PartyKind::Customer, state).await
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PartyResponse>, ApiError> {
    get_party(PartyKind::Customer, state, id).await
}

pub async fn rename_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RenamePartyRequest>,
) -> Result<Json<PartyResponse>, ApiError> {
    rename_party(PartyKind::Customer, state, id, request).await
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    delete_party(PartyKind::Customer, state, id).await
}

pub async fn pay_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PayRequest>,
) -> Result<Json<PaymentResultResponse>, ApiError> {
    pay_party(PartyKind::Customer, state, id, request).await
}

// Vendor routes

pub async fn create_vendor(
    State(state): State<AppState>,
    Json(request): Json<CreatePartyRequest>,
) -> Result<(StatusCode, Json<PartyResponse>), ApiError> {
    create_party(PartyKind::Vendor, state, request).await
}

pub async fn list_vendors(
    State(state): State<AppState>,
) -> Result<Json<Vec<PartyResponse>>, ApiError> {
    list_parties(PartyKind::Vendor, state).await
}

pub async fn get_vendor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PartyResponse>, ApiError> {
    get_party(PartyKind::Vendor, state, id).await
}

pub async fn rename_vendor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RenamePartyRequest>,
) -> Result<Json<PartyResponse>, ApiError> {
    rename_party(PartyKind::Vendor, state, id, request).await
}

pub async fn delete_vendor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    delete_party(PartyKind::Vendor, state, id).await
}

pub async fn pay_vendor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PayRequest>,
) -> Result<Json<PaymentResultResponse>, ApiError> {
    pay_party(PartyKind::Vendor, state, id, request).await
}
