//! Product handlers (plain CRUD, no balance arithmetic)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use core_kernel::ProductId;
use uuid::Uuid;
use validator::Validate;

use crate::dto::inventory::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::dto::party::MessageResponse;
use crate::error::ApiError;
use crate::AppState;

pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    request.validate()?;
    let product = request.into_product();
    state.products.insert(&product).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.products.list().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .products
        .get(ProductId::from_uuid(id))
        .await
        .map_err(not_found_message)?;
    Ok(Json(product.into()))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    request.validate()?;

    let mut product = state
        .products
        .get(ProductId::from_uuid(id))
        .await
        .map_err(not_found_message)?;
    request.apply_to(&mut product);
    state.products.update(&product).await?;
    Ok(Json(product.into()))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .products
        .delete(ProductId::from_uuid(id))
        .await
        .map_err(not_found_message)?;
    Ok(Json(MessageResponse {
        message: "Product deleted successfully".to_string(),
    }))
}

fn not_found_message(err: core_kernel::PortError) -> ApiError {
    if err.is_not_found() {
        ApiError::NotFound("Product not found".to_string())
    } else {
        err.into()
    }
}
