use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use shopcart_core::ProductId;

use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::MemberContext;

/// Cart routes. Must be mounted behind the member middleware.
pub fn router() -> Router {
    Router::new()
        .route("/", get(list_cart))
        .route("/:product_id", post(add_to_cart).delete(remove_from_cart))
}

pub async fn list_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(member): Extension<MemberContext>,
) -> Result<Response, ApiError> {
    let cart = services.carts.find_all_for_member(member.member_id()).await?;
    Ok(Json(cart).into_response())
}

pub async fn add_to_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(member): Extension<MemberContext>,
    Path(product_id): Path<String>,
) -> Result<Response, ApiError> {
    let product_id: ProductId = product_id.parse()?;
    let id = services.carts.add(member.member_id(), product_id).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))).into_response())
}

pub async fn remove_from_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(member): Extension<MemberContext>,
    Path(product_id): Path<String>,
) -> Result<Response, ApiError> {
    let product_id: ProductId = product_id.parse()?;
    services.carts.delete(product_id, member.member_id()).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
