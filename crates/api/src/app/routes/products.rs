use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use shopcart_core::ProductId;

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let fields = body.validate()?;

    let id = services
        .products
        .create(&fields.name, &fields.image, fields.price)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))).into_response())
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Response, ApiError> {
    let products = services.products.find_all().await?;
    Ok(Json(products).into_response())
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: ProductId = id.parse()?;
    let product = services.products.find(id).await?;
    Ok(Json(product).into_response())
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id: ProductId = id.parse()?;
    let Json(body) = body?;
    let fields = body.validate()?;

    services
        .products
        .update(id, &fields.name, &fields.image, fields.price)
        .await?;

    let product = services.products.find(id).await?;
    Ok(Json(product).into_response())
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: ProductId = id.parse()?;
    services.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
