use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/", post(register_member).get(list_members))
}

pub async fn register_member(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::RegisterMemberRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let fields = body.validate()?;

    let id = services
        .members
        .register(&fields.email, &fields.password)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))).into_response())
}

pub async fn list_members(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Response, ApiError> {
    let members = services.members.find_all().await?;
    Ok(Json(members).into_response())
}
