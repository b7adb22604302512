use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    error::AppResult, models::SiteContent, response::ApiResponse,
    services::content_service, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/{key}", get(get_content))
}

#[utoipa::path(
    get,
    path = "/api/content/{key}",
    params(("key" = String, Path, description = "home or about")),
    responses(
        (status = 200, description = "Content block", body = ApiResponse<SiteContent>),
        (status = 404, description = "Unknown key or no content yet"),
    ),
    tag = "Content"
)]
pub async fn get_content(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<ApiResponse<SiteContent>>> {
    let resp = content_service::get_content(&state, &key).await?;
    Ok(Json(resp))
}
