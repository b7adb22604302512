use axum::{Json, Router, extract::State, routing::post};
use validator::Validate;

use crate::{
    dto::auth::{LoginRequest, LoginResponse},
    error::AppResult,
    extract::AppJson,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Admin token", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Malformed payload"),
        (status = 401, description = "Invalid username or password"),
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    payload.validate()?;
    let resp = auth_service::login(&state, payload).await?;
    Ok(Json(resp))
}
