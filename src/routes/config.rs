use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{response::ApiResponse, state::AppState};

#[derive(Debug, Serialize, ToSchema)]
pub struct ConfigValue {
    pub value: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contact-phone", get(contact_phone))
        .route("/image-service", get(image_service))
}

#[utoipa::path(
    get,
    path = "/api/config/contact-phone",
    responses(
        (status = 200, description = "Phone number used for the checkout hand-off", body = ApiResponse<ConfigValue>),
    ),
    tag = "Config"
)]
pub async fn contact_phone(State(state): State<AppState>) -> Json<ApiResponse<ConfigValue>> {
    Json(ApiResponse::item(
        "Contact phone",
        ConfigValue {
            value: state.config.contact_phone.clone(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/api/config/image-service",
    responses(
        (status = 200, description = "Base URL of the image upload service", body = ApiResponse<ConfigValue>),
    ),
    tag = "Config"
)]
pub async fn image_service(State(state): State<AppState>) -> Json<ApiResponse<ConfigValue>> {
    Json(ApiResponse::item(
        "Image service",
        ConfigValue {
            value: state.config.image_service_url.clone(),
        },
    ))
}
