use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set, sea_query::OnConflict};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::content::ContentRequest,
    entity::site_contents::{ActiveModel, Column, Entity as SiteContents},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{ContentKey, SiteContent},
    response::ApiResponse,
    state::AppState,
};

pub async fn get_content(state: &AppState, key: &str) -> AppResult<ApiResponse<SiteContent>> {
    let key: ContentKey = key.parse().map_err(|_| AppError::NotFound)?;
    let content = SiteContents::find()
        .filter(Column::Key.eq(key.as_str()))
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::item("Content", SiteContent::from(content)))
}

/// Replaces every field of the block in one statement; concurrent writers
/// resolve as last write wins.
pub async fn upsert_content(
    state: &AppState,
    user: &AuthUser,
    key: &str,
    payload: ContentRequest,
) -> AppResult<ApiResponse<SiteContent>> {
    ensure_admin(user)?;
    let key: ContentKey = key.parse().map_err(|_| AppError::NotFound)?;
    payload.validate()?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        key: Set(key.as_str().to_string()),
        hero_title: Set(payload.hero_title),
        hero_subtitle: Set(payload.hero_subtitle),
        hero_image_url: Set(payload.hero_image_url),
        content_text: Set(payload.content_text),
        content_image1_url: Set(payload.content_image1_url),
        content_image2_url: Set(payload.content_image2_url),
        updated_at: Set(Utc::now().into()),
    };

    let content = SiteContents::insert(active)
        .on_conflict(
            OnConflict::column(Column::Key)
                .update_columns([
                    Column::HeroTitle,
                    Column::HeroSubtitle,
                    Column::HeroImageUrl,
                    Column::ContentText,
                    Column::ContentImage1Url,
                    Column::ContentImage2Url,
                    Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(state.db())
        .await?;

    tracing::info!(admin = %user.username, key = key.as_str(), "site content upserted");

    Ok(ApiResponse::item("Content updated", SiteContent::from(content)))
}
