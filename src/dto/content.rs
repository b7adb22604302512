use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Full replacement of a content block; omitted fields are cleared.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ContentRequest {
    #[validate(length(max = 200))]
    pub hero_title: Option<String>,
    #[validate(length(max = 500))]
    pub hero_subtitle: Option<String>,
    pub hero_image_url: Option<String>,
    pub content_text: Option<String>,
    pub content_image1_url: Option<String>,
    pub content_image2_url: Option<String>,
}
