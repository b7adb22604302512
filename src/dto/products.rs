use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::{Gender, Product, ProductImage};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    pub gender: Gender,
    #[validate(length(min = 1, max = 100, message = "category is required"))]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "name must not be empty"))]
    pub name: Option<String>,
    #[schema(value_type = Option<String>, example = "24.99")]
    pub price: Option<Decimal>,
    pub gender: Option<Gender>,
    #[validate(length(min = 1, max = 100, message = "category must not be empty"))]
    pub category: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddImagesRequest {
    #[validate(length(min = 1, message = "No image URLs provided"))]
    pub image_urls: Vec<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductImageList {
    #[schema(value_type = Vec<ProductImage>)]
    pub items: Vec<ProductImage>,
}

/// Exclusive upper bound of a `NUMERIC(12, 2)` column.
pub const MONEY_LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

/// Non-negative, below [`MONEY_LIMIT`], with at most two decimal places.
pub fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative_amount")
            .with_message("amount must not be negative".into()));
    }
    if *value >= MONEY_LIMIT {
        return Err(ValidationError::new("amount_range")
            .with_message("amount must be below 10000000000".into()));
    }
    if value.normalize().scale() > 2 {
        return Err(ValidationError::new("amount_precision")
            .with_message("amount must have at most two decimal places".into()));
    }
    Ok(())
}
