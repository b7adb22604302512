use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::LockType,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::products::{
        AddImagesRequest, CreateProductRequest, ProductImageList, ProductList,
        UpdateProductRequest, validate_money,
    },
    entity::{
        product_images::{
            ActiveModel as ImageActive, Column as ImageCol, Entity as ProductImages,
        },
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Product, ProductImage},
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(gender) = query.gender {
        let audience: Vec<&str> = gender.audience().iter().map(|g| g.as_str()).collect();
        condition = condition.add(Column::Gender.is_in(audience));
    }

    if let Some(category) = query.category.as_ref().filter(|c| !c.is_empty()) {
        condition = condition.add(Column::Category.eq(category.clone()));
    }

    let finder = Products::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id);

    let total = finder.clone().count(state.db()).await?;

    let models = finder.limit(limit).offset(offset).all(state.db()).await?;
    let items = attach_images(state.db(), models).await?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let model = Products::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound)?;
    let product = attach_images(state.db(), vec![model])
        .await?
        .pop()
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::item("Product", product))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    payload.validate()?;

    let product = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        price: Set(payload.price),
        gender: Set(payload.gender.as_str().to_string()),
        category: Set(payload.category.trim().to_string()),
        description: Set(payload.description),
        created_at: NotSet,
        updated_at: Set(None),
    }
    .insert(state.db())
    .await?;

    tracing::info!(
        admin = %user.username,
        product_id = %product.id,
        "product created"
    );

    Ok(ApiResponse::item(
        "Product created",
        Product::from_entity(product, Vec::new()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    payload.validate()?;
    if let Some(price) = payload.price.as_ref() {
        validate_money(price)
            .map_err(|e| AppError::BadRequest(format!("price: {e}")))?;
    }

    let existing = Products::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(gender) = payload.gender {
        active.gender = Set(gender.as_str().to_string());
    }
    if let Some(category) = payload.category {
        active.category = Set(category.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    active.updated_at = Set(Some(Utc::now().into()));

    let model = active.update(state.db()).await?;
    let product = attach_images(state.db(), vec![model])
        .await?
        .pop()
        .ok_or(AppError::NotFound)?;

    tracing::info!(admin = %user.username, product_id = %id, "product updated");

    Ok(ApiResponse::item("Updated", product))
}

/// Appends images after the product's current highest display order.
pub async fn add_images(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
    payload: AddImagesRequest,
) -> AppResult<ApiResponse<ProductImageList>> {
    ensure_admin(user)?;
    payload.validate()?;
    let urls: Vec<String> = payload
        .image_urls
        .into_iter()
        .map(|url| url.trim().to_string())
        .collect();
    if urls.iter().any(|url| url.is_empty()) {
        return Err(AppError::BadRequest("image url must not be empty".into()));
    }

    let txn = state.db().begin().await?;

    // Row lock serializes concurrent appends to the same product.
    Products::find_by_id(product_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let current_max = ProductImages::find()
        .filter(ImageCol::ProductId.eq(product_id))
        .order_by_desc(ImageCol::DisplayOrder)
        .one(&txn)
        .await?
        .map(|image| image.display_order);

    let mut items = Vec::with_capacity(urls.len());
    for (url, display_order) in urls.into_iter().zip(next_display_orders(current_max)) {
        let image = ImageActive {
            id: Set(Uuid::new_v4()),
            product_id: Set(product_id),
            url: Set(url),
            display_order: Set(display_order),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
        items.push(ProductImage::from(image));
    }

    txn.commit().await?;

    tracing::info!(
        admin = %user.username,
        product_id = %product_id,
        count = items.len(),
        "product images appended"
    );

    Ok(ApiResponse::item("Images added", ProductImageList { items }))
}

/// Order items referencing the product keep their snapshot; the foreign key
/// nulls their `product_id`.
pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Products::delete_by_id(id).exec(state.db()).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(admin = %user.username, product_id = %id, "product deleted");

    Ok(ApiResponse::item("Deleted", serde_json::json!({})))
}

/// Display orders following `current_max`; a product without images starts at 0.
pub fn next_display_orders(current_max: Option<i32>) -> impl Iterator<Item = i32> {
    let start = current_max.map_or(0, |max| max + 1);
    start..
}

async fn attach_images<C: ConnectionTrait>(
    conn: &C,
    models: Vec<ProductModel>,
) -> AppResult<Vec<Product>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();

    let mut by_product: HashMap<Uuid, Vec<ProductImage>> = HashMap::new();
    for image in ProductImages::find()
        .filter(ImageCol::ProductId.is_in(ids))
        .order_by_asc(ImageCol::DisplayOrder)
        .all(conn)
        .await?
    {
        by_product
            .entry(image.product_id)
            .or_default()
            .push(ProductImage::from(image));
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let images = by_product.remove(&model.id).unwrap_or_default();
            Product::from_entity(model, images)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_images_start_at_zero() {
        let orders: Vec<i32> = next_display_orders(None).take(3).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn appended_images_continue_after_max() {
        let orders: Vec<i32> = next_display_orders(Some(4)).take(2).collect();
        assert_eq!(orders, vec![5, 6]);
    }
}
