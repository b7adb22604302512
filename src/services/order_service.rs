use std::collections::{HashMap, HashSet};

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::LockType,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        orders::{CreateOrderRequest, OrderLineRequest, OrderList, UpdateOrderStatusRequest},
        products::MONEY_LIMIT,
    },
    entity::{
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::{Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Order, OrderItem, OrderStatus},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

/// Line totals and order total derived from the submitted lines only.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTotals {
    pub line_totals: Vec<Decimal>,
    pub total_amount: Decimal,
}

pub fn compute_totals(items: &[OrderLineRequest]) -> AppResult<OrderTotals> {
    let mut line_totals = Vec::with_capacity(items.len());
    let mut total_amount = Decimal::ZERO;
    for item in items {
        let line_total = item
            .price
            .checked_mul(Decimal::from(item.quantity))
            .filter(|total| *total < MONEY_LIMIT)
            .ok_or_else(|| AppError::BadRequest("line total is out of range".into()))?;
        total_amount = total_amount
            .checked_add(line_total)
            .filter(|total| *total < MONEY_LIMIT)
            .ok_or_else(|| AppError::BadRequest("order total is out of range".into()))?;
        line_totals.push(line_total);
    }
    Ok(OrderTotals {
        line_totals,
        total_amount,
    })
}

/// Persists the order header and every item in a single transaction.
pub async fn create_order(
    state: &AppState,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    payload.validate()?;
    let totals = compute_totals(&payload.items)?;

    let txn = state.db().begin().await?;

    ensure_products_exist(&txn, &payload.items).await?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        customer_name: Set(payload.customer_name.trim().to_string()),
        customer_email: Set(payload.customer_email.trim().to_string()),
        contact_number: Set(payload.contact_number.trim().to_string()),
        country: Set(payload.country.trim().to_string()),
        state_province: Set(payload.state_province.trim().to_string()),
        city: Set(payload.city.trim().to_string()),
        post_code: Set(payload.post_code.trim().to_string()),
        notes: Set(payload.notes.filter(|n| !n.trim().is_empty())),
        total_amount: Set(totals.total_amount),
        status: Set(OrderStatus::Pending.to_string()),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(payload.items.len());
    for (position, (line, line_total)) in payload
        .items
        .into_iter()
        .zip(totals.line_totals)
        .enumerate()
    {
        let item = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            position: Set(position as i32),
            product_id: Set(Some(line.product_id)),
            product_name: Set(line.product_name),
            price: Set(line.price),
            quantity: Set(line.quantity),
            line_total: Set(line_total),
            product_image_url: Set(line.product_image_url),
        }
        .insert(&txn)
        .await?;
        items.push(OrderItem::from(item));
    }

    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        items = items.len(),
        total = %order.total_amount,
        "order created"
    );

    Ok(ApiResponse::item("Order created", Order::from_entity(order, items)))
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = Orders::find()
        .order_by_desc(OrderCol::CreatedAt)
        .order_by_desc(OrderCol::Id);

    let total = finder.clone().count(state.db()).await?;

    let models = finder.limit(limit).offset(offset).all(state.db()).await?;
    let items = attach_items(state.db(), models).await?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    let order = Orders::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound)?;
    let order = attach_items(state.db(), vec![order])
        .await?
        .pop()
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::item("Order found", order))
}

pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    let next: OrderStatus = payload.status.parse().map_err(AppError::BadRequest)?;

    let txn = state.db().begin().await?;
    let existing = Orders::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let current: OrderStatus = existing
        .status
        .parse()
        .map_err(|e: String| AppError::Internal(anyhow::anyhow!(e)))?;
    if !current.can_transition_to(next) {
        return Err(AppError::BadRequest(format!(
            "Cannot move order from {current} to {next}"
        )));
    }

    let mut active: OrderActive = existing.into();
    active.status = Set(next.to_string());
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&txn).await?;

    let order = attach_items(&txn, vec![order])
        .await?
        .pop()
        .ok_or(AppError::NotFound)?;
    txn.commit().await?;

    tracing::info!(
        admin = %user.username,
        order_id = %id,
        from = %current,
        to = %next,
        "order status updated"
    );

    Ok(ApiResponse::item("Order updated", order))
}

/// Removes the items first, then the order, in one transaction.
pub async fn delete_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let txn = state.db().begin().await?;

    Orders::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let removed_items = OrderItems::delete_many()
        .filter(OrderItemCol::OrderId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;
    Orders::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        admin = %user.username,
        order_id = %id,
        removed_items,
        "order deleted"
    );

    Ok(ApiResponse::item("Deleted", serde_json::json!({})))
}

async fn ensure_products_exist<C: ConnectionTrait>(
    conn: &C,
    items: &[OrderLineRequest],
) -> AppResult<()> {
    let wanted: HashSet<Uuid> = items.iter().map(|item| item.product_id).collect();
    let found: HashSet<Uuid> = Products::find()
        .select_only()
        .column(ProdCol::Id)
        .filter(ProdCol::Id.is_in(wanted.iter().copied()))
        .into_tuple::<Uuid>()
        .all(conn)
        .await?
        .into_iter()
        .collect();

    if let Some(missing) = wanted.iter().find(|id| !found.contains(id)) {
        return Err(AppError::BadRequest(format!("product {missing} not found")));
    }
    Ok(())
}

async fn attach_items<C: ConnectionTrait>(
    conn: &C,
    orders: Vec<OrderModel>,
) -> AppResult<Vec<Order>> {
    if orders.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();

    let mut by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
    for item in OrderItems::find()
        .filter(OrderItemCol::OrderId.is_in(ids))
        .order_by_asc(OrderItemCol::Position)
        .all(conn)
        .await?
    {
        by_order
            .entry(item.order_id)
            .or_default()
            .push(OrderItem::from(item));
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = by_order.remove(&order.id).unwrap_or_default();
            Order::from_entity(order, items)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: Decimal, quantity: i32) -> OrderLineRequest {
        OrderLineRequest {
            product_id: Uuid::new_v4(),
            product_name: "Item".into(),
            price,
            quantity,
            product_image_url: None,
        }
    }

    #[test]
    fn totals_sum_price_times_quantity() {
        let items = vec![line(Decimal::new(1000, 2), 2), line(Decimal::new(500, 2), 1)];
        let totals = compute_totals(&items).unwrap();
        assert_eq!(
            totals.line_totals,
            vec![Decimal::new(2000, 2), Decimal::new(500, 2)]
        );
        assert_eq!(totals.total_amount, Decimal::new(2500, 2));
    }

    #[test]
    fn totals_keep_cent_precision() {
        let items = vec![line(Decimal::new(1999, 2), 3), line(Decimal::new(1, 2), 7)];
        let totals = compute_totals(&items).unwrap();
        assert_eq!(totals.total_amount, Decimal::new(6004, 2));
    }

    #[test]
    fn totals_of_empty_cart_are_zero() {
        let totals = compute_totals(&[]).unwrap();
        assert!(totals.line_totals.is_empty());
        assert_eq!(totals.total_amount, Decimal::ZERO);
    }

    #[test]
    fn totals_beyond_column_range_are_rejected() {
        let items = vec![line(Decimal::new(9_999_999_999, 2), 1_000_000)];
        assert!(matches!(
            compute_totals(&items),
            Err(AppError::BadRequest(_))
        ));

        let items = vec![
            line(Decimal::new(600_000_000_000, 2), 1),
            line(Decimal::new(500_000_000_000, 2), 1),
        ];
        assert!(matches!(
            compute_totals(&items),
            Err(AppError::BadRequest(_))
        ));

        let items = vec![line(Decimal::new(999_999_999_999, 2), 1)];
        assert!(compute_totals(&items).is_ok());
    }

    #[test]
    fn overflowing_line_total_is_rejected() {
        let items = vec![line(Decimal::MAX, 2)];
        assert!(matches!(
            compute_totals(&items),
            Err(AppError::BadRequest(_))
        ));
    }
}
