use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use sqlx::FromRow;

use crate::{
    dto::orders::{
        AddOrderDetailRequest, CreateOrderRequest, OrderDetailWithProduct, OrderProductLine,
        OrderWithDetails, OrderWithProducts, UpdateOrderRequest,
    },
    entity::{
        addresses::Entity as Addresses,
        order_details::{self, Column as DetailCol, Entity as OrderDetails},
        order_statuses::{self, Entity as OrderStatuses},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
        payment_methods::Entity as PaymentMethods,
        products::Entity as Products,
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    models::{Order, OrderDetail},
    response::{ApiResponse, Deleted, Meta},
    services::{
        crud,
        status_rules::{OrderStatusKind, StatusPolicy, TransitionCheck, check_transition},
    },
    state::AppState,
};

/// `quantity * price_per_unit` in cents, rejecting bad input instead of wrapping.
pub fn line_total(quantity: i32, price_per_unit: i64) -> AppResult<i64> {
    if quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }
    if price_per_unit < 0 {
        return Err(AppError::BadRequest(
            "price_per_unit must not be negative".to_string(),
        ));
    }
    i64::from(quantity)
        .checked_mul(price_per_unit)
        .ok_or_else(|| AppError::BadRequest("order line total overflows".to_string()))
}

fn sum_lines(lines: &[(i32, i64)]) -> AppResult<i64> {
    lines.iter().try_fold(0_i64, |acc, &(quantity, price)| {
        acc.checked_add(line_total(quantity, price)?)
            .ok_or_else(|| AppError::BadRequest("order total overflows".to_string()))
    })
}

fn ensure_non_negative(field: &str, value: i64) -> AppResult<()> {
    if value < 0 {
        return Err(AppError::BadRequest(format!("{field} must not be negative")));
    }
    Ok(())
}

/// Resolve a canonical status to its row id by name.
pub async fn status_id_for<C: ConnectionTrait>(conn: &C, kind: OrderStatusKind) -> AppResult<i32> {
    let status = OrderStatuses::find()
        .filter(order_statuses::Column::Name.eq(kind.name()))
        .one(conn)
        .await?;
    match status {
        Some(status) => Ok(status.id),
        None => Err(AppError::NotFound(format!("order status {kind}"))),
    }
}

async fn ensure_address_owned(
    txn: &DatabaseTransaction,
    address_id: i32,
    user_id: i32,
) -> AppResult<()> {
    let address = crud::find_or_404::<Addresses, _>(txn, "address", address_id).await?;
    if address.user_id != user_id {
        return Err(AppError::BadRequest(format!(
            "address {address_id} does not belong to user {user_id}"
        )));
    }
    Ok(())
}

/// Price snapshot for a new line: the explicit price, or the product's current one.
async fn snapshot_price(
    txn: &DatabaseTransaction,
    product_id: i32,
    explicit: Option<i64>,
) -> AppResult<i64> {
    let product = crud::find_or_404::<Products, _>(txn, "product", product_id).await?;
    Ok(explicit.unwrap_or(product.price))
}

/// Store-side sum of an order's lines.
async fn details_total<C: ConnectionTrait>(conn: &C, order_id: i32) -> AppResult<i64> {
    let total = OrderDetails::find()
        .select_only()
        .column_as(
            Expr::cust("COALESCE(SUM(quantity * price_per_unit), 0)"),
            "total",
        )
        .filter(DetailCol::OrderId.eq(order_id))
        .into_tuple::<i64>()
        .one(conn)
        .await?;
    Ok(total.unwrap_or(0))
}

async fn details_of<C: ConnectionTrait>(conn: &C, order_id: i32) -> AppResult<Vec<OrderDetail>> {
    Ok(OrderDetails::find()
        .filter(DetailCol::OrderId.eq(order_id))
        .order_by_asc(DetailCol::Id)
        .all(conn)
        .await?
        .into_iter()
        .map(OrderDetail::from)
        .collect())
}

pub async fn list_orders(state: &AppState) -> AppResult<ApiResponse<Vec<Order>>> {
    let orders: Vec<Order> = Orders::find()
        .order_by_asc(OrderCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();
    Ok(ApiResponse::list("Orders", orders))
}

pub async fn get_order(state: &AppState, id: i32) -> AppResult<ApiResponse<OrderWithDetails>> {
    let order = crud::find_or_404::<Orders, _>(&state.orm, "order", id).await?;
    let details = details_of(&state.orm, id).await?;
    Ok(ApiResponse::success(
        "Order",
        OrderWithDetails {
            order: order.into(),
            details,
        },
        None,
    ))
}

/// Place an order with its lines in one transaction.
///
/// The stored `total_price` is the sum of `quantity * price_per_unit` over the
/// lines. A caller-supplied total that disagrees is rejected.
pub async fn create_order(
    state: &AppState,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderWithDetails>> {
    ensure_non_negative("delivery_price", payload.delivery_price)?;

    let txn = crud::begin_write(&state.orm).await?;
    crud::find_or_404::<Users, _>(&txn, "user", payload.user_id).await?;
    crud::find_or_404::<PaymentMethods, _>(&txn, "payment method", payload.payment_method_id)
        .await?;
    ensure_address_owned(&txn, payload.shipping_address_id, payload.user_id).await?;

    let status_id = match payload.status_id {
        Some(status_id) => {
            crud::find_or_404::<OrderStatuses, _>(&txn, "order status", status_id).await?;
            status_id
        }
        None => status_id_for(&txn, OrderStatusKind::Pending).await?,
    };

    let mut lines = Vec::with_capacity(payload.items.len());
    for item in &payload.items {
        let price = snapshot_price(&txn, item.product_id, item.price_per_unit).await?;
        line_total(item.quantity, price)?;
        lines.push((item.product_id, item.quantity, price));
    }
    let pairs: Vec<(i32, i64)> = lines.iter().map(|&(_, q, p)| (q, p)).collect();
    let total_price = sum_lines(&pairs)?;

    if let Some(claimed) = payload.total_price {
        if claimed != total_price {
            return Err(AppError::BadRequest(format!(
                "total_price {claimed} does not match the sum of order lines {total_price}"
            )));
        }
    }

    let order = OrderActive {
        id: NotSet,
        user_id: Set(payload.user_id),
        status_id: Set(status_id),
        payment_method_id: Set(payload.payment_method_id),
        shipping_address_id: Set(payload.shipping_address_id),
        order_date: Set(Utc::now()),
        total_price: Set(total_price),
        delivery_price: Set(payload.delivery_price),
        tracking_number: Set(payload.tracking_number),
        notes: Set(payload.notes),
    }
    .insert(&txn)
    .await?;

    let mut details = Vec::with_capacity(lines.len());
    for (product_id, quantity, price) in lines {
        let detail = order_details::ActiveModel {
            id: NotSet,
            order_id: Set(order.id),
            product_id: Set(product_id),
            quantity: Set(quantity),
            price_per_unit: Set(price),
        }
        .insert(&txn)
        .await?;
        details.push(OrderDetail::from(detail));
    }

    txn.commit().await?;

    tracing::info!(
        order_id = order.id,
        user_id = order.user_id,
        lines = details.len(),
        total_price = order.total_price,
        "order placed"
    );
    Ok(ApiResponse::success(
        "Order created",
        OrderWithDetails {
            order: order.into(),
            details,
        },
        Some(Meta::empty()),
    ))
}

/// Append a line to an order and recompute the order total in the same transaction.
pub async fn add_order_detail(
    state: &AppState,
    payload: AddOrderDetailRequest,
) -> AppResult<ApiResponse<OrderWithDetails>> {
    let txn = crud::begin_write(&state.orm).await?;
    let order = crud::find_or_404::<Orders, _>(&txn, "order", payload.order_id).await?;
    let price = snapshot_price(&txn, payload.product_id, payload.price_per_unit).await?;
    line_total(payload.quantity, price)?;

    order_details::ActiveModel {
        id: NotSet,
        order_id: Set(order.id),
        product_id: Set(payload.product_id),
        quantity: Set(payload.quantity),
        price_per_unit: Set(price),
    }
    .insert(&txn)
    .await?;

    let total_price = details_total(&txn, order.id).await?;
    let mut active: OrderActive = order.into();
    active.total_price = Set(total_price);
    let order = active.update(&txn).await?;
    let details = details_of(&txn, order.id).await?;
    txn.commit().await?;

    tracing::info!(order_id = order.id, total_price, "order detail added");
    Ok(ApiResponse::success(
        "Order detail added",
        OrderWithDetails {
            order: order.into(),
            details,
        },
        Some(Meta::empty()),
    ))
}

/// Check that the order may move to `next_status_id` under `policy`.
/// Returns `false` when the order already has that status.
async fn check_status_change(
    txn: &DatabaseTransaction,
    policy: StatusPolicy,
    order_id: i32,
    current_status_id: i32,
    next_status_id: i32,
) -> AppResult<bool> {
    if current_status_id == next_status_id {
        return Ok(false);
    }
    let current =
        crud::find_or_404::<OrderStatuses, _>(txn, "order status", current_status_id).await?;
    let next = crud::find_or_404::<OrderStatuses, _>(txn, "order status", next_status_id).await?;

    match check_transition(policy, &current.name, &next.name) {
        TransitionCheck::Unchanged => Ok(false),
        TransitionCheck::Allowed => Ok(true),
        TransitionCheck::Rejected { from, to } => {
            tracing::warn!(order_id, from = %from, to = %to, "status transition rejected");
            Err(AppError::BadRequest(format!(
                "order {order_id} cannot move from {from} to {to}"
            )))
        }
    }
}

pub async fn update_order_status(
    state: &AppState,
    order_id: i32,
    status_id: i32,
) -> AppResult<ApiResponse<Order>> {
    let txn = crud::begin_write(&state.orm).await?;
    let order = crud::find_or_404::<Orders, _>(&txn, "order", order_id).await?;

    let changed =
        check_status_change(&txn, state.status_policy, order_id, order.status_id, status_id)
            .await?;
    if !changed {
        txn.commit().await?;
        return Ok(ApiResponse::success(
            "Status unchanged",
            order.into(),
            Some(Meta::empty()),
        ));
    }

    let previous = order.status_id;
    let mut active: OrderActive = order.into();
    active.status_id = Set(status_id);
    let order = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(order_id, from = previous, to = status_id, "order status updated");
    Ok(ApiResponse::success(
        "Status updated",
        order.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_order(
    state: &AppState,
    id: i32,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let txn = crud::begin_write(&state.orm).await?;
    let existing = crud::find_or_404::<Orders, _>(&txn, "order", id).await?;
    let user_id = existing.user_id;
    let current_status = existing.status_id;

    let mut active: OrderActive = existing.into();
    if let Some(status_id) = payload.status_id {
        if check_status_change(&txn, state.status_policy, id, current_status, status_id).await? {
            active.status_id = Set(status_id);
        }
    }
    if let Some(payment_method_id) = payload.payment_method_id {
        crud::find_or_404::<PaymentMethods, _>(&txn, "payment method", payment_method_id)
            .await?;
        active.payment_method_id = Set(payment_method_id);
    }
    if let Some(address_id) = payload.shipping_address_id {
        ensure_address_owned(&txn, address_id, user_id).await?;
        active.shipping_address_id = Set(address_id);
    }
    if let Some(delivery_price) = payload.delivery_price {
        ensure_non_negative("delivery_price", delivery_price)?;
        active.delivery_price = Set(delivery_price);
    }
    if let Some(tracking_number) = payload.tracking_number {
        active.tracking_number = Set(Some(tracking_number));
    }
    if let Some(notes) = payload.notes {
        active.notes = Set(Some(notes));
    }

    let order = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(order_id = order.id, "order updated");
    Ok(ApiResponse::success("Updated", order.into(), Some(Meta::empty())))
}

pub async fn delete_order(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let deleted = crud::delete_by_id::<Orders, _>(&state.orm, "order", id).await?;
    Ok(ApiResponse::success("Deleted", deleted, Some(Meta::empty())))
}

#[derive(FromRow)]
struct OrderHeaderRow {
    order_id: i32,
    order_date: DateTime<Utc>,
    status: String,
    payment_method: String,
    total_price: i64,
    delivery_price: i64,
    tracking_number: Option<String>,
    products_count: i64,
    total_items: i64,
}

#[derive(FromRow)]
struct OrderLineRow {
    order_id: i32,
    product_id: i32,
    name: String,
    quantity: i32,
    price_per_unit: i64,
    total_price: i64,
}

/// A user's orders, newest first, with status and payment names and product lines.
pub async fn user_orders(
    state: &AppState,
    user_id: i32,
) -> AppResult<ApiResponse<Vec<OrderWithProducts>>> {
    crud::find_or_404::<Users, _>(&state.orm, "user", user_id).await?;

    let headers = sqlx::query_as::<_, OrderHeaderRow>(
        r#"
        SELECT o.id AS order_id,
               o.order_date,
               s.name AS status,
               pm.name AS payment_method,
               o.total_price,
               o.delivery_price,
               o.tracking_number,
               COUNT(od.id) AS products_count,
               COALESCE(SUM(od.quantity), 0) AS total_items
        FROM orders o
        JOIN order_statuses s ON s.id = o.status_id
        JOIN payment_methods pm ON pm.id = o.payment_method_id
        LEFT JOIN order_details od ON od.order_id = o.id
        WHERE o.user_id = ?1
        GROUP BY o.id
        ORDER BY o.order_date DESC, o.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;

    let line_rows = sqlx::query_as::<_, OrderLineRow>(
        r#"
        SELECT od.order_id,
               od.product_id,
               p.name,
               od.quantity,
               od.price_per_unit,
               od.quantity * od.price_per_unit AS total_price
        FROM order_details od
        JOIN orders o ON o.id = od.order_id
        JOIN products p ON p.id = od.product_id
        WHERE o.user_id = ?1
        ORDER BY od.order_id, od.id
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;

    let mut lines_by_order: HashMap<i32, Vec<OrderProductLine>> = HashMap::new();
    for row in line_rows {
        lines_by_order
            .entry(row.order_id)
            .or_default()
            .push(OrderProductLine {
                product_id: row.product_id,
                name: row.name,
                quantity: row.quantity,
                price_per_unit: row.price_per_unit,
                total_price: row.total_price,
            });
    }

    let orders: Vec<OrderWithProducts> = headers
        .into_iter()
        .map(|header| OrderWithProducts {
            products: lines_by_order.remove(&header.order_id).unwrap_or_default(),
            order_id: header.order_id,
            order_date: header.order_date,
            status: header.status,
            payment_method: header.payment_method,
            total_price: header.total_price,
            delivery_price: header.delivery_price,
            tracking_number: header.tracking_number,
            products_count: header.products_count,
            total_items: header.total_items,
        })
        .collect();

    tracing::debug!(user_id, orders = orders.len(), "user orders");
    Ok(ApiResponse::list("User orders", orders))
}

/// Detail lines of one order, each with its product.
pub async fn order_details(
    state: &AppState,
    order_id: i32,
) -> AppResult<ApiResponse<Vec<OrderDetailWithProduct>>> {
    crud::find_or_404::<Orders, _>(&state.orm, "order", order_id).await?;
    let rows = OrderDetails::find()
        .filter(DetailCol::OrderId.eq(order_id))
        .order_by_asc(DetailCol::Id)
        .find_also_related(Products)
        .all(&state.orm)
        .await?;

    let details: Vec<OrderDetailWithProduct> = rows
        .into_iter()
        .map(|(detail, product)| OrderDetailWithProduct {
            line_total: i64::from(detail.quantity) * detail.price_per_unit,
            detail: detail.into(),
            product: product.map(Into::into),
        })
        .collect();
    Ok(ApiResponse::list("Order details", details))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_multiplies_in_cents() {
        assert_eq!(line_total(2, 5000).ok(), Some(10_000));
    }

    #[test]
    fn line_total_rejects_zero_quantity_and_negative_price() {
        assert!(matches!(line_total(0, 100), Err(AppError::BadRequest(_))));
        assert!(matches!(line_total(1, -1), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn sum_of_lines_is_exact() {
        let lines = [(2, 5000), (1, 1999), (3, 1)];
        assert_eq!(sum_lines(&lines).ok(), Some(12_002));
        assert_eq!(sum_lines(&[]).ok(), Some(0));
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let lines = [(i32::MAX, i64::MAX / 2)];
        assert!(sum_lines(&lines).is_err());
    }
}
