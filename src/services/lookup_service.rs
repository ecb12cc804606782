//! Order statuses and payment methods: two small name/description tables
//! that orders reference.

use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    dto::lookups::{CreateLookupRequest, UpdateLookupRequest},
    entity::{
        order_statuses::{self, Entity as OrderStatuses},
        orders::{Column as OrderCol, Entity as Orders},
        payment_methods::{self, Entity as PaymentMethods},
    },
    error::{AppError, AppResult},
    models::{Order, OrderStatus, PaymentMethod},
    response::{ApiResponse, Deleted, Meta},
    services::crud,
    state::AppState,
};

fn require_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

pub async fn list_statuses(state: &AppState) -> AppResult<ApiResponse<Vec<OrderStatus>>> {
    let statuses: Vec<OrderStatus> = OrderStatuses::find()
        .order_by_asc(order_statuses::Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(OrderStatus::from)
        .collect();
    Ok(ApiResponse::list("Order statuses", statuses))
}

pub async fn get_status(state: &AppState, id: i32) -> AppResult<ApiResponse<OrderStatus>> {
    let status = crud::find_or_404::<OrderStatuses, _>(&state.orm, "order status", id).await?;
    Ok(ApiResponse::success("Order status", status.into(), None))
}

pub async fn create_status(
    state: &AppState,
    payload: CreateLookupRequest,
) -> AppResult<ApiResponse<OrderStatus>> {
    let status = order_statuses::ActiveModel {
        id: NotSet,
        name: Set(require_name(&payload.name)?),
        description: Set(payload.description),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(status_id = status.id, name = %status.name, "order status created");
    Ok(ApiResponse::success(
        "Order status created",
        status.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_status(
    state: &AppState,
    id: i32,
    payload: UpdateLookupRequest,
) -> AppResult<ApiResponse<OrderStatus>> {
    let existing = crud::find_or_404::<OrderStatuses, _>(&state.orm, "order status", id).await?;
    let mut active: order_statuses::ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(require_name(&name)?);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    let status = active.update(&state.orm).await?;
    Ok(ApiResponse::success("Updated", status.into(), Some(Meta::empty())))
}

pub async fn delete_status(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let deleted = crud::delete_by_id::<OrderStatuses, _>(&state.orm, "order status", id).await?;
    Ok(ApiResponse::success("Deleted", deleted, Some(Meta::empty())))
}

pub async fn orders_with_status(
    state: &AppState,
    status_id: i32,
) -> AppResult<ApiResponse<Vec<Order>>> {
    crud::find_or_404::<OrderStatuses, _>(&state.orm, "order status", status_id).await?;
    let orders: Vec<Order> = Orders::find()
        .filter(OrderCol::StatusId.eq(status_id))
        .order_by_desc(OrderCol::OrderDate)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();
    Ok(ApiResponse::list("Orders with status", orders))
}

pub async fn list_payment_methods(
    state: &AppState,
) -> AppResult<ApiResponse<Vec<PaymentMethod>>> {
    let methods: Vec<PaymentMethod> = PaymentMethods::find()
        .order_by_asc(payment_methods::Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(PaymentMethod::from)
        .collect();
    Ok(ApiResponse::list("Payment methods", methods))
}

pub async fn get_payment_method(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<PaymentMethod>> {
    let method =
        crud::find_or_404::<PaymentMethods, _>(&state.orm, "payment method", id).await?;
    Ok(ApiResponse::success("Payment method", method.into(), None))
}

pub async fn create_payment_method(
    state: &AppState,
    payload: CreateLookupRequest,
) -> AppResult<ApiResponse<PaymentMethod>> {
    let method = payment_methods::ActiveModel {
        id: NotSet,
        name: Set(require_name(&payload.name)?),
        description: Set(payload.description),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(payment_method_id = method.id, name = %method.name, "payment method created");
    Ok(ApiResponse::success(
        "Payment method created",
        method.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_payment_method(
    state: &AppState,
    id: i32,
    payload: UpdateLookupRequest,
) -> AppResult<ApiResponse<PaymentMethod>> {
    let existing =
        crud::find_or_404::<PaymentMethods, _>(&state.orm, "payment method", id).await?;
    let mut active: payment_methods::ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(require_name(&name)?);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    let method = active.update(&state.orm).await?;
    Ok(ApiResponse::success("Updated", method.into(), Some(Meta::empty())))
}

pub async fn delete_payment_method(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let deleted =
        crud::delete_by_id::<PaymentMethods, _>(&state.orm, "payment method", id).await?;
    Ok(ApiResponse::success("Deleted", deleted, Some(Meta::empty())))
}

pub async fn orders_with_payment_method(
    state: &AppState,
    payment_method_id: i32,
) -> AppResult<ApiResponse<Vec<Order>>> {
    crud::find_or_404::<PaymentMethods, _>(&state.orm, "payment method", payment_method_id)
        .await?;
    let orders: Vec<Order> = Orders::find()
        .filter(OrderCol::PaymentMethodId.eq(payment_method_id))
        .order_by_desc(OrderCol::OrderDate)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();
    Ok(ApiResponse::list("Orders with payment method", orders))
}
