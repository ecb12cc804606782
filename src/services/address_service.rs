use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    dto::addresses::{CreateAddressRequest, UpdateAddressRequest},
    entity::{
        addresses::{ActiveModel, Column, Entity as Addresses},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    models::Address,
    response::{ApiResponse, Deleted, Meta},
    services::crud,
    state::AppState,
};

/// Unset `is_default` on every address of `user_id` except `keep`.
async fn clear_other_defaults<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    keep: Option<i32>,
) -> AppResult<u64> {
    let mut update = Addresses::update_many()
        .col_expr(Column::IsDefault, Expr::value(false))
        .filter(Column::UserId.eq(user_id))
        .filter(Column::IsDefault.eq(true));
    if let Some(keep) = keep {
        update = update.filter(Column::Id.ne(keep));
    }
    let result = update.exec(conn).await?;
    Ok(result.rows_affected)
}

pub async fn list_addresses(state: &AppState) -> AppResult<ApiResponse<Vec<Address>>> {
    let addresses: Vec<Address> = Addresses::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Address::from)
        .collect();
    Ok(ApiResponse::list("Addresses", addresses))
}

pub async fn user_addresses(
    state: &AppState,
    user_id: i32,
) -> AppResult<ApiResponse<Vec<Address>>> {
    crud::find_or_404::<Users, _>(&state.orm, "user", user_id).await?;
    let addresses: Vec<Address> = Addresses::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::IsDefault)
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Address::from)
        .collect();
    Ok(ApiResponse::list("User addresses", addresses))
}

pub async fn get_address(state: &AppState, id: i32) -> AppResult<ApiResponse<Address>> {
    let address = crud::find_or_404::<Addresses, _>(&state.orm, "address", id).await?;
    Ok(ApiResponse::success("Address", address.into(), None))
}

pub async fn create_address(
    state: &AppState,
    payload: CreateAddressRequest,
) -> AppResult<ApiResponse<Address>> {
    crud::find_or_404::<Users, _>(&state.orm, "user", payload.user_id).await?;

    let txn = crud::begin_write(&state.orm).await?;
    if payload.is_default {
        clear_other_defaults(&txn, payload.user_id, None).await?;
    }
    let address = ActiveModel {
        id: NotSet,
        user_id: Set(payload.user_id),
        country: Set(payload.country),
        city: Set(payload.city),
        street: Set(payload.street),
        house_number: Set(payload.house_number),
        apartment: Set(payload.apartment),
        postal_code: Set(payload.postal_code),
        is_default: Set(payload.is_default),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(
        address_id = address.id,
        user_id = address.user_id,
        is_default = address.is_default,
        "address created"
    );
    Ok(ApiResponse::success(
        "Address created",
        address.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_address(
    state: &AppState,
    id: i32,
    payload: UpdateAddressRequest,
) -> AppResult<ApiResponse<Address>> {
    let txn = crud::begin_write(&state.orm).await?;
    let existing = crud::find_or_404::<Addresses, _>(&txn, "address", id).await?;
    let user_id = existing.user_id;

    let mut active: ActiveModel = existing.into();
    if let Some(country) = payload.country {
        active.country = Set(country);
    }
    if let Some(city) = payload.city {
        active.city = Set(city);
    }
    if let Some(street) = payload.street {
        active.street = Set(street);
    }
    if let Some(house_number) = payload.house_number {
        active.house_number = Set(house_number);
    }
    if let Some(apartment) = payload.apartment {
        active.apartment = Set(Some(apartment));
    }
    if let Some(postal_code) = payload.postal_code {
        active.postal_code = Set(postal_code);
    }
    if let Some(is_default) = payload.is_default {
        if is_default {
            clear_other_defaults(&txn, user_id, Some(id)).await?;
        }
        active.is_default = Set(is_default);
    }

    let address = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(address_id = address.id, "address updated");
    Ok(ApiResponse::success(
        "Updated",
        address.into(),
        Some(Meta::empty()),
    ))
}

/// Make `address_id` the only default address of `user_id`.
///
/// Both writes run in one transaction: other defaults are cleared first, then
/// the target is set, scoped to the user. An address the user does not own
/// yields `NotFound` and nothing is changed.
pub async fn set_default_address(
    state: &AppState,
    user_id: i32,
    address_id: i32,
) -> AppResult<ApiResponse<Address>> {
    let txn = crud::begin_write(&state.orm).await?;

    let cleared = clear_other_defaults(&txn, user_id, Some(address_id)).await?;
    let result = Addresses::update_many()
        .col_expr(Column::IsDefault, Expr::value(true))
        .filter(Column::Id.eq(address_id))
        .filter(Column::UserId.eq(user_id))
        .exec(&txn)
        .await?;

    if result.rows_affected == 0 {
        txn.rollback().await?;
        tracing::warn!(user_id, address_id, "default address target not owned by user");
        return Err(AppError::NotFound(format!(
            "address {address_id} for user {user_id}"
        )));
    }

    let address = crud::find_or_404::<Addresses, _>(&txn, "address", address_id).await?;
    txn.commit().await?;

    tracing::info!(user_id, address_id, cleared, "default address set");
    Ok(ApiResponse::success(
        "Default address set",
        address.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_address(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let deleted = crud::delete_by_id::<Addresses, _>(&state.orm, "address", id).await?;
    Ok(ApiResponse::success("Deleted", deleted, Some(Meta::empty())))
}
