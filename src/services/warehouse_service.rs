use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::{
    dto::{
        inventory::InventoryLine,
        warehouses::{CreateWarehouseRequest, UpdateWarehouseRequest},
    },
    entity::warehouses::{ActiveModel, Column, Entity as Warehouses},
    error::AppResult,
    models::Warehouse,
    response::{ApiResponse, Deleted, Meta},
    services::{crud, inventory_service},
    state::AppState,
};

pub async fn list_warehouses(state: &AppState) -> AppResult<ApiResponse<Vec<Warehouse>>> {
    let warehouses: Vec<Warehouse> = Warehouses::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Warehouse::from)
        .collect();
    Ok(ApiResponse::list("Warehouses", warehouses))
}

pub async fn get_warehouse(state: &AppState, id: i32) -> AppResult<ApiResponse<Warehouse>> {
    let warehouse = crud::find_or_404::<Warehouses, _>(&state.orm, "warehouse", id).await?;
    Ok(ApiResponse::success("Warehouse", warehouse.into(), None))
}

pub async fn create_warehouse(
    state: &AppState,
    payload: CreateWarehouseRequest,
) -> AppResult<ApiResponse<Warehouse>> {
    let warehouse = ActiveModel {
        id: NotSet,
        name: Set(payload.name),
        address: Set(payload.address),
        phone: Set(payload.phone),
        manager_name: Set(payload.manager_name),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(warehouse_id = warehouse.id, "warehouse created");
    Ok(ApiResponse::success(
        "Warehouse created",
        warehouse.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_warehouse(
    state: &AppState,
    id: i32,
    payload: UpdateWarehouseRequest,
) -> AppResult<ApiResponse<Warehouse>> {
    let existing = crud::find_or_404::<Warehouses, _>(&state.orm, "warehouse", id).await?;
    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(address) = payload.address {
        active.address = Set(address);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(phone);
    }
    if let Some(manager_name) = payload.manager_name {
        active.manager_name = Set(manager_name);
    }
    let warehouse = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Updated",
        warehouse.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_warehouse(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let deleted = crud::delete_by_id::<Warehouses, _>(&state.orm, "warehouse", id).await?;
    Ok(ApiResponse::success("Deleted", deleted, Some(Meta::empty())))
}

pub async fn warehouse_inventory(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<Vec<InventoryLine>>> {
    crud::find_or_404::<Warehouses, _>(&state.orm, "warehouse", id).await?;
    let lines = inventory_service::lines_for_warehouse(&state.pool, id).await?;
    Ok(ApiResponse::list("Warehouse inventory", lines))
}

pub async fn warehouse_low_stock(
    state: &AppState,
    id: i32,
    threshold: i32,
) -> AppResult<ApiResponse<Vec<InventoryLine>>> {
    crud::find_or_404::<Warehouses, _>(&state.orm, "warehouse", id).await?;
    let lines = inventory_service::low_stock_lines(&state.pool, threshold, Some(id)).await?;
    Ok(ApiResponse::list("Warehouse low stock", lines))
}
