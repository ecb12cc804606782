use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use sea_orm::ActiveValue::NotSet;
use validator::Validate;

use crate::{
    dto::categories::{CategoryWithProducts, CreateCategoryRequest, UpdateCategoryRequest},
    entity::{
        categories::{ActiveModel, Column, Entity as Categories},
        products::{Column as ProductCol, Entity as Products},
    },
    error::{AppError, AppResult},
    models::{Category, Product},
    response::{ApiResponse, Deleted, Meta},
    services::crud,
    state::AppState,
};

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<Vec<Category>>> {
    let categories: Vec<Category> = Categories::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Category::from)
        .collect();
    Ok(ApiResponse::list("Categories", categories))
}

pub async fn get_category(state: &AppState, id: i32) -> AppResult<ApiResponse<Category>> {
    let category = crud::find_or_404::<Categories, _>(&state.orm, "category", id).await?;
    Ok(ApiResponse::success("Category", category.into(), None))
}

pub async fn category_with_products(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<CategoryWithProducts>> {
    let category = crud::find_or_404::<Categories, _>(&state.orm, "category", id).await?;
    let products: Vec<Product> = Products::find()
        .filter(ProductCol::CategoryId.eq(id))
        .order_by_asc(ProductCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let data = CategoryWithProducts {
        category: category.into(),
        products,
    };
    Ok(ApiResponse::success("Category products", data, None))
}

pub async fn create_category(
    state: &AppState,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    payload.validate()?;
    if let Some(parent_id) = payload.parent_category_id {
        crud::find_or_404::<Categories, _>(&state.orm, "category", parent_id).await?;
    }

    let category = ActiveModel {
        id: NotSet,
        name: Set(payload.name),
        description: Set(payload.description),
        parent_category_id: Set(payload.parent_category_id),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(category_id = category.id, "category created");
    Ok(ApiResponse::success(
        "Category created",
        category.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_category(
    state: &AppState,
    id: i32,
    payload: UpdateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    payload.validate()?;
    let existing = crud::find_or_404::<Categories, _>(&state.orm, "category", id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(parent_id) = payload.parent_category_id {
        if parent_id == id {
            return Err(AppError::BadRequest(
                "a category cannot be its own parent".to_string(),
            ));
        }
        crud::find_or_404::<Categories, _>(&state.orm, "category", parent_id).await?;
        active.parent_category_id = Set(Some(parent_id));
    }

    let category = active.update(&state.orm).await?;
    tracing::info!(category_id = category.id, "category updated");
    Ok(ApiResponse::success(
        "Updated",
        category.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_category(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let deleted = crud::delete_by_id::<Categories, _>(&state.orm, "category", id).await?;
    Ok(ApiResponse::success("Deleted", deleted, Some(Meta::empty())))
}
