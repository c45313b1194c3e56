//! Handlers for category CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use devdocs_core::error::CoreError;
use devdocs_core::types::DbId;
use devdocs_db::models::category::{CreateCategory, UpdateCategory};
use devdocs_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
///
/// List all categories ordered for display.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/categories
///
/// Create a new category. 409 on a duplicate slug.
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::create(&state.pool, &input).await?;

    tracing::info!(category_id = category.id, slug = %category.slug, "Category created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/categories/:id
///
/// Retrieve a single category by ID.
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }))?;

    Ok(Json(DataResponse { data: category }))
}

/// PUT /api/v1/categories/:id
///
/// Partially update a category; unset fields keep their current values.
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    // fetch_one surfaces a missing row as RowNotFound -> 404.
    let category = CategoryRepo::update(&state.pool, category_id, &input).await?;

    tracing::info!(category_id = category.id, "Category updated");

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/:id
///
/// Delete a category; its topics and their content go with it.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = CategoryRepo::delete(&state.pool, category_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }));
    }

    tracing::info!(category_id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
