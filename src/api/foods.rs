//! Food listing API endpoints

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState, AuthIdentity};
use crate::models::{CreateFoodInput, FoodFilter, SortOrder, UpdateFoodInput};
use crate::services::FoodServiceError;

/// Query parameters for browsing listings
#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
}

/// Response for a successful delete
#[derive(Debug, Serialize)]
struct DeleteResponse {
    deleted: bool,
}

/// Map a service failure to its API envelope. Internal causes are logged,
/// never returned to the client.
fn food_error(e: FoodServiceError) -> ApiError {
    match e {
        FoodServiceError::NotFound => ApiError::not_found("Food not found"),
        FoodServiceError::InternalError(cause) => {
            tracing::error!("Food listing operation failed: {:#}", cause);
            ApiError::internal_error("Internal server error")
        }
    }
}

/// Build the public food routes (no auth required)
pub fn public_router() -> Router<AppState> {
    Router::new().route("/foods", get(browse_foods))
}

/// Build the protected food routes (requires auth middleware)
pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/foods", post(create_food))
        .route("/foods/{email}", get(foods_by_donor))
        .route("/food/{id}", get(get_food))
        .route("/food/{id}", patch(update_food))
        .route("/food/{id}", delete(delete_food))
}

/// GET /foods - Browse all listings
///
/// Open to anonymous visitors so the public board renders without a
/// session. Supports substring search on the food name, an exact status
/// filter, and sorting by expiry date.
async fn browse_foods(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = FoodFilter {
        search: query.search,
        status: query.status,
        sort: query.sort.as_deref().map(SortOrder::parse),
    };

    let foods = state
        .food_service
        .browse(filter)
        .await
        .map_err(food_error)?;
    Ok(Json(foods))
}

/// GET /food/{id} - Fetch a single listing
async fn get_food(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let food = state.food_service.get(id).await.map_err(food_error)?;
    Ok(Json(food))
}

/// GET /foods/{email} - Listings donated by one user
///
/// The path email must match the authenticated identity; a valid token
/// for someone else gets a 403.
async fn foods_by_donor(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !identity.0.owns(&email) {
        tracing::warn!("Rejected donor listing for {}: token issued to another user", email);
        return Err(ApiError::forbidden());
    }

    let foods = state
        .food_service
        .list_by_donor(&email)
        .await
        .map_err(food_error)?;
    Ok(Json(foods))
}

/// POST /foods - Create a listing
async fn create_food(
    State(state): State<AppState>,
    Json(input): Json<CreateFoodInput>,
) -> Result<impl IntoResponse, ApiError> {
    let food = state
        .food_service
        .create(input)
        .await
        .map_err(food_error)?;
    Ok(Json(food))
}

/// PATCH /food/{id} - Partially update a listing
///
/// Only fields present in the body change; everything else keeps its
/// stored value.
async fn update_food(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateFoodInput>,
) -> Result<impl IntoResponse, ApiError> {
    let food = state
        .food_service
        .update(id, input)
        .await
        .map_err(food_error)?;
    Ok(Json(food))
}

/// DELETE /food/{id} - Remove a listing
async fn delete_food(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.food_service.delete(id).await.map_err(food_error)?;
    Ok(Json(DeleteResponse { deleted: true }))
}
