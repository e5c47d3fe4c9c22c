//! HTTP request handlers for the tutorials API
//!
//! This module implements:
//! - Creating, reading, updating and deleting tutorials
//! - Listing with an optional title filter, by publish state and by difficulty
//! - View and like counters
//! - The static category table
//!
//! Storage failures are logged and answered with a fixed 500 message; unknown
//! ids get a 404. Bodies, ids and query strings that fail to parse get a 400
//! through the extractors in [`crate::extract`].

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::category::{all_categories, Category};
use crate::database::TutorialFilter;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::model::{CreateTutorial, Difficulty, Tutorial, TutorialQuery, UpdateTutorial};
use crate::state::AppState;

/// `GET /api`
///
/// # Response
///
/// - **200 OK** - `{"message": "Welcome to tutorial API."}`
pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to tutorial API." }))
}

/// Creates a new tutorial
///
/// This handler:
/// 1. Checks the title and the field length limits
/// 2. Assigns a fresh id, zero counters and both timestamps
/// 3. Stores the row and points `Location` at it
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Getting Started with Docker",
///   "category": "DevOps",
///   "published": true,
///   "difficulty": "intermediate"
/// }
/// ```
///
/// `difficulty` defaults to `Beginner` when absent. Names in any case and the
/// ordinals 0-2 are accepted.
///
/// # Response
///
/// - **201 Created** - the stored tutorial, with `Location: /api/tutorials/{id}`
/// - **400 Bad Request** - title missing, a field too long, or a body that is not a tutorial
pub async fn create_tutorial(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateTutorial>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let tutorial = Tutorial::new(payload, Utc::now());
    state.store.insert(&tutorial).map_err(|err| {
        ApiError::internal(err, "Some error occurred while creating the Tutorial.")
    })?;

    tracing::info!(id = %tutorial.id, "created tutorial");

    let location = format!("/api/tutorials/{}", tutorial.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(tutorial),
    ))
}

/// Lists tutorials, most recently updated first
///
/// # Query Parameters
///
/// - `title` (optional) - only tutorials whose title contains this text
///
/// # Example
///
/// ```text
/// GET /api/tutorials?title=React
/// ```
///
/// # Response
///
/// - **200 OK** - array of tutorials, possibly empty
pub async fn list_tutorials(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TutorialQuery>,
) -> Result<Json<Vec<Tutorial>>, ApiError> {
    let filter = TutorialFilter {
        title: params.title,
        ..Default::default()
    };
    let tutorials = state.store.list(&filter).map_err(|err| {
        ApiError::internal(err, "Some error occurred while retrieving tutorials.")
    })?;

    tracing::debug!(count = tutorials.len(), "retrieved tutorials");
    Ok(Json(tutorials))
}

/// Lists published tutorials, most recently updated first
///
/// # Response
///
/// - **200 OK** - array of tutorials with `published: true`
pub async fn list_published(
    State(state): State<AppState>,
) -> Result<Json<Vec<Tutorial>>, ApiError> {
    let filter = TutorialFilter {
        published: Some(true),
        ..Default::default()
    };
    let tutorials = state.store.list(&filter).map_err(|err| {
        ApiError::internal(
            err,
            "Some error occurred while retrieving published tutorials.",
        )
    })?;
    Ok(Json(tutorials))
}

/// Distinct category values currently in use
///
/// Empty and missing categories are skipped; the result is sorted.
pub async fn list_categories_in_use(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    let categories = state.store.categories().map_err(|err| {
        ApiError::internal(err, "Some error occurred while retrieving categories.")
    })?;
    Ok(Json(categories))
}

/// Lists tutorials of one difficulty
///
/// # Path Parameters
///
/// - `level` - a difficulty name (any case) or its ordinal, e.g. `advanced` or `2`
///
/// # Response
///
/// - **200 OK** - matching tutorials, most recently updated first
/// - **400 Bad Request** - unknown level
pub async fn list_by_difficulty(
    State(state): State<AppState>,
    ApiPath(level): ApiPath<String>,
) -> Result<Json<Vec<Tutorial>>, ApiError> {
    let difficulty = level
        .parse::<Difficulty>()
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;

    let filter = TutorialFilter {
        difficulty: Some(difficulty),
        ..Default::default()
    };
    let tutorials = state.store.list(&filter).map_err(|err| {
        ApiError::internal(
            err,
            "Some error occurred while retrieving tutorials by difficulty.",
        )
    })?;
    Ok(Json(tutorials))
}

/// Fetches one tutorial
///
/// # Path Parameters
///
/// - `id` - tutorial UUID
///
/// # Response
///
/// - **200 OK** - the tutorial
/// - **400 Bad Request** - `id` is not a UUID
/// - **404 Not Found** - no tutorial with that id
pub async fn get_tutorial(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Tutorial>, ApiError> {
    let tutorial = state
        .store
        .get(id)
        .map_err(|err| ApiError::internal(err, format!("Error retrieving Tutorial with id={id}")))?
        .ok_or_else(|| ApiError::not_found(format!("Cannot find Tutorial with id={id}.")))?;

    Ok(Json(tutorial))
}

/// Applies a partial update
///
/// This handler:
/// 1. Checks the length limits of the supplied fields
/// 2. Writes only the fields present in the body, inside one transaction
/// 3. Refreshes `updatedAt`
///
/// An empty `title` is ignored rather than stored.
///
/// # Request Body
///
/// ```json
/// {
///   "published": true,
///   "readTime": 20
/// }
/// ```
///
/// # Response
///
/// - **200 OK** - `{"message": "Tutorial was updated successfully."}`
/// - **400 Bad Request** - a field too long, negative `readTime`, or a malformed body or id
/// - **404 Not Found** - no tutorial with that id
pub async fn update_tutorial(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateTutorial>,
) -> Result<Json<Value>, ApiError> {
    payload.validate()?;

    let now = Utc::now();
    state
        .store
        .modify(id, |tutorial| payload.apply(tutorial, now))
        .map_err(|err| ApiError::internal(err, format!("Error updating Tutorial with id={id}")))?
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "Cannot update Tutorial with id={id}. Tutorial was not found!"
            ))
        })?;

    tracing::info!(%id, "updated tutorial");
    Ok(Json(json!({ "message": "Tutorial was updated successfully." })))
}

/// Records one view
///
/// The increment and the `updatedAt` refresh commit together, so concurrent
/// views are never lost.
///
/// # Response
///
/// - **200 OK** - `{"message": ..., "viewCount": <new count>}`
/// - **404 Not Found** - no tutorial with that id
pub async fn record_view(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let now = Utc::now();
    let tutorial = state
        .store
        .modify(id, |tutorial| {
            tutorial.view_count += 1;
            tutorial.updated_at = now;
        })
        .map_err(|err| {
            ApiError::internal(
                err,
                format!("Error updating view count for Tutorial with id={id}"),
            )
        })?
        .ok_or_else(|| ApiError::not_found(format!("Cannot find Tutorial with id={id}.")))?;

    Ok(Json(json!({
        "message": "View count updated successfully.",
        "viewCount": tutorial.view_count
    })))
}

/// Records one like
///
/// # Response
///
/// - **200 OK** - `{"message": ..., "likes": <new count>}`
/// - **404 Not Found** - no tutorial with that id
pub async fn record_like(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let now = Utc::now();
    let tutorial = state
        .store
        .modify(id, |tutorial| {
            tutorial.likes += 1;
            tutorial.updated_at = now;
        })
        .map_err(|err| {
            ApiError::internal(err, format!("Error updating likes for Tutorial with id={id}"))
        })?
        .ok_or_else(|| ApiError::not_found(format!("Cannot find Tutorial with id={id}.")))?;

    Ok(Json(json!({
        "message": "Likes updated successfully.",
        "likes": tutorial.likes
    })))
}

/// Deletes one tutorial
///
/// # Path Parameters
///
/// - `id` - tutorial UUID
///
/// # Response
///
/// - **200 OK** - `{"message": "Tutorial was deleted successfully!"}`
/// - **404 Not Found** - no tutorial with that id
pub async fn delete_tutorial(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let existed = state
        .store
        .remove(id)
        .map_err(|err| ApiError::internal(err, format!("Could not delete Tutorial with id={id}")))?;

    if !existed {
        return Err(ApiError::not_found(format!(
            "Cannot delete Tutorial with id={id}. Tutorial was not found!"
        )));
    }

    tracing::info!(%id, "deleted tutorial");
    Ok(Json(json!({ "message": "Tutorial was deleted successfully!" })))
}

/// Deletes every tutorial
///
/// # Response
///
/// - **200 OK** - `{"message": "<n> Tutorials were deleted successfully!"}`
pub async fn delete_all_tutorials(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let removed = state.store.clear().map_err(|err| {
        ApiError::internal(err, "Some error occurred while removing all tutorials.")
    })?;

    tracing::info!(count = removed, "deleted all tutorials");
    Ok(Json(json!({
        "message": format!("{removed} Tutorials were deleted successfully!")
    })))
}

/// `GET /api/categories` - the static id/name table, sorted by name
pub async fn list_categories() -> Json<Vec<Category>> {
    Json(all_categories())
}
