//! Route definitions for the tutorials API
//!
//! This module maps every HTTP route to its handler and, optionally, serves
//! the single-page client's build output for everything else.

use std::path::Path;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::handler::{
    create_tutorial, delete_all_tutorials, delete_tutorial, get_tutorial, list_by_difficulty,
    list_categories, list_categories_in_use, list_published, list_tutorials, record_like,
    record_view, update_tutorial, welcome,
};
use crate::state::AppState;
use crate::weather::get_weather;

/// Creates the API router
///
/// # Route Definitions
///
/// - `GET /api` - welcome message
/// - `GET|POST|DELETE /api/tutorials` - list (`?title=`), create, delete all
/// - `GET /api/tutorials/published` - published tutorials only
/// - `GET /api/tutorials/categories` - distinct categories in use
/// - `GET /api/tutorials/difficulty/{level}` - filter by difficulty
/// - `GET|PUT|DELETE /api/tutorials/{id}` - fetch, partial update, delete
/// - `POST /api/tutorials/{id}/view` - increment view count
/// - `POST /api/tutorials/{id}/like` - increment likes
/// - `GET /api/categories` - static category table
/// - `GET /api/weather?location=` - weather passthrough
///
/// # Example Usage
///
/// ```no_run
/// # use tutorials::database::TutorialStore;
/// # use tutorials::route::create_app;
/// # use tutorials::state::AppState;
/// # use tutorials::weather::WeatherClient;
/// let state = AppState {
///     store: TutorialStore::open("tutorials.db").unwrap(),
///     weather: WeatherClient::new("http://api.openweathermap.org/data/2.5", "key"),
/// };
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/", get(welcome))
        .route(
            "/tutorials",
            get(list_tutorials)
                .post(create_tutorial)
                .delete(delete_all_tutorials),
        )
        .route("/tutorials/published", get(list_published))
        .route("/tutorials/categories", get(list_categories_in_use))
        .route("/tutorials/difficulty/{level}", get(list_by_difficulty))
        .route(
            "/tutorials/{id}",
            get(get_tutorial).put(update_tutorial).delete(delete_tutorial),
        )
        .route("/tutorials/{id}/view", post(record_view))
        .route("/tutorials/{id}/like", post(record_like))
        .route("/categories", get(list_categories))
        .route("/weather", get(get_weather));

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
}

/// Serves the client build in `dist` for every non-API path
///
/// Unknown paths fall back to `index.html` so client-side routing works.
pub fn with_client(app: Router, dist: &Path) -> Router {
    let index = dist.join("index.html");
    app.fallback_service(ServeDir::new(dist).fallback(ServeFile::new(index)))
}
