//! Application state shared across all request handlers

use crate::database::TutorialStore;
use crate::weather::WeatherClient;

/// Cloned into every handler by axum; both members are cheap handles
#[derive(Clone)]
pub struct AppState {
    pub store: TutorialStore,
    pub weather: WeatherClient,
}
