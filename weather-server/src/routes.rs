use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use tower_http::trace::TraceLayer;
use weather_core::{WeatherReport, WeatherService};

use crate::error::ServerError;

pub fn router(service: WeatherService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/weather", get(weather))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn health() -> &'static str {
    "ok"
}

/// First `city` value in the query string; later repeats are ignored.
fn first_city(pairs: Vec<(String, String)>) -> Option<String> {
    pairs.into_iter().find(|(key, _)| key == "city").map(|(_, value)| value)
}

/// `GET /weather?city=<name>`. A missing `city` is rejected before any upstream call.
async fn weather(
    State(service): State<WeatherService>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<WeatherReport>, ServerError> {
    let Query(pairs) = query.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let city = first_city(pairs)
        .ok_or_else(|| ServerError::BadRequest("missing query parameter `city`".to_string()))?;

    let report = service.lookup(&city).await?;
    Ok(Json(report))
}
