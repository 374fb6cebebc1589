use anyhow::{Context, Result, bail};
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use weather_core::{CreatedRecord, WeatherRecord, WeatherService, WeatherSubmission};

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct AppState {
    pub service: WeatherService,
}

/// Build the router: `POST /weather` and `GET /weather/{id}`, with CORS
/// restricted to `allowed_origin`.
pub fn router(service: WeatherService, allowed_origin: &str) -> Result<Router> {
    let cors = cors_layer(allowed_origin)?;

    Ok(Router::new()
        .route("/weather", post(create_weather))
        .route("/weather/{id}", get(get_weather))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState { service }))
}

/// One origin; any method and header, echoed back from the preflight request.
///
/// Requests from any other origin get no `Access-Control-Allow-*` grant.
fn cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
    let trimmed = allowed_origin.trim();
    if trimmed.is_empty() || trimmed == "*" {
        bail!("allowed origin must be a single explicit origin, got '{allowed_origin}'");
    }

    let origin = HeaderValue::from_str(trimmed)
        .with_context(|| format!("Invalid allowed origin: '{allowed_origin}'"))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

async fn create_weather(
    State(state): State<AppState>,
    payload: Result<Json<WeatherSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedRecord>), ApiError> {
    let Json(submission) = payload?;
    let id = state.service.submit(submission).await?;

    Ok((StatusCode::CREATED, Json(CreatedRecord { id })))
}

async fn get_weather(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WeatherRecord>, ApiError> {
    Ok(Json(state.service.lookup(&id)?))
}
