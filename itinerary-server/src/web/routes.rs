//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::domain::{Coordinate, InvalidCoordinate};
use crate::planner::{
    AnchorRequest, PersonalizedRequest, PlanError, Planner, SiteRepository as _,
};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/sites/near", get(sites_near))
        .route("/itinerary/plan", post(plan_itinerary))
        .route("/itinerary/personalized", post(plan_personalized))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search for documented sites near a coordinate.
async fn sites_near(
    State(state): State<AppState>,
    Query(query): Query<SitesNearQuery>,
) -> Result<Json<SitesNearResponse>, AppError> {
    let origin = parse_coordinate(query.lat, query.lng)?;

    if !query.radius_km.is_finite() || query.radius_km <= 0.0 {
        return Err(AppError::BadRequest {
            message: format!("Invalid search radius: {}", query.radius_km),
        });
    }

    let sites = state
        .catalog
        .find_near(origin, query.radius_km, query.category)
        .await
        .map_err(|e| AppError::Upstream {
            message: e.to_string(),
        })?;

    let sites = sites.iter().map(SiteResult::from_site).collect();
    Ok(Json(SitesNearResponse { sites }))
}

/// Plan an itinerary around an anchor point.
async fn plan_itinerary(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanAnchorRequest = parse_body(&body)?;

    let anchor = parse_coordinate(req.lat, req.lng)?;

    let request = AnchorRequest {
        anchor,
        radius_km: req.radius_km,
        filter: req.category,
        max_stops: req.max_stops,
        budget_minutes: req.budget_minutes,
        mode: req.mode,
        preferences: req.preferences.into_preferences(),
        owner: req.owner,
    };

    let planner = Planner::new(
        state.catalog.as_ref(),
        state.catalog.as_ref(),
        state.catalog.as_ref(),
        &state.config,
    );
    let outcome = planner.plan_from_anchor(&request).await?;

    Ok(Json(PlanResponse::from_outcome(outcome)).into_response())
}

/// Plan a personalized itinerary from an arbitrary origin.
async fn plan_personalized(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: PlanPersonalizedRequest = parse_body(&body)?;

    let origin = parse_coordinate(req.lat, req.lng)?;

    let request = PersonalizedRequest {
        origin,
        interests: req.interests,
        max_stops: req.max_stops,
        budget_minutes: req.budget_minutes,
        mode: req.mode,
        preferences: req.preferences.into_preferences(),
        owner: req.owner,
    };

    let planner = Planner::new(
        state.catalog.as_ref(),
        state.catalog.as_ref(),
        state.catalog.as_ref(),
        &state.config,
    );
    let outcome = planner.plan_personalized(&request).await?;

    Ok(Json(PlanResponse::from_outcome(outcome)).into_response())
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(body = %String::from_utf8_lossy(body), "request body failed to parse");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

fn parse_coordinate(lat: f64, lng: f64) -> Result<Coordinate, AppError> {
    Coordinate::new(lat, lng).map_err(|e: InvalidCoordinate| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidRequest(msg) => AppError::BadRequest { message: msg },
            PlanError::Repository { message } => AppError::Upstream { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::error!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_error_mapping() {
        let err: AppError = PlanError::InvalidRequest("bad budget".to_string()).into();
        assert!(matches!(err, AppError::BadRequest { .. }));

        let err: AppError = PlanError::Repository {
            message: "timeout".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Upstream { .. }));
    }

    #[test]
    fn coordinate_parse_rejects_out_of_range() {
        assert!(parse_coordinate(36.75, 3.06).is_ok());
        assert!(parse_coordinate(95.0, 3.06).is_err());
        assert!(parse_coordinate(36.75, f64::NAN).is_err());
    }
}
