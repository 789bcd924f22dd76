//! HTTP routes: the dashboard page, its two form actions and a small JSON API

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use super::config::ServerConfig;
use crate::dashboard::{render_page, CalculateInputs, DashboardState, DashboardView};
use crate::evaluation::{evaluate, EvaluationResult};

/// Application state shared across all handlers
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// The one dashboard session, replaced whole on every transition
    pub session: RwLock<DashboardState>,
    pub started_at: DateTime<Utc>,
    start_time: Instant,
}

impl AppState {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self {
            config,
            session: RwLock::new(DashboardState::new()),
            started_at: Utc::now(),
            start_time: Instant::now(),
        }
    }

    fn render(&self, state: &DashboardState) -> Html<String> {
        Html(render_page(&DashboardView::from_state(state, self.config.debug)))
    }
}

/// Build the application router
pub fn build_router(config: Arc<ServerConfig>) -> Router {
    build_router_with_state(Arc::new(AppState::new(config)))
}

/// Build the router around existing state (lets tests inspect the session)
pub fn build_router_with_state(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let api = Router::new()
        .route("/api/evaluate", post(evaluate_handler))
        .route("/api/result", get(result_handler))
        .layer(cors);

    Router::new()
        .route("/", get(index_handler))
        .route("/years", post(years_handler))
        .route("/calculate", post(calculate_handler))
        .route("/health", get(health_handler))
        .merge(api)
        .with_state(state)
}

/// GET / - render the current session
async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let session = state.session.read();
    state.render(&session)
}

/// POST /years - regenerate the flow fields
async fn years_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Html<String> {
    let inputs = CalculateInputs::from_form(&form);

    let mut session = state.session.write();
    let next = session.with_entries(&inputs).on_years_changed(inputs.years);
    *session = next;

    state.render(&session)
}

/// POST /calculate - evaluate the submitted project
async fn calculate_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Html<String> {
    let inputs = CalculateInputs::from_form(&form);

    let mut session = state.session.write();
    let next = session.on_calculate(&inputs);
    *session = next;

    state.render(&session)
}

/// Body of POST /api/evaluate
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    /// Initial investment as a positive amount (missing = 0)
    #[serde(default)]
    pub investment: Option<f64>,
    /// Cost of capital in percent (missing = 0)
    #[serde(default)]
    pub cost_of_capital_pct: Option<f64>,
    /// Flows of periods 1..N
    #[serde(default)]
    pub flows: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub result: EvaluationResult,
    /// Cumulative ROI per period; `null` for a zero investment
    pub roi: Option<Vec<f64>>,
    pub npv_accepted: bool,
    pub irr_accepted: bool,
    pub evaluated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// POST /api/evaluate - stateless evaluation, the session is untouched
async fn evaluate_handler(payload: Result<Json<EvaluateRequest>, JsonRejection>) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            log::warn!("Rejected evaluate request: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, format!("Invalid JSON: {}", rejection.body_text()));
        }
    };

    let investment = request.investment.unwrap_or(0.0);
    let rate = request.cost_of_capital_pct.unwrap_or(0.0) / 100.0;

    match evaluate(investment, rate, &request.flows) {
        Ok(result) => {
            let response = EvaluateResponse {
                roi: result.roi_series(),
                npv_accepted: result.npv_accepted(),
                irr_accepted: result.irr_accepted(),
                result,
                evaluated_at: Utc::now(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            log::warn!("Rejected evaluate request: {}", e);
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}

/// GET /api/result - the session's stored result
async fn result_handler(State(state): State<Arc<AppState>>) -> Response {
    let result = state.session.read().last_result.clone();

    match result {
        Some(result) => (StatusCode::OK, Json(result.as_ref().clone())).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "No result calculated yet"),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub started_at: DateTime<Utc>,
    pub uptime_secs: u64,
}

/// GET /health
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
        started_at: state.started_at,
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
