use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::RwLock;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::api::CASH_GAME;
use crate::model::{AttemptRequest, Feedback, GtoAction, HealthStatus, Scenario, Street};

#[derive(Clone)]
struct AppState {
    scenarios: Arc<RwLock<Vec<Scenario>>>,
}

impl AppState {
    fn new(scenarios: Vec<Scenario>) -> Self {
        Self {
            scenarios: Arc::new(RwLock::new(scenarios)),
        }
    }

    fn by_category(&self, category: &str) -> Vec<Scenario> {
        self.scenarios
            .read()
            .iter()
            .filter(|scenario| scenario.category == category)
            .cloned()
            .collect()
    }

    fn get(&self, id: &str) -> Option<Scenario> {
        self.scenarios
            .read()
            .iter()
            .find(|scenario| scenario.id == id)
            .cloned()
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, thiserror::Error)]
enum ApiError {
    #[error("scenario not found")]
    ScenarioNotFound,
    #[error("action '{0}' is not available in this scenario")]
    UnknownAction(String),
    #[error("scenario has no graded answer")]
    Ungraded,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::ScenarioNotFound => StatusCode::NOT_FOUND,
            ApiError::UnknownAction(_) | ApiError::Ungraded => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub async fn serve(addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "stub backend listening");
    axum::serve(listener, router()).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    let practice = Router::new()
        .route("/scenarios/:category", get(list_scenarios))
        .route("/attempt", post(grade_attempt));

    Router::new()
        .route("/api/v1/health", get(health))
        .nest("/api/v1/practice", practice)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub fn router() -> Router {
    build_router(AppState::new(placeholder_scenarios()))
}

pub fn router_with(scenarios: Vec<Scenario>) -> Router {
    build_router(AppState::new(scenarios))
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}

async fn list_scenarios(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<Vec<Scenario>> {
    Json(state.by_category(&category))
}

async fn grade_attempt(
    State(state): State<AppState>,
    Json(attempt): Json<AttemptRequest>,
) -> Result<Json<Feedback>, ApiError> {
    let scenario = state
        .get(&attempt.scenario_id)
        .ok_or(ApiError::ScenarioNotFound)?;
    Ok(Json(grade(&scenario, &attempt.action)?))
}

fn grade(scenario: &Scenario, label: &str) -> Result<Feedback, ApiError> {
    let chosen = scenario
        .action(label)
        .ok_or_else(|| ApiError::UnknownAction(label.to_string()))?;
    let correct = scenario.correct_action.as_ref().ok_or(ApiError::Ungraded)?;
    let is_correct = chosen.action == correct.action;

    let explanation = if is_correct {
        correct
            .explanation
            .clone()
            .unwrap_or_else(|| format!("{} is the highest EV line here.", correct.action))
    } else {
        format!(
            "{} gives up {:.2} EV compared to {}.",
            chosen.action,
            correct.ev - chosen.ev,
            correct.action
        )
    };
    let alternatives: Vec<GtoAction> = scenario
        .gto_actions
        .iter()
        .filter(|candidate| candidate.action != chosen.action)
        .cloned()
        .collect();

    Ok(Feedback {
        is_correct,
        chosen_action_ev: chosen.ev,
        correct_action: correct.clone(),
        ev_difference: chosen.ev - correct.ev,
        explanation,
        alternative_line: (!alternatives.is_empty()).then_some(alternatives),
    })
}

fn action(label: &str, ev: f64, explanation: &str) -> GtoAction {
    GtoAction {
        action: label.to_string(),
        ev,
        explanation: Some(explanation.to_string()),
    }
}

fn placeholder(
    position: &str,
    street: Street,
    hole: [&str; 2],
    board: &[&str],
    actions: Vec<GtoAction>,
) -> Scenario {
    let correct_action = actions
        .iter()
        .max_by(|a, b| a.ev.total_cmp(&b.ev))
        .cloned()
        .unwrap_or_else(|| action("Fold", 0.0, "No alternatives."));
    Scenario {
        id: Uuid::new_v4().to_string(),
        category: CASH_GAME.to_string(),
        position: position.to_string(),
        stack_size: 100.0,
        hole_cards: hole.iter().map(|card| card.to_string()).collect(),
        community_cards: board.iter().map(|card| card.to_string()).collect(),
        gto_actions: actions,
        action_options: Vec::new(),
        correct_action: Some(correct_action),
        street,
    }
}

/// One fixed hand per street, each with a single highest-EV action.
pub fn placeholder_scenarios() -> Vec<Scenario> {
    vec![
        placeholder(
            "UTG",
            Street::PreFlop,
            ["Ah", "Kh"],
            &[],
            vec![
                action("Raise", 10.0, "Open raise with a premium suited broadway."),
                action("Fold", 0.0, "Folding gives up a clearly profitable open."),
            ],
        ),
        placeholder(
            "BB",
            Street::PostFlop,
            ["Qh", "Qd"],
            &["Qc", "8h", "3s"],
            vec![
                action("Bet", 15.0, "Top set wants to build the pot."),
                action("Check", 5.0, "Checking under-realises a near-nut hand."),
            ],
        ),
        placeholder(
            "SB",
            Street::Turn,
            ["Ts", "9s"],
            &["8s", "7s", "2h", "As"],
            vec![
                action("Bet", 25.0, "Straight flush draw plus made flush bets for value."),
                action("Check", 10.0, "Checking lets worse flushes draw cheaply."),
            ],
        ),
        placeholder(
            "Dealer",
            Street::River,
            ["5c", "6c"],
            &["7c", "8c", "9c", "2h", "3d"],
            vec![
                action("Shove", 50.0, "The straight flush is the nuts."),
                action("Check", -10.0, "Checking the nuts forfeits value."),
            ],
        ),
    ]
}
