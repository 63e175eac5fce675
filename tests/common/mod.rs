#![allow(dead_code)]

use chatgto_client::api::{ClientError, PracticeApi};
use chatgto_client::model::{AttemptRequest, Feedback, GtoAction, HealthStatus, Scenario, Street};
use parking_lot::Mutex;

/// Canned backend; `Err(code)` entries answer with that HTTP status.
pub struct MockApi {
    pub health: Result<HealthStatus, u16>,
    pub scenarios: Result<Vec<Scenario>, u16>,
    pub feedback: Result<Feedback, u16>,
    pub attempts: Mutex<Vec<AttemptRequest>>,
    pub fetches: Mutex<u32>,
}

impl MockApi {
    pub fn with_scenarios(scenarios: Vec<Scenario>) -> Self {
        Self {
            health: Ok(HealthStatus {
                status: "ok".to_string(),
            }),
            scenarios: Ok(scenarios),
            feedback: Ok(feedback(true)),
            attempts: Mutex::new(Vec::new()),
            fetches: Mutex::new(0),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            health: Err(status),
            scenarios: Err(status),
            feedback: Err(status),
            attempts: Mutex::new(Vec::new()),
            fetches: Mutex::new(0),
        }
    }
}

impl PracticeApi for MockApi {
    async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.health.clone().map_err(ClientError::Status)
    }

    async fn scenarios(&self, _category: &str) -> Result<Vec<Scenario>, ClientError> {
        *self.fetches.lock() += 1;
        self.scenarios.clone().map_err(ClientError::Status)
    }

    async fn submit_attempt(&self, attempt: &AttemptRequest) -> Result<Feedback, ClientError> {
        self.attempts.lock().push(attempt.clone());
        self.feedback.clone().map_err(ClientError::Status)
    }
}

pub fn gto(label: &str, ev: f64) -> GtoAction {
    GtoAction {
        action: label.to_string(),
        ev,
        explanation: None,
    }
}

pub fn scenario(id: &str, street: Street) -> Scenario {
    let board = match street {
        Street::PreFlop => vec![],
        Street::PostFlop => vec!["Qc", "8h", "3s"],
        Street::Turn => vec!["8s", "7s", "2h", "As"],
        Street::River => vec!["7c", "8c", "9c", "2h", "3d"],
        Street::Unknown => unreachable!("no fixture board for Street::Unknown"),
    };
    Scenario {
        id: id.to_string(),
        category: "cash_game".to_string(),
        position: "Button".to_string(),
        stack_size: 100.0,
        hole_cards: vec!["As".to_string(), "Kd".to_string()],
        community_cards: board.into_iter().map(String::from).collect(),
        gto_actions: vec![gto("Raise", 10.0), gto("Call", 4.0), gto("Fold", 0.0)],
        action_options: Vec::new(),
        correct_action: Some(gto("Raise", 10.0)),
        street,
    }
}

pub fn feedback(is_correct: bool) -> Feedback {
    Feedback {
        is_correct,
        chosen_action_ev: if is_correct { 10.0 } else { 4.0 },
        correct_action: gto("Raise", 10.0),
        ev_difference: if is_correct { 0.0 } else { -6.0 },
        explanation: "Raising isolates the limper.".to_string(),
        alternative_line: Some(vec![GtoAction {
            action: "Call".to_string(),
            ev: 4.0,
            explanation: Some("Calling keeps weaker hands in.".to_string()),
        }]),
    }
}
