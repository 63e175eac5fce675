use std::fmt::{Display, Formatter};

use owo_colors::OwoColorize;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::api::{CASH_GAME, ClientError, PracticeApi};
use crate::cards::render_strip;
use crate::model::{AttemptRequest, Feedback, GtoAction, Scenario, Street};

pub const FETCH_FAILED: &str = "Failed to fetch scenario";
pub const SUBMIT_FAILED: &str = "Failed to submit action";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreetFilter {
    #[default]
    All,
    Only(Street),
}

impl StreetFilter {
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Some(StreetFilter::All);
        }
        Street::from_slug(value).map(StreetFilter::Only)
    }

    pub fn matches(self, scenario: &Scenario) -> bool {
        match self {
            StreetFilter::All => true,
            StreetFilter::Only(street) => scenario.street == street,
        }
    }
}

impl Display for StreetFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StreetFilter::All => f.write_str("All Streets"),
            StreetFilter::Only(street) => Display::fmt(street, f),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrainingState {
    Loading,
    Error(String),
    Empty,
    Ready(Scenario),
    Submitted {
        scenario: Scenario,
        feedback: Option<Feedback>,
    },
}

pub struct TrainingPage<R: Rng = StdRng> {
    state: TrainingState,
    filter: StreetFilter,
    rng: R,
}

impl<R: Rng> TrainingPage<R> {
    pub fn new(rng: R) -> Self {
        Self {
            state: TrainingState::Loading,
            filter: StreetFilter::All,
            rng,
        }
    }

    pub fn state(&self) -> &TrainingState {
        &self.state
    }

    pub fn filter(&self) -> StreetFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: StreetFilter) {
        self.filter = filter;
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        match &self.state {
            TrainingState::Ready(scenario) | TrainingState::Submitted { scenario, .. } => {
                Some(scenario)
            }
            _ => None,
        }
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        match &self.state {
            TrainingState::Submitted { feedback, .. } => feedback.as_ref(),
            _ => None,
        }
    }

    pub fn actions_enabled(&self) -> bool {
        matches!(self.state, TrainingState::Ready(_))
    }

    pub async fn load<A: PracticeApi>(&mut self, api: &A) {
        self.state = TrainingState::Loading;
        let result = api.scenarios(CASH_GAME).await;
        self.apply_fetch(result);
    }

    pub fn apply_fetch(&mut self, result: Result<Vec<Scenario>, ClientError>) {
        self.state = match result {
            Ok(scenarios) => {
                let candidates: Vec<&Scenario> = scenarios
                    .iter()
                    .filter(|scenario| self.filter.matches(scenario))
                    .collect();
                debug!(
                    fetched = scenarios.len(),
                    candidates = candidates.len(),
                    "scenarios received"
                );
                match candidates.choose(&mut self.rng) {
                    Some(scenario) => TrainingState::Ready((*scenario).clone()),
                    None => TrainingState::Empty,
                }
            }
            Err(err) => {
                warn!(error = %err, "scenario fetch failed");
                TrainingState::Error(FETCH_FAILED.to_string())
            }
        };
    }

    /// Locks the action list and returns the attempt to post. `None` when no
    /// scenario is ready or the label is not one of its actions.
    pub fn begin_submit(&mut self, label: &str) -> Option<AttemptRequest> {
        let scenario = match &self.state {
            TrainingState::Ready(scenario) if scenario.offers(label) => scenario.clone(),
            _ => return None,
        };
        let attempt = AttemptRequest {
            scenario_id: scenario.id.clone(),
            action: label.to_string(),
        };
        self.state = TrainingState::Submitted {
            scenario,
            feedback: None,
        };
        Some(attempt)
    }

    pub fn complete_submit(&mut self, result: Result<Feedback, ClientError>) {
        let TrainingState::Submitted { scenario, .. } = &self.state else {
            return;
        };
        self.state = match result {
            Ok(feedback) => TrainingState::Submitted {
                scenario: scenario.clone(),
                feedback: Some(feedback),
            },
            Err(err) => {
                warn!(error = %err, "attempt submission failed");
                TrainingState::Error(SUBMIT_FAILED.to_string())
            }
        };
    }

    pub async fn submit<A: PracticeApi>(&mut self, api: &A, label: &str) -> bool {
        let Some(attempt) = self.begin_submit(label) else {
            return false;
        };
        let result = api.submit_attempt(&attempt).await;
        self.complete_submit(result);
        true
    }

    pub async fn next_scenario<A: PracticeApi>(&mut self, api: &A) {
        self.load(api).await;
    }

    pub fn render(&self, color: bool) -> Vec<String> {
        match &self.state {
            TrainingState::Loading => vec!["Loading scenario...".to_string()],
            TrainingState::Error(message) => {
                let line = format!("Error: {message}");
                vec![if color { line.red().to_string() } else { line }]
            }
            TrainingState::Empty => vec!["No scenario found.".to_string()],
            TrainingState::Ready(scenario) => self.render_table(scenario, true, color),
            TrainingState::Submitted { scenario, feedback } => {
                let mut lines = self.render_table(scenario, false, color);
                match feedback {
                    Some(feedback) => lines.extend(render_feedback(feedback, color)),
                    None => lines.push("Submitting...".to_string()),
                }
                lines
            }
        }
    }

    fn render_table(&self, scenario: &Scenario, enabled: bool, color: bool) -> Vec<String> {
        let mut lines = Vec::new();
        let title = "GTO Poker Trainer";
        lines.push(if color {
            format!("{} [{}]", title.bold().cyan(), self.filter)
        } else {
            format!("{title} [{}]", self.filter)
        });
        lines.push(format!(
            "Position: {} | Stack: {}bb | Street: {}",
            scenario.position, scenario.stack_size, scenario.street
        ));
        lines.push(format!(
            "Hole cards: {}",
            render_strip(&scenario.hole_cards, color)
        ));
        if scenario.street.shows_board() {
            lines.push(format!(
                "Board: {}",
                render_strip(&scenario.community_cards, color)
            ));
        }
        lines.push(if enabled {
            "Actions:".to_string()
        } else {
            "Actions (locked):".to_string()
        });
        for (idx, action) in scenario.action_labels().into_iter().enumerate() {
            let label = if color && enabled {
                action.bold().green().to_string()
            } else {
                action.to_string()
            };
            lines.push(format!("  {}. {}", idx + 1, label));
        }
        lines
    }
}

fn render_feedback(feedback: &Feedback, color: bool) -> Vec<String> {
    let verdict = if feedback.is_correct {
        "Correct!"
    } else {
        "Incorrect"
    };
    let mut lines = Vec::new();
    lines.push(match (color, feedback.is_correct) {
        (false, _) => verdict.to_string(),
        (true, true) => verdict.bold().green().to_string(),
        (true, false) => verdict.bold().red().to_string(),
    });
    lines.push(feedback.explanation.clone());
    lines.push(format!("Your Play: EV {:.2}", feedback.chosen_action_ev));
    lines.push(format!(
        "Optimal Play: {} (EV {:.2})",
        feedback.correct_action.action, feedback.correct_action.ev
    ));
    let difference = format!("{:.2}", feedback.ev_difference);
    lines.push(match (color, feedback.ev_difference < 0.0) {
        (false, _) => format!("EV Difference: {difference}"),
        (true, true) => format!("EV Difference: {}", difference.red()),
        (true, false) => format!("EV Difference: {}", difference.green()),
    });
    if let Some(alternatives) = &feedback.alternative_line {
        lines.push("Alternative Lines:".to_string());
        lines.extend(alternatives.iter().map(render_alternative));
    }
    lines.push("n = next scenario, b = back to dashboard".to_string());
    lines
}

fn render_alternative(action: &GtoAction) -> String {
    match &action.explanation {
        Some(explanation) => format!("  {} (EV: {:.2}) - {}", action.action, action.ev, explanation),
        None => format!("  {} (EV: {:.2})", action.action, action.ev),
    }
}
