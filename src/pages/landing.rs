use owo_colors::OwoColorize;
use tracing::warn;

use crate::api::PracticeApi;

pub const LOADING_STATUS: &str = "loading...";
pub const UNAVAILABLE_STATUS: &str = "unavailable";

#[derive(Debug, Clone)]
pub struct LandingPage {
    status: String,
}

impl Default for LandingPage {
    fn default() -> Self {
        Self {
            status: LOADING_STATUS.to_string(),
        }
    }
}

impl LandingPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub async fn load<A: PracticeApi>(&mut self, api: &A) {
        self.status = match api.health().await {
            Ok(health) => health.status,
            Err(err) => {
                warn!(error = %err, "health check failed");
                UNAVAILABLE_STATUS.to_string()
            }
        };
    }

    pub fn render(&self, color: bool) -> Vec<String> {
        if color {
            vec![
                "ChatGTO".bold().cyan().to_string(),
                format!("{} {}", "Backend status:".bold().white(), self.status),
            ]
        } else {
            vec![
                "ChatGTO".to_string(),
                format!("Backend status: {}", self.status),
            ]
        }
    }
}
