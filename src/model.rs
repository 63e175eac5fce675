use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::skip_serializing_none;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Street {
    #[default]
    PreFlop,
    PostFlop,
    Turn,
    River,
    /// Any street name this client does not know.
    Unknown,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::PreFlop, Street::PostFlop, Street::Turn, Street::River];

    pub fn label(self) -> &'static str {
        match self {
            Street::PreFlop => "Pre-Flop",
            Street::PostFlop => "Post-Flop",
            Street::Turn => "Turn",
            Street::River => "River",
            Street::Unknown => "Unknown",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Street::PreFlop => "pre-flop",
            Street::PostFlop => "post-flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Unknown => "unknown",
        }
    }

    pub fn from_slug(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        Street::ALL.into_iter().find(|street| {
            street.slug() == value || street.slug().replace('-', "") == value
        })
    }

    pub fn shows_board(self) -> bool {
        !matches!(self, Street::PreFlop)
    }
}

impl Serialize for Street {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

impl<'de> Deserialize<'de> for Street {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Street::from_slug(&raw).unwrap_or(Street::Unknown))
    }
}

impl Display for Street {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GtoAction {
    pub action: String,
    pub ev: f64,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub id: String,
    pub category: String,
    pub position: String,
    pub stack_size: f64,
    pub hole_cards: Vec<String>,
    #[serde(default)]
    pub community_cards: Vec<String>,
    #[serde(default)]
    pub gto_actions: Vec<GtoAction>,
    /// Bare action labels sent by backends that do not score actions yet.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub action_options: Vec<String>,
    #[serde(default)]
    pub correct_action: Option<GtoAction>,
    #[serde(default)]
    pub street: Street,
}

impl Scenario {
    pub fn action(&self, label: &str) -> Option<&GtoAction> {
        self.gto_actions.iter().find(|candidate| candidate.action == label)
    }

    pub fn action_labels(&self) -> Vec<&str> {
        if self.gto_actions.is_empty() {
            self.action_options.iter().map(String::as_str).collect()
        } else {
            self.gto_actions.iter().map(|candidate| candidate.action.as_str()).collect()
        }
    }

    pub fn offers(&self, label: &str) -> bool {
        self.action_labels().contains(&label)
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    pub is_correct: bool,
    pub chosen_action_ev: f64,
    pub correct_action: GtoAction,
    pub ev_difference: f64,
    pub explanation: String,
    #[serde(default)]
    pub alternative_line: Option<Vec<GtoAction>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttemptRequest {
    pub scenario_id: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
}
