use owo_colors::OwoColorize;

use crate::auth::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
}

pub const PLACEHOLDER_STATS: [StatCard; 3] = [
    StatCard {
        title: "Hands Played",
        value: "1,234",
    },
    StatCard {
        title: "Win Rate",
        value: "58%",
    },
    StatCard {
        title: "Total Winnings",
        value: "$5,678",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardCommand {
    StartTraining,
    SignOut,
    Quit,
}

impl DashboardCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "t" | "train" => Some(DashboardCommand::StartTraining),
            "s" | "sign-out" | "signout" => Some(DashboardCommand::SignOut),
            "q" | "quit" => Some(DashboardCommand::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardPage {
    user: User,
}

impl DashboardPage {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn stats(&self) -> &'static [StatCard] {
        &PLACEHOLDER_STATS
    }

    pub fn render(&self, color: bool) -> Vec<String> {
        let mut lines = Vec::with_capacity(PLACEHOLDER_STATS.len() + 4);
        if color {
            lines.push(format!(
                "{} {}",
                "Dashboard".bold().cyan(),
                self.user.email.dimmed()
            ));
            lines.push("Your Stats".bold().white().to_string());
            for stat in self.stats() {
                lines.push(format!("  {}: {}", stat.title, stat.value.bold().green()));
            }
        } else {
            lines.push(format!("Dashboard ({})", self.user.email));
            lines.push("Your Stats".to_string());
            for stat in self.stats() {
                lines.push(format!("  {}: {}", stat.title, stat.value));
            }
        }
        lines.push("t = start new training session, s = sign out, q = quit".to_string());
        lines
    }
}
