//! Rule assistant boundary.
//!
//! Scoring and state never depend on the assistant. The desk turns every
//! outcome (no credential, service failure, empty reply) into a fixed
//! message so callers always get something to show.

use std::fmt::Write as _;

use thiserror::Error;
use tracing::warn;

use crate::domain::standings::leader;
use crate::domain::state::{GameState, Phase};

pub const MISSING_KEY_MESSAGE: &str =
    "API Key ontbreekt. Configureer de API key om de assistent te gebruiken.";
pub const FAILURE_MESSAGE: &str =
    "Er is een fout opgetreden bij het raadplegen van de AI scheidsrechter.";
pub const NO_ANSWER_MESSAGE: &str = "Ik kon geen antwoord genereren.";
pub const NO_GAME_CONTEXT: &str = "Geen spel data beschikbaar.";

/// Errors a backend can report. The desk absorbs all of them.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("assistant request failed: {0}")]
    Request(String),
    #[error("assistant did not answer in time")]
    Timeout,
}

/// A service that answers free-text rule questions.
pub trait RuleAssistant: Send + Sync {
    fn ask(&self, question: &str, context: Option<&str>) -> Result<String, AssistantError>;
}

pub struct AssistantDesk {
    backend: Option<Box<dyn RuleAssistant>>,
}

impl AssistantDesk {
    /// A desk with no backend; every question gets the missing-key message.
    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    pub fn new(backend: Box<dyn RuleAssistant>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Build the backend only when a non-blank credential is configured.
    pub fn configured<F>(api_key: Option<&str>, build: F) -> Self
    where
        F: FnOnce(&str) -> Box<dyn RuleAssistant>,
    {
        match api_key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => Self::new(build(key)),
            None => Self::unavailable(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn ask(&self, question: &str, context: Option<&str>) -> String {
        let Some(backend) = &self.backend else {
            return MISSING_KEY_MESSAGE.to_string();
        };
        match backend.ask(question, context) {
            Ok(answer) if answer.trim().is_empty() => NO_ANSWER_MESSAGE.to_string(),
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "rule assistant failed");
                FAILURE_MESSAGE.to_string()
            }
        }
    }
}

/// Short free-text description of the game to send along with a question.
pub fn game_context(state: &GameState) -> String {
    if state.phase() == Phase::NotStarted {
        return NO_GAME_CONTEXT.to_string();
    }

    let mut out = String::new();
    let _ = write!(out, "Gespeelde rondes: {}.", state.rounds().len());
    if let Some(dealer) = state.dealer() {
        let _ = write!(out, " Gever: {}.", dealer.name);
    }
    if state.next_round_doubled() {
        out.push_str(" Volgende ronde telt dubbel.");
    }
    let scores: Vec<String> = state
        .players()
        .iter()
        .map(|p| format!("{} {}", p.name, p.score))
        .collect();
    let _ = write!(out, " Stand: {}.", scores.join(", "));
    if state.phase() == Phase::Finished {
        if let Some(winner) = leader(state) {
            let _ = write!(out, " Spel afgelopen, winnaar: {}.", winner.name);
        }
    }
    out
}
