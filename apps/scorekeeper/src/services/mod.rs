pub mod game_flow;
pub mod rule_assistant;

pub use game_flow::{GameFlow, RoundSubmission};
pub use rule_assistant::{AssistantDesk, AssistantError, RuleAssistant};
