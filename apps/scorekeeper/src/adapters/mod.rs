pub mod gemini_assistant;
pub mod snapshot_file;

pub use gemini_assistant::GeminiAssistant;
pub use snapshot_file::FileSnapshotStore;
