//! Value objects representing immutable domain concepts.

pub mod prompt_state;
pub mod ui_state;

// Re-export commonly used types
pub use prompt_state::{CodeEntry, CodePrompt, PromptError, PromptState};
pub use ui_state::{UiState, View};
