pub mod provider;
pub mod tool;

pub use provider::{ChatMessage, ChatRequest, ChatResponse, ChatTurn, Provider, Role, ToolCall};
pub use tool::ToolSpec;
