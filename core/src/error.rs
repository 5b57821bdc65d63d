use std::path::PathBuf;

/// Fatal errors raised while discovering or parsing skill definitions.
///
/// Discovery aborts on the first one of these; a broken skill corpus is a
/// deployment problem, not something to run degraded around.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("malformed skill file {}: {reason}", .path.display())]
    Format { path: PathBuf, reason: String },

    #[error("invalid skill in {}: {reason}", .dir.display())]
    Validation { dir: PathBuf, reason: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Recoverable errors raised while executing a single tool call.
///
/// These never abort a conversation: the loop turns each one into a
/// `{"error": ...}` tool result so the model can react.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("Invalid relative path: {0}")]
    PathEscape(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Skill(#[from] SkillError),
}

impl ToolError {
    pub fn to_output(&self) -> String {
        serde_json::json!({ "error": self.to_string() }).to_string()
    }
}

/// Failures talking to the chat-completion endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API Error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
