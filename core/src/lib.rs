pub mod agent;
pub mod config;
pub mod error;
pub mod providers;
pub mod skills;
pub mod tools;
pub mod traits;

pub use agent::{AgentLoop, ContextBuilder};
pub use config::*;
pub use error::{ProviderError, SkillError, ToolError};
pub use providers::*;
pub use skills::*;
pub use tools::*;
pub use traits::*;
