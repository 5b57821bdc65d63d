pub mod context;
pub mod loop_;

pub use context::{ContextBuilder, build_available_skills_xml, build_system_prompt};
pub use loop_::{AgentLoop, NO_OUTPUT, TOO_MANY_ITERATIONS};
