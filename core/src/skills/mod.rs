pub mod loader;
pub mod manifest;
pub mod registry;

pub use loader::{load_skill_full, read_skill_relative_file};
pub use manifest::{SKILL_FILE, SkillDescriptor, SkillDocument, split_frontmatter};
pub use registry::{SkillRegistry, discover_skills};
