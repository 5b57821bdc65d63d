use serde_json::{Value, json};
use std::sync::Arc;

use super::{SkillTool, extract_string_arg};
use crate::error::ToolError;
use crate::skills::{SkillDescriptor, SkillRegistry, load_skill_full, read_skill_relative_file};

/// Executes tool calls against the skill registry. Filesystem reads only.
#[derive(Debug, Clone)]
pub struct ToolRuntime {
    skills: Arc<SkillRegistry>,
}

impl ToolRuntime {
    pub fn new(skills: Arc<SkillRegistry>) -> Self {
        Self { skills }
    }

    /// Runs `tool_name` and returns its JSON-serialized output.
    ///
    /// An unrecognized tool name is answered with an `{"error": ...}` value
    /// rather than an `Err`; failures inside a known tool come back as
    /// [`ToolError`] for the caller to convert.
    pub fn dispatch(&self, tool_name: &str, args: &Value) -> Result<String, ToolError> {
        let out = match SkillTool::from_name(tool_name) {
            Some(tool @ SkillTool::LoadSkill) => {
                let name = extract_string_arg(tool, args, "name")?;
                self.load_skill(&name)?
            }
            Some(tool @ SkillTool::ReadSkillFile) => {
                let name = extract_string_arg(tool, args, "name")?;
                let path = extract_string_arg(tool, args, "path")?;
                self.read_skill_file(&name, &path)?
            }
            None => json!({ "error": format!("Unknown tool: {tool_name}") }),
        };
        Ok(out.to_string())
    }

    pub fn load_skill(&self, name: &str) -> Result<Value, ToolError> {
        let skill = self.get(name)?;
        let doc = load_skill_full(skill)?;
        Ok(json!({ "name": name, "skill_md": doc.raw }))
    }

    pub fn read_skill_file(&self, name: &str, path: &str) -> Result<Value, ToolError> {
        let skill = self.get(name)?;
        let content = read_skill_relative_file(skill, path)?;
        Ok(json!({ "name": name, "path": path, "content": content }))
    }

    fn get(&self, name: &str) -> Result<&SkillDescriptor, ToolError> {
        self.skills
            .get(name)
            .ok_or_else(|| ToolError::UnknownSkill(name.to_string()))
    }
}
