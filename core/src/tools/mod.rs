use serde_json::{Value, json};

use crate::error::ToolError;
use crate::traits::ToolSpec;

pub mod runtime;

pub use runtime::ToolRuntime;

/// The closed set of tools exposed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillTool {
    LoadSkill,
    ReadSkillFile,
}

impl SkillTool {
    pub const ALL: [SkillTool; 2] = [SkillTool::LoadSkill, SkillTool::ReadSkillFile];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::LoadSkill => "load_skill",
            Self::ReadSkillFile => "read_skill_file",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::LoadSkill => "Load a skill's SKILL.md instructions by skill name.",
            Self::ReadSkillFile => {
                "Read a referenced file inside a skill folder (e.g., references/xxx.md, assets/template.txt)."
            }
        }
    }

    pub fn parameters_schema(self) -> Value {
        match self {
            Self::LoadSkill => json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" }
                },
                "required": ["name"]
            }),
            Self::ReadSkillFile => json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "path": { "type": "string" }
                },
                "required": ["name", "path"]
            }),
        }
    }

    pub fn spec(self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// Tool descriptions in the fixed order they are offered to the model.
pub fn tool_schemas() -> Vec<ToolSpec> {
    SkillTool::ALL.into_iter().map(SkillTool::spec).collect()
}

pub fn extract_string_arg(tool: SkillTool, args: &Value, key: &str) -> Result<String, ToolError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| ToolError::InvalidArguments {
            tool: tool.name().to_string(),
            reason: format!("missing '{key}' parameter"),
        })
}
