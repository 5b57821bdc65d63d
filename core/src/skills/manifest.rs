use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::SkillError;

pub const SKILL_FILE: &str = "SKILL.md";
pub const MAX_NAME_LEN: usize = 64;
pub const MAX_DESCRIPTION_LEN: usize = 1024;

static FRONTMATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---\s*\n(.*?)\n---\s*\n(.*)\z").expect("frontmatter pattern is valid")
});

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[a-z0-9]+(-[a-z0-9]+)*\z").expect("name pattern is valid"));

/// Identity and metadata of one discovered skill. Immutable once discovered.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillDescriptor {
    pub name: String,
    pub description: String,
    pub path: PathBuf,
    pub skill_md_path: PathBuf,
    pub license: Option<String>,
    pub compatibility: Option<String>,
    pub metadata: Option<Mapping>,
}

/// Full content of a skill, loaded on demand and borrowed from its descriptor.
#[derive(Debug, Clone)]
pub struct SkillDocument<'a> {
    pub descriptor: &'a SkillDescriptor,
    pub body: String,
    pub raw: String,
}

/// Splits a skill file into its parsed header mapping and the body text after it.
pub fn split_frontmatter(content: &str, path: &Path) -> Result<(Mapping, String), SkillError> {
    let caps = FRONTMATTER_RE
        .captures(content)
        .ok_or_else(|| SkillError::Format {
            path: path.to_path_buf(),
            reason: "missing YAML frontmatter, expected '---' header block at top of file"
                .to_string(),
        })?;

    let header = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str()).to_string();

    let value: Value = serde_yaml::from_str(header).map_err(|e| SkillError::Format {
        path: path.to_path_buf(),
        reason: format!("frontmatter is not valid YAML: {e}"),
    })?;

    let mapping = match value {
        Value::Null => Mapping::new(),
        Value::Mapping(m) => m,
        _ => {
            return Err(SkillError::Format {
                path: path.to_path_buf(),
                reason: "frontmatter must be a YAML mapping".to_string(),
            });
        }
    };

    Ok((mapping, body))
}

pub fn validate_name(name: &str, dir_name: &str, dir: &Path) -> Result<(), SkillError> {
    let invalid = |reason: String| SkillError::Validation {
        dir: dir.to_path_buf(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("'name' must be a non-empty string".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(invalid(format!("'name' too long (max {MAX_NAME_LEN})")));
    }
    if !NAME_RE.is_match(name) {
        return Err(invalid(format!(
            "'name' must be lowercase letters, digits and single hyphens: {name}"
        )));
    }
    if name != dir_name {
        return Err(invalid(format!(
            "skill name '{name}' must match folder name '{dir_name}'"
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str, dir: &Path) -> Result<(), SkillError> {
    let len = description.chars().count();
    if len == 0 || len > MAX_DESCRIPTION_LEN {
        return Err(SkillError::Validation {
            dir: dir.to_path_buf(),
            reason: format!("'description' must be 1-{MAX_DESCRIPTION_LEN} characters"),
        });
    }
    Ok(())
}

/// Reads and validates the definition file inside `skill_dir`.
pub fn parse_descriptor(skill_dir: &Path) -> Result<SkillDescriptor, SkillError> {
    let skill_md_path = skill_dir.join(SKILL_FILE);
    let content = read_skill_file(&skill_md_path)?;
    let (frontmatter, _body) = split_frontmatter(&content, &skill_md_path)?;

    let dir_name = skill_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    let name = string_field(&frontmatter, "name").unwrap_or_default();
    validate_name(&name, dir_name, skill_dir)?;

    let description = string_field(&frontmatter, "description").ok_or_else(|| {
        SkillError::Validation {
            dir: skill_dir.to_path_buf(),
            reason: "'description' must be a string".to_string(),
        }
    })?;
    validate_description(&description, skill_dir)?;

    let metadata = match frontmatter.get("metadata") {
        Some(Value::Mapping(m)) => Some(m.clone()),
        Some(Value::Null) | None => None,
        Some(_) => {
            tracing::warn!(skill = %name, "ignoring non-mapping 'metadata' field");
            None
        }
    };

    Ok(SkillDescriptor {
        license: string_field(&frontmatter, "license"),
        compatibility: string_field(&frontmatter, "compatibility"),
        metadata,
        name,
        description,
        path: skill_dir.to_path_buf(),
        skill_md_path,
    })
}

pub(crate) fn read_skill_file(path: &Path) -> Result<String, SkillError> {
    std::fs::read_to_string(path).map_err(|source| SkillError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn string_field(map: &Mapping, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}
