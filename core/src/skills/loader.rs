use std::io::ErrorKind;
use std::path::Path;

use super::manifest::{SkillDescriptor, SkillDocument, read_skill_file, split_frontmatter};
use crate::error::{SkillError, ToolError};

/// Re-reads a skill's definition file and returns its full content.
///
/// The header is split again on every load: the file may have changed since
/// discovery, and documents are never cached.
pub fn load_skill_full(descriptor: &SkillDescriptor) -> Result<SkillDocument<'_>, SkillError> {
    tracing::debug!(skill = %descriptor.name, path = %descriptor.skill_md_path.display(), "Loading skill");

    let raw = read_skill_file(&descriptor.skill_md_path)?;
    let (_frontmatter, body) = split_frontmatter(&raw, &descriptor.skill_md_path)?;

    Ok(SkillDocument {
        descriptor,
        body,
        raw,
    })
}

/// Reads a file addressed relative to the skill's own directory.
///
/// Absolute paths and anything containing `..` are refused outright, and the
/// resolved target must stay under the skill directory once symlinks are
/// resolved.
pub fn read_skill_relative_file(
    descriptor: &SkillDescriptor,
    relative_path: &str,
) -> Result<String, ToolError> {
    let normalized = relative_path.replace('\\', "/");
    if relative_path.is_empty()
        || normalized.starts_with('/')
        || Path::new(relative_path).is_absolute()
        || normalized.contains("..")
    {
        return Err(ToolError::PathEscape(relative_path.to_string()));
    }

    let canonical_base = descriptor.path.canonicalize().map_err(|source| ToolError::Io {
        path: descriptor.path.display().to_string(),
        source,
    })?;

    let target = descriptor.path.join(relative_path);
    let canonical_target = match target.canonicalize() {
        Ok(p) => p,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ToolError::NotFound(relative_path.to_string()));
        }
        Err(source) => {
            return Err(ToolError::Io {
                path: relative_path.to_string(),
                source,
            });
        }
    };

    if !canonical_target.starts_with(&canonical_base) {
        return Err(ToolError::PathEscape(format!(
            "{relative_path} escapes skill directory"
        )));
    }
    if !canonical_target.is_file() {
        return Err(ToolError::NotFound(relative_path.to_string()));
    }

    std::fs::read_to_string(&canonical_target).map_err(|source| ToolError::Io {
        path: relative_path.to_string(),
        source,
    })
}
