use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::manifest::{SKILL_FILE, SkillDescriptor, parse_descriptor};
use crate::error::SkillError;

/// Read-only set of validated skills, ordered by directory name.
///
/// Safe to share between agents behind an `Arc`; nothing mutates it after
/// discovery.
#[derive(Debug, Clone, Default)]
pub struct SkillRegistry {
    skills: Vec<SkillDescriptor>,
    by_name: HashMap<String, usize>,
}

impl SkillRegistry {
    pub fn new(skills: Vec<SkillDescriptor>) -> Self {
        let by_name = skills
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();
        Self { skills, by_name }
    }

    pub fn discover(skills_root: &Path) -> Result<Self, SkillError> {
        discover_skills(skills_root).map(Self::new)
    }

    pub fn list(&self) -> &[SkillDescriptor] {
        &self.skills
    }

    pub fn get(&self, name: &str) -> Option<&SkillDescriptor> {
        self.by_name.get(name).map(|&i| &self.skills[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Scans the immediate subdirectories of `skills_root` for skill definitions.
///
/// Entries that are not directories, or have no `SKILL.md`, are skipped. Any
/// malformed or invalid definition aborts the whole pass.
pub fn discover_skills(skills_root: &Path) -> Result<Vec<SkillDescriptor>, SkillError> {
    if !skills_root.is_dir() {
        tracing::debug!("Skills directory does not exist: {}", skills_root.display());
        return Ok(vec![]);
    }

    let io_err = |source| SkillError::Io {
        path: skills_root.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(skills_root)
        .map_err(io_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort_by_key(|e| e.file_name());

    let mut skills = Vec::new();
    for entry in entries {
        let path = entry.path();

        if !path.is_dir() {
            tracing::debug!(entry = %path.display(), "Skipping non-directory entry");
            continue;
        }
        if !path.join(SKILL_FILE).is_file() {
            tracing::debug!(entry = %path.display(), "Skipping directory without {SKILL_FILE}");
            continue;
        }

        skills.push(parse_descriptor(&path)?);
    }

    tracing::info!(
        loaded = skills.len(),
        path = %skills_root.display(),
        "Skills discovered"
    );

    Ok(skills)
}
