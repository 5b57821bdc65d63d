use crate::skills::SkillDescriptor;
use crate::traits::{ChatMessage, ChatTurn};

const WORKFLOW_INSTRUCTIONS: &str = "You are a helpful agent with access to Agent Skills.

Workflow you MUST follow:
1) Read <available_skills> and decide whether a skill is needed.
2) If a skill is needed, call load_skill(name) with the chosen skill.
   - Do NOT answer yet.
3) After you receive the skill content, follow SKILL.md strictly.
4) Do NOT invent instructions. Only use what you read.";

/// Renders the system prompt and seeds the transcript for a run.
pub struct ContextBuilder {
    system_prompt: String,
}

impl ContextBuilder {
    pub fn new(skills: &[SkillDescriptor]) -> Self {
        Self {
            system_prompt: build_system_prompt(skills),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// System prompt, then `history`, then the new user message.
    pub fn build_messages(&self, history: Vec<ChatTurn>, current_message: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(self.system_prompt.clone()));
        messages.extend(history.into_iter().map(ChatMessage::from));
        messages.push(ChatMessage::user(current_message));
        messages
    }
}

pub fn build_system_prompt(skills: &[SkillDescriptor]) -> String {
    format!(
        "{WORKFLOW_INSTRUCTIONS}\n\n{}\n",
        build_available_skills_xml(skills)
    )
}

pub fn build_available_skills_xml(skills: &[SkillDescriptor]) -> String {
    let mut parts = vec!["<available_skills>".to_string()];

    for skill in skills {
        parts.push(format!(
            "  <skill>\n    <name>{}</name>\n    <description>{}</description>\n  </skill>",
            escape_xml(&skill.name),
            escape_xml(&skill.description)
        ));
    }

    parts.push("</available_skills>".to_string());
    parts.join("\n")
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
