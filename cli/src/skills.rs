use anyhow::Result;
use console::style;
use skillagent_core::{Config, SkillRegistry};

pub fn handle_command(command: SkillsCommands, config: &Config) -> Result<()> {
    match command {
        SkillsCommands::List => list_skills(config),
    }
}

fn list_skills(config: &Config) -> Result<()> {
    let skills_dir = &config.skills_dir;

    if !skills_dir.exists() {
        println!("{} No skills directory found at {}", style("!").yellow(), skills_dir.display());
        println!();
        print_create_skill_help(skills_dir);
        return Ok(());
    }

    let registry = SkillRegistry::discover(skills_dir)?;
    if registry.is_empty() {
        println!("{} No skills installed", style("!").yellow());
        println!();
        print_create_skill_help(skills_dir);
        return Ok(());
    }

    print_skills(&registry);

    for skill in registry.list() {
        if let Some(license) = &skill.license {
            println!("    {} license: {}", style(&skill.name).dim(), license);
        }
        if let Some(compatibility) = &skill.compatibility {
            println!("    {} compatibility: {}", style(&skill.name).dim(), compatibility);
        }
    }

    Ok(())
}

pub fn print_skills(registry: &SkillRegistry) {
    println!(
        "{} Found {} skill(s)",
        style("✓").green().bold(),
        registry.len()
    );
    for skill in registry.list() {
        println!(
            "  - {}: {}",
            style(&skill.name).white().bold(),
            skill.description
        );
    }
}

fn print_create_skill_help(skills_dir: &std::path::Path) {
    println!("Create one:");
    println!("  mkdir -p {}/my-skill", skills_dir.display());
    println!(
        "  printf -- '---\\nname: my-skill\\ndescription: What it does\\n---\\n# Steps\\n' > {}/my-skill/SKILL.md",
        skills_dir.display()
    );
}

#[derive(clap::Subcommand, Clone, Debug)]
pub enum SkillsCommands {
    /// Discover and validate skills, then print them
    List,
}
