use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use skillagent_core::{AgentLoop, Config, OpenAIProvider, SkillRegistry};
use std::path::PathBuf;
use std::sync::Arc;
mod skills;

#[derive(Parser)]
#[command(name = "skillagent")]
#[command(about = "skillagent - chat with a model that can load local skills on demand", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.skillagent/config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    skills_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    model: Option<String>,

    #[arg(long, global = true)]
    max_turns: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Chat {
        #[arg(short, long)]
        message: Option<String>,
    },
    #[command(subcommand)]
    Skills(skills::SkillsCommands),
}

impl Cli {
    fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(dir) = &self.skills_dir {
            config.skills_dir = dir.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(max_turns) = self.max_turns {
            config.max_turns = max_turns;
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    match cli.command.unwrap_or(Commands::Chat { message: None }) {
        Commands::Skills(command) => skills::handle_command(command, &config),
        Commands::Chat { message } => chat(&config, message).await,
    }
}

async fn chat(config: &Config, message: Option<String>) -> Result<()> {
    println!(
        "{} Loading skills from: {}",
        style("→").cyan(),
        config.skills_dir.display()
    );
    let registry = load_registry(config)?;
    skills::print_skills(&registry);

    let provider = Arc::new(OpenAIProvider::from_config(config));
    let agent = AgentLoop::new(provider, Arc::new(registry), config);

    if let Some(msg) = message {
        println!("{}", agent.run(&msg).await);
        return Ok(());
    }

    println!();
    println!("{}", style("=== skillagent ready ===").green().bold());
    println!("Type a message to chat, 'quit' or 'exit' to leave.");

    let mut editor = DefaultEditor::new().context("Failed to initialize line editor")?;
    loop {
        match editor.readline("\nyou> ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                if is_exit_command(input) {
                    println!("Goodbye!");
                    break;
                }
                let _ = editor.add_history_entry(input);

                let answer = agent.run(input).await;
                println!("{} {}", style("ai>").cyan().bold(), answer);
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(e) => {
                eprintln!("{} {}", style("✗").red().bold(), e);
                break;
            }
        }
    }

    Ok(())
}

fn load_registry(config: &Config) -> Result<SkillRegistry> {
    SkillRegistry::discover(&config.skills_dir).context("Skill validation failed")
}

fn is_exit_command(input: &str) -> bool {
    input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_commands_are_case_insensitive() {
        for cmd in ["quit", "QUIT", "Exit", "exit"] {
            assert!(is_exit_command(cmd));
        }
        assert!(!is_exit_command("quit now"));
        assert!(!is_exit_command("hello"));
    }

    #[test]
    fn cli_flags_parse() {
        let cli = Cli::try_parse_from([
            "skillagent",
            "--skills-dir",
            "/tmp/skills",
            "--max-turns",
            "3",
            "chat",
            "-m",
            "hi",
        ])
        .unwrap();
        assert_eq!(cli.skills_dir, Some(PathBuf::from("/tmp/skills")));
        assert_eq!(cli.max_turns, Some(3));
        assert!(matches!(cli.command, Some(Commands::Chat { message: Some(ref m) }) if m == "hi"));
    }

    #[test]
    fn flag_overrides_invalid_env_turn_budget() {
        let mut config = Config::default();
        config
            .apply_env(|key: &str| (key == "MAX_TURNS").then(|| "0".to_string()))
            .unwrap();

        let cli = Cli::try_parse_from(["skillagent", "--max-turns", "3"]).unwrap();
        cli.apply_overrides(&mut config);

        config.validate().unwrap();
        assert_eq!(config.max_turns, 3);
    }

    #[test]
    fn zero_turn_flag_is_rejected() {
        let mut config = Config::default();
        let cli = Cli::try_parse_from(["skillagent", "--max-turns", "0"]).unwrap();
        cli.apply_overrides(&mut config);
        assert!(config.validate().is_err());
    }

    #[test]
    fn discovery_failure_is_reported_once() {
        let tmp = tempfile::TempDir::new().unwrap();
        let bad = tmp.path().join("bad");
        std::fs::create_dir_all(&bad).unwrap();
        std::fs::write(bad.join("SKILL.md"), "# no header\n").unwrap();

        let config = Config {
            skills_dir: tmp.path().to_path_buf(),
            ..Config::default()
        };
        let err = load_registry(&config).unwrap_err();
        let rendered = format!("{err:#}");

        assert_eq!(err.to_string(), "Skill validation failed");
        assert_eq!(rendered.matches("Skill validation failed").count(), 1);
        assert_eq!(rendered.matches("missing YAML frontmatter").count(), 1);
    }
}
