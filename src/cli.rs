// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - compose [screen]: print the composed theme (or one screen) as JSON
// - rects <screen>: print every resolved rect of a screen
// - preview <screen>: run a screen in the terminal
// - themes: list themes reachable from the configured directories
// - config --show/--path/--reset/--edit: configuration management

use crate::config::{Config, VERSION};
use crate::logging::LogBuffer;
use crate::region::MonospaceMeasure;
use crate::screen::Stage;
use crate::tui;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::Command;

/// harbor - declarative launcher themes: compose, inspect and preview
#[derive(Parser)]
#[command(name = "harbor")]
#[command(version = VERSION)]
#[command(about = "Compose, inspect and preview launcher themes", long_about = None)]
pub struct Cli {
    /// Theme to use instead of the configured one
    #[arg(long, global = true)]
    pub theme: Option<String>,

    /// Colour scheme to use instead of the configured one
    #[arg(long, global = true)]
    pub scheme: Option<String>,

    /// Extra capability tokens, comma separated
    #[arg(long, global = true, value_delimiter = ',')]
    pub caps: Vec<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the composed theme as JSON
    Compose {
        /// Only this screen
        screen: Option<String>,
    },

    /// Print the resolved rects of a screen
    Rects { screen: String },

    /// Run a screen in the terminal (Ctrl+C quits)
    Preview { screen: String },

    /// List available themes
    Themes,

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,
    },
}

impl Cli {
    /// Whether this command takes over the terminal
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, Commands::Preview { .. })
    }

    /// Apply command-line overrides on top of the loaded config
    pub fn apply(&self, config: &mut Config) {
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if let Some(scheme) = &self.scheme {
            config.color_scheme = Some(scheme.clone());
        }
        config.capabilities.extend(self.caps.iter().cloned());
    }
}

/// Run the parsed command
pub fn run(cli: Cli, config: Config, log_buffer: LogBuffer) -> Result<()> {
    match cli.command {
        Commands::Compose { screen } => handle_compose(&config, screen.as_deref()),
        Commands::Rects { screen } => handle_rects(&config, &screen),
        Commands::Preview { screen } => {
            let stage = load_stage(&config)?;
            tui::run_preview(&stage, &screen, &config.input.settings(), log_buffer)
        }
        Commands::Themes => {
            handle_themes(&config);
            Ok(())
        }
        Commands::Config {
            show,
            path,
            reset,
            edit,
        } => {
            if path {
                handle_config_path()
            } else if show {
                handle_config_show(&config);
                Ok(())
            } else if reset {
                handle_config_reset()
            } else if edit {
                handle_config_edit()
            } else {
                // No flag provided, show help
                println!("Usage: harbor config [--show|--path|--reset|--edit]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --path    Show config file path");
                println!("  --reset   Reset config file to defaults");
                println!("  --edit    Open config file in $EDITOR");
                Ok(())
            }
        }
    }
}

fn load_stage(config: &Config) -> Result<Stage> {
    Stage::load(config).with_context(|| format!("Failed to load theme '{}'", config.theme))
}

fn handle_compose(config: &Config, screen: Option<&str>) -> Result<()> {
    let stage = load_stage(config)?;
    let json = match screen {
        Some(name) => serde_json::to_string_pretty(stage.theme.screen(name)?)
            .context("Failed to serialize screen")?,
        None => stage.theme.to_json_pretty(),
    };
    println!("{}", json);
    Ok(())
}

fn handle_rects(config: &Config, screen: &str) -> Result<()> {
    let stage = load_stage(config)?;
    let built = stage
        .screen(screen, &MonospaceMeasure, 0)
        .with_context(|| format!("Failed to build screen '{}'", screen))?;

    let width = built.rects().iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, rect) in built.rects().iter() {
        println!("{:width$}  {}", name, rect, width = width);
    }
    Ok(())
}

fn handle_themes(config: &Config) {
    let loader = config.theme_loader();
    for name in loader.list_available() {
        let marker = if name.eq_ignore_ascii_case(&config.theme) {
            "*"
        } else {
            " "
        };
        println!("{} {}", marker, name);
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show(config: &Config) {
    println!("# Effective configuration (flags > env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush().context("Failed to flush stderr")?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read answer")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let path = Config::reset()?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_edit() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    // Ensure config exists
    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    // Get editor from environment
    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| {
            format!(
                "Failed to launch editor '{}' (set $EDITOR to your preferred editor)",
                editor
            )
        })?;
    if !status.success() {
        bail!("Editor exited with status: {}", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "harbor", "--theme", "Night Owl", "--scheme", "Ember", "--caps", "wide,tv", "rects",
            "main_menu",
        ]);
        assert!(!cli.is_interactive());

        let mut config = Config::default();
        config.capabilities = vec!["desktop".into()];
        cli.apply(&mut config);
        assert_eq!(config.theme, "Night Owl");
        assert_eq!(config.color_scheme.as_deref(), Some("Ember"));
        assert_eq!(config.capabilities, vec!["desktop", "wide", "tv"]);
    }

    #[test]
    fn preview_is_interactive() {
        let cli = Cli::parse_from(["harbor", "preview", "message"]);
        assert!(cli.is_interactive());
        assert!(matches!(cli.command, Commands::Preview { screen } if screen == "message"));
    }
}
