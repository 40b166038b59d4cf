mod script;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scene::ArConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "furniture")]
#[command(about = "Replay Furniture AR gesture sessions without a device", long_about = None)]
struct Cli {
    /// Load configuration from this TOML file instead of the default location
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Log every applied gesture
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a gesture script and print the placed objects
    Replay {
        /// Replay script (TOML)
        script: PathBuf,
    },
    /// Print the effective configuration
    Config,
}

fn load_config(path: Option<&Path>) -> Result<ArConfig> {
    match path {
        Some(path) => ArConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => ArConfig::load_default().context("Failed to load default config"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Replay { script } => {
            let script = script::Script::load(&script)?;
            let outcome = script::replay(&script, &config)?;

            println!(
                "status: \"{}\" ({})",
                outcome.status_text,
                if outcome.status_visible { "visible" } else { "hidden" }
            );
            for (id, node) in outcome.objects() {
                println!(
                    "{id} {name}: position=({:.3}, {:.3}, {:.3}) yaw={:.1}° scale=({:.3}, {:.3}, {:.3})",
                    node.position.x,
                    node.position.y,
                    node.position.z,
                    node.yaw.to_degrees(),
                    node.scale.x,
                    node.scale.y,
                    node.scale.z,
                    name = node.name,
                );
            }
        }
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_args() {
        let cli = Cli::parse_from(["furniture", "replay", "session.toml"]);
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
        assert!(matches!(cli.command, Commands::Replay { ref script } if script == Path::new("session.toml")));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["furniture", "replay", "s.toml", "-v", "--config", "ar.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("ar.toml")));
    }

    #[test]
    fn test_config_command() {
        let cli = Cli::parse_from(["furniture", "config"]);
        assert!(matches!(cli.command, Commands::Config));
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["furniture"]).is_err());
    }

    #[test]
    fn test_load_explicit_config_missing_file() {
        let err = load_config(Some(Path::new("/nonexistent/furniture-ar.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
