use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use enscribi::{AppConfig, Script, Session};
use enscribi_core::{keysym_for_text, leading_code_point};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "enscribi", version, about = "Handwriting input keyboard")]
struct Cli {
    /// Configuration file (TOML). Defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a JSON session script on a headless keyboard and print the report
    Replay { script: PathBuf },
    /// Show the keysym each word would be injected as
    Keysym {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Print the effective configuration
    Config,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_toml(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_ref())?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Replay { script } => {
            let script = Script::load(&script)?;
            info!(steps = script.steps.len(), "replaying session");
            let mut session = Session::new(config)?;
            let report = session.replay(script);
            session.shutdown();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Keysym { text } => {
            for word in &text {
                let cp = leading_code_point(word.as_bytes());
                match keysym_for_text(word) {
                    Some(keysym) => println!(
                        "{}\tU+{:04X}\t{}\t{}",
                        word,
                        cp,
                        keysym,
                        keysym.name().as_deref().unwrap_or("-")
                    ),
                    None => println!("{}\tU+{:04X}\t-\t-", word, cp),
                }
            }
        }
        Command::Config => print!("{}", config.to_toml_string()?),
    }
    Ok(())
}

