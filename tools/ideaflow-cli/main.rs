use std::{
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ideaflow::{Config, EngineBuilder, IdeaRequest, IdeaflowError, TriggerKind, export};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// CLI-side trigger choice for clap.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TriggerCli {
    Schedule,
    Webhook,
    Watch,
}

impl From<TriggerCli> for TriggerKind {
    fn from(value: TriggerCli) -> Self {
        match value {
            TriggerCli::Schedule => TriggerKind::Schedule,
            TriggerCli::Webhook => TriggerKind::Webhook,
            TriggerCli::Watch => TriggerKind::Watch,
        }
    }
}

/// Turn an automation idea into a plan and an importable blueprint.
#[derive(Parser, Debug)]
#[command(name = "ideaflow", version, about)]
struct Cli {
    /// The idea; read from stdin when omitted.
    #[arg(short, long)]
    idea: Option<String>,

    /// Trigger used when the idea contains no trigger cue.
    #[arg(short, long, value_enum)]
    trigger: Option<TriggerCli>,

    /// AI model identifier.
    #[arg(short, long)]
    model: Option<String>,

    /// Preselected service (typeform, webhook, sheets, slack, gmail, notion, calendar). Repeatable.
    #[arg(short, long = "service")]
    services: Vec<String>,

    /// TOML configuration overriding keyword tables and defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory receiving make_blueprint.json.
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Print only the blueprint JSON and write no file.
    #[arg(long)]
    json_only: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { "warn" });

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let engine = EngineBuilder::new().config(config).build()?;

    let idea = match cli.idea {
        Some(idea) => idea,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("failed to read the idea from stdin")?;
            buf
        }
    };

    let mut request = IdeaRequest::new(idea).service_names(&cli.services);
    request.trigger = cli.trigger.map(TriggerKind::from);
    request.model = cli.model;

    let scenario = match engine.generate(&request) {
        Ok(scenario) => scenario,
        Err(IdeaflowError::Input(notice)) => anyhow::bail!(notice),
        Err(e) => return Err(e.into()),
    };
    let json = export::to_pretty_json(&scenario.blueprint)?;

    if cli.json_only {
        println!("{json}");
        return Ok(());
    }

    println!("{}", scenario.plan);
    println!();
    match export::write_json(&json, &cli.out) {
        Ok(path) => println!("Blueprint written to {} ({})", path.display(), export::BLUEPRINT_MIME),
        Err(e) => {
            warn!(error = %e, "could not write the blueprint file, printing it instead");
            println!("{json}");
        }
    }

    Ok(())
}

/// Initialize the tracing subscriber with the given default log level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().with_writer(io::stderr).init();
}
