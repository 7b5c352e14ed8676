use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use decomp_sintese::config::{env_keys, load_env_file};
use decomp_sintese::{Config, InputCollector, Overrides, Pipeline, PresetInputs, Result, S3Sink};

/// Stamp the DECOMP synthesis with run metadata and upload it to the lake.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Env file to load instead of searching for `.env`.
    #[arg(long, env = env_keys::ENV_FILE)]
    env_file: Option<PathBuf>,

    /// Synthesis directory, relative to the working directory.
    #[arg(long)]
    synthesis_dir: Option<String>,

    #[arg(long)]
    bucket_name: Option<String>,

    #[arg(long)]
    bucket_prefix: Option<String>,

    /// How the scenario answer is read: `name` or `index`.
    #[arg(long)]
    scenario_mode: Option<String>,

    #[arg(long)]
    region: Option<String>,

    /// S3-compatible endpoint, e.g. a local test store.
    #[arg(long)]
    endpoint_url: Option<String>,

    /// Reference period (MM/AAAA); prompted for when absent.
    #[arg(long)]
    competencia: Option<String>,

    /// Scenario; prompted for when absent.
    #[arg(long)]
    cenario: Option<String>,

    /// Revision (integer >= 0); prompted for when absent.
    #[arg(long)]
    revisao: Option<String>,
}

fn init_logging() {
    let default_level = "info";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    load_env_file(cli.env_file.as_deref())?;

    let overrides = Overrides {
        synthesis_dir: cli.synthesis_dir,
        bucket_name: cli.bucket_name,
        bucket_prefix: cli.bucket_prefix,
        scenario_mode: cli.scenario_mode,
        region: cli.region,
        endpoint_url: cli.endpoint_url,
    };
    let config = Config::from_env(&overrides)?;
    tracing::debug!(?config, "resolved configuration");

    let presets = PresetInputs {
        period: cli.competencia,
        scenario: cli.cenario,
        version: cli.revisao,
    };

    let sink = S3Sink::connect(&config)?;
    let cwd = env::current_dir()?;
    let pipeline = Pipeline::new(&config, cwd, sink);

    let stdin = io::stdin();
    let mut collector = InputCollector::new(stdin.lock(), io::stdout(), config.scenario_mode);
    let summary = pipeline.run(&mut collector, &presets)?;

    tracing::info!(
        files = summary.uploaded_keys.len(),
        segment = %summary.segment,
        "DECOMP synthesis uploaded successfully"
    );
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    println!("Script para upload da sintese do DECOMP para o Lake");
    match run(cli) {
        Ok(()) => {
            println!("Upload da sintese do DECOMP feito com sucesso!");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
