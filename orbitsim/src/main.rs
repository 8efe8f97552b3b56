use orbitsim::{Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

/// Sample a star/planet scenario and write the trajectory as JSON
#[derive(Parser, Debug)]
struct Args {
    /// Scenario file; bare names are looked up in the crate's `scenarios/` directory
    #[arg(short, long = "file", default_value = "two_planets.yaml")]
    file_name: String,

    /// Override the scenario's `durationSec`
    #[arg(long)]
    duration: Option<f64>,

    /// Override the scenario's `dtSec`
    #[arg(long)]
    dt: Option<f64>,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
}

fn scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario_from_yaml(args: &Args) -> Result<ScenarioConfig> {
    let config_path = scenario_path(&args.file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let mut cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    if let Some(duration) = args.duration {
        cfg.duration_sec = duration;
    }
    if let Some(dt) = args.dt {
        cfg.dt_sec = dt;
    }

    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let scenario_cfg = load_scenario_from_yaml(&args)?;

    let mut scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;
    info!(
        bodies = scenario.system.len(),
        duration = scenario.duration_sec,
        dt = scenario.dt_sec,
        "sampling scenario"
    );

    let trajectory = scenario.run().context("sampling failed")?;
    info!(samples = trajectory.samples.len(), planets = trajectory.planets.len(), "sampling done");

    let writer: Box<dyn Write> = match &args.out {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);

    if args.pretty {
        serde_json::to_writer_pretty(&mut writer, &trajectory)?;
    } else {
        serde_json::to_writer(&mut writer, &trajectory)?;
    }
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
