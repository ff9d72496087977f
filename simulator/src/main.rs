use anyhow::{Context, Result};
use clap::Parser;
use highlow_execution::FileStore;
use highlow_simulator::{estimate, run, Config, EdgeRow, SimulationReport};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Automated highlow sessions and house-edge estimates.")]
struct Args {
    /// YAML config file.
    #[arg(short, long)]
    config: PathBuf,

    /// Override the number of sessions to play.
    #[arg(long)]
    sessions: Option<u64>,

    /// Override the seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Validate the config and exit.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    simulation: SimulationReport,
    house_edge: Vec<EdgeRow>,
}

fn load_config(args: &Args) -> Result<Config> {
    let contents = std::fs::read_to_string(&args.config)
        .with_context(|| format!("Could not read config file {}", args.config.display()))?;
    let mut config = Config::from_yaml(&contents).context("Could not parse config file")?;
    if let Some(sessions) = args.sessions {
        config.sessions = sessions;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    if args.dry_run {
        println!("{config:#?}");
        println!("config ok");
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .init();

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(
        seed,
        sessions = config.sessions,
        store = %config.store_path.display(),
        "starting simulation"
    );

    let mut store = FileStore::open(&config.store_path).await?;
    let simulation = run(&config, seed, &mut store).await?;

    let mut house_edge = Vec::new();
    if config.house_edge_trials > 0 {
        for (offset, variant) in config.variants.iter().enumerate() {
            let row = estimate(
                *variant,
                &config.strategy,
                config.house_edge_trials,
                seed.wrapping_add(offset as u64 + 2),
            )
            .await?;
            info!(
                variant = %row.variant,
                trials = row.trials,
                edge = row.edge,
                stderr = row.stderr,
                "house edge"
            );
            house_edge.push(row);
        }
    }

    let output = Output {
        simulation,
        house_edge,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("encode report")?
    );
    Ok(())
}
