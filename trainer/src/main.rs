use anyhow::Result;
use clap::Parser;
use tracing::info;

use trainer::{load_config, load_script, run_session, Args};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut cfg = load_config(&args.config)?;
    if let Some(path) = &args.script {
        cfg.script = load_script(path)?;
    }
    if let Some(players) = args.players {
        cfg.players = players;
    }
    info!(?cfg, "Trainer config loaded");

    let report = run_session(&cfg, args.ticks_override)?;
    print!("{}", report.summary());
    Ok(())
}
