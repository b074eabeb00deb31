//! rxkcd-cli
//!
//! Renders demo charts and re-draws them in a hand-drawn, xkcd comic style.

// Modules
pub(crate) mod cli;
pub(crate) mod demos;

// Renames
extern crate nalgebra as na;
extern crate parry2d_f64 as p2d;

fn main() -> anyhow::Result<()> {
    if let Err(e) = setup_logging() {
        eprintln!("failed to setup logging, Err: {e:?}");
    }

    cli::run()
}

fn setup_logging() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("initializing tracing subscriber failed, {e}"))?;
    tracing::debug!("... tracing subscriber initialized");
    Ok(())
}
