mod cli;

use clap::Parser;
use fractal_raster::{Engine, HeadlessPresenter};
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = cli::Cli::parse();
    let viewport = cli.viewport()?;
    let mut input = cli.script()?;
    let mut presenter = HeadlessPresenter::new();

    let mut engine = Engine::from_viewport(viewport, cli.threads)?;
    let summary = engine.run(&mut input, &mut presenter)?;

    info!(
        "rendered {} frames over {} ticks",
        summary.passes, summary.ticks
    );

    Ok(())
}
