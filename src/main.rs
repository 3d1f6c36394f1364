use anyhow::Result;
use clap::Parser;

use model_carousel::cli::Cli;
use model_carousel::config::ViewerConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = ViewerConfig::load(&cli)?;

    model_carousel::app::run(config)
}
