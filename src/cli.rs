// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "model-carousel")]
#[command(about = "Interactive glTF model carousel", long_about = None)]
pub struct Cli {
    /// JSON configuration file (overrides MODEL_CAROUSEL_CONFIG)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory the catalog's asset paths are resolved against
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Show the frame-rate overlay
    #[arg(long = "show-fps")]
    pub show_fps: bool,

    /// Hide the carousel controls; keyboard shortcuts keep working
    #[arg(long = "no-ui")]
    pub no_ui: bool,

    /// Initial window width in logical pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height in logical pixels
    #[arg(long)]
    pub height: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "model-carousel",
            "--config",
            "viewer.json",
            "--assets",
            "/srv/models",
            "--show-fps",
            "--no-ui",
            "--width",
            "1280",
            "--height",
            "720",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("viewer.json")));
        assert_eq!(cli.assets, Some(PathBuf::from("/srv/models")));
        assert!(cli.show_fps);
        assert!(cli.no_ui);
        assert_eq!((cli.width, cli.height), (Some(1280), Some(720)));
    }

    #[test]
    fn defaults_are_empty() {
        let cli = Cli::try_parse_from(["model-carousel"]).unwrap();
        assert!(cli.config.is_none());
        assert!(!cli.show_fps && !cli.no_ui);
    }
}
