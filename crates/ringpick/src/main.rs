use clap::Parser;
use colorring::{ColorWheelSelector, Preset};
use relm4::prelude::*;
use ringpick::config;
use ringpick::gui::app::{AppModel, Settings};
use ringpick::sys::runtime;
use std::path::PathBuf;

/// Pick a color from a ring and print it as #RRGGBB.
#[derive(Parser, Debug)]
#[command(name = "ringpick", version, about, long_about = None)]
struct Cli {
    /// Stock look, overriding the preset named in the config file
    #[arg(short, long)]
    preset: Option<Preset>,

    /// Config file to use instead of the per-user default
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Multiplier for margins, ring thickness and thumb size
    #[arg(short, long)]
    scale: Option<f64>,

    /// Write a commented default config file, print its path and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(scale) = cli.scale
        && !(scale.is_finite() && scale > 0.0)
    {
        anyhow::bail!("--scale must be a positive number, got {}", scale);
    }

    let config_path = match cli.config {
        Some(path) => path,
        None => config::get_config_path()?,
    };

    if cli.init_config {
        config::write_default_config(&config_path)?;
        println!("{}", config_path.display());
        return Ok(());
    }

    let config = config::load_or_default(&config_path, cli.preset);
    let mut selector = ColorWheelSelector::new(config.ring)?;
    selector.set_scale_factor(cli.scale.unwrap_or(config.scale_factor));

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, config_path.clone());

    let settings = Settings {
        config_path,
        preset: cli.preset,
        scale_factor: cli.scale,
    };

    // clap owns the command line; keep GTK from parsing it again
    let app = RelmApp::new("org.colorring.ringpick").with_args(Vec::new());

    app.run::<AppModel>((selector, settings, rx));
    Ok(())
}
