use clap::{Args, Parser, Subcommand};
use colorring::{
    CairoSurface, ColorWheelSelector, ImageCache, Point, Preset, SelectorConfig, Swatch,
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "colorring", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct RingArgs {
    /// Side length of the square widget, in pixels
    #[arg(short, long, default_value_t = 400)]
    size: u32,

    /// Stock look to start from
    #[arg(short, long, default_value_t = Preset::Classic)]
    preset: Preset,

    /// Comma-separated colors replacing the preset palette (hex or names)
    #[arg(long, value_delimiter = ',')]
    palette: Vec<Swatch>,

    /// Multiplier applied to margins, ring thickness and thumb size
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
}

impl RingArgs {
    fn selector(&self) -> anyhow::Result<ColorWheelSelector> {
        let mut config: SelectorConfig = self.preset.config();
        if !self.palette.is_empty() {
            config.palette = self.palette.clone();
        }

        let mut selector = ColorWheelSelector::new(config)?;
        selector.set_scale_factor(self.scale);
        selector.on_bounds_changed(self.size as f64, self.size as f64);
        Ok(selector)
    }
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Render the ring to a PNG file.
    Render {
        #[command(flatten)]
        ring: RingArgs,

        /// Where to write the PNG
        #[arg(short, long)]
        output: PathBuf,

        /// Place the thumb at this angle (degrees, clockwise from 3 o'clock)
        #[arg(short, long)]
        angle: Option<f64>,
    },
    /// Print the color a touch at (X, Y) selects.
    Pick {
        #[command(flatten)]
        ring: RingArgs,

        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            ring,
            output,
            angle,
        } => render(&ring, &output, angle),
        Commands::Pick { ring, x, y } => pick(&ring, Point::new(x, y)),
    }
}

fn render(ring: &RingArgs, output: &Path, angle: Option<f64>) -> anyhow::Result<()> {
    let mut selector = ring.selector()?;
    if let Some(angle) = angle {
        // a press on the thumb track always lands inside the ring
        let geometry = selector.geometry();
        let point = geometry.point_at(angle, geometry.mid_radius());
        selector.handle_touch_down(point);
        selector.handle_touch_up();
    }

    let side = i32::try_from(ring.size)?;
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, side, side)?;
    {
        let cr = cairo::Context::new(&surface)?;
        let mut images = ImageCache::new();
        selector.render(&mut CairoSurface::new(&cr, &mut images))?;
    }

    let mut file = fs_err::File::create(output)?;
    surface.write_to_png(&mut file)?;
    log::info!("Wrote {} ({} selected)", output.display(), selector.selected());
    Ok(())
}

fn pick(ring: &RingArgs, point: Point) -> anyhow::Result<()> {
    let mut selector = ring.selector()?;
    selector.handle_touch_down(point);

    if !selector.is_dragging() {
        anyhow::bail!(
            "({}, {}) is outside the ring (accepts presses within {:.1} of the center)",
            point.x,
            point.y,
            selector.geometry().touch_radius()
        );
    }

    println!(
        "{} (index {}, {:.1} degrees)",
        selector.selected(),
        selector.selected_index(),
        selector.touch_angle()
    );
    Ok(())
}
