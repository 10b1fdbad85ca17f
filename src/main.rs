use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use terrain_noise::export::{self, Colormap};
use terrain_noise::{generate_noise_map, generate_noise_map_parallel, NoiseMapParams};

#[derive(Parser, Debug)]
#[command(name = "terrain_noise")]
#[command(about = "Generate fractal noise heightmaps")]
struct Args {
    /// JSON settings file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Width of the map in cells
    #[arg(short = 'W', long, allow_negative_numbers = true)]
    width: Option<i32>,

    /// Height of the map in cells
    #[arg(short = 'H', long, allow_negative_numbers = true)]
    height: Option<i32>,

    /// Random seed (random when no settings file is given)
    #[arg(short, long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Zoom factor (values <= 0 are clamped)
    #[arg(long, allow_negative_numbers = true)]
    scale: Option<f32>,

    /// Number of noise octaves
    #[arg(short, long, allow_negative_numbers = true)]
    octaves: Option<i32>,

    /// Amplitude multiplier per octave
    #[arg(long)]
    persistence: Option<f32>,

    /// Frequency multiplier per octave
    #[arg(long)]
    lacunarity: Option<f32>,

    /// Horizontal panning offset
    #[arg(long, allow_negative_numbers = true)]
    offset_x: Option<f32>,

    /// Vertical panning offset
    #[arg(long, allow_negative_numbers = true)]
    offset_y: Option<f32>,

    /// Write the map as a PNG image
    #[arg(long)]
    output: Option<PathBuf>,

    /// Colormap for the PNG output
    #[arg(long, value_enum, default_value = "gray")]
    colormap: ColormapArg,

    /// Write the map values as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Generate rows on all cores
    #[arg(long)]
    parallel: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColormapArg {
    Gray,
    Spectral,
}

impl From<ColormapArg> for Colormap {
    fn from(arg: ColormapArg) -> Self {
        match arg {
            ColormapArg::Gray => Colormap::Grayscale,
            ColormapArg::Spectral => Colormap::Spectral,
        }
    }
}

impl Args {
    /// Settings file (or defaults) with command-line overrides applied.
    fn resolve_params(&self) -> Result<NoiseMapParams, Box<dyn Error>> {
        let mut params = match &self.config {
            Some(path) => {
                info!("Loading settings from {}", path.display());
                NoiseMapParams::from_json_file(path)?
            }
            None => NoiseMapParams::default().with_seed(rand::random()),
        };

        if let Some(width) = self.width { params.width = width; }
        if let Some(height) = self.height { params.height = height; }
        if let Some(seed) = self.seed { params.seed = seed; }
        if let Some(scale) = self.scale { params.scale = scale; }
        if let Some(octaves) = self.octaves { params.octaves = octaves; }
        if let Some(persistence) = self.persistence { params.persistence = persistence; }
        if let Some(lacunarity) = self.lacunarity { params.lacunarity = lacunarity; }
        if let Some(x) = self.offset_x { params.offset.x = x; }
        if let Some(y) = self.offset_y { params.offset.y = y; }

        Ok(params)
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let params = args.resolve_params()?;

    info!("Generating noise map with seed: {}", params.seed);
    info!(
        "Map size: {}x{}, scale {}, {} octaves (persistence {}, lacunarity {})",
        params.width,
        params.height,
        params.effective_scale(),
        params.octaves,
        params.persistence,
        params.lacunarity
    );

    let map = if args.parallel {
        generate_noise_map_parallel(&params)?
    } else {
        generate_noise_map(&params)?
    };

    match (map.min_max(), map.mean()) {
        (Some((min_h, max_h)), Some(mean)) => {
            info!("Value range: {:.3} to {:.3}, mean {:.3}", min_h, max_h, mean);
        }
        _ => info!("Map is empty"),
    }

    if let Some(path) = &args.output {
        export::export_image(&map, path, args.colormap.into())?;
        info!("Wrote image to {}", path.display());
    }

    if let Some(path) = &args.json {
        export::export_json(&map, path)?;
        info!("Wrote values to {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
