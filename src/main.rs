//! Command line front end for the Vastu core.

use std::error::Error as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use vastu::compass::{CompassFrame, sector_label_angles};
use vastu::geometry::display_to_image;
use vastu::scoring::rate_zone;
use vastu::session::coerce_rotation;
use vastu::{
    AppConfig, DirectionLabel, Error, ImageSize, LogLevel, Point, ReportAssembler, ScoringEngine,
    SessionSnapshot, VisionAnalysis,
};

#[derive(Parser, Debug)]
#[command(name = "vastu-native", author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to the per-user config)
    #[arg(long, env = "VASTU_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Directory of guidance JSON files, overriding the configuration
    #[arg(long, env = "VASTU_GUIDANCE_DIR", global = true)]
    guidance_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a point into one of the 16 compass sectors
    Directions {
        /// Reference centre as `x,y`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        center: Point,
        /// North marker as `x,y`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        north: Point,
        /// Point to classify as `x,y`; prints the sector layout when omitted
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        point: Option<Point>,
        /// Extra rotation in degrees
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        rotation: f64,
    },
    /// Build a report from an annotation snapshot and a detector result
    Report {
        /// Session snapshot JSON
        #[arg(long)]
        session: PathBuf,
        /// Detector result JSON
        #[arg(long)]
        vision: PathBuf,
        /// Floor-plan image to read the natural size from
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Find the detected room whose marker is under a pointer position
    Pick {
        /// Detector result JSON
        #[arg(long)]
        vision: PathBuf,
        /// Floor-plan image to read the natural size from
        #[arg(long)]
        image: Option<PathBuf>,
        /// Pointer position as `x,y`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        at: Point,
        /// On-screen canvas size as `WxH`; `--at` is then in displayed pixels
        #[arg(long, value_parser = parse_size)]
        display: Option<ImageSize>,
    },
    /// Validate and summarise the guidance catalog
    Catalog {
        /// Print the full normalised catalog as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_point(text: &str) -> Result<Point, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{text}`"))?;
    let coord = |s: &str| {
        s.trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid coordinate `{s}`: {e}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

fn parse_size(text: &str) -> Result<ImageSize, String> {
    let (w, h) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected `WxH`, got `{text}`"))?;
    let dim = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid dimension `{s}`: {e}"))
    };
    Ok(ImageSize::new(dim(w)?, dim(h)?))
}

fn probe_image(path: &Path) -> vastu::Result<ImageSize> {
    let (width, height) = image::image_dimensions(path)?;
    log::info!("Image {:?} is {}x{}", path, width, height);
    Ok(ImageSize::new(width, height))
}

fn require_valid(size: ImageSize) -> vastu::Result<ImageSize> {
    if size.is_valid() {
        Ok(size)
    } else {
        Err(Error::InvalidDimensions {
            width: size.width,
            height: size.height,
        })
    }
}

fn parse_log_level(text: &str) -> Option<LogLevel> {
    LogLevel::all()
        .iter()
        .copied()
        .find(|level| level.name().eq_ignore_ascii_case(text))
}

fn load_config(cli: &Cli) -> AppConfig {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Failed to load config {}: {}", path.display(), e);
            AppConfig::default()
        }),
        None => AppConfig::load_from_default_path().unwrap_or_default(),
    };
    if let Some(dir) = &cli.guidance_dir {
        config.guidance_dir = Some(dir.clone());
    }
    if let Some(level) = cli.log_level.as_deref().and_then(parse_log_level) {
        config.log_level = level;
    }
    config
}

fn init_logging(level: LogLevel) {
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = load_config(&cli);
    init_logging(config.log_level);

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &AppConfig) -> vastu::Result<()> {
    match command {
        Command::Directions {
            center,
            north,
            point,
            rotation,
        } => {
            let engine = ScoringEngine::new(vastu::load_catalog(config)?);
            let frame = directions_frame(center, north, rotation);
            directions(&frame, point, &engine);
            Ok(())
        }
        Command::Report {
            session,
            vision,
            image: image_path,
        } => {
            let engine = ScoringEngine::new(vastu::load_catalog(config)?);
            let snapshot: SessionSnapshot =
                serde_json::from_str(&std::fs::read_to_string(&session)?)?;
            let analysis = VisionAnalysis::from_json(&std::fs::read_to_string(&vision)?)?;

            let size = require_valid(match image_path {
                Some(path) => probe_image(&path)?,
                None => snapshot.image.unwrap_or(config.fallback_canvas),
            })?;

            let report = ReportAssembler::new(&engine)
                .with_marker_radius_fraction(config.room_marker_radius_fraction)
                .assemble(&analysis, &snapshot, size);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Command::Pick {
            vision,
            image: image_path,
            at,
            display,
        } => {
            let analysis = VisionAnalysis::from_json(&std::fs::read_to_string(&vision)?)?;
            let size = require_valid(match image_path {
                Some(path) => probe_image(&path)?,
                None => config.fallback_canvas,
            })?;
            let point = match display {
                Some(display) => display_to_image(
                    at.to_f64(),
                    (f64::from(display.width), f64::from(display.height)),
                    (f64::from(size.width), f64::from(size.height)),
                ),
                None => at,
            };

            match analysis.room_at(point.to_f64(), size, config.room_marker_radius_fraction) {
                Some(index) => {
                    let room = &analysis.rooms[index];
                    let (x, y) = room.percent_position();
                    println!("{} {} at {:.1}%, {:.1}%", index, room.room_type, x, y);
                }
                None => println!("No room at {},{}", point.x, point.y),
            }
            Ok(())
        }
        Command::Catalog { json } => {
            let catalog = vastu::load_catalog(config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                for name in catalog.set_names() {
                    let count = catalog.set(name).map_or(0, |set| set.len());
                    println!("{:<12} {:>2} directions", name, count);
                }
                println!("{} entries in {} sets", catalog.entry_count(), catalog.set_count());
            }
            Ok(())
        }
    }
}

/// Frame for the `directions` command; rotation is coerced as in the session.
fn directions_frame(center: Point, north: Point, rotation: f64) -> CompassFrame {
    let coerced = coerce_rotation(rotation);
    if coerced != rotation {
        log::warn!("Rotation {} is outside [-180, 180], using 0", rotation);
    }
    CompassFrame::from_points(center, Some(north), coerced)
}

fn directions(frame: &CompassFrame, point: Option<Point>, engine: &ScoringEngine) {
    match point {
        Some(point) => {
            let (x, y) = point.to_f64();
            let label = frame.direction_of(x, y);
            println!("{}", DirectionLabel::display_or_unknown(label));
            if let Some(label) = label {
                for (category, zone) in engine.catalog().zones_for_direction(label) {
                    let rating = rate_zone(zone);
                    println!(
                        "  {:<12} {:<10} {:>3} {}",
                        category.name(),
                        zone,
                        rating.score,
                        rating.color_band.hex()
                    );
                }
            }
        }
        None => {
            let Some(angles) = sector_label_angles(frame) else {
                return;
            };
            for (label, angle) in DirectionLabel::ALL.iter().zip(angles) {
                println!("{:<4} {:>7.1}°  {}", label.as_str(), angle.to_degrees(), label.name());
            }
        }
    }
}
