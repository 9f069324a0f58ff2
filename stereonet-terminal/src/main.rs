/// Stereonet Terminal - interactive equal-area plot of planes and lines
///
/// Controls:
///   - P: Switch planes between great-circle arcs and poles
///   - G: Show / hide the graticule
///   - Tab: Select the next feature, X: remove it
///   - Q/ESC: Quit
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use stereonet_core::{parse_records, Representation, StereonetConfig};
use stereonet_terminal::TerminalApp;
use tracing_subscriber::EnvFilter;

const DEMO_MEASUREMENTS: &str = "\
plane 30/045
plane 60/090
plane 83.2/257
line 45/336.6546
line 20/120
";

#[derive(Parser)]
#[command(name = "stereonet-terminal")]
#[command(about = "Plot structural measurements on an equal-area stereonet")]
struct Args {
    /// Measurement file with `plane DIP/DIR` and `line DIP/DIR` lines
    input: Option<PathBuf>,

    /// Initial plane representation (`arc` or `pole`)
    #[arg(long, default_value = "arc")]
    representation: String,

    /// Start with the graticule hidden
    #[arg(long)]
    no_graticule: bool,

    /// Fade-in duration in milliseconds, 0 disables
    #[arg(long, default_value_t = 0)]
    animation_ms: u64,

    /// Write logs here instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let source = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => DEMO_MEASUREMENTS.to_string(),
    };
    let records = parse_records(&source);
    let representation: Representation = args.representation.parse()?;

    let config = StereonetConfig::default()
        .with_representation(representation)
        .with_graticule(!args.no_graticule)
        .with_animation(Some(Duration::from_millis(args.animation_ms)));

    let mut app = TerminalApp::new(&records, config)?;
    app.run()
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    match log_file {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}
