/// Example: Print a one-off stereonet snapshot of a measurement file
///
/// Usage: cargo run --example snapshot -- path/to/measurements.txt [pole]

use std::env;
use std::fs;
use std::io::{self, Write};

use stereonet_core::{parse_records, Representation, StereonetConfig};
use stereonet_terminal::{CanvasRenderer, TerminalApp};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let source = match args.get(1) {
        Some(path) => fs::read_to_string(path)?,
        None => {
            eprintln!("Usage: {} <measurements> [arc|pole]", args[0]);
            eprintln!("\nNo file provided, plotting a few sample planes...");
            "plane 30/045\nplane 60/090\nplane 83.2/257\nline 45/336.6546\n".to_string()
        }
    };
    let representation: Representation = match args.get(2) {
        Some(mode) => mode.parse()?,
        None => Representation::Arc,
    };

    let records = parse_records(&source);
    let config = StereonetConfig::default()
        .with_representation(representation)
        .with_animation(None);
    let mut app = TerminalApp::with_canvas(CanvasRenderer::new(81, 41), &records, config)?;

    println!(
        "Plotted {} planes and {} lines",
        app.plot().plane_count(),
        app.plot().line_count()
    );

    let mut stdout = io::stdout();
    app.snapshot(&mut stdout)?;
    stdout.flush()?;
    Ok(())
}
