use std::path::PathBuf;
use std::process::ExitCode;

use tilegrid::app::{Viewer, render_snapshot};
use tilegrid::config::MapConfig;
use tilegrid::error::SetupError;
use tracing::error;

const USAGE: &str = "usage: tilegrid <map.json> [--snapshot <out.png>]";

fn run(map_path: PathBuf, snapshot: Option<PathBuf>) -> Result<(), SetupError> {
    let config = MapConfig::load(&map_path)?;
    match snapshot {
        Some(out) => render_snapshot(&config, &out),
        None => Viewer::new(config)?.run(),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (map_path, snapshot) = match args.as_slice() {
        [map] => (PathBuf::from(map), None),
        [map, flag, out] if flag == "--snapshot" => (PathBuf::from(map), Some(PathBuf::from(out))),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    // Setup failures are reported here, once, instead of inside the library.
    match run(map_path, snapshot) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
