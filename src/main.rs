//! Headless sidescroller driver.
//!
//! Runs the step simulation against a scripted input timeline and reports
//! the final body and camera state. Built on:
//! - **bevy_ecs** for the entity-component-system world and step schedule
//! - **configparser** for the INI configuration
//! - **serde_json** for level files and state dumps
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 240 --script "R:60,RJ:1,N:30,L:40"
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use sidescroller::game::{Simulation, default_level};
use sidescroller::resources::gameconfig::GameConfig;
use sidescroller::resources::tilemap::LevelData;
use sidescroller::script::InputScript;

#[derive(Parser)]
#[command(version, about = "Headless 2D platformer simulation")]
struct Cli {
    /// INI configuration file. Missing file or keys fall back to defaults.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON level file. A built-in level is used when omitted.
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Number of steps to run. Defaults to the script length.
    #[arg(long)]
    frames: Option<u64>,

    /// Input timeline, e.g. "R:60,RJ:1,N:30,L:40".
    #[arg(long, default_value = "")]
    script: InputScript,

    /// Frame delta handed to every step, in display frames.
    #[arg(long, default_value_t = 1.0)]
    dt: f32,

    /// Write the final state as JSON to this path ("-" for stdout).
    #[arg(long, value_name = "PATH")]
    dump_json: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using default configuration", e);
    }

    let level = match &cli.level {
        Some(path) => LevelData::load_from_file(path)?,
        None => {
            info!("No level given, using the built-in level");
            default_level(&config)?
        }
    };

    let mut sim = Simulation::new(config, &level)?;
    let frames = cli.frames.unwrap_or_else(|| cli.script.len());
    for frame in 0..frames {
        sim.step(cli.script.input_at(frame), cli.dt);
    }

    let snapshot = sim.snapshot();
    match snapshot.body {
        Some(body) => info!(
            "After {} steps: body at ({:.2}, {:.2}) v=({:.2}, {:.2}) grounded={} {:?}, camera at ({:.2}, {:.2})",
            snapshot.frame,
            body.position.x,
            body.position.y,
            body.velocity.x,
            body.velocity.y,
            body.grounded,
            body.animation,
            snapshot.camera_position.x,
            snapshot.camera_position.y
        ),
        None => warn!("Controlled body is gone after {} steps", snapshot.frame),
    }

    if let Some(path) = cli.dump_json {
        let json = serde_json::to_string_pretty(&snapshot)?;
        if path.as_os_str() == "-" {
            println!("{json}");
        } else {
            std::fs::write(&path, json)?;
            info!("State written to {:?}", path);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
