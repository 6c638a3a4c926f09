use magpend::{ScenarioConfig, Scenario, BasinGrid, ZoomPath, NVec2, save_png};
use magpend::{bench_force_field, bench_simulate, bench_basin_curve};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file: a path, or a name under `scenarios/`
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate every pendulum in the scenario until it comes to rest
    Run {
        /// Write the recorded trajectories as YAML
        #[arg(long)]
        trajectory_out: Option<PathBuf>,
    },
    /// Render the basins of attraction of the scenario's view to a PNG
    Basin {
        #[arg(short, long, default_value = "basin.png")]
        output: PathBuf,
    },
    /// Render a sequence of basin frames zooming in on a target point
    Zoom {
        #[arg(long, allow_hyphen_values = true)]
        target_x: f64,
        #[arg(long, allow_hyphen_values = true)]
        target_y: f64,
        #[arg(long, default_value_t = 0.01)]
        target_extents: f64,
        #[arg(long, default_value_t = 600)]
        frames: usize,
        #[arg(long, default_value = "frames")]
        out_dir: PathBuf,
    },
    /// Print timing tables
    Bench,
}

#[derive(Serialize)]
struct TrajectoryDump {
    pendulum: usize,
    termination: String,
    steps: usize,
    final_position: [f64; 2],
    points: Vec<[f64; 2]>,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.exists() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let scenario_cfg = ScenarioConfig::from_yaml_file(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    info!("loaded scenario {}", config_path.display());

    Ok(scenario_cfg)
}

fn write_trajectories(scenario: &Scenario, path: &Path) -> Result<()> {
    let runs = scenario.run();

    let mut dumps = Vec::with_capacity(runs.len());
    for (i, run) in runs.into_iter().enumerate() {
        let run = run.with_context(|| format!("pendulum {i} failed"))?;
        dumps.push(TrajectoryDump {
            pendulum: i,
            termination: format!("{:?}", run.termination),
            steps: run.steps,
            final_position: [run.final_state.x.x, run.final_state.x.y],
            points: run.trajectory.iter().map(|p| [p.x, p.y]).collect(),
        });
    }

    let writer = BufWriter::new(File::create(path)?);
    serde_yaml::to_writer(writer, &dumps)?;
    info!("wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match args.command {
        Command::Run { trajectory_out } => {
            let scenario = Scenario::build_scenario(load_scenario_from_yaml(&args.file_name)?)?;
            match trajectory_out {
                Some(path) => write_trajectories(&scenario, &path)?,
                None => {
                    for (i, run) in scenario.run().into_iter().enumerate() {
                        run.with_context(|| format!("pendulum {i} failed"))?;
                    }
                }
            }
        }
        Command::Basin { output } => {
            let scenario = Scenario::build_scenario(load_scenario_from_yaml(&args.file_name)?)?;
            let map = scenario.render_basin()?;
            info!(
                "cells per magnet: {:?}, unsettled: {} ({} failed)",
                map.histogram(scenario.magnets.len()),
                map.unsettled(),
                map.failed(),
            );
            save_png(&map, &output)?;
        }
        Command::Zoom { target_x, target_y, target_extents, frames, out_dir } => {
            let scenario = Scenario::build_scenario(load_scenario_from_yaml(&args.file_name)?)?;
            let path = ZoomPath::new(
                scenario.basin.center,
                NVec2::new(target_x, target_y),
                scenario.basin.extents,
                target_extents,
                frames,
            )?;

            fs::create_dir_all(&out_dir)?;
            for i in 0..frames {
                let (center, extents) = path.frame(i);
                let grid = BasinGrid::new(scenario.basin.resolution, center, extents)?;
                let map = grid.render(&scenario.magnets, &scenario.parameters, &scenario.engine)?;
                save_png(&map, &out_dir.join(format!("frame{i:04}.png")))?;
            }
        }
        Command::Bench => {
            bench_force_field()?;
            bench_simulate()?;
            bench_basin_curve()?;
        }
    }

    Ok(())
}
