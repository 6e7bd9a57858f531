use std::{error::Error, io, path::PathBuf};

use clap::Parser;
use log::{error, info};
use pursuit::{
    config::{run::RunParams, setup::SetupConfig},
    dynamics::run_headless,
    state::SimState,
};

#[derive(Debug, clap::Parser)]
#[command(
    name = "run_sim",
    about = "Run a pursuit configuration without a display and report when each predator reaches the prey"
)]
pub struct RunCli {
    /// Print one `lambda time` pair per line.
    #[arg(short = 'c', long = "compact")]
    pub compact: bool,

    /// Simulated seconds per tick.
    #[arg(short = 's', long = "step", default_value_t = 1e-3)]
    pub step: f64,

    /// Stop after this many simulated seconds even if predators are still chasing.
    #[arg(long = "t-max")]
    pub t_max: Option<f64>,

    /// Also write the capture times to this CSV file.
    #[arg(long = "csv")]
    pub csv: Option<PathBuf>,

    /// Configuration file, or `-` for standard input.
    pub config: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = RunCli::parse();

    let setup_config = if args.config == "-" {
        info!("Reading configuration from standard input");
        SetupConfig::from_reader(io::stdin().lock())
    } else {
        info!("Reading configuration from {}", args.config);
        SetupConfig::from_path(&args.config)
    }
    .inspect_err(|e| error!("Invalid configuration {}: {}", args.config, e))?;

    let run_params = RunParams {
        step: args.step,
        t_max: args.t_max,
        compact: args.compact,
    };

    let mut sim_state = SimState::new(&setup_config);
    let reports = run_headless(&mut sim_state, &run_params);
    for report in &reports {
        println!("{}", report.line(run_params.compact));
    }

    if let Some(path) = args.csv {
        let mut writer = csv::Writer::from_path(&path)?;
        for report in &reports {
            writer.serialize(report)?;
        }
        writer.flush()?;
        info!("Wrote {} capture time(s) to {}", reports.len(), path.display());
    }

    info!("Done!");
    Ok(())
}
