use std::{
    env,
    fs::File,
    io::{BufWriter, Write},
    process::ExitCode,
};
use tracing::error;
use tracing_subscriber::EnvFilter;
use striatal_neuron::{
    config::SimulationConfig,
    error::{ConfigError, StriatalNeuronError},
    simulation::Simulation,
};


const DEFAULT_OUTPUT: &str = "striatal_neuron.csv";

fn run(config_path: Option<&str>, output_path: &str) -> Result<(), StriatalNeuronError> {
    let config = match config_path {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };
    println!("{:#?}", config);

    let trajectory = Simulation::new(config)?.run()?;

    let file = File::create(output_path).map_err(ConfigError::from)?;
    let mut writer = BufWriter::new(file);
    trajectory.write_csv(&mut writer).map_err(ConfigError::from)?;
    writer.flush().map_err(ConfigError::from)?;

    println!("spikes: {}", trajectory.spike_count());
    println!("trajectory written to {}", output_path);

    Ok(())
}

// Runs the configuration given as the first argument (defaults when omitted)
// and writes the trajectory to the second argument as a .csv
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let config_path = args.get(1).map(String::as_str);
    let output_path = args.get(2).map(String::as_str).unwrap_or(DEFAULT_OUTPUT);

    match run(config_path, output_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
