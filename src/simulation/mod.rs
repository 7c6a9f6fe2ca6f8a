//! Driver that threads [`NeuronState`] through the integrator and records the
//! trajectory.

use std::io::{Result as IOResult, Write};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, warn};
use crate::config::SimulationConfig;
use crate::error::{SimulationError, StriatalNeuronError};
use crate::neuron::state::NeuronState;


/// States visited during a run, owned by the caller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    /// Initial state followed by the state after every step
    pub states: Vec<NeuronState>,
    /// Steps that took the spike reset branch
    pub spike_steps: Vec<usize>,
}

impl Trajectory {
    /// Voltage of every recorded state
    pub fn voltages(&self) -> Vec<f32> {
        self.states.iter().map(|state| state.v).collect()
    }

    /// Number of resets during the run
    pub fn spike_count(&self) -> usize {
        self.spike_steps.len()
    }

    /// Writes one row per state, `spiking` marks states that were reset on the following step
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> IOResult<()> {
        writeln!(writer, "step,v,u,d,h_ampa,h_nmda,h_gaba,spiking")?;

        for (n, state) in self.states.iter().enumerate() {
            writeln!(
                writer,
                "{},{},{},{},{},{},{},{}",
                n,
                state.v,
                state.u,
                state.d,
                state.h_ampa,
                state.h_nmda,
                state.h_gaba,
                self.spike_steps.binary_search(&n).is_ok(),
            )?;
        }

        Ok(())
    }
}

/// A validated simulation run
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    /// Validates the configuration before accepting it
    pub fn new(config: SimulationConfig) -> Result<Self, StriatalNeuronError> {
        config.validate()?;

        Ok(Simulation { config })
    }

    /// Configuration the simulation was built with
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs every step, stopping with [`SimulationError::Diverged`] on the first
    /// state that is not finite
    pub fn run(&self) -> Result<Trajectory, StriatalNeuronError> {
        let config = &self.config;
        let params = &config.parameters;
        let noisy = config.stimulus.noise.std != 0.;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            "running {} steps (dt: {}, d1: {}, d2: {}, modulation: {:?})",
            config.iterations,
            config.dt,
            config.initial_state.d1,
            config.initial_state.d2,
            params.modulation,
        );

        let mut trajectory = Trajectory {
            states: Vec::with_capacity(config.iterations + 1),
            spike_steps: vec![],
        };
        let mut state = config.initial_state;
        trajectory.states.push(state);

        for timestep in 0..config.iterations {
            let input = if noisy {
                config.stimulus.noisy_input_at(timestep, &mut rng)
            } else {
                config.stimulus.input_at(timestep)
            };

            if state.is_spiking(params) {
                debug!("reset at step {} (v: {}, u: {})", timestep, state.v, state.u);
                trajectory.spike_steps.push(timestep);
            }

            let next = state.step(&input, params, config.dt);
            if next.check_finite().is_err() {
                warn!("diverged at step {} (v: {})", timestep, next.v);

                return Err(SimulationError::Diverged { step: timestep, voltage: next.v }.into());
            }

            state = next;
            trajectory.states.push(state);
        }

        info!("finished with {} resets", trajectory.spike_count());

        Ok(trajectory)
    }
}

#[cfg(test)]
mod test {
    use crate::config::SimulationConfig;
    use crate::error::{SimulationError, StriatalNeuronError};
    use super::{Simulation, Trajectory};


    #[test]
    fn test_trajectory_length() {
        let config = SimulationConfig { iterations: 25, ..SimulationConfig::default() };
        let trajectory = Simulation::new(config).unwrap().run().unwrap();

        assert_eq!(trajectory.states.len(), 26);
        assert_eq!(trajectory.voltages()[0], -65.);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig { dt: -0.1, ..SimulationConfig::default() };

        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_divergence_reported() {
        let mut config = SimulationConfig { dt: 1e6, iterations: 50, ..SimulationConfig::default() };
        config.initial_state.v = -75.;

        match Simulation::new(config).unwrap().run() {
            Err(StriatalNeuronError::SimulationRelatedError(SimulationError::Diverged { step, .. })) => {
                assert!(step < 50);
            },
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_csv_output() {
        let config = SimulationConfig { iterations: 2, ..SimulationConfig::default() };
        let trajectory = Simulation::new(config).unwrap().run().unwrap();

        let mut buffer: Vec<u8> = vec![];
        trajectory.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "step,v,u,d,h_ampa,h_nmda,h_gaba,spiking");
        assert!(lines[1].starts_with("0,-65,-14,91,0,0,0,false"));
    }

    #[test]
    fn test_empty_trajectory() {
        let trajectory = Trajectory::default();

        assert_eq!(trajectory.spike_count(), 0);
        assert!(trajectory.voltages().is_empty());
    }
}
