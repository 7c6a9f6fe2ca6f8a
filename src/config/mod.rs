//! Simulation configuration, either built directly or read from a flat TOML table
//! where every key is optional and falls back to the medium spiny neuron defaults.
//!
//! ```toml
//! iterations = 1000
//! dt = 0.1
//! d1 = 0.5
//! modulation = "inline"
//! stimulus_amplitude = 100.0
//! stimulus_start = 100
//! stimulus_end = 130
//! ```

use std::{fs::read_to_string, path::Path};
use toml::Value;
use tracing::debug;
use crate::error::{ConfigError, ParameterError, StriatalNeuronError};
use crate::neuron::{
    dopamine::DopamineModulation,
    parameters::DopamineNeuronParameters,
    state::NeuronState,
    stimulus::RectangularStimulus,
};


/// Everything the driver needs for a run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Neuron constants
    pub parameters: DopamineNeuronParameters,
    /// State at step `0`
    pub initial_state: NeuronState,
    /// Number of steps to simulate
    pub iterations: usize,
    /// Timestep (ms)
    pub dt: f32,
    /// Injected current
    pub stimulus: RectangularStimulus,
    /// Seed for stimulus noise, drawn from entropy when `None`
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let parameters = DopamineNeuronParameters::default();

        SimulationConfig {
            parameters,
            initial_state: NeuronState::new(&parameters, 0., 0.),
            iterations: 500,
            dt: 0.1,
            stimulus: RectangularStimulus::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Checks parameters, timestep and initial state
    pub fn validate(&self) -> Result<(), StriatalNeuronError> {
        self.parameters.validate()?;

        if !self.dt.is_finite() {
            return Err(ParameterError::NonFiniteParameter("dt").into());
        }
        if self.dt <= 0. {
            return Err(ParameterError::NonPositiveTimestep.into());
        }

        self.initial_state.validate()?;

        Ok(())
    }

    /// Reads the configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = read_to_string(path)?;

        SimulationConfig::from_toml_str(&text)
    }

    /// Parses the configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let table: Value = text.parse()?;

        SimulationConfig::from_table(&table)
    }

    /// Builds the configuration from an already parsed TOML table
    pub fn from_table(table: &Value) -> Result<Self, ConfigError> {
        let defaults = SimulationConfig::default();
        let mut parameters = defaults.parameters;

        macro_rules! read_f32_fields {
            ($($key:literal => $field:expr),* $(,)?) => {
                $(
                    $field = parse_value_with_default(table, $key, parse_f32, $field)?;
                    debug!("{}: {}", $key, $field);
                )*
            };
        }

        read_f32_fields!(
            "a" => parameters.izhikevich.a,
            "b" => parameters.izhikevich.b,
            "c" => parameters.izhikevich.c,
            "v_th" => parameters.izhikevich.v_th,
            "v_init" => parameters.izhikevich.v0,
            "u_init" => parameters.izhikevich.u0,
            "k" => parameters.k,
            "v_r" => parameters.v_r,
            "v_peak" => parameters.v_peak,
            "e_ampa" => parameters.e_ampa,
            "e_nmda" => parameters.e_nmda,
            "e_gaba" => parameters.e_gaba,
            "tau_ampa" => parameters.tau_ampa,
            "tau_nmda" => parameters.tau_nmda,
            "tau_gaba" => parameters.tau_gaba,
            "mg" => parameters.mg,
            "c_m" => parameters.c_m,
            "v_t" => parameters.v_t,
            "big_k" => parameters.big_k,
            "beta_1" => parameters.beta_1,
            "alpha" => parameters.alpha,
            "beta_2" => parameters.beta_2,
            "big_l" => parameters.big_l,
            "g_ampa" => parameters.g_ampa,
            "g_nmda" => parameters.g_nmda,
            "g_gaba" => parameters.g_gaba,
        );

        // both records carry the reset increment
        let d = parse_value_with_default(table, "d", parse_f32, parameters.d)?;
        parameters.d = d;
        parameters.izhikevich.d = d;

        let d1 = parse_value_with_default(table, "d1", parse_f32, 0.)?;
        let d2 = parse_value_with_default(table, "d2", parse_f32, 0.)?;

        let modulation = parse_value_with_default(table, "modulation", parse_string, String::from("deferred"))?;
        let parameters = if modulation.eq_ignore_ascii_case("pre_applied") {
            parameters.with_dopamine(d1, d2)
        } else {
            DopamineNeuronParameters {
                modulation: modulation.parse::<DopamineModulation>()?,
                ..parameters
            }
        };
        debug!("modulation: {:?}", parameters.modulation);

        let iterations = parse_value_with_default(table, "iterations", parse_usize, defaults.iterations)?;
        let dt = parse_value_with_default(table, "dt", parse_f32, defaults.dt)?;

        let mut stimulus = defaults.stimulus;
        read_f32_fields!(
            "stimulus_amplitude" => stimulus.amplitude,
            "ampa_frac" => stimulus.ampa_frac,
            "nmda_frac" => stimulus.nmda_frac,
            "gaba_frac" => stimulus.gaba_frac,
            "noise_std" => stimulus.noise.std,
        );
        stimulus.t_min = parse_value_with_default(table, "stimulus_start", parse_usize, stimulus.t_min)?;
        stimulus.t_max = parse_value_with_default(table, "stimulus_end", parse_usize, stimulus.t_max)?;

        let seed = match table.get("seed") {
            Some(value) => Some(parse_usize(value, "seed")? as u64),
            None => None,
        };

        Ok(SimulationConfig {
            parameters,
            initial_state: NeuronState::new(&parameters, d1, d2),
            iterations,
            dt,
            stimulus,
            seed,
        })
    }
}

fn parse_f32(value: &Value, field_name: &str) -> Result<f32, ConfigError> {
    value
        .as_float()
        .map(|v| v as f32)
        .or_else(|| value.as_integer().map(|v| v as f32))
        .ok_or_else(|| ConfigError::InvalidType { field: String::from(field_name), expected: "float" })
}

fn parse_usize(value: &Value, field_name: &str) -> Result<usize, ConfigError> {
    value
        .as_integer()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| ConfigError::InvalidType { field: String::from(field_name), expected: "unsigned integer" })
}

fn parse_string(value: &Value, field_name: &str) -> Result<String, ConfigError> {
    value
        .as_str()
        .map(String::from)
        .ok_or_else(|| ConfigError::InvalidType { field: String::from(field_name), expected: "string" })
}

fn parse_value_with_default<T>(
    table: &Value,
    key: &str,
    parser: impl Fn(&Value, &str) -> Result<T, ConfigError>,
    default: T,
) -> Result<T, ConfigError> {
    table
        .get(key)
        .map_or(Ok(default), |value| parser(value, key))
}
