use std::fmt::{Display, Debug, Formatter, Result};
use crate::neuron::synapse::SynapticChannel;


/// Error set for invalid parameter records or simulation settings
pub enum ParameterError {
    /// Time constant of the given channel is zero or negative
    NonPositiveTimeConstant(SynapticChannel),
    /// Membrane capacitance is zero or negative
    NonPositiveCapacitance,
    /// Timestep is zero or negative
    NonPositiveTimestep,
    /// Named parameter is `NaN` or infinite
    NonFiniteParameter(&'static str),
}

impl Display for ParameterError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ParameterError::NonPositiveTimeConstant(channel) => write!(
                f, "Time constant for {} channel must be positive", channel
            ),
            ParameterError::NonPositiveCapacitance => write!(f, "Membrane capacitance must be positive"),
            ParameterError::NonPositiveTimestep => write!(f, "Timestep must be positive"),
            ParameterError::NonFiniteParameter(name) => write!(f, "Parameter '{}' must be finite", name),
        }
    }
}

impl Debug for ParameterError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for neuron states that cannot be simulated
pub enum StateError {
    /// Dopamine receptor activation is outside of `[0, 1]`
    DopamineOutOfRange {
        /// Receptor name (`d1` or `d2`)
        receptor: &'static str,
        /// Offending activation value
        value: f32,
    },
    /// A state variable became `NaN` or infinite
    NonFinite {
        /// Name of the first non-finite field
        field: &'static str,
    },
}

impl Display for StateError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            StateError::DopamineOutOfRange { receptor, value } => write!(
                f, "Dopamine activation '{}' must be between 0 and 1, got {}", receptor, value
            ),
            StateError::NonFinite { field } => write!(f, "State variable '{}' is not finite", field),
        }
    }
}

impl Debug for StateError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for simulation runs
pub enum SimulationError {
    /// The explicit Euler integration blew up at the given step
    Diverged {
        /// Step index at which the non-finite state was produced
        step: usize,
        /// Voltage of the offending state
        voltage: f32,
    },
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            SimulationError::Diverged { step, voltage } => write!(
                f, "Simulation diverged at step {} (voltage: {})", step, voltage
            ),
        }
    }
}

impl Debug for SimulationError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for reading simulation configurations
pub enum ConfigError {
    /// Field is present but has the wrong type
    InvalidType {
        /// Name of the field
        field: String,
        /// Expected type name
        expected: &'static str,
    },
    /// Text could not be parsed as TOML
    Parse(String),
    /// Modulation policy name is not recognized
    UnknownModulation(String),
    /// Configuration or output file could not be accessed
    Io(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ConfigError::InvalidType { field, expected } => write!(
                f, "Cannot parse '{}' as {}", field, expected
            ),
            ConfigError::Parse(msg) => write!(f, "Cannot parse configuration: {}", msg),
            ConfigError::UnknownModulation(name) => write!(
                f, "Unknown modulation '{}', expected one of 'deferred', 'inline' or 'pre_applied'", name
            ),
            ConfigError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> ConfigError {
        ConfigError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> ConfigError {
        ConfigError::Io(err.to_string())
    }
}

/// A set of errors that may occur when using the library
pub enum StriatalNeuronError {
    /// Errors related to parameters
    ParameterRelatedError(ParameterError),
    /// Errors related to neuron states
    StateRelatedError(StateError),
    /// Errors related to running simulations
    SimulationRelatedError(SimulationError),
    /// Errors related to configuration
    ConfigRelatedError(ConfigError),
}

impl Display for StriatalNeuronError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            StriatalNeuronError::ParameterRelatedError(err) => write!(f, "{}", err),
            StriatalNeuronError::StateRelatedError(err) => write!(f, "{}", err),
            StriatalNeuronError::SimulationRelatedError(err) => write!(f, "{}", err),
            StriatalNeuronError::ConfigRelatedError(err) => write!(f, "{}", err),
        }
    }
}

impl Debug for StriatalNeuronError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

impl std::error::Error for ParameterError {}
impl std::error::Error for StateError {}
impl std::error::Error for SimulationError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for StriatalNeuronError {}

impl From<ParameterError> for StriatalNeuronError {
    fn from(err: ParameterError) -> StriatalNeuronError {
        StriatalNeuronError::ParameterRelatedError(err)
    }
}

impl From<StateError> for StriatalNeuronError {
    fn from(err: StateError) -> StriatalNeuronError {
        StriatalNeuronError::StateRelatedError(err)
    }
}

impl From<SimulationError> for StriatalNeuronError {
    fn from(err: SimulationError) -> StriatalNeuronError {
        StriatalNeuronError::SimulationRelatedError(err)
    }
}

impl From<ConfigError> for StriatalNeuronError {
    fn from(err: ConfigError) -> StriatalNeuronError {
        StriatalNeuronError::ConfigRelatedError(err)
    }
}
