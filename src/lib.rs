//! # Striatal Neuron
//!
//! `striatal_neuron` simulates a single striatal medium spiny neuron with the
//! Izhikevich model in the form used by
//! [Humphries et al. (2009)](https://doi.org/10.1016/j.neunet.2009.07.018),
//! where D1 and D2 dopamine receptor activation rescales the resting potential,
//! the post-spike recovery jump, the gain and the AMPA and NMDA currents.
//! Synaptic input reaches the neuron through AMPA, NMDA (with a voltage
//! dependent magnesium block) and GABA conductance traces.
//!
//! The integrator is a pure function: each call to
//! [`NeuronState::step`](neuron::state::NeuronState::step) takes the previous
//! state and the input of each channel and returns the next state, the caller
//! owns the history.
//!
//! ## Example Code
//!
//! ### Stepping the neuron by hand
//!
//! ```rust
//! use striatal_neuron::neuron::{
//!     parameters::DopamineNeuronParameters,
//!     state::NeuronState,
//!     stimulus::injected_current,
//!     synapse::SynapticInput,
//! };
//!
//! let params = DopamineNeuronParameters::msn_default();
//! let mut state = NeuronState::new(&params, 0., 0.);
//! let mut voltages: Vec<f32> = vec![];
//! let mut spikes = 0;
//!
//! for timestep in 0..500 {
//!     let input = SynapticInput::new(injected_current(100., timestep, 100, 130), 0., 0.);
//!
//!     if state.is_spiking(&params) {
//!         spikes += 1;
//!     }
//!     state = state.step(&input, &params, 0.1);
//!
//!     voltages.push(state.v);
//! }
//!
//! assert!(spikes > 0);
//! ```
//!
//! ### Dopamine modulated run from a configuration
//!
//! ```rust
//! use striatal_neuron::{config::SimulationConfig, simulation::Simulation};
//!
//! let config = SimulationConfig::from_toml_str(r#"
//!     iterations = 1000
//!     d1 = 0.8
//!     modulation = "inline"
//!     stimulus_amplitude = 60.0
//!     stimulus_start = 100
//!     stimulus_end = 400
//!     ampa_frac = 0.5
//!     nmda_frac = 0.5
//! "#).unwrap();
//!
//! let trajectory = Simulation::new(config).unwrap().run().unwrap();
//! assert_eq!(trajectory.states.len(), 1001);
//! ```

pub mod config;
pub mod distribution;
pub mod error;
pub mod neuron;
pub mod simulation;
