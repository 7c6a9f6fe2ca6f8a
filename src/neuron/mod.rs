//! The dopamine modulated medium spiny neuron, its parameters, synaptic
//! channels and stimulus.

pub mod dopamine;
pub mod parameters;
pub mod state;
pub mod stimulus;
pub mod synapse;
use parameters::DopamineNeuronParameters;
use state::NeuronState;
use synapse::SynapticInput;


/// Takes in a static input to each channel and iterates the given
/// state for a given duration, returns the voltages of the neuron over time
pub fn run_static_input(
    initial_state: &NeuronState,
    params: &DopamineNeuronParameters,
    input: &SynapticInput,
    dt: f32,
    iterations: usize,
) -> Vec<f32> {
    let mut voltages: Vec<f32> = Vec::with_capacity(iterations);
    let mut state = *initial_state;

    for _ in 0..iterations {
        state = state.step(input, params, dt);

        voltages.push(state.v);
    }

    voltages
}
