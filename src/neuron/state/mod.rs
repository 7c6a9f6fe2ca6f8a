//! The [`NeuronState`] snapshot and the one step integrator of the dopamine
//! modulated Izhikevich neuron.
//!
//! Every step either takes the spike reset branch (voltage at or above the
//! instantaneous threshold `v_t`) or integrates the subthreshold dynamics with
//! explicit Euler:
//!
//! ```text
//! C dv/dt = k (v - v_r)(v - v_t) - u + I
//! du/dt   = a (b (v - v_r) - u)
//! if v >= v_t: v = c, u = u + d
//! ```

use serde::{Deserialize, Serialize};
use crate::error::StateError;
use super::dopamine::{modulated_ampa_current, modulated_nmda_current, modulated_reset_increment};
use super::parameters::DopamineNeuronParameters;
use super::synapse::{
    channel_current, decay_conductance, total_current, update_conductance, SynapticInput,
};


/// Snapshot of the neuron at a single timestep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeuronState {
    /// Membrane potential (mV)
    pub v: f32,
    /// Recovery variable
    pub u: f32,
    /// Controls speed of recovery
    pub a: f32,
    /// Controls sensitivity of recovery to voltage
    pub b: f32,
    /// After spike reset value for voltage (mV)
    pub c: f32,
    /// Current after spike increment for recovery
    pub d: f32,
    /// D1 receptor activation
    pub d1: f32,
    /// D2 receptor activation
    pub d2: f32,
    /// AMPA conductance trace
    pub h_ampa: f32,
    /// NMDA conductance trace
    pub h_nmda: f32,
    /// GABA conductance trace
    pub h_gaba: f32,
}

impl NeuronState {
    /// Initial state at the parameters' initial voltage and recovery with
    /// empty conductance traces
    pub fn new(params: &DopamineNeuronParameters, d1: f32, d2: f32) -> Self {
        let izhikevich = &params.izhikevich;

        NeuronState {
            v: izhikevich.v0,
            u: izhikevich.u0,
            a: izhikevich.a,
            b: izhikevich.b,
            c: izhikevich.c,
            d: izhikevich.d,
            d1,
            d2,
            h_ampa: 0.,
            h_nmda: 0.,
            h_gaba: 0.,
        }
    }

    /// Whether the next call to [`step`](Self::step) takes the spike reset branch
    pub fn is_spiking(&self, params: &DopamineNeuronParameters) -> bool {
        self.v >= params.v_t
    }

    /// Advances the neuron by one timestep `dt` (ms) given the input currents of
    /// each synaptic channel, returns the next state
    ///
    /// Never validates its inputs, a non-positive `dt`, a zero time constant or
    /// large inputs may produce non-finite values, see [`try_step`](Self::try_step)
    pub fn step(&self, input: &SynapticInput, params: &DopamineNeuronParameters, dt: f32) -> NeuronState {
        if self.is_spiking(params) {
            let d = modulated_reset_increment(self.d, self.d1, params.big_l);

            return NeuronState {
                v: params.izhikevich.c,
                u: self.u + d,
                d,
                ..*self
            };
        }

        let h_ampa = update_conductance(self.h_ampa, input.ampa, params.tau_ampa);
        let h_nmda = update_conductance(self.h_nmda, input.nmda, params.tau_nmda);
        let h_gaba = update_conductance(self.h_gaba, input.gaba, params.tau_gaba);

        let i_ampa = channel_current(h_ampa, self.v, params.g_ampa, params.e_ampa);
        let i_nmda = channel_current(h_nmda, self.v, params.g_nmda, params.e_nmda);
        let i_gaba = channel_current(h_gaba, self.v, params.g_gaba, params.e_gaba);

        // gaba is not modulated by dopamine
        let i_ampa = modulated_ampa_current(i_ampa, self.d2, params.beta_2);
        let i_nmda = modulated_nmda_current(i_nmda, self.d1, params.beta_1);

        let i_total = total_current(i_ampa, i_nmda, i_gaba, self.v);

        let (k, v_r) = params.effective_gain_and_rest(self.d1, self.d2);

        let dv = (
            k * (self.v - v_r) * (self.v - params.v_t) - self.u + i_total
        ) * (dt / params.c_m);
        let du = self.a * (self.b * (self.v - v_r) - self.u) * dt;

        NeuronState {
            v: self.v + dv,
            u: self.u + du,
            h_ampa: decay_conductance(h_ampa, params.tau_ampa, dt),
            h_nmda: decay_conductance(h_nmda, params.tau_nmda, dt),
            h_gaba: decay_conductance(h_gaba, params.tau_gaba, dt),
            ..*self
        }
    }

    /// Same as [`step`](Self::step) but fails if the next state contains a
    /// non-finite value
    pub fn try_step(
        &self,
        input: &SynapticInput,
        params: &DopamineNeuronParameters,
        dt: f32,
    ) -> Result<NeuronState, StateError> {
        let next = self.step(input, params, dt);
        next.check_finite()?;

        Ok(next)
    }

    fn named_values(&self) -> [(&'static str, f32); 11] {
        [
            ("v", self.v),
            ("u", self.u),
            ("a", self.a),
            ("b", self.b),
            ("c", self.c),
            ("d", self.d),
            ("d1", self.d1),
            ("d2", self.d2),
            ("h_ampa", self.h_ampa),
            ("h_nmda", self.h_nmda),
            ("h_gaba", self.h_gaba),
        ]
    }

    /// Fails with the first field that is `NaN` or infinite
    pub fn check_finite(&self) -> Result<(), StateError> {
        match self.named_values().iter().find(|(_, value)| !value.is_finite()) {
            Some((field, _)) => Err(StateError::NonFinite { field: *field }),
            None => Ok(()),
        }
    }

    /// Checks that the state is finite and that dopamine activations are
    /// within `[0, 1]`, out of range activations are rejected rather than clamped
    pub fn validate(&self) -> Result<(), StateError> {
        self.check_finite()?;

        for (receptor, value) in [("d1", self.d1), ("d2", self.d2)] {
            if !(0. ..=1.).contains(&value) {
                return Err(StateError::DopamineOutOfRange { receptor, value });
            }
        }

        Ok(())
    }
}
