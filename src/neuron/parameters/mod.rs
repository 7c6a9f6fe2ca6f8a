//! Constant parameter records for the dopamine modulated Izhikevich neuron,
//! defaults reproduce the medium spiny neuron tuning of Humphries et al. (2009).

use serde::{Deserialize, Serialize};
use crate::error::ParameterError;
use super::dopamine::{modulated_gain, modulated_rest_potential, DopamineModulation};
use super::synapse::SynapticChannel;


/// Base Izhikevich constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IzhikevichParameters {
    /// Controls speed of recovery
    pub a: f32,
    /// Controls sensitivity of recovery to voltage
    pub b: f32,
    /// After spike reset value for voltage (mV)
    pub c: f32,
    /// After spike reset increment for recovery
    pub d: f32,
    /// Fixed spike peak of the original model (mV)
    pub v_th: f32,
    /// Voltage initialization value (mV)
    pub v0: f32,
    /// Recovery initialization value
    pub u0: f32,
}

impl IzhikevichParameters {
    /// Medium spiny neuron constants
    pub fn msn_default() -> Self {
        IzhikevichParameters {
            a: 0.01,
            b: -20.,
            c: -55.,
            d: 91.,
            v_th: 30.,
            v0: -65.,
            u0: -14.,
        }
    }
}

impl Default for IzhikevichParameters {
    fn default() -> Self {
        IzhikevichParameters::msn_default()
    }
}

/// Izhikevich constants extended with dopamine receptor and synaptic channel constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DopamineNeuronParameters {
    /// Base Izhikevich constants
    pub izhikevich: IzhikevichParameters,
    /// Gain of the quadratic voltage term
    pub k: f32,
    /// Resting potential (mV)
    pub v_r: f32,
    /// Spike peak (mV)
    pub v_peak: f32,
    /// AMPA reversal potential (mV)
    pub e_ampa: f32,
    /// NMDA reversal potential (mV)
    pub e_nmda: f32,
    /// GABA reversal potential (mV)
    pub e_gaba: f32,
    /// AMPA trace time constant (ms)
    pub tau_ampa: f32,
    /// NMDA trace time constant (ms)
    pub tau_nmda: f32,
    /// GABA trace time constant (ms)
    pub tau_gaba: f32,
    /// Magnesium concentration (mM)
    pub mg: f32,
    /// Membrane capacitance (pF)
    pub c_m: f32,
    /// Instantaneous threshold voltage (mV)
    pub v_t: f32,
    /// Baseline reset increment
    pub d: f32,
    /// D1 scaling of resting potential
    pub big_k: f32,
    /// D1 scaling of NMDA current
    pub beta_1: f32,
    /// D2 scaling of gain
    pub alpha: f32,
    /// D2 scaling of AMPA current
    pub beta_2: f32,
    /// D1 scaling of the reset increment through the L-type calcium current
    pub big_l: f32,
    /// Maximal AMPA conductance (nS)
    pub g_ampa: f32,
    /// Maximal NMDA conductance (nS)
    pub g_nmda: f32,
    /// Maximal GABA conductance (nS)
    pub g_gaba: f32,
    /// How dopamine reaches the gain and resting potential
    pub modulation: DopamineModulation,
}

impl DopamineNeuronParameters {
    /// Medium spiny neuron constants
    pub fn msn_default() -> Self {
        DopamineNeuronParameters {
            izhikevich: IzhikevichParameters::msn_default(),
            k: 1.,
            v_r: -80.,
            v_peak: 40.,
            e_ampa: 0.,
            e_nmda: 0.,
            e_gaba: -60.,
            tau_ampa: 6.,
            tau_nmda: 160.,
            tau_gaba: 4.,
            mg: 1.,
            c_m: 15.2,
            v_t: -29.7,
            d: 91.,
            big_k: 0.0289,
            beta_1: 6.3,
            alpha: 0.032,
            beta_2: 0.215,
            big_l: 0.331,
            g_ampa: 6.9,
            g_nmda: 3.45,
            g_gaba: 4.93,
            modulation: DopamineModulation::Deferred,
        }
    }

    /// Maximal conductance of the given channel
    pub fn conductance(&self, channel: SynapticChannel) -> f32 {
        match channel {
            SynapticChannel::Ampa => self.g_ampa,
            SynapticChannel::Nmda => self.g_nmda,
            SynapticChannel::Gaba => self.g_gaba,
        }
    }

    /// Reversal potential of the given channel
    pub fn reversal(&self, channel: SynapticChannel) -> f32 {
        match channel {
            SynapticChannel::Ampa => self.e_ampa,
            SynapticChannel::Nmda => self.e_nmda,
            SynapticChannel::Gaba => self.e_gaba,
        }
    }

    /// Trace time constant of the given channel
    pub fn time_constant(&self, channel: SynapticChannel) -> f32 {
        match channel {
            SynapticChannel::Ampa => self.tau_ampa,
            SynapticChannel::Nmda => self.tau_nmda,
            SynapticChannel::Gaba => self.tau_gaba,
        }
    }

    /// Gain and resting potential used for the given dopamine activations
    /// under this record's [`DopamineModulation`]
    pub fn effective_gain_and_rest(&self, d1: f32, d2: f32) -> (f32, f32) {
        match self.modulation {
            DopamineModulation::Deferred => (self.k, self.v_r),
            DopamineModulation::Inline => (
                modulated_gain(self.k, d2, self.alpha),
                modulated_rest_potential(self.v_r, d1, self.big_k),
            ),
        }
    }

    /// Returns a copy with the gain and resting potential already modulated by
    /// the given activations, the copy uses [`DopamineModulation::Deferred`]
    /// so the modulation is not applied again while integrating
    pub fn with_dopamine(&self, d1: f32, d2: f32) -> Self {
        DopamineNeuronParameters {
            k: modulated_gain(self.k, d2, self.alpha),
            v_r: modulated_rest_potential(self.v_r, d1, self.big_k),
            modulation: DopamineModulation::Deferred,
            ..*self
        }
    }

    fn named_values(&self) -> [(&'static str, f32); 28] {
        [
            ("a", self.izhikevich.a),
            ("b", self.izhikevich.b),
            ("c", self.izhikevich.c),
            ("izhikevich_d", self.izhikevich.d),
            ("v_th", self.izhikevich.v_th),
            ("v0", self.izhikevich.v0),
            ("u0", self.izhikevich.u0),
            ("k", self.k),
            ("v_r", self.v_r),
            ("v_peak", self.v_peak),
            ("e_ampa", self.e_ampa),
            ("e_nmda", self.e_nmda),
            ("e_gaba", self.e_gaba),
            ("tau_ampa", self.tau_ampa),
            ("tau_nmda", self.tau_nmda),
            ("tau_gaba", self.tau_gaba),
            ("mg", self.mg),
            ("c_m", self.c_m),
            ("v_t", self.v_t),
            ("d", self.d),
            ("big_k", self.big_k),
            ("beta_1", self.beta_1),
            ("alpha", self.alpha),
            ("beta_2", self.beta_2),
            ("big_l", self.big_l),
            ("g_ampa", self.g_ampa),
            ("g_nmda", self.g_nmda),
            ("g_gaba", self.g_gaba),
        ]
    }

    /// Checks that every constant is finite and that time constants and
    /// capacitance can be divided by
    pub fn validate(&self) -> Result<(), ParameterError> {
        if let Some((name, _)) = self.named_values().iter().find(|(_, value)| !value.is_finite()) {
            return Err(ParameterError::NonFiniteParameter(*name));
        }

        for channel in SynapticChannel::ALL {
            if self.time_constant(channel) <= 0. {
                return Err(ParameterError::NonPositiveTimeConstant(channel));
            }
        }

        if self.c_m <= 0. {
            return Err(ParameterError::NonPositiveCapacitance);
        }

        Ok(())
    }
}

impl Default for DopamineNeuronParameters {
    fn default() -> Self {
        DopamineNeuronParameters::msn_default()
    }
}

#[cfg(test)]
mod test {
    use crate::error::ParameterError;
    use crate::neuron::dopamine::DopamineModulation;
    use crate::neuron::synapse::SynapticChannel;
    use super::DopamineNeuronParameters;


    #[test]
    fn test_default_is_valid() {
        assert!(DopamineNeuronParameters::default().validate().is_ok());
    }

    #[test]
    fn test_zero_time_constant_rejected() {
        let params = DopamineNeuronParameters {
            tau_nmda: 0.,
            ..DopamineNeuronParameters::default()
        };

        match params.validate() {
            Err(ParameterError::NonPositiveTimeConstant(channel)) => assert_eq!(channel, SynapticChannel::Nmda),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let params = DopamineNeuronParameters {
            g_gaba: f32::NAN,
            ..DopamineNeuronParameters::default()
        };

        match params.validate() {
            Err(ParameterError::NonFiniteParameter(name)) => assert_eq!(name, "g_gaba"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_capacitance_rejected() {
        let params = DopamineNeuronParameters {
            c_m: -1.,
            ..DopamineNeuronParameters::default()
        };

        assert!(matches!(params.validate(), Err(ParameterError::NonPositiveCapacitance)));
    }

    #[test]
    fn test_channel_accessors() {
        let params = DopamineNeuronParameters::default();

        assert_eq!(params.conductance(SynapticChannel::Ampa), 6.9);
        assert_eq!(params.reversal(SynapticChannel::Gaba), -60.);
        assert_eq!(params.time_constant(SynapticChannel::Nmda), 160.);
    }

    #[test]
    fn test_pre_applied_matches_inline() {
        let base = DopamineNeuronParameters::default();
        let inline = DopamineNeuronParameters { modulation: DopamineModulation::Inline, ..base };

        for (d1, d2) in [(0., 0.), (0.5, 0.2), (1., 1.)] {
            let pre_applied = base.with_dopamine(d1, d2);

            assert_eq!(pre_applied.modulation, DopamineModulation::Deferred);
            assert_eq!(
                pre_applied.effective_gain_and_rest(d1, d2),
                inline.effective_gain_and_rest(d1, d2),
            );
        }

        assert_eq!(base.effective_gain_and_rest(1., 1.), (base.k, base.v_r));
    }
}
