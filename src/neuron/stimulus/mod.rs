//! Rectangular current injection split across synaptic channels.

use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::distribution::GaussianParameters;
use super::synapse::SynapticInput;


/// Returns `amplitude` while `t` is strictly between `t_min` and `t_max`, otherwise `0.`
pub fn injected_current(amplitude: f32, t: usize, t_min: usize, t_max: usize) -> f32 {
    if t_min < t && t < t_max {
        amplitude
    } else {
        0.
    }
}

/// A rectangular pulse of current distributed over the synaptic channels
/// by fixed fractions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangularStimulus {
    /// Injected current while active
    pub amplitude: f32,
    /// Last inactive step before the pulse
    pub t_min: usize,
    /// First inactive step after the pulse
    pub t_max: usize,
    /// Fraction of the current delivered to AMPA
    pub ampa_frac: f32,
    /// Fraction of the current delivered to NMDA
    pub nmda_frac: f32,
    /// Fraction of the current delivered to GABA
    pub gaba_frac: f32,
    /// Multiplicative noise on the amplitude, disabled with a standard deviation of `0.`
    pub noise: GaussianParameters,
}

impl Default for RectangularStimulus {
    fn default() -> Self {
        RectangularStimulus {
            amplitude: 0.,
            t_min: 0,
            t_max: 0,
            ampa_frac: 1.,
            nmda_frac: 0.,
            gaba_frac: 0.,
            noise: GaussianParameters::default(),
        }
    }
}

impl RectangularStimulus {
    /// Whether the pulse is on at step `t`
    pub fn is_active(&self, t: usize) -> bool {
        self.t_min < t && t < self.t_max
    }

    fn split(&self, current: f32) -> SynapticInput {
        SynapticInput {
            ampa: current * self.ampa_frac,
            nmda: current * self.nmda_frac,
            gaba: current * self.gaba_frac,
        }
    }

    /// Channel inputs at step `t` without noise
    pub fn input_at(&self, t: usize) -> SynapticInput {
        self.split(injected_current(self.amplitude, t, self.t_min, self.t_max))
    }

    /// Channel inputs at step `t` with the amplitude scaled by a noise
    /// factor drawn from the given generator
    pub fn noisy_input_at<R: Rng + ?Sized>(&self, t: usize, rng: &mut R) -> SynapticInput {
        let current = injected_current(self.amplitude, t, self.t_min, self.t_max);
        if current == 0. {
            return SynapticInput::default();
        }

        self.split(current * self.noise.get_random_number_with(rng))
    }
}
