//! Synaptic conductance traces and the AMPA, NMDA and GABA currents they generate.

use std::fmt::{Display, Formatter, Result};
use serde::{Deserialize, Serialize};


/// Voltage sensitivity of the magnesium block (1/mV)
const MG_VOLTAGE_SCALE: f32 = 0.062;
/// Magnesium dissociation constant (mM)
const MG_DISSOCIATION: f32 = 3.57;

/// Calculates the fraction of NMDA current passing the magnesium block at the
/// given voltage (mV), increases sigmoidally with depolarization
pub fn magnesium_block(voltage: f32) -> f32 {
    1. / (1. + (1. / MG_DISSOCIATION) * (-MG_VOLTAGE_SCALE * voltage).exp())
}

/// Sums channel currents, gating the NMDA current by the magnesium block
/// at the given voltage (mV)
pub fn total_current(i_ampa: f32, i_nmda: f32, i_gaba: f32, voltage: f32) -> f32 {
    i_ampa + magnesium_block(voltage) * i_nmda + i_gaba
}

/// Folds newly arrived input into a conductance trace, applied before the
/// continuous decay of a step
pub fn update_conductance(h_prev: f32, input_spike_sum: f32, tau: f32) -> f32 {
    (h_prev + input_spike_sum) / tau
}

/// Ohmic current through a channel with maximal conductance `g`, trace `h`
/// and reversal potential `reversal` at the given voltage
pub fn channel_current(h: f32, voltage: f32, g: f32, reversal: f32) -> f32 {
    g * h * (reversal - voltage)
}

/// Exponential leak of a conductance trace over one explicit Euler step
pub fn decay_conductance(h: f32, tau: f32, dt: f32) -> f32 {
    let dh = -h / tau * dt;

    h + dh
}

/// Closed form fixed point of a trace repeatedly driven by the same input,
/// where each step applies [`update_conductance`] followed by [`decay_conductance`]
///
/// Only meaningful when `|(1 - dt / tau) / tau| < 1`, otherwise the trace diverges
pub fn steady_state_conductance(input: f32, tau: f32, dt: f32) -> f32 {
    let r = (1. - dt / tau) / tau;

    input * r / (1. - r)
}

/// Synaptic channel types available to the neuron
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SynapticChannel {
    /// Fast glutamatergic channel
    Ampa,
    /// Slow glutamatergic channel gated by magnesium
    Nmda,
    /// Inhibitory channel
    Gaba,
}

impl SynapticChannel {
    /// All channels in integration order
    pub const ALL: [SynapticChannel; 3] = [
        SynapticChannel::Ampa, SynapticChannel::Nmda, SynapticChannel::Gaba
    ];
}

impl Display for SynapticChannel {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let name = match self {
            SynapticChannel::Ampa => "AMPA",
            SynapticChannel::Nmda => "NMDA",
            SynapticChannel::Gaba => "GABA",
        };

        write!(f, "{}", name)
    }
}

/// Input currents arriving at each channel during a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SynapticInput {
    /// Input to the AMPA trace
    pub ampa: f32,
    /// Input to the NMDA trace
    pub nmda: f32,
    /// Input to the GABA trace
    pub gaba: f32,
}

impl SynapticInput {
    /// Input with the given currents for each channel
    pub fn new(ampa: f32, nmda: f32, gaba: f32) -> Self {
        SynapticInput { ampa, nmda, gaba }
    }

    /// Gets the input of the given channel
    pub fn get(&self, channel: SynapticChannel) -> f32 {
        match channel {
            SynapticChannel::Ampa => self.ampa,
            SynapticChannel::Nmda => self.nmda,
            SynapticChannel::Gaba => self.gaba,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;


    #[test]
    fn test_magnesium_block_at_zero() {
        let expected = 1. / (1. + 1. / 3.57);
        assert!((magnesium_block(0.) - expected).abs() < 1e-6);
        assert!((magnesium_block(0.) - 0.7812).abs() < 1e-3);
    }

    #[test]
    fn test_magnesium_block_is_increasing_and_bounded() {
        let voltages: Vec<f32> = (0..300).map(|i| i as f32 * 0.5 - 100.).collect();

        for pair in voltages.windows(2) {
            let (lower, upper) = (magnesium_block(pair[0]), magnesium_block(pair[1]));
            assert!(upper > lower, "{} <= {} at {}", upper, lower, pair[1]);
            assert!(lower > 0. && upper < 1.);
        }
    }

    #[test]
    fn test_total_current_gates_only_nmda() {
        assert_eq!(total_current(2., 0., -3., -40.), -1.);

        let v = -20.;
        let expected = 1. + magnesium_block(v) * 4. + 0.5;
        assert!((total_current(1., 4., 0.5, v) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_channel_current_sign() {
        // excitatory reversal above voltage drives current inward (positive)
        assert!(channel_current(1., -70., 6.9, 0.) > 0.);
        // at reversal no current flows
        assert_eq!(channel_current(1., -60., 4.93, -60.), 0.);
        assert_eq!(channel_current(0., -70., 6.9, 0.), 0.);
    }

    #[test]
    fn test_update_conductance_jump() {
        assert_eq!(update_conductance(0., 60., 6.), 10.);
        assert_eq!(update_conductance(12., 0., 4.), 3.);
    }

    #[test]
    fn test_decay_without_input_is_monotonic() {
        for dt in [0.1, 0.01, 0.001] {
            let mut h = 5.;
            for _ in 0..1000 {
                let next = decay_conductance(h, 6., dt);
                assert!(next < h);
                assert!(next >= 0.);
                h = next;
            }
        }
    }

    #[test]
    fn test_constant_drive_reaches_steady_state() {
        let (input, dt) = (100., 0.1);

        for tau in [4., 6., 160.] {
            let mut h = 0.;
            for _ in 0..200 {
                h = decay_conductance(update_conductance(h, input, tau), tau, dt);
            }

            let expected = steady_state_conductance(input, tau, dt);
            assert!(
                (h - expected).abs() < 1e-3 * expected.abs().max(1.),
                "tau {}: {} != {}",
                tau,
                h,
                expected
            );
        }
    }

    #[test]
    fn test_input_lookup() {
        let input = SynapticInput::new(1., 2., 3.);

        assert_eq!(input.get(SynapticChannel::Ampa), 1.);
        assert_eq!(input.get(SynapticChannel::Nmda), 2.);
        assert_eq!(input.get(SynapticChannel::Gaba), 3.);
        assert_eq!(SynapticInput::default(), SynapticInput::new(0., 0., 0.));
    }
}
