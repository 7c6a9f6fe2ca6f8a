//! D1 and D2 dopamine receptor modulation of the medium spiny neuron following
//! [Humphries et al. (2009)](https://doi.org/10.1016/j.neunet.2009.07.018).
//!
//! D1 activation depolarizes the resting potential, shrinks the post-spike
//! recovery jump and enhances NMDA current. D2 activation lowers the gain `k`
//! and suppresses AMPA current.

use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::ConfigError;


/// Scales the resting potential `v_r` (mV) by D1 activation
pub fn modulated_rest_potential(v_r: f32, d1: f32, big_k: f32) -> f32 {
    v_r * (1. + big_k * d1)
}

/// Reduces the post-spike recovery increment `d` with D1 activation
pub fn modulated_reset_increment(d: f32, d1: f32, l: f32) -> f32 {
    d * (1. - l * d1)
}

/// Reduces the gain `k` with D2 activation
pub fn modulated_gain(k: f32, d2: f32, alpha: f32) -> f32 {
    k * (1. - alpha * d2)
}

/// Enhances NMDA current with D1 activation
pub fn modulated_nmda_current(i_nmda: f32, d1: f32, beta_1: f32) -> f32 {
    i_nmda * (1. + beta_1 * d1)
}

/// Suppresses AMPA current with D2 activation
pub fn modulated_ampa_current(i_ampa: f32, d2: f32, beta_2: f32) -> f32 {
    i_ampa * (1. - beta_2 * d2)
}

/// Determines which gain and resting potential the integrator uses
/// when updating voltage and recovery
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DopamineModulation {
    /// Uses `k` and `v_r` exactly as stored in the parameters, modulation may
    /// have been applied beforehand with
    /// [`with_dopamine`](crate::neuron::parameters::DopamineNeuronParameters::with_dopamine)
    #[default]
    Deferred,
    /// Recomputes `k` and `v_r` from the state's `d1` and `d2` on every step
    Inline,
}

impl FromStr for DopamineModulation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deferred" => Ok(DopamineModulation::Deferred),
            "inline" => Ok(DopamineModulation::Inline),
            _ => Err(ConfigError::UnknownModulation(String::from(s))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;


    #[test]
    fn test_zero_dopamine_is_noop() {
        for value in [-80., -55., 0., 1., 91.] {
            assert_eq!(modulated_rest_potential(value, 0., 0.0289), value);
            assert_eq!(modulated_reset_increment(value, 0., 0.331), value);
            assert_eq!(modulated_gain(value, 0., 0.032), value);
            assert_eq!(modulated_nmda_current(value, 0., 6.3), value);
            assert_eq!(modulated_ampa_current(value, 0., 0.215), value);
        }
    }

    #[test]
    fn test_full_activation() {
        assert!((modulated_rest_potential(-80., 1., 0.0289) - -82.312).abs() < 1e-4);
        assert!((modulated_reset_increment(91., 1., 0.331) - 60.879).abs() < 1e-3);
        assert!((modulated_gain(1., 1., 0.032) - 0.968).abs() < 1e-6);
        assert!((modulated_nmda_current(2., 1., 6.3) - 14.6).abs() < 1e-5);
        assert!((modulated_ampa_current(2., 1., 0.215) - 1.57).abs() < 1e-6);
    }

    #[test]
    fn test_modulation_direction() {
        let fractions: Vec<f32> = (0..11).map(|i| i as f32 / 10.).collect();

        for pair in fractions.windows(2) {
            let (low, high) = (pair[0], pair[1]);

            // more negative resting potential with more d1
            assert!(modulated_rest_potential(-80., high, 0.0289) < modulated_rest_potential(-80., low, 0.0289));
            assert!(modulated_reset_increment(91., high, 0.331) < modulated_reset_increment(91., low, 0.331));
            assert!(modulated_gain(1., high, 0.032) < modulated_gain(1., low, 0.032));
            assert!(modulated_nmda_current(1., high, 6.3) > modulated_nmda_current(1., low, 6.3));
            assert!(modulated_ampa_current(1., high, 0.215) < modulated_ampa_current(1., low, 0.215));
        }
    }

    #[test]
    fn test_modulation_from_str() {
        assert_eq!("inline".parse::<DopamineModulation>().unwrap(), DopamineModulation::Inline);
        assert_eq!("Deferred".parse::<DopamineModulation>().unwrap(), DopamineModulation::Deferred);
        assert!("sometimes".parse::<DopamineModulation>().is_err());
    }
}
