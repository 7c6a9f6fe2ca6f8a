//! A tool to generate and clamp noise.

use rand::Rng;
use rand_distr::{Normal, Distribution};
use serde::{Deserialize, Serialize};


/// Samples the normal distribution at the given mean and standard deviation with the
/// given random number generator and clamps the output value between the given
/// minimum and maximum, if standard deviation is `0.` (or not a valid deviation)
/// the mean is always returned
pub fn limited_distr_with<R: Rng + ?Sized>(
    mean: f32,
    std: f32,
    minimum: f32,
    maximum: f32,
    rng: &mut R
) -> f32 {
    if std == 0.0 {
        return mean;
    }

    let normal = match Normal::new(mean, std) {
        Ok(normal) => normal,
        Err(_) => return mean,
    };
    let output: f32 = normal.sample(rng);

    output.max(minimum).min(maximum)
}

/// Calculates the normal distribution at the given mean and standard deviation and clamps
/// the output value between the given minimum and maximum, if standard deviation is `0.` the
/// mean is always returned
pub fn limited_distr(mean: f32, std: f32, minimum: f32, maximum: f32) -> f32 {
    limited_distr_with(mean, std, minimum, maximum, &mut rand::thread_rng())
}

/// Parameters of a clamped normal distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianParameters {
    /// Mean of distribution
    pub mean: f32,
    /// Standard deviation of distribution
    pub std: f32,
    /// Maximum cutoff value
    pub max: f32,
    /// Minimum cutoff value
    pub min: f32,
}

impl Default for GaussianParameters {
    fn default() -> Self {
        GaussianParameters {
            mean: 1.0, // center of norm distr
            std: 0.0, // std of norm distr
            max: 2.0, // maximum cutoff for norm distr
            min: 0.0, // minimum cutoff for norm distr
        }
    }
}

impl GaussianParameters {
    /// Generates a normally distributed random number clamped between
    /// a minimum and a maximum
    pub fn get_random_number(&self) -> f32 {
        limited_distr(self.mean, self.std, self.min, self.max)
    }

    /// Same as [`get_random_number`](Self::get_random_number) but draws from the given
    /// generator, use a seeded generator for reproducible noise
    pub fn get_random_number_with<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        limited_distr_with(self.mean, self.std, self.min, self.max, rng)
    }
}
