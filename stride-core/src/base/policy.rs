//! Policy.
use ndarray::Array2;

/// A policy on a vectorized environment.
///
/// Policy is a mapping from a batch of observations to a batch of actions.
/// Evaluation assumes the mapping is deterministic.
pub trait Policy {
    /// Sample actions given a batch of observations, one row per environment.
    fn sample(&mut self, obs: &Array2<f32>) -> Array2<f32>;
}
