//! Environment step.
use ndarray::Array1;

/// An observation, reward and termination tuple emitted at every
/// interaction step.
pub struct EnvStep {
    /// Observation.
    pub obs: Array1<f32>,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if the episode is terminated.
    pub is_terminated: bool,

    /// Flag denoting if the episode is truncated.
    pub is_truncated: bool,
}

impl EnvStep {
    /// Constructs an [`EnvStep`] object.
    pub fn new(obs: Array1<f32>, reward: f32, is_terminated: bool, is_truncated: bool) -> Self {
        Self {
            obs,
            reward,
            is_terminated,
            is_truncated,
        }
    }

    /// Terminated or truncated.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }
}
