//! Vectorized environments and the wrapper chain built on top of them.
mod dummy;
mod frame_stack;
mod normalize;
mod video_recorder;

pub use dummy::DummyVecEnv;
pub use frame_stack::VecFrameStack;
pub use normalize::VecNormalize;
pub use video_recorder::VecVideoRecorder;

use crate::base::Frame;
use anyhow::Result;
use ndarray::Array2;

/// A step of a vectorized environment.
pub struct VecStep {
    /// Observations, one row per environment.
    pub obs: Array2<f32>,

    /// Rewards.
    pub reward: Vec<f32>,

    /// Flags denoting if episodes are terminated.
    pub is_terminated: Vec<i8>,

    /// Flags denoting if episodes are truncated.
    pub is_truncated: Vec<i8>,
}

impl VecStep {
    /// Terminated or truncated in the `i`-th environment.
    #[inline]
    pub fn is_done(&self, i: usize) -> bool {
        self.is_terminated[i] == 1 || self.is_truncated[i] == 1
    }
}

/// The batched environment interface the wrapper chain is built against.
///
/// Each wrapper implementing this trait exclusively owns the layer beneath
/// it; the outermost wrapper is the only externally visible handle.
pub trait VecEnv {
    /// Resets all environments and returns the batched initial observation.
    fn reset(&mut self) -> Result<Array2<f32>>;

    /// Steps all environments; finished episodes are reset automatically and
    /// their rows carry the initial observation of the next episode.
    fn step(&mut self, act: &Array2<f32>) -> VecStep;

    /// Number of environments in the batch.
    fn n_envs(&self) -> usize;

    /// Width of the (possibly wrapped) observation vector.
    fn obs_dim(&self) -> usize;

    /// RGB frame of the first environment, if it renders to frame buffers.
    fn frame(&mut self) -> Option<Frame>;

    /// Releases all environments.
    fn close(&mut self);
}

impl VecEnv for Box<dyn VecEnv> {
    fn reset(&mut self) -> Result<Array2<f32>> {
        (**self).reset()
    }

    fn step(&mut self, act: &Array2<f32>) -> VecStep {
        (**self).step(act)
    }

    fn n_envs(&self) -> usize {
        (**self).n_envs()
    }

    fn obs_dim(&self) -> usize {
        (**self).obs_dim()
    }

    fn frame(&mut self) -> Option<Frame> {
        (**self).frame()
    }

    fn close(&mut self) {
        (**self).close()
    }
}
