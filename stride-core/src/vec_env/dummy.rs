//! Single-process vectorization adapter.
use super::{VecEnv, VecStep};
use crate::base::{Env, Frame};
use anyhow::Result;
use ndarray::Array2;

/// Presents one or more environments as a single batched interface,
/// stepping them sequentially in the calling thread.
///
/// When an episode ends the environment is reset immediately and the
/// returned observation row is the initial observation of the next episode.
pub struct DummyVecEnv<E: Env> {
    envs: Vec<E>,
    obs_dim: usize,
}

impl<E: Env> DummyVecEnv<E> {
    /// Adapts a batch of environments.
    pub fn new(envs: Vec<E>) -> Self {
        assert!(!envs.is_empty());
        let obs_dim = envs[0].observation_dim();
        Self { envs, obs_dim }
    }

    /// Batch-of-one adapter.
    pub fn single(env: E) -> Self {
        Self::new(vec![env])
    }
}

impl<E: Env> VecEnv for DummyVecEnv<E> {
    fn reset(&mut self) -> Result<Array2<f32>> {
        let mut obs = Array2::zeros((self.envs.len(), self.obs_dim));
        for (i, env) in self.envs.iter_mut().enumerate() {
            obs.row_mut(i).assign(&env.reset()?);
        }
        Ok(obs)
    }

    fn step(&mut self, act: &Array2<f32>) -> VecStep {
        let n = self.envs.len();
        let mut obs = Array2::zeros((n, self.obs_dim));
        let mut reward = Vec::with_capacity(n);
        let mut is_terminated = Vec::with_capacity(n);
        let mut is_truncated = Vec::with_capacity(n);

        for (i, env) in self.envs.iter_mut().enumerate() {
            let a = act.row(i).to_owned();
            let step = env.step(&a);
            reward.push(step.reward);
            is_terminated.push(step.is_terminated as i8);
            is_truncated.push(step.is_truncated as i8);
            if step.is_done() {
                let init_obs = env
                    .reset()
                    .expect("auto-reset of a finished episode failed");
                obs.row_mut(i).assign(&init_obs);
            } else {
                obs.row_mut(i).assign(&step.obs);
            }
        }

        VecStep {
            obs,
            reward,
            is_terminated,
            is_truncated,
        }
    }

    fn n_envs(&self) -> usize {
        self.envs.len()
    }

    fn obs_dim(&self) -> usize {
        self.obs_dim
    }

    fn frame(&mut self) -> Option<Frame> {
        self.envs[0].render_frame()
    }

    fn close(&mut self) {
        for env in self.envs.iter_mut() {
            env.close();
        }
    }
}
