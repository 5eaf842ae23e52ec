//! Frame stacking along the feature axis.
use super::{VecEnv, VecStep};
use crate::base::Frame;
use anyhow::Result;
use ndarray::{s, Array2, ArrayView1};

/// Concatenates the last `n_stack` observations of each environment along
/// the feature axis, giving the policy short-term temporal context.
///
/// Each environment keeps a rolling buffer with the newest frame last. On
/// reset, and whenever an episode restarts, the buffer is seeded by
/// repeating the first observation of the new episode.
pub struct VecFrameStack<V: VecEnv> {
    env: V,
    n_stack: usize,
    buffer: Array2<f32>,
}

impl<V: VecEnv> VecFrameStack<V> {
    /// Wraps `env` with a stack of depth `n_stack`.
    pub fn new(env: V, n_stack: usize) -> Self {
        assert!(n_stack >= 1);
        let buffer = Array2::zeros((env.n_envs(), n_stack * env.obs_dim()));
        Self {
            env,
            n_stack,
            buffer,
        }
    }

    fn seed_row(&mut self, i: usize, obs: ArrayView1<f32>) {
        let dim = self.env.obs_dim();
        for j in 0..self.n_stack {
            self.buffer
                .slice_mut(s![i, j * dim..(j + 1) * dim])
                .assign(&obs);
        }
    }

    fn push_row(&mut self, i: usize, obs: ArrayView1<f32>) {
        let dim = self.env.obs_dim();
        let total = self.n_stack * dim;
        // Shift frame(j - 1) <- frame(j), newest written at the end.
        for j in 1..self.n_stack {
            let src = self.buffer.slice(s![i, j * dim..(j + 1) * dim]).to_owned();
            self.buffer
                .slice_mut(s![i, (j - 1) * dim..j * dim])
                .assign(&src);
        }
        self.buffer
            .slice_mut(s![i, total - dim..total])
            .assign(&obs);
    }
}

impl<V: VecEnv> VecEnv for VecFrameStack<V> {
    fn reset(&mut self) -> Result<Array2<f32>> {
        let obs = self.env.reset()?;
        for i in 0..obs.nrows() {
            self.seed_row(i, obs.row(i));
        }
        Ok(self.buffer.clone())
    }

    fn step(&mut self, act: &Array2<f32>) -> VecStep {
        let step = self.env.step(act);
        for i in 0..step.obs.nrows() {
            if step.is_done(i) {
                // The inner row is the initial observation of a new episode.
                self.seed_row(i, step.obs.row(i));
            } else {
                self.push_row(i, step.obs.row(i));
            }
        }
        VecStep {
            obs: self.buffer.clone(),
            reward: step.reward,
            is_terminated: step.is_terminated,
            is_truncated: step.is_truncated,
        }
    }

    fn n_envs(&self) -> usize {
        self.env.n_envs()
    }

    fn obs_dim(&self) -> usize {
        self.n_stack * self.env.obs_dim()
    }

    fn frame(&mut self) -> Option<Frame> {
        self.env.frame()
    }

    fn close(&mut self) {
        self.env.close()
    }
}

#[cfg(test)]
mod tests {
    use super::VecFrameStack;
    use crate::{
        base::{Env, GymEnvConfig},
        dummy::{DummyEnv, DUMMY_ACT_DIM, DUMMY_OBS_DIM},
        vec_env::{DummyVecEnv, VecEnv},
    };
    use ndarray::{s, Array2};

    #[test]
    fn reset_repeats_the_first_observation() {
        let env = DummyEnv::build(&GymEnvConfig::default(), 0).unwrap();
        let mut env = VecFrameStack::new(DummyVecEnv::single(env), 4);
        assert_eq!(env.obs_dim(), 4 * DUMMY_OBS_DIM);

        let obs = env.reset().unwrap();
        let first = obs.slice(s![0, ..DUMMY_OBS_DIM]).to_owned();
        for j in 1..4 {
            let frame = obs.slice(s![0, j * DUMMY_OBS_DIM..(j + 1) * DUMMY_OBS_DIM]);
            assert_eq!(frame, first);
        }
    }

    #[test]
    fn newest_observation_lands_in_the_last_slot() {
        let env = DummyEnv::build(&GymEnvConfig::default(), 0).unwrap();
        let mut env = VecFrameStack::new(DummyVecEnv::single(env), 3);
        env.reset().unwrap();

        let act = Array2::zeros((1, DUMMY_ACT_DIM));
        let step = env.step(&act);
        let oldest = step.obs.slice(s![0, ..DUMMY_OBS_DIM]).to_owned();
        let newest = step
            .obs
            .slice(s![0, 2 * DUMMY_OBS_DIM..3 * DUMMY_OBS_DIM])
            .to_owned();
        // The two oldest slots still hold the reset observation.
        assert_eq!(
            oldest,
            step.obs.slice(s![0, DUMMY_OBS_DIM..2 * DUMMY_OBS_DIM])
        );
        assert_ne!(oldest, newest);
    }
}
