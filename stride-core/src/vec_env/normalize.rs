//! Running-statistics normalization of observations and rewards.
use super::{VecEnv, VecStep};
use crate::{base::Frame, stat::RunningMeanStd};
use anyhow::Result;
use ndarray::{Array2, Axis};

/// Normalizes observations and rewards with running mean/variance.
///
/// Observations are rescaled per dimension and clipped to
/// `[-clip_obs, clip_obs]`; rewards are divided by the standard deviation of
/// a discounted return estimate. Statistics are updated on every step while
/// `training` is on.
pub struct VecNormalize<V: VecEnv> {
    env: V,
    obs_rms: RunningMeanStd,
    ret_rms: RunningMeanStd,
    returns: Vec<f32>,
    training: bool,
    norm_obs: bool,
    norm_reward: bool,
    clip_obs: f32,
    clip_reward: f32,
    gamma: f32,
    epsilon: f64,
}

impl<V: VecEnv> VecNormalize<V> {
    /// Wraps `env` with fresh running statistics.
    pub fn new(env: V, norm_obs: bool, norm_reward: bool, clip_obs: f32) -> Self {
        let obs_rms = RunningMeanStd::new(env.obs_dim());
        let ret_rms = RunningMeanStd::new(1);
        let returns = vec![0.0; env.n_envs()];
        Self {
            env,
            obs_rms,
            ret_rms,
            returns,
            training: true,
            norm_obs,
            norm_reward,
            clip_obs,
            clip_reward: 10.0,
            gamma: 0.99,
            epsilon: 1e-8,
        }
    }

    /// Turns statistics updates on or off.
    pub fn set_training(&mut self, training: bool) {
        self.training = training;
    }

    fn normalize_obs(&self, obs: &Array2<f32>) -> Array2<f32> {
        let mut out = obs.clone();
        for mut row in out.axis_iter_mut(Axis(0)) {
            for (j, x) in row.iter_mut().enumerate() {
                let m = self.obs_rms.mean()[j];
                let v = self.obs_rms.var()[j];
                let z = ((f64::from(*x) - m) / (v + self.epsilon).sqrt()) as f32;
                *x = z.max(-self.clip_obs).min(self.clip_obs);
            }
        }
        out
    }

    fn normalize_reward(&self, reward: f32) -> f32 {
        let v = self.ret_rms.var()[0];
        let z = (f64::from(reward) / (v + self.epsilon).sqrt()) as f32;
        z.max(-self.clip_reward).min(self.clip_reward)
    }
}

impl<V: VecEnv> VecEnv for VecNormalize<V> {
    fn reset(&mut self) -> Result<Array2<f32>> {
        let obs = self.env.reset()?;
        for r in self.returns.iter_mut() {
            *r = 0.0;
        }
        if self.training && self.norm_obs {
            self.obs_rms.update(&obs);
        }
        Ok(if self.norm_obs {
            self.normalize_obs(&obs)
        } else {
            obs
        })
    }

    fn step(&mut self, act: &Array2<f32>) -> VecStep {
        let mut step = self.env.step(act);

        if self.norm_obs {
            if self.training {
                self.obs_rms.update(&step.obs);
            }
            step.obs = self.normalize_obs(&step.obs);
        }

        if self.norm_reward {
            for (r, &reward) in self.returns.iter_mut().zip(step.reward.iter()) {
                *r = *r * self.gamma + reward;
            }
            if self.training {
                let batch =
                    Array2::from_shape_vec((self.returns.len(), 1), self.returns.clone()).unwrap();
                self.ret_rms.update(&batch);
            }
            for reward in step.reward.iter_mut() {
                *reward = self.normalize_reward(*reward);
            }
        }

        // Discounted return estimates restart with each episode.
        for i in 0..self.returns.len() {
            if step.is_done(i) {
                self.returns[i] = 0.0;
            }
        }

        step
    }

    fn n_envs(&self) -> usize {
        self.env.n_envs()
    }

    fn obs_dim(&self) -> usize {
        self.env.obs_dim()
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
    use super::VecNormalize;
    use crate::{
        base::{Env, GymEnvConfig},
        dummy::{DummyEnv, DUMMY_ACT_DIM, DUMMY_HORIZON},
        vec_env::{DummyVecEnv, VecEnv},
    };
    use ndarray::Array2;

    fn wrapped(clip_obs: f32) -> VecNormalize<DummyVecEnv<DummyEnv>> {
        let env = DummyEnv::build(&GymEnvConfig::default(), 0).unwrap();
        VecNormalize::new(DummyVecEnv::single(env), true, true, clip_obs)
    }

    #[test]
    fn observations_and_rewards_stay_within_clip_bounds() {
        let mut env = wrapped(5.0);
        env.reset().unwrap();
        let act = Array2::zeros((1, DUMMY_ACT_DIM));
        for _ in 0..3 * DUMMY_HORIZON {
            let step = env.step(&act);
            assert!(step.obs.iter().all(|x| x.abs() <= 5.0 + 1e-6));
            assert!(step.reward[0].abs() <= 10.0 + 1e-6);
        }
    }

    #[test]
    fn return_estimate_resets_at_episode_end() {
        let mut env = wrapped(10.0);
        env.reset().unwrap();
        let act = Array2::zeros((1, DUMMY_ACT_DIM));
        for _ in 0..DUMMY_HORIZON {
            env.step(&act);
        }
        assert_eq!(env.returns[0], 0.0);
    }
}
