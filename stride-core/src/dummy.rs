//! This module is used for tests.
use crate::base::{Env, EnvStep, Frame, GymEnvConfig, RenderMode};
use anyhow::Result;
use ndarray::Array1;

/// Observation width of [`DummyEnv`].
pub const DUMMY_OBS_DIM: usize = 24;

/// Action width of [`DummyEnv`].
pub const DUMMY_ACT_DIM: usize = 4;

/// Episode length of [`DummyEnv`].
pub const DUMMY_HORIZON: usize = 10;

/// Deterministic environment with fixed-length episodes.
///
/// Every step of episode `e` (counting from zero) pays reward `e + 1`, so
/// the return of the `e`-th episode is `(e + 1) * DUMMY_HORIZON` and
/// evaluation statistics can be checked exactly.
pub struct DummyEnv {
    config: GymEnvConfig,
    t: usize,
    episode: usize,

    /// Set when [`DummyEnv::close`] is called.
    pub closed: bool,
}

impl DummyEnv {
    fn obs(&self) -> Array1<f32> {
        Array1::from_elem(DUMMY_OBS_DIM, (self.t * (self.episode + 7)) as f32)
    }
}

impl Env for DummyEnv {
    type Config = GymEnvConfig;

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            t: 0,
            episode: 0,
            closed: false,
        })
    }

    fn reset(&mut self) -> Result<Array1<f32>> {
        self.t = 0;
        Ok(self.obs())
    }

    fn step(&mut self, _act: &Array1<f32>) -> EnvStep {
        self.t += 1;
        let reward = (self.episode + 1) as f32;
        let is_terminated = self.t >= DUMMY_HORIZON;
        let step = EnvStep::new(self.obs(), reward, is_terminated, false);
        if is_terminated {
            self.episode += 1;
            self.t = 0;
        }
        step
    }

    fn observation_dim(&self) -> usize {
        DUMMY_OBS_DIM
    }

    fn action_dim(&self) -> usize {
        DUMMY_ACT_DIM
    }

    fn render_frame(&mut self) -> Option<Frame> {
        match self.config.render_mode {
            Some(RenderMode::RgbArray) => Some(Frame {
                width: 4,
                height: 4,
                data: vec![0; 4 * 4 * 3],
            }),
            _ => None,
        }
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
