//! Environment.
use super::EnvStep;
use anyhow::Result;
use ndarray::Array1;

/// An RGB frame grabbed from an environment, row-major, 3 bytes per pixel.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data, `width * height * 3` bytes.
    pub data: Vec<u8>,
}

/// Represents an environment, typically an MDP.
///
/// Observations and actions are flat `f32` vectors, which is all the walker
/// task needs. Wrappers such as [`Monitor`](crate::Monitor) implement this
/// trait as well, each layer exclusively owning the layer beneath it.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Array1<f32>>;

    /// Performs an environment step.
    fn step(&mut self, act: &Array1<f32>) -> EnvStep;

    /// Width of the observation vector.
    fn observation_dim(&self) -> usize;

    /// Width of the action vector.
    fn action_dim(&self) -> usize;

    /// Grabs an RGB frame.
    ///
    /// Returns `None` unless the environment renders to frame buffers.
    fn render_frame(&mut self) -> Option<Frame>;

    /// Releases the resources owned by the environment.
    fn close(&mut self);
}
