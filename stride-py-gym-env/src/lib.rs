#![warn(missing_docs)]
//! Gymnasium backend for stride.
//!
//! [`PyGymEnv`] drives a Python gymnasium environment through pyo3 and plugs
//! into the wrapper chain of `stride-core`. The free functions here fix the
//! backend type so callers do not spell out the generic parameter.
mod base;
pub use base::PyGymEnv;

use anyhow::Result;
use std::path::Path;
use stride_core::{EnvBuilder, VecEnv};

/// Builds a wrapped gymnasium walker environment.
pub fn make_env(builder: &EnvBuilder, seed: i64) -> Result<Box<dyn VecEnv>> {
    builder.build::<PyGymEnv>(seed)
}

/// Evaluates a saved policy on a gymnasium walker environment rebuilt from
/// the artifact metadata, rendering on screen.
pub fn observe_model(
    model_path: impl AsRef<Path>,
    n_eval_episodes: usize,
    hardcore: bool,
) -> Result<(f32, f32)> {
    stride_core::observe_model::<PyGymEnv>(model_path, n_eval_episodes, hardcore)
}
