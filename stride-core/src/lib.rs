#![warn(missing_docs)]
//! Environment wrapping and policy evaluation for the BipedalWalker task.
//!
//! The crate provides two entry points and the machinery behind them:
//!
//! * [`EnvBuilder`] constructs a base environment and applies a fixed,
//!   ordered wrapper chain: episode monitoring, single-environment
//!   vectorization, observation/reward normalization, frame stacking and,
//!   optionally, video capture. The builder owns the sequencing; callers
//!   only toggle the optional layers.
//! * [`observe_model`] loads a persisted [`PolicyArtifact`], rebuilds a
//!   compatible wrapper chain from the artifact metadata and evaluates the
//!   policy over a fixed number of episodes.
//!
//! The base simulator is abstracted behind the [`Env`] trait; a concrete
//! backend (the Python gymnasium binding) lives in a separate crate, and a
//! deterministic stand-in for tests is provided in [`dummy`].
pub mod dummy;
pub mod error;
pub mod record;

mod base;
pub use base::{
    Env, EnvStep, Frame, GymEnvConfig, HardcoreMode, Policy, RenderMode, BIPEDAL_WALKER,
    BIPEDAL_WALKER_HARDCORE,
};

mod stat;
pub use stat::RunningMeanStd;

mod monitor;
pub use monitor::{Monitor, MonitorConfig};

mod vec_env;
pub use vec_env::{DummyVecEnv, VecEnv, VecFrameStack, VecNormalize, VecStep, VecVideoRecorder};

mod artifact;
pub use artifact::{ArtifactMeta, Mlp, PolicyArtifact};

mod builder;
pub use builder::EnvBuilder;

mod evaluator;
pub use evaluator::evaluate_policy;

mod observer;
pub use observer::{needs_frame_stack, observe_model};
