//! Basic traits and types.
mod config;
mod env;
mod policy;
mod step;

pub use config::{GymEnvConfig, HardcoreMode, RenderMode, BIPEDAL_WALKER, BIPEDAL_WALKER_HARDCORE};
pub use env::{Env, Frame};
pub use policy::Policy;
pub use step::EnvStep;
