//! Evaluation of saved policies in a reconstructed environment.
use crate::{
    artifact::PolicyArtifact,
    base::{Env, GymEnvConfig, HardcoreMode, RenderMode, BIPEDAL_WALKER, BIPEDAL_WALKER_HARDCORE},
    evaluator::evaluate_policy,
    vec_env::{DummyVecEnv, VecEnv, VecFrameStack, VecNormalize},
};
use anyhow::Result;
use log::info;
use std::path::Path;

/// Observation width of the walker with a stack of four frames.
const STACKED_OBS_DIM: usize = 96;

/// Infers the frame-stack depth from an artifact's observation width.
///
/// A width of 96 is four stacked 24-dimensional walker observations; any
/// other width is taken to be unstacked.
pub fn needs_frame_stack(observation_dim: usize) -> Option<usize> {
    if observation_dim == STACKED_OBS_DIM {
        Some(4)
    } else {
        None
    }
}

/// Loads a saved policy, rebuilds the environment it was trained in from the
/// artifact metadata, and evaluates it for `n_eval_episodes` episodes with
/// on-screen rendering.
///
/// Returns the mean and population standard deviation of the episode
/// returns.
pub fn observe_model<E>(
    model_path: impl AsRef<Path>,
    n_eval_episodes: usize,
    hardcore: bool,
) -> Result<(f32, f32)>
where
    E: Env<Config = GymEnvConfig> + 'static,
{
    let artifact = PolicyArtifact::load(model_path.as_ref())?;
    let meta = artifact.meta.clone();
    info!(
        "loaded policy artifact {:?} (observation_dim: {}, normalized_env: {})",
        model_path.as_ref(),
        meta.observation_dim,
        meta.normalized_env
    );

    let name = if hardcore {
        BIPEDAL_WALKER_HARDCORE
    } else {
        BIPEDAL_WALKER
    };
    let config = GymEnvConfig::default()
        .name(name)
        .hardcore(HardcoreMode::Unset)
        .render_mode(Some(RenderMode::Human));
    let env = E::build(&config, 0)?;

    let mut venv: Box<dyn VecEnv> = Box::new(DummyVecEnv::single(env));
    if meta.normalized_env {
        // Fresh statistics, not the ones the policy was trained with; the
        // early episodes are normalized differently from training.
        venv = Box::new(VecNormalize::new(venv, true, true, 10.0));
    }
    if let Some(n_stack) = needs_frame_stack(meta.observation_dim) {
        info!("stacking {} frames to match the artifact", n_stack);
        venv = Box::new(VecFrameStack::new(venv, n_stack));
    }

    let mut policy = artifact.into_policy();
    let result = evaluate_policy(&mut policy, &mut venv, n_eval_episodes);
    venv.close();
    let (mean, std) = result?;
    info!("mean reward: {} +/- {}", mean, std);
    Ok((mean, std))
}
