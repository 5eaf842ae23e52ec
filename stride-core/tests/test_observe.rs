use std::path::{Path, PathBuf};
use stride_core::dummy::{DummyEnv, DUMMY_ACT_DIM, DUMMY_HORIZON};
use stride_core::{needs_frame_stack, observe_model, ArtifactMeta, Mlp, PolicyArtifact};
use tempdir::TempDir;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_artifact(dir: &Path, observation_dim: usize, normalized_env: bool) -> PathBuf {
    let meta = ArtifactMeta {
        observation_dim,
        action_dim: DUMMY_ACT_DIM,
        normalized_env,
    };
    let policy = Mlp::zeros(&[observation_dim, 32, DUMMY_ACT_DIM]);
    let path = dir.join("model.bin");
    PolicyArtifact::new(meta, policy).save(&path).unwrap();
    path
}

#[test]
fn stack_reconstruction_heuristic() {
    assert_eq!(needs_frame_stack(96), Some(4));
    assert_eq!(needs_frame_stack(24), None);
    assert_eq!(needs_frame_stack(95), None);
    assert_eq!(needs_frame_stack(192), None);
}

#[test]
fn runs_exactly_k_episodes_with_known_stats() {
    init();
    let dir = TempDir::new("observe").unwrap();
    let path = write_artifact(dir.path(), 24, false);

    let (mean, std) = observe_model::<DummyEnv>(&path, 3, false).unwrap();

    // Episode returns are h, 2h and 3h for horizon h.
    let h = DUMMY_HORIZON as f32;
    assert!((mean - 2.0 * h).abs() < 1e-4);
    let expected_std = (2.0 * h * h / 3.0).sqrt();
    assert!((std - expected_std).abs() < 1e-3);
}

#[test]
fn single_episode_std_is_zero() {
    init();
    let dir = TempDir::new("observe").unwrap();
    let path = write_artifact(dir.path(), 24, false);

    let (mean, std) = observe_model::<DummyEnv>(&path, 1, true).unwrap();
    assert_eq!(mean, DUMMY_HORIZON as f32);
    assert_eq!(std, 0.0);
}

#[test]
fn stacked_artifact_rebuilds_the_stack() {
    init();
    let dir = TempDir::new("observe").unwrap();
    let path = write_artifact(dir.path(), 96, true);

    // The policy expects 96 inputs, so evaluation only works if the
    // frame stack was reconstructed around the 24-wide base environment.
    let (mean, std) = observe_model::<DummyEnv>(&path, 2, false).unwrap();
    assert!(mean.is_finite());
    assert!(std.is_finite());
}

#[test]
fn load_missing_artifact_fails() {
    init();
    let dir = TempDir::new("observe").unwrap();
    let path = dir.path().join("no-such-model.bin");
    assert!(observe_model::<DummyEnv>(&path, 1, false).is_err());
}
