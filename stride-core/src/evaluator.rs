//! Policy evaluation over full episodes.
use crate::{base::Policy, vec_env::VecEnv};
use anyhow::Result;
use log::info;

/// Runs `policy` for exactly `n_eval_episodes` episodes and returns the mean
/// and population standard deviation of the episode returns.
///
/// Returns accumulate raw step rewards from the wrapped environment, after
/// whatever normalization the wrapper chain applies.
pub fn evaluate_policy<P>(
    policy: &mut P,
    env: &mut dyn VecEnv,
    n_eval_episodes: usize,
) -> Result<(f32, f32)>
where
    P: Policy + ?Sized,
{
    assert!(n_eval_episodes > 0);
    debug_assert_eq!(env.n_envs(), 1);

    let mut episode_returns = Vec::with_capacity(n_eval_episodes);
    let mut episode_return = 0.0f32;
    let mut obs = env.reset()?;

    while episode_returns.len() < n_eval_episodes {
        let act = policy.sample(&obs);
        let step = env.step(&act);
        episode_return += step.reward[0];
        if step.is_done(0) {
            info!(
                "episode {} finished, return: {}",
                episode_returns.len() + 1,
                episode_return
            );
            episode_returns.push(episode_return);
            episode_return = 0.0;
        }
        obs = step.obs;
    }

    let n = episode_returns.len() as f32;
    let mean = episode_returns.iter().sum::<f32>() / n;
    let var = episode_returns
        .iter()
        .map(|r| (r - mean) * (r - mean))
        .sum::<f32>()
        / n;
    Ok((mean, var.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::evaluate_policy;
    use crate::{
        base::{Env, GymEnvConfig, Policy},
        dummy::{DummyEnv, DUMMY_ACT_DIM, DUMMY_HORIZON},
        vec_env::DummyVecEnv,
    };
    use ndarray::Array2;

    struct ZeroPolicy;

    impl Policy for ZeroPolicy {
        fn sample(&mut self, obs: &Array2<f32>) -> Array2<f32> {
            Array2::zeros((obs.nrows(), DUMMY_ACT_DIM))
        }
    }

    #[test]
    fn evaluates_the_requested_number_of_episodes() {
        let env = DummyEnv::build(&GymEnvConfig::default(), 0).unwrap();
        let mut env = DummyVecEnv::single(env);
        let (mean, std) = evaluate_policy(&mut ZeroPolicy, &mut env, 3).unwrap();

        // Episode returns are h, 2h and 3h for horizon h.
        let h = DUMMY_HORIZON as f32;
        assert!((mean - 2.0 * h).abs() < 1e-4);
        let expected_std = (2.0 * h * h / 3.0).sqrt();
        assert!((std - expected_std).abs() < 1e-3);
    }

    #[test]
    fn single_episode_has_zero_std() {
        let env = DummyEnv::build(&GymEnvConfig::default(), 0).unwrap();
        let mut env = DummyVecEnv::single(env);
        let (mean, std) = evaluate_policy(&mut ZeroPolicy, &mut env, 1).unwrap();
        assert_eq!(mean, DUMMY_HORIZON as f32);
        assert_eq!(std, 0.0);
    }
}
