use anyhow::Result;
use clap::Parser;
use stride_py_gym_env::observe_model;

/// Watch a saved walker policy.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Path of the policy artifact.
    model_path: String,

    /// Number of evaluation episodes.
    #[arg(long, default_value_t = 5)]
    n_eval_episodes: usize,

    /// Evaluate on the hardcore variant.
    #[arg(long)]
    hardcore: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let (mean, std) = observe_model(&args.model_path, args.n_eval_episodes, args.hardcore)?;
    println!("Mean Reward: {} +/- {}", mean, std);

    Ok(())
}
