use anyhow::Result;
use ndarray::Array2;
use stride_py_gym_env::make_env;
use stride_core::{EnvBuilder, RenderMode};

const N_STEPS: usize = 500;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    fastrand::seed(42);

    let builder = EnvBuilder::new()
        .render_mode(Some(RenderMode::Human))
        .use_monitor(true);
    let mut env = make_env(&builder, 42)?;

    env.reset()?;
    for _ in 0..N_STEPS {
        let act = Array2::from_shape_fn((1, 4), |_| fastrand::f32() * 2.0 - 1.0);
        env.step(&act);
    }
    env.close();

    Ok(())
}
