//! Wrapper of gymnasium environments implemented in Python.
use anyhow::Result;
use log::info;
use ndarray::{Array1, Ix1, Ix3};
use numpy::{PyArray1, PyArrayDyn};
use pyo3::{
    types::{IntoPyDict, PyDict},
    PyObject, Python, ToPyObject,
};
use stride_core::{Env, EnvStep, Frame, GymEnvConfig, RenderMode};

/// A walker environment backed by a Python gymnasium process.
///
/// Observations and actions cross the boundary as float32 numpy arrays. The
/// seed given at build time is applied on the first [`Env::reset`] only;
/// later resets reseed from the environment's own stream.
pub struct PyGymEnv {
    env: PyObject,
    observation_dim: usize,
    action_dim: usize,
    render_mode: Option<RenderMode>,
    initial_seed: Option<i64>,
    closed: bool,
}

fn space_dim(py: Python, env: &PyObject, attr: &str) -> Result<usize> {
    let shape: Vec<usize> = env
        .as_ref(py)
        .getattr(attr)?
        .getattr("shape")?
        .extract()?;
    Ok(shape[0])
}

impl Env for PyGymEnv {
    type Config = GymEnvConfig;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Python::with_gil(|py| {
            // sys.argv is empty when Python is embedded, which upsets some
            // render backends (see pyo3 issue #1241).
            let locals = [("sys", py.import("sys")?)].into_py_dict(py);
            py.eval("sys.argv.insert(0, 'stride')", None, Some(locals))?;

            let gym = py.import("gymnasium")?;
            let kwargs = PyDict::new(py);
            if let Some(mode) = &config.render_mode {
                kwargs.set_item("render_mode", mode.as_str())?;
            }
            match config.hardcore.as_option() {
                Some(hardcore) => {
                    info!("hardcore flag passed explicitly: {}", hardcore);
                    kwargs.set_item("hardcore", hardcore)?;
                }
                None => info!("hardcore flag left to the environment default"),
            }
            let env: PyObject = gym
                .getattr("make")?
                .call((config.name.as_str(),), Some(kwargs))?
                .to_object(py);

            let observation_dim = space_dim(py, &env, "observation_space")?;
            let action_dim = space_dim(py, &env, "action_space")?;
            info!(
                "built {} (observation_dim: {}, action_dim: {})",
                config.name, observation_dim, action_dim
            );

            Ok(Self {
                env,
                observation_dim,
                action_dim,
                render_mode: config.render_mode,
                initial_seed: Some(seed),
                closed: false,
            })
        })
    }

    fn reset(&mut self) -> Result<Array1<f32>> {
        Python::with_gil(|py| {
            let ret = match self.initial_seed.take() {
                Some(seed) => {
                    let kwargs = [("seed", seed)].into_py_dict(py);
                    self.env.call_method(py, "reset", (), Some(kwargs))?
                }
                None => self.env.call_method0(py, "reset")?,
            };
            let obs: &PyArrayDyn<f32> = ret.as_ref(py).get_item(0)?.extract()?;
            let obs = obs.to_owned_array().into_dimensionality::<Ix1>()?;
            Ok(obs)
        })
    }

    fn step(&mut self, act: &Array1<f32>) -> EnvStep {
        Python::with_gil(|py| {
            let act = PyArray1::from_vec(py, act.to_vec());
            let ret = self.env.call_method1(py, "step", (act,)).unwrap();
            let ret = ret.as_ref(py);

            let obs: &PyArrayDyn<f32> = ret.get_item(0).unwrap().extract().unwrap();
            let obs = obs
                .to_owned_array()
                .into_dimensionality::<Ix1>()
                .unwrap();
            let reward: f32 = ret.get_item(1).unwrap().extract().unwrap();
            let is_terminated: bool = ret.get_item(2).unwrap().extract().unwrap();
            let is_truncated: bool = ret.get_item(3).unwrap().extract().unwrap();

            EnvStep::new(obs, reward, is_terminated, is_truncated)
        })
    }

    fn observation_dim(&self) -> usize {
        self.observation_dim
    }

    fn action_dim(&self) -> usize {
        self.action_dim
    }

    fn render_frame(&mut self) -> Option<Frame> {
        if self.render_mode != Some(RenderMode::RgbArray) {
            return None;
        }
        Python::with_gil(|py| {
            let ret = self.env.call_method0(py, "render").ok()?;
            let frame: &PyArrayDyn<u8> = ret.as_ref(py).extract().ok()?;
            let frame = frame.to_owned_array().into_dimensionality::<Ix3>().ok()?;
            let (height, width, _) = frame.dim();
            Some(Frame {
                width: width as u32,
                height: height as u32,
                data: frame.iter().cloned().collect(),
            })
        })
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        Python::with_gil(|py| {
            if let Err(e) = self.env.call_method0(py, "close") {
                log::warn!("failed to close the environment: {}", e);
            }
        })
    }
}

impl Drop for PyGymEnv {
    fn drop(&mut self) {
        self.close()
    }
}
