//! Episode statistics logging.
use crate::{
    base::{Env, EnvStep, Frame},
    record::{Record, RecordValue},
};
use anyhow::Result;
use chrono::Local;
use log::{info, warn};
use ndarray::Array1;
use serde_json::json;
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
    time::Instant,
};

/// Configuration of [`Monitor`], for building the wrapper through the
/// [`Env`] trait.
#[derive(Clone)]
pub struct MonitorConfig<C: Clone> {
    /// Configuration of the wrapped environment.
    pub env_config: C,

    /// Path of the monitor log file.
    pub path: PathBuf,

    /// Environment id recorded in the log preamble.
    pub env_id: String,
}

/// Wraps an environment and appends one CSV row per finished episode.
///
/// The file starts with a `#`-prefixed JSON preamble carrying the start time
/// and environment id, followed by a `r,l,t` header: episode return, episode
/// length and seconds elapsed since the monitor was created.
pub struct Monitor<E: Env> {
    env: E,
    wtr: csv::Writer<File>,
    t_start: Instant,
    episode_return: f32,
    episode_len: usize,
}

impl<E: Env> Monitor<E> {
    /// Wraps `env`, creating the log file at `path`.
    pub fn new(env: E, path: impl AsRef<Path>, env_id: &str) -> Result<Self> {
        let mut file = File::create(path.as_ref())?;
        let preamble = json!({
            "t_start": Local::now().to_rfc3339(),
            "env_id": env_id,
        });
        writeln!(file, "#{}", preamble)?;

        let mut wtr = csv::Writer::from_writer(file);
        wtr.write_record(&["r", "l", "t"])?;
        wtr.flush()?;

        info!("episode statistics will be written to {:?}", path.as_ref());
        Ok(Self {
            env,
            wtr,
            t_start: Instant::now(),
            episode_return: 0.0,
            episode_len: 0,
        })
    }

    fn episode_record(&self) -> Record {
        let mut record = Record::empty();
        record.insert("r", RecordValue::Scalar(self.episode_return));
        record.insert("l", RecordValue::Scalar(self.episode_len as f32));
        record.insert(
            "t",
            RecordValue::Scalar(self.t_start.elapsed().as_secs_f32()),
        );
        record
    }

    fn write_episode(&mut self) -> Result<()> {
        let record = self.episode_record();
        self.wtr.write_record(&[
            format!("{}", record.get_scalar("r")?),
            format!("{}", record.get_scalar("l")?),
            format!("{:.3}", record.get_scalar("t")?),
        ])?;
        self.wtr.flush()?;
        Ok(())
    }
}

impl<E: Env> Env for Monitor<E> {
    type Config = MonitorConfig<E::Config>;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        let env = E::build(&config.env_config, seed)?;
        Monitor::new(env, &config.path, &config.env_id)
    }

    fn reset(&mut self) -> Result<Array1<f32>> {
        self.episode_return = 0.0;
        self.episode_len = 0;
        self.env.reset()
    }

    fn step(&mut self, act: &Array1<f32>) -> EnvStep {
        let step = self.env.step(act);
        self.episode_return += step.reward;
        self.episode_len += 1;
        if step.is_done() {
            if let Err(e) = self.write_episode() {
                warn!("failed to write episode record: {}", e);
            }
            self.episode_return = 0.0;
            self.episode_len = 0;
        }
        step
    }

    fn observation_dim(&self) -> usize {
        self.env.observation_dim()
    }

    fn action_dim(&self) -> usize {
        self.env.action_dim()
    }

    fn render_frame(&mut self) -> Option<Frame> {
        self.env.render_frame()
    }

    fn close(&mut self) {
        let _ = self.wtr.flush();
        self.env.close();
    }
}
