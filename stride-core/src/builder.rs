//! Environment construction with a fixed wrapper chain.
use crate::{
    base::{Env, GymEnvConfig, HardcoreMode, RenderMode, BIPEDAL_WALKER},
    monitor::{Monitor, MonitorConfig},
    vec_env::{DummyVecEnv, VecEnv, VecFrameStack, VecNormalize, VecVideoRecorder},
};
use anyhow::Result;
use chrono::Local;
use log::info;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// A recording starts every this many global steps.
const VIDEO_RECORD_INTERVAL: usize = 1000;

/// Maximum number of frames per recording.
const VIDEO_LENGTH: usize = 200;

/// Builds a walker environment wrapped for training.
///
/// The wrapper order is fixed: episode monitoring sits closest to the base
/// environment, then vectorization, normalization, frame stacking and,
/// outermost, video capture.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnvBuilder {
    /// Name of the base environment.
    pub name: String,

    /// Hardcore mode of the walker.
    pub hardcore: HardcoreMode,

    /// Number of stacked observations.
    pub n_stack: usize,

    /// Clip bound for normalized observations.
    pub clip_obs: f32,

    /// Render mode requested by the caller; recording overrides it.
    pub render_mode: Option<RenderMode>,

    /// Whether to capture videos.
    pub record_video: bool,

    /// Folder where recordings are written.
    pub video_folder: String,

    /// Whether to log per-episode statistics.
    pub use_monitor: bool,

    /// Folder where monitor logs are written.
    pub logs_dir: String,
}

impl Default for EnvBuilder {
    fn default() -> Self {
        Self {
            name: BIPEDAL_WALKER.to_string(),
            hardcore: HardcoreMode::Unset,
            n_stack: 4,
            clip_obs: 10.0,
            render_mode: None,
            record_video: false,
            video_folder: "videos".to_string(),
            use_monitor: false,
            logs_dir: "logs".to_string(),
        }
    }
}

impl EnvBuilder {
    /// Builder with default settings.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the environment name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the hardcore mode.
    pub fn hardcore(mut self, mode: HardcoreMode) -> Self {
        self.hardcore = mode;
        self
    }

    /// Sets the stack depth.
    pub fn n_stack(mut self, n_stack: usize) -> Self {
        self.n_stack = n_stack;
        self
    }

    /// Sets the observation clip bound.
    pub fn clip_obs(mut self, clip_obs: f32) -> Self {
        self.clip_obs = clip_obs;
        self
    }

    /// Sets the render mode.
    pub fn render_mode(mut self, mode: Option<RenderMode>) -> Self {
        self.render_mode = mode;
        self
    }

    /// Enables or disables video capture.
    pub fn record_video(mut self, record_video: bool) -> Self {
        self.record_video = record_video;
        self
    }

    /// Sets the recordings folder.
    pub fn video_folder(mut self, folder: impl Into<String>) -> Self {
        self.video_folder = folder.into();
        self
    }

    /// Enables or disables episode statistics logging.
    pub fn use_monitor(mut self, use_monitor: bool) -> Self {
        self.use_monitor = use_monitor;
        self
    }

    /// Sets the monitor logs folder.
    pub fn logs_dir(mut self, logs_dir: impl Into<String>) -> Self {
        self.logs_dir = logs_dir.into();
        self
    }

    /// Loads a builder from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = fs::File::open(path)?;
        let builder = serde_yaml::from_reader(file)?;
        Ok(builder)
    }

    /// Saves the builder to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = fs::File::create(path)?;
        serde_yaml::to_writer(&mut file, self)?;
        Ok(())
    }

    fn effective_render_mode(&self) -> Option<RenderMode> {
        // Frame capture needs RGB buffers, whatever the caller asked for.
        if self.record_video {
            Some(RenderMode::RgbArray)
        } else {
            self.render_mode
        }
    }

    /// Builds the wrapped environment.
    pub fn build<E>(&self, seed: i64) -> Result<Box<dyn VecEnv>>
    where
        E: Env<Config = GymEnvConfig> + 'static,
    {
        let config = GymEnvConfig::default()
            .name(self.name.clone())
            .hardcore(self.hardcore)
            .render_mode(self.effective_render_mode());
        info!(
            "building {} (hardcore: {:?}, render_mode: {:?})",
            config.name, config.hardcore, config.render_mode
        );

        let venv: Box<dyn VecEnv> = if self.use_monitor {
            fs::create_dir_all(&self.logs_dir)?;
            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            let path = Path::new(&self.logs_dir).join(format!("{}.monitor.csv", timestamp));
            let monitor_config = MonitorConfig {
                env_config: config,
                path,
                env_id: self.name.clone(),
            };
            Box::new(DummyVecEnv::single(Monitor::<E>::build(
                &monitor_config,
                seed,
            )?))
        } else {
            Box::new(DummyVecEnv::single(E::build(&config, seed)?))
        };

        let venv = VecNormalize::new(venv, true, true, self.clip_obs);
        let venv = VecFrameStack::new(venv, self.n_stack);

        if self.record_video {
            fs::create_dir_all(&self.video_folder)?;
            info!("videos will be written to {}", self.video_folder);
            Ok(Box::new(VecVideoRecorder::new(
                venv,
                &self.video_folder,
                VIDEO_RECORD_INTERVAL,
                VIDEO_LENGTH,
            )))
        } else {
            Ok(Box::new(venv))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EnvBuilder;
    use crate::base::RenderMode;

    #[test]
    fn recording_forces_rgb_array_rendering() {
        let builder = EnvBuilder::new()
            .render_mode(Some(RenderMode::Human))
            .record_video(true);
        assert_eq!(builder.effective_render_mode(), Some(RenderMode::RgbArray));

        let builder = EnvBuilder::new().render_mode(Some(RenderMode::Human));
        assert_eq!(builder.effective_render_mode(), Some(RenderMode::Human));
    }

    #[test]
    fn builder_deserializes_from_yaml() {
        let yaml = "
            name: BipedalWalkerHardcore-v3
            hardcore: Enabled
            n_stack: 4
            clip_obs: 10.0
            render_mode: ~
            record_video: false
            video_folder: videos
            use_monitor: true
            logs_dir: logs
        ";
        let builder: EnvBuilder = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(builder.name, "BipedalWalkerHardcore-v3");
        assert!(builder.use_monitor);
    }
}
