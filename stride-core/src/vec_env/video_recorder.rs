//! Video capture of the wrapped observation stream.
use super::{VecEnv, VecStep};
use crate::base::Frame;
use anyhow::Result;
use log::{info, warn};
use ndarray::Array2;
use std::path::{Path, PathBuf};

/// Captures RGB frames of the first environment and writes them as numbered
/// PNG images under a folder (encoding into a container format is left to
/// external tooling).
///
/// A new recording starts whenever the global step index is a multiple of
/// `record_interval`; each recording keeps at most `video_length` frames.
pub struct VecVideoRecorder<V: VecEnv> {
    env: V,
    folder: PathBuf,
    record_interval: usize,
    video_length: usize,
    step_count: usize,
    recording: Option<Recording>,
}

struct Recording {
    name: String,
    n_frames: usize,
}

impl<V: VecEnv> VecVideoRecorder<V> {
    /// Wraps `env`, saving recordings under `folder`.
    pub fn new(
        env: V,
        folder: impl AsRef<Path>,
        record_interval: usize,
        video_length: usize,
    ) -> Self {
        assert!(record_interval > 0);
        Self {
            env,
            folder: folder.as_ref().to_path_buf(),
            record_interval,
            video_length,
            step_count: 0,
            recording: None,
        }
    }

    fn maybe_start(&mut self) {
        if self.recording.is_none() && self.step_count % self.record_interval == 0 {
            let name = format!("walker-step-{}", self.step_count);
            info!("starting video recording {}", name);
            self.recording = Some(Recording { name, n_frames: 0 });
        }
    }

    fn capture(&mut self) {
        if let Some(mut rec) = self.recording.take() {
            if let Some(frame) = self.env.frame() {
                let path = self
                    .folder
                    .join(format!("{}-{:03}.png", rec.name, rec.n_frames));
                if let Err(e) = image::save_buffer(
                    &path,
                    &frame.data,
                    frame.width,
                    frame.height,
                    image::ColorType::Rgb8,
                ) {
                    warn!("failed to write video frame {:?}: {}", path, e);
                }
                rec.n_frames += 1;
            }
            if rec.n_frames >= self.video_length {
                info!("finished video recording {} ({} frames)", rec.name, rec.n_frames);
            } else {
                self.recording = Some(rec);
            }
        }
    }
}

impl<V: VecEnv> VecEnv for VecVideoRecorder<V> {
    fn reset(&mut self) -> Result<Array2<f32>> {
        let obs = self.env.reset()?;
        self.maybe_start();
        self.capture();
        Ok(obs)
    }

    fn step(&mut self, act: &Array2<f32>) -> VecStep {
        let step = self.env.step(act);
        self.step_count += 1;
        self.maybe_start();
        self.capture();
        step
    }

    fn n_envs(&self) -> usize {
        self.env.n_envs()
    }

    fn obs_dim(&self) -> usize {
        self.env.obs_dim()
    }

    fn frame(&mut self) -> Option<Frame> {
        self.env.frame()
    }

    fn close(&mut self) {
        if let Some(rec) = self.recording.take() {
            info!("finished video recording {} ({} frames)", rec.name, rec.n_frames);
        }
        self.env.close()
    }
}
