//! Scripted input playback.
//!
//! A replay script stands in for a window: it lists frames, each with the
//! time step and the input events delivered during that frame. Playing it
//! back through a [`FrameDriver`] yields the same per-frame camera output a
//! live render loop would draw with.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::driver::{FrameDriver, FrameReport, InputEvent};
use crate::error::ViewError;
use crate::settings::{CameraSettings, Settings, ViewportSettings};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptFrame {
    /// Seconds since the previous frame
    #[serde(default)]
    pub dt: f32,
    /// Absolute timestamp in seconds; takes precedence over `dt`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f32>,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

impl ScriptFrame {
    fn has_bad_time(&self) -> bool {
        !self.dt.is_finite() || self.dt < 0.0 || self.time.is_some_and(|t| !t.is_finite())
    }

    fn has_bad_distance(&self) -> bool {
        self.events.iter().any(|event| {
            matches!(event, InputEvent::SetDistance { distance } if !(distance.is_finite() && *distance > 0.0))
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Overrides the stored camera settings when present
    #[serde(default)]
    pub camera: Option<CameraSettings>,
    #[serde(default)]
    pub viewport: Option<ViewportSettings>,
    pub frames: Vec<ScriptFrame>,
}

impl ReplayScript {
    pub fn from_json(text: &str) -> Result<Self, ViewError> {
        let script: ReplayScript = serde_json::from_str(text)?;
        if let Some(frame) = script.frames.iter().position(ScriptFrame::has_bad_time) {
            return Err(ViewError::new("bad-frame-time").with_arg("frame", frame));
        }
        if let Some(frame) = script.frames.iter().position(ScriptFrame::has_bad_distance) {
            return Err(ViewError::new("bad-distance").with_arg("frame", frame));
        }
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ViewError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ViewError::new("script-read-failed").with_arg("path", path.display()).push_std(e))?;
        Self::from_json(&text)
            .map_err(|e| ViewError::new("script-parse-failed").with_arg("path", path.display()).push_view(e))
    }

    /// Plays every frame against a fresh driver. Stops early, after the
    /// current frame is reported, if an exit key is pressed.
    pub fn run(&self, defaults: &Settings) -> Result<Vec<FrameReport>, ViewError> {
        let camera_settings = self.camera.as_ref().unwrap_or(&defaults.camera);
        let viewport = self.viewport.clone().unwrap_or_else(|| defaults.viewport.clone());

        let camera = camera_settings.build()?;
        log::info!(
            "replaying {} frames with {:?} camera at {}x{}",
            self.frames.len(),
            camera_settings.kind,
            viewport.width,
            viewport.height
        );

        let mut driver = FrameDriver::new(camera, viewport);
        let mut reports = Vec::with_capacity(self.frames.len());

        for frame in &self.frames {
            let mut exit = false;
            for event in &frame.events {
                exit |= driver.handle_event(event).exit;
            }
            let report = match frame.time {
                Some(now) => driver.frame_at(now),
                None => driver.frame(frame.dt),
            };
            reports.push(report);
            if exit {
                log::info!("exit requested at frame {}", reports.len() - 1);
                break;
            }
        }

        Ok(reports)
    }
}
