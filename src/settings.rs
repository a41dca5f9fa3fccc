use crate::CONFY_APP_NAME;
use crate::camera::{ArcballCamera, Camera, FpsCamera, projection};
use crate::error::ViewError;

use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraKind {
    Fps,
    #[default]
    Arcball,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FpsSettings {
    pub position: [f32; 3],
    pub world_up: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
}

impl Default for FpsSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 3.0],
            world_up: [0.0, 1.0, 0.0],
            yaw: -90.0,
            pitch: 0.0,
            speed: 5.0,
            sensitivity: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcballSettings {
    pub position: [f32; 3],
    pub pivot: [f32; 3],
    pub world_up: [f32; 3],
    pub sensitivity: f32,
    /// Applied once after construction when set
    pub distance: Option<f32>,
}

impl Default for ArcballSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 10.0],
            pivot: [0.0, 0.0, 0.0],
            world_up: [0.0, 1.0, 0.0],
            sensitivity: 0.01,
            distance: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub kind: CameraKind,
    pub fps: FpsSettings,
    pub arcball: ArcballSettings,
}

impl CameraSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "camera").unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), ViewError> {
        confy::store(CONFY_APP_NAME, "camera", self)?;
        Ok(())
    }

    /// Builds the configured camera, rejecting poses the camera math
    /// cannot represent.
    pub fn build(&self) -> Result<Camera, ViewError> {
        match self.kind {
            CameraKind::Fps => {
                let s = &self.fps;
                finite("fps.position", &s.position)?;
                finite("fps.yaw/pitch", &[s.yaw, s.pitch, s.speed, s.sensitivity])?;
                non_zero("fps.world_up", &s.world_up)?;
                if s.pitch.abs() >= 90.0 {
                    return Err(ViewError::new("pitch-out-of-range").with_arg("pitch", s.pitch));
                }

                let camera = FpsCamera::new(vec3(&s.position), vec3(&s.world_up), s.yaw, s.pitch)
                    .with_speed(s.speed)
                    .with_sensitivity(s.sensitivity);
                Ok(Camera::Fps(camera))
            }
            CameraKind::Arcball => {
                let s = &self.arcball;
                finite("arcball.position", &s.position)?;
                finite("arcball.pivot", &s.pivot)?;
                finite("arcball.sensitivity", &[s.sensitivity])?;
                non_zero("arcball.world_up", &s.world_up)?;

                let (position, pivot, world_up) =
                    (vec3(&s.position), vec3(&s.pivot), vec3(&s.world_up));
                let line_of_sight = pivot - position;
                if glm::length(&line_of_sight) <= f32::EPSILON {
                    return Err(ViewError::new("pivot-at-camera").with_arg("pivot", format!("{:?}", s.pivot)));
                }
                if glm::length(&glm::cross(&line_of_sight, &world_up)) <= f32::EPSILON {
                    return Err(ViewError::new("view-parallel-to-up")
                        .with_arg("position", format!("{:?}", s.position))
                        .with_arg("pivot", format!("{:?}", s.pivot)));
                }

                let mut camera =
                    ArcballCamera::new(position, pivot, world_up).with_sensitivity(s.sensitivity);
                if let Some(distance) = s.distance {
                    if !distance.is_finite() || distance <= 0.0 {
                        return Err(ViewError::new("bad-distance").with_arg("distance", distance));
                    }
                    camera.set_distance(distance);
                }
                Ok(Camera::Arcball(camera))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub width: u32,
    pub height: u32,
    pub near_plane: f32,
    pub far_plane: f32,
    pub clear_color: [f32; 4],
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            near_plane: projection::DEFAULT_NEAR_PLANE,
            far_plane: projection::DEFAULT_FAR_PLANE,
            clear_color: [0.45, 0.55, 0.60, 1.00],
        }
    }
}

impl ViewportSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "viewport").unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), ViewError> {
        confy::store(CONFY_APP_NAME, "viewport", self)?;
        Ok(())
    }
}

// Aggregate struct for convenience
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub camera: CameraSettings,
    pub viewport: ViewportSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            camera: CameraSettings::load(),
            viewport: ViewportSettings::load(),
        }
    }

    pub fn save(&self) -> Result<(), ViewError> {
        self.camera.save()?;
        self.viewport.save()
    }
}

fn vec3(v: &[f32; 3]) -> glm::Vec3 {
    glm::vec3(v[0], v[1], v[2])
}

fn finite(field: &'static str, values: &[f32]) -> Result<(), ViewError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ViewError::new("non-finite-setting").with_arg("field", field))
    }
}

fn non_zero(field: &'static str, v: &[f32; 3]) -> Result<(), ViewError> {
    finite(field, v)?;
    if glm::length(&vec3(v)) <= f32::EPSILON {
        return Err(ViewError::new("zero-vector-setting").with_arg("field", field));
    }
    Ok(())
}
