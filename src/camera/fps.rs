use nalgebra_glm::{self as glm, Mat4, Vec3};

use super::{Basis, MAX_ZOOM, MIN_ZOOM, ViewCamera, clamp_zoom};

pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const DEFAULT_SPEED: f32 = 5.0;
pub const DEFAULT_SENSITIVITY: f32 = 0.1;

const PITCH_LIMIT: f32 = 89.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// Pose captured at construction, restored by `reset`
#[derive(Debug, Clone, Copy)]
struct Backup {
    position: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    speed: f32,
    sensitivity: f32,
}

/// First-person camera driven by yaw/pitch angles in degrees
#[derive(Debug, Clone)]
pub struct FpsCamera {
    position: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    speed: f32,
    sensitivity: f32,
    zoom: f32,
    frozen: bool,
    backup: Backup,
}

impl FpsCamera {
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        debug_assert!(glm::length(&world_up) > f32::EPSILON, "world up must be non-zero");

        let mut camera = Self {
            position,
            front: glm::vec3(0.0, 0.0, -1.0),
            right: glm::vec3(1.0, 0.0, 0.0),
            up: world_up,
            world_up,
            yaw,
            pitch,
            speed: DEFAULT_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
            zoom: MAX_ZOOM,
            frozen: false,
            backup: Backup {
                position,
                world_up,
                yaw,
                pitch,
                speed: DEFAULT_SPEED,
                sensitivity: DEFAULT_SENSITIVITY,
            },
        };
        camera.update_vectors();
        camera
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self.backup.speed = speed;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self.backup.sensitivity = sensitivity;
        self
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn process_keyboard(&mut self, direction: MoveDirection, delta_time: f32, factor: f32) {
        if self.frozen {
            return;
        }
        let velocity = self.speed * delta_time * factor;
        match direction {
            MoveDirection::Forward => self.position += self.front * velocity,
            MoveDirection::Backward => self.position -= self.front * velocity,
            MoveDirection::Left => self.position -= self.right * velocity,
            MoveDirection::Right => self.position += self.right * velocity,
        }
    }

    pub fn process_mouse_movement(&mut self, xoffset: f32, yoffset: f32, constrain_pitch: bool) {
        if self.frozen {
            return;
        }
        self.yaw += xoffset * self.sensitivity;
        self.pitch += yoffset * self.sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }

    pub fn toggle_freeze(&mut self) {
        self.frozen = !self.frozen;
        log::debug!("fps camera frozen={}", self.frozen);
    }

    // front, then right, then up; keeps the basis right-handed
    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let front = glm::vec3(pitch.cos() * yaw.cos(), pitch.sin(), pitch.cos() * yaw.sin());
        self.front = glm::normalize(&front);
        self.right = glm::normalize(&glm::cross(&self.front, &self.world_up));
        self.up = glm::normalize(&glm::cross(&self.right, &self.front));
    }
}

impl Default for FpsCamera {
    fn default() -> Self {
        Self::new(Vec3::zeros(), glm::vec3(0.0, 1.0, 0.0), DEFAULT_YAW, DEFAULT_PITCH)
    }
}

impl ViewCamera for FpsCamera {
    fn view_matrix(&self) -> Mat4 {
        glm::look_at(&self.position, &(self.position + self.front), &self.up)
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn zoom(&self) -> f32 {
        self.zoom
    }

    fn basis(&self) -> Basis {
        Basis {
            front: self.front,
            right: self.right,
            up: self.up,
        }
    }

    fn reset(&mut self) {
        let backup = self.backup;
        *self = Self::new(backup.position, backup.world_up, backup.yaw, backup.pitch)
            .with_speed(backup.speed)
            .with_sensitivity(backup.sensitivity);
        log::debug!("fps camera reset to {:?}", self.position);
    }

    fn process_mouse_scroll(&mut self, yoffset: f32) {
        if self.frozen {
            return;
        }
        self.zoom = clamp_zoom(self.zoom - yoffset);
        debug_assert!((MIN_ZOOM..=MAX_ZOOM).contains(&self.zoom));
    }
}
