use std::f32::consts::PI;

use nalgebra_glm::{self as glm, Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::{Basis, MAX_ZOOM, ViewCamera, clamp_zoom};

pub const DEFAULT_SENSITIVITY: f32 = 0.01;

/// How a cursor drag moves an arcball camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveStyle {
    /// Orbit around the pivot
    #[default]
    Arcball,
    /// Translate camera and pivot together in the view plane
    Planar,
    None,
}

#[derive(Debug, Clone, Copy)]
struct Backup {
    position: Vec3,
    pivot: Vec3,
    world_up: Vec3,
    sensitivity: f32,
}

/// Orbit camera that tracks its orientation as points rather than angles.
///
/// `right_point` and `up_point` sit one unit from `position` along the
/// camera's right and up axes. Orbiting rotates all three points around the
/// pivot, so the basis is always rebuilt from positions and never from
/// accumulated Euler angles.
#[derive(Debug, Clone)]
pub struct ArcballCamera {
    position: Vec3,
    pivot: Vec3,
    right_point: Vec3,
    up_point: Vec3,
    world_up: Vec3,
    sensitivity: f32,
    zoom: f32,
    backup: Backup,
}

impl ArcballCamera {
    pub fn new(position: Vec3, pivot: Vec3, world_up: Vec3) -> Self {
        debug_assert!(
            glm::distance(&position, &pivot) > f32::EPSILON,
            "arcball position must differ from its pivot"
        );

        let front = glm::normalize(&(pivot - position));
        let right = glm::normalize(&glm::cross(&front, &world_up));
        let up = glm::normalize(&glm::cross(&right, &front));

        Self {
            position,
            pivot,
            right_point: position + right,
            up_point: position + up,
            world_up,
            sensitivity: DEFAULT_SENSITIVITY,
            zoom: MAX_ZOOM,
            backup: Backup {
                position,
                pivot,
                world_up,
                sensitivity: DEFAULT_SENSITIVITY,
            },
        }
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self.backup.sensitivity = sensitivity;
        self
    }

    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn distance(&self) -> f32 {
        glm::distance(&self.position, &self.pivot)
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    /// Slides the camera along its current line of sight so that it sits
    /// `distance` away from the pivot.
    pub fn set_distance(&mut self, distance: f32) {
        debug_assert!(
            distance.is_finite() && distance > 0.0,
            "arcball distance must be positive, got {distance}"
        );
        let Basis { front, right, up } = self.basis();
        self.position = self.pivot - front * distance;
        self.right_point = self.position + right;
        self.up_point = self.position + up;
    }

    pub fn process_mouse_movement(
        &mut self,
        view_width: u32,
        view_height: u32,
        xoffset: f32,
        yoffset: f32,
        style: MoveStyle,
    ) {
        if view_width == 0 || view_height == 0 {
            log::debug!("skipping arcball movement for empty viewport");
            return;
        }

        let Basis { right, up, .. } = self.basis();

        match style {
            MoveStyle::Planar => {
                let offset = (right * xoffset - up * yoffset) * self.sensitivity;
                self.position += offset;
                self.pivot += offset;
                self.right_point = self.position + right;
                self.up_point = self.position + up;
            }
            MoveStyle::Arcball => {
                let angle_x = (2.0 * PI / view_width as f32) * xoffset;
                let angle_y = (PI / view_height as f32) * yoffset;

                // Both rotations use the axes from before this call
                let orbit = self.orbit_matrix(angle_x, &up, angle_y, &right);
                self.position = self.rotate_about_pivot(&orbit, &self.position);
                self.right_point = self.rotate_about_pivot(&orbit, &self.right_point);
                self.up_point = self.rotate_about_pivot(&orbit, &self.up_point);
                self.orthonormalize();
            }
            MoveStyle::None => {}
        }
    }

    /// Re-derives right and up from the rotated points so repeated orbits
    /// do not accumulate skew.
    fn orthonormalize(&mut self) {
        let front = glm::normalize(&(self.pivot - self.position));
        let up = self.up_point - self.position;
        let right = glm::normalize(&glm::cross(&front, &up));
        let up = glm::normalize(&glm::cross(&right, &front));
        self.right_point = self.position + right;
        self.up_point = self.position + up;
    }

    fn orbit_matrix(&self, angle_x: f32, up: &Vec3, angle_y: f32, right: &Vec3) -> Mat4 {
        let identity = Mat4::identity();
        let around_up = glm::rotate(&identity, angle_x, up);
        let around_right = glm::rotate(&identity, angle_y, right);
        around_right * around_up
    }

    fn rotate_about_pivot(&self, orbit: &Mat4, point: &Vec3) -> Vec3 {
        let local = point - self.pivot;
        let rotated = orbit * glm::vec4(local.x, local.y, local.z, 1.0);
        rotated.xyz() + self.pivot
    }
}

impl Default for ArcballCamera {
    fn default() -> Self {
        Self::new(
            glm::vec3(0.0, 0.0, 10.0),
            Vec3::zeros(),
            glm::vec3(0.0, 1.0, 0.0),
        )
    }
}

impl ViewCamera for ArcballCamera {
    fn view_matrix(&self) -> Mat4 {
        let Basis { front, right, up } = self.basis();

        let mut view = Mat4::identity();
        view[(0, 0)] = right.x;
        view[(0, 1)] = right.y;
        view[(0, 2)] = right.z;
        view[(1, 0)] = up.x;
        view[(1, 1)] = up.y;
        view[(1, 2)] = up.z;
        view[(2, 0)] = -front.x;
        view[(2, 1)] = -front.y;
        view[(2, 2)] = -front.z;
        view[(0, 3)] = -glm::dot(&right, &self.position);
        view[(1, 3)] = -glm::dot(&up, &self.position);
        view[(2, 3)] = glm::dot(&front, &self.position);
        view
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn zoom(&self) -> f32 {
        self.zoom
    }

    fn basis(&self) -> Basis {
        Basis {
            front: glm::normalize(&(self.pivot - self.position)),
            right: glm::normalize(&(self.right_point - self.position)),
            up: glm::normalize(&(self.up_point - self.position)),
        }
    }

    fn reset(&mut self) {
        let backup = self.backup;
        *self = Self::new(backup.position, backup.pivot, backup.world_up)
            .with_sensitivity(backup.sensitivity);
        log::debug!("arcball camera reset to {:?}", self.position);
    }

    fn process_mouse_scroll(&mut self, yoffset: f32) {
        self.zoom = clamp_zoom(self.zoom - yoffset);
    }
}
