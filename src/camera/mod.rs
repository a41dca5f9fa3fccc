mod arcball;
mod fps;
pub mod projection;

pub use arcball::{ArcballCamera, MoveStyle};
pub use fps::{FpsCamera, MoveDirection};
pub use projection::perspective;

use nalgebra_glm::{Mat4, Vec3};

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 45.0;

pub(crate) fn clamp_zoom(zoom: f32) -> f32 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Orthonormal camera axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub front: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

/// What a render loop needs from a camera once per frame
pub trait ViewCamera {
    fn view_matrix(&self) -> Mat4;
    fn position(&self) -> Vec3;
    /// Field of view in degrees, always within `MIN_ZOOM..=MAX_ZOOM`
    fn zoom(&self) -> f32;
    fn basis(&self) -> Basis;
    fn reset(&mut self);
    fn process_mouse_scroll(&mut self, yoffset: f32);
}

#[derive(Debug, Clone)]
pub enum Camera {
    Fps(FpsCamera),
    Arcball(ArcballCamera),
}

impl Camera {
    fn as_view(&self) -> &dyn ViewCamera {
        match self {
            Camera::Fps(camera) => camera,
            Camera::Arcball(camera) => camera,
        }
    }

    fn as_view_mut(&mut self) -> &mut dyn ViewCamera {
        match self {
            Camera::Fps(camera) => camera,
            Camera::Arcball(camera) => camera,
        }
    }
}

impl ViewCamera for Camera {
    fn view_matrix(&self) -> Mat4 {
        self.as_view().view_matrix()
    }

    fn position(&self) -> Vec3 {
        self.as_view().position()
    }

    fn zoom(&self) -> f32 {
        self.as_view().zoom()
    }

    fn basis(&self) -> Basis {
        self.as_view().basis()
    }

    fn reset(&mut self) {
        self.as_view_mut().reset()
    }

    fn process_mouse_scroll(&mut self, yoffset: f32) {
        self.as_view_mut().process_mouse_scroll(yoffset)
    }
}

impl From<FpsCamera> for Camera {
    fn from(camera: FpsCamera) -> Self {
        Camera::Fps(camera)
    }
}

impl From<ArcballCamera> for Camera {
    fn from(camera: ArcballCamera) -> Self {
        Camera::Arcball(camera)
    }
}
