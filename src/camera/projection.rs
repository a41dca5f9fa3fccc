use nalgebra_glm::{self as glm, Mat4};

pub const DEFAULT_NEAR_PLANE: f32 = 0.1;
pub const DEFAULT_FAR_PLANE: f32 = 100.0;

/// Right-handed OpenGL perspective for a camera zoom in degrees.
/// An empty framebuffer (minimized window) is treated as 1x1.
pub fn perspective(zoom: f32, width: u32, height: u32, near: f32, far: f32) -> Mat4 {
    let (width, height) = if width == 0 || height == 0 {
        (1, 1)
    } else {
        (width, height)
    };
    let aspect = width as f32 / height as f32;
    glm::perspective(aspect, zoom.to_radians(), near, far)
}
