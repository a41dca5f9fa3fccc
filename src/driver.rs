use serde::{Deserialize, Serialize};

use crate::camera::{self, Camera, ViewCamera};
use crate::input::{FrameClock, InputState, Key, KeyAction, MouseButton};
use crate::settings::ViewportSettings;

/// Window-system-neutral input, in the order the window delivered it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Cursor { x: f32, y: f32 },
    Scroll { dy: f32 },
    Button { button: MouseButton, pressed: bool },
    Key { key: Key, pressed: bool },
    GuiFocus { focused: bool },
    Resize { width: u32, height: u32 },
    SetDistance { distance: f32 },
    SetSensitivity { sensitivity: f32 },
    Reset,
}

/// Everything the draw phase consumes for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub frame: u64,
    pub position: [f32; 3],
    pub zoom: f32,
    /// Column-major
    pub view: [[f32; 4]; 4],
    /// Column-major
    pub projection: [[f32; 4]; 4],
}

pub struct EventResponse {
    pub exit: bool,
}

/// Owns the camera and input state for a render loop
pub struct FrameDriver {
    camera: Camera,
    input: InputState,
    viewport: ViewportSettings,
    clock: FrameClock,
    frame: u64,
}

impl FrameDriver {
    pub fn new(camera: Camera, viewport: ViewportSettings) -> Self {
        let input = InputState::new(viewport.width, viewport.height);
        Self {
            camera,
            input,
            viewport,
            clock: FrameClock::new(),
            frame: 0,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> EventResponse {
        let mut exit = false;

        match *event {
            InputEvent::Cursor { x, y } => match &mut self.camera {
                Camera::Fps(camera) => self.input.apply_fps_cursor(camera, x, y),
                Camera::Arcball(camera) => self.input.apply_arcball_cursor(camera, x, y),
            },
            InputEvent::Scroll { dy } => self.camera.process_mouse_scroll(dy),
            InputEvent::Button { button, pressed } => self.input.on_mouse_button(button, pressed),
            InputEvent::Key { key, pressed } => match self.input.on_key(key, pressed) {
                KeyAction::ToggleFreeze => {
                    if let Camera::Fps(camera) = &mut self.camera {
                        camera.toggle_freeze();
                    }
                }
                KeyAction::Exit => exit = true,
                KeyAction::None => {}
            },
            InputEvent::GuiFocus { focused } => self.input.set_gui_focused(focused),
            InputEvent::Resize { width, height } => {
                self.input.set_framebuffer(width, height);
                self.viewport.width = width;
                self.viewport.height = height;
            }
            InputEvent::SetDistance { distance } => match &mut self.camera {
                Camera::Arcball(_) if !(distance.is_finite() && distance > 0.0) => {
                    log::warn!("ignoring non-positive arcball distance {}", distance)
                }
                Camera::Arcball(camera) => camera.set_distance(distance),
                Camera::Fps(_) => log::warn!("set_distance ignored for fps camera"),
            },
            InputEvent::SetSensitivity { sensitivity } => match &mut self.camera {
                Camera::Arcball(camera) => camera.set_sensitivity(sensitivity),
                Camera::Fps(_) => log::warn!("set_sensitivity ignored for fps camera"),
            },
            InputEvent::Reset => self.camera.reset(),
        }

        EventResponse { exit }
    }

    /// Applies held movement keys for `delta_time` seconds and reads the
    /// camera for drawing.
    pub fn frame(&mut self, delta_time: f32) -> FrameReport {
        if let Camera::Fps(camera) = &mut self.camera {
            self.input.apply_held_keys(camera, delta_time);
        }

        let view = self.camera.view_matrix();
        let projection = camera::perspective(
            self.camera.zoom(),
            self.viewport.width,
            self.viewport.height,
            self.viewport.near_plane,
            self.viewport.far_plane,
        );
        let position = self.camera.position();

        let report = FrameReport {
            frame: self.frame,
            position: [position.x, position.y, position.z],
            zoom: self.camera.zoom(),
            view: view.into(),
            projection: projection.into(),
        };
        self.frame += 1;
        report
    }

    /// Same as [`frame`](Self::frame), with the time step taken from a
    /// timestamp in seconds. The first call steps by zero.
    pub fn frame_at(&mut self, now: f32) -> FrameReport {
        let delta_time = self.clock.tick(now);
        self.frame(delta_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{ArcballCamera, FpsCamera};
    use nalgebra_glm as glm;

    fn arcball_driver() -> FrameDriver {
        FrameDriver::new(ArcballCamera::default().into(), ViewportSettings::default())
    }

    #[test]
    fn test_report_matrices_are_column_major() {
        let mut driver = arcball_driver();
        let report = driver.frame(0.016);
        // translation lives in the last column
        assert!((report.view[3][2] - (-10.0)).abs() < 1e-5);
        assert_eq!(report.view[3][3], 1.0);
        assert_eq!(report.projection[2][3], -1.0);
        assert_eq!(report.frame, 0);
        assert_eq!(driver.frame(0.016).frame, 1);
    }

    #[test]
    fn test_drag_orbits_arcball() {
        let mut driver = arcball_driver();
        for event in [
            InputEvent::Cursor { x: 640.0, y: 360.0 },
            InputEvent::Button { button: MouseButton::Left, pressed: true },
            InputEvent::Cursor { x: 600.0, y: 360.0 },
            InputEvent::Cursor { x: 560.0, y: 330.0 },
        ] {
            driver.handle_event(&event);
        }
        let report = driver.frame(0.016);
        let position = glm::make_vec3(&report.position);
        assert!((glm::length(&position) - 10.0).abs() < 1e-4);
        assert!(position.x.abs() > 0.1);
    }

    #[test]
    fn test_set_distance_and_reset() {
        let mut driver = arcball_driver();
        driver.handle_event(&InputEvent::SetDistance { distance: 20.0 });
        driver.handle_event(&InputEvent::Scroll { dy: 10.0 });
        let report = driver.frame(0.0);
        assert!((report.position[2] - 20.0).abs() < 1e-5);
        assert_eq!(report.zoom, 35.0);

        driver.handle_event(&InputEvent::Reset);
        let report = driver.frame(0.0);
        assert!((report.position[2] - 10.0).abs() < 1e-5);
        assert_eq!(report.zoom, 45.0);
    }

    #[test]
    fn test_degenerate_distance_ignored() {
        let mut driver = arcball_driver();
        let before = driver.frame(0.0);
        for distance in [0.0, -4.0, f32::NAN, f32::INFINITY] {
            driver.handle_event(&InputEvent::SetDistance { distance });
            let report = driver.frame(0.0);
            assert_eq!(report.position, before.position);
            assert!(report.view.iter().flatten().all(|v| v.is_finite()));
        }

        // a valid request after the rejected ones still lands
        driver.handle_event(&InputEvent::SetDistance { distance: 2.5 });
        assert!((driver.frame(0.0).position[2] - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_frame_at_steps_by_timestamp() {
        let mut driver = FrameDriver::new(FpsCamera::default().into(), ViewportSettings::default());
        driver.handle_event(&InputEvent::Key { key: Key::W, pressed: true });
        // first timestamp only primes the clock
        let first = driver.frame_at(10.0);
        assert!((first.position[2] - 3.0).abs() < 1e-5);
        let second = driver.frame_at(10.2);
        assert!((second.position[2] - 2.0).abs() < 1e-4);
        assert_eq!(second.frame, 1);
    }

    #[test]
    fn test_fps_keys_and_freeze() {
        let mut driver = FrameDriver::new(FpsCamera::default().into(), ViewportSettings::default());
        driver.handle_event(&InputEvent::Key { key: Key::W, pressed: true });
        let report = driver.frame(0.2);
        assert!((report.position[2] - (-1.0)).abs() < 1e-5);

        driver.handle_event(&InputEvent::Key { key: Key::F, pressed: true });
        driver.handle_event(&InputEvent::Key { key: Key::F, pressed: false });
        let frozen = driver.frame(0.2);
        assert_eq!(frozen.position, report.position);

        driver.handle_event(&InputEvent::Key { key: Key::F, pressed: true });
        let moved = driver.frame(0.2);
        assert!((moved.position[2] - (-2.0)).abs() < 1e-5);
    }

    #[test]
    fn test_escape_requests_exit() {
        let mut driver = arcball_driver();
        assert!(!driver.handle_event(&InputEvent::Key { key: Key::A, pressed: true }).exit);
        assert!(driver.handle_event(&InputEvent::Key { key: Key::Escape, pressed: true }).exit);
    }

    #[test]
    fn test_resize_updates_projection_aspect() {
        let mut driver = arcball_driver();
        driver.handle_event(&InputEvent::Resize { width: 500, height: 500 });
        let report = driver.frame(0.0);
        assert!((report.projection[0][0] - report.projection[1][1]).abs() < 1e-6);
        assert_eq!(driver.input().framebuffer(), (500, 500));
    }

    #[test]
    fn test_events_deserialize_from_tagged_json() {
        let events: Vec<InputEvent> = serde_json::from_str(
            r#"[
                {"type": "cursor", "x": 1.0, "y": 2.0},
                {"type": "button", "button": "middle", "pressed": true},
                {"type": "key", "key": "shift", "pressed": false},
                {"type": "reset"}
            ]"#,
        )
        .unwrap();
        assert_eq!(events[0], InputEvent::Cursor { x: 1.0, y: 2.0 });
        assert_eq!(
            events[1],
            InputEvent::Button { button: MouseButton::Middle, pressed: true }
        );
        assert_eq!(events[2], InputEvent::Key { key: Key::Shift, pressed: false });
        assert_eq!(events[3], InputEvent::Reset);
    }
}
