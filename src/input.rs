use serde::{Deserialize, Serialize};

use crate::camera::{ArcballCamera, FpsCamera, MoveDirection, MoveStyle};

/// Keys the viewer reacts to, independent of any window library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    W,
    A,
    S,
    D,
    Shift,
    F,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Movement keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub boost: bool,
}

impl HeldKeys {
    /// Speed multiplier while Shift is held
    pub const BOOST_FACTOR: f32 = 2.0;

    pub fn factor(&self) -> f32 {
        if self.boost { Self::BOOST_FACTOR } else { 1.0 }
    }

    fn directions(&self) -> impl Iterator<Item = MoveDirection> {
        [
            (self.forward, MoveDirection::Forward),
            (self.backward, MoveDirection::Backward),
            (self.left, MoveDirection::Left),
            (self.right, MoveDirection::Right),
        ]
        .into_iter()
        .filter_map(|(held, direction)| held.then_some(direction))
    }
}

/// Outcome of a key transition that the driver must act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    ToggleFreeze,
    Exit,
}

/// Per-window input tracking owned by the render loop
#[derive(Debug, Clone)]
pub struct InputState {
    last_cursor: Option<(f32, f32)>,
    gui_focused: bool,
    panning: bool,
    rotating: bool,
    held: HeldKeys,
    framebuffer: (u32, u32),
}

impl InputState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            last_cursor: None,
            gui_focused: false,
            panning: false,
            rotating: false,
            held: HeldKeys::default(),
            framebuffer: (width, height),
        }
    }

    pub fn held(&self) -> HeldKeys {
        self.held
    }

    pub fn framebuffer(&self) -> (u32, u32) {
        self.framebuffer
    }

    pub fn is_gui_focused(&self) -> bool {
        self.gui_focused
    }

    pub fn set_framebuffer(&mut self, width: u32, height: u32) {
        self.framebuffer = (width, height);
    }

    /// Set when a GUI overlay wants the pointer
    pub fn set_gui_focused(&mut self, focused: bool) {
        self.gui_focused = focused;
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.rotating = pressed,
            MouseButton::Middle => self.panning = pressed,
            MouseButton::Right => {}
        }
    }

    pub fn on_key(&mut self, key: Key, pressed: bool) -> KeyAction {
        match key {
            Key::W => self.held.forward = pressed,
            Key::S => self.held.backward = pressed,
            Key::A => self.held.left = pressed,
            Key::D => self.held.right = pressed,
            Key::Shift => self.held.boost = pressed,
            Key::F if pressed => return KeyAction::ToggleFreeze,
            Key::Escape if pressed => return KeyAction::Exit,
            Key::F | Key::Escape => {}
        }
        KeyAction::None
    }

    /// Drag style for the arcball camera; rotating wins over panning
    pub fn move_style(&self) -> MoveStyle {
        if self.rotating {
            MoveStyle::Arcball
        } else if self.panning {
            MoveStyle::Planar
        } else {
            MoveStyle::None
        }
    }

    /// Raw screen-space delta `(x - last_x, y - last_y)`.
    /// The first sample only records the cursor and yields zero.
    fn cursor_delta(&mut self, x: f32, y: f32) -> (f32, f32) {
        let (last_x, last_y) = self.last_cursor.unwrap_or((x, y));
        self.last_cursor = Some((x, y));
        (x - last_x, y - last_y)
    }

    /// Mouse-look: moving right turns right, moving up looks up.
    /// Held back while a GUI overlay has the pointer.
    pub fn apply_fps_cursor(&mut self, camera: &mut FpsCamera, x: f32, y: f32) {
        let (dx, dy) = self.cursor_delta(x, y);
        if self.gui_focused {
            return;
        }
        camera.process_mouse_movement(dx, -dy, true);
    }

    /// Drag-to-orbit: the scene follows the cursor
    pub fn apply_arcball_cursor(&mut self, camera: &mut ArcballCamera, x: f32, y: f32) {
        let (dx, dy) = self.cursor_delta(x, y);
        if self.gui_focused {
            return;
        }
        let (width, height) = self.framebuffer;
        if width == 0 || height == 0 {
            return;
        }
        camera.process_mouse_movement(width, height, -dx, -dy, self.move_style());
    }

    pub fn apply_held_keys(&self, camera: &mut FpsCamera, delta_time: f32) {
        let factor = self.held.factor();
        for direction in self.held.directions() {
            camera.process_keyboard(direction, delta_time, factor);
        }
    }
}

/// Tracks frame timestamps and yields the time between frames
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_frame: Option<f32>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous tick; zero on the first tick
    pub fn tick(&mut self, now: f32) -> f32 {
        let delta = self.last_frame.map_or(0.0, |last| (now - last).max(0.0));
        self.last_frame = Some(now);
        delta
    }
}
