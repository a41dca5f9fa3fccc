pub mod camera;
pub mod driver;
pub mod error;
pub mod input;
pub mod mesh;
pub mod replay;
pub mod settings;

pub const CONFY_APP_NAME: &str = "glview-rs";

pub use camera::{ArcballCamera, Camera, FpsCamera, MoveDirection, MoveStyle, ViewCamera};
pub use driver::{FrameDriver, FrameReport, InputEvent};
pub use error::ViewError;
