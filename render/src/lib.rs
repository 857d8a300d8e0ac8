pub mod camera;
pub mod error;
pub mod renderer;
pub mod shader;

pub use camera::ArcballCamera;
pub use error::RenderError;
pub use renderer::VolumeRenderer;
