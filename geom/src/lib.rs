pub mod matrix;
pub mod quaternion;
mod tm;
pub mod vector;

pub use tm::{Transform, TransformError};
