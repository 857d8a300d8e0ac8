pub mod cache;
pub mod error;
pub mod manager;
pub mod protocol;
pub mod worker;

pub use error::{Result, WorkerError};
pub use manager::MipWorkerHandle;
pub use protocol::{Reply, Request};
