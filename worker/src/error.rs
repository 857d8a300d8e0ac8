use thiserror::Error;

/// Errors surfaced to the main context by the MIP worker.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkerError {
    #[error("worker has not received an init message yet")]
    NotInitialized,
    /// Expected on a volume switch; callers should treat this as a normal retry signal,
    /// not a fault.
    #[error("request was cancelled by a volume change")]
    Cancelled,
    #[error("worker internal error: {message}")]
    InternalError { message: String },
}

pub type Result<T> = std::result::Result<T, WorkerError>;
