use mpr_model::Volume;

/// Messages sent from the main context to the worker thread.
#[derive(Debug)]
pub enum Request {
    /// Transfers a freshly-built volume into the worker. The worker owns this copy for the
    /// duration of the series.
    Init { volume: Box<Volume> },
    ComputeSlice { z: usize, slab_half_size: usize, request_id: u64 },
    ComputeBatch { indices: Vec<usize>, slab_half_size: usize, request_id: u64 },
}

/// Messages sent from the worker thread back to the main context.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Ready,
    SliceResult { z: usize, slab_half_size: usize, request_id: u64, bytes: Vec<i16> },
    /// A slice was requested before `init` reached the worker.
    NotInitialized { request_id: u64 },
    Error { request_id: Option<u64>, message: String },
}
