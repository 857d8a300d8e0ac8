use thiserror::Error;

/// Renderer errors: all are fatal to the current renderer instance, callers drop back to
/// 2D MPR.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no suitable GPU adapter/device available")]
    GPUUnavailable,
    #[error("volume dimension {requested} exceeds this GPU's 3D texture limit of {max}")]
    DimensionExceedsGPULimit { requested: u32, max: u32 },
    #[error("shader compilation failed: {0}")]
    ShaderCompileFailed(String),
    #[error("pipeline link failed: {0}")]
    LinkFailed(String),
    #[error("GPU context was lost")]
    ContextLost,
}
