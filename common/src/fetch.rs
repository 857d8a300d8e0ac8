use thiserror::Error;
use tracing::debug;

/// Errors surfaced by an [`InstanceFetcher`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed with status {status}")]
    FetchFailed { status: u16, url: String },
    #[error("credential rejected for {url}")]
    Unauthorized { url: String },
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// A header-provider hook for attaching a bearer credential to outgoing requests.
///
/// Kept as a trait object boundary so the core never depends on a concrete HTTP client or
/// auth scheme; the embedding application supplies one.
pub trait AuthHeaderProvider: Send + Sync {
    fn header_value(&self) -> Option<String>;
}

/// Minimal fetch interface the ingest/volume-build pipeline pulls instance bytes through.
/// Network transport is assumed to be an opaque byte-stream service; this trait is the seam.
pub trait InstanceFetcher: Send + Sync {
    /// Raw DICOM bytes for one instance, keyed by its identifier/UID.
    fn fetch_instance_bytes(&self, instance_id: &str) -> Result<Vec<u8>>;
}

/// A fetcher backed by an in-memory map, useful for tests and for an embedding application
/// that pre-downloads a series before handing it to the volume builder.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    bytes_by_id: std::collections::HashMap<String, Vec<u8>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, instance_id: impl Into<String>, bytes: Vec<u8>) {
        self.bytes_by_id.insert(instance_id.into(), bytes);
    }
}

impl InstanceFetcher for StaticFetcher {
    fn fetch_instance_bytes(&self, instance_id: &str) -> Result<Vec<u8>> {
        debug!("fetching instance {instance_id} from static map");
        self.bytes_by_id
            .get(instance_id)
            .cloned()
            .ok_or_else(|| FetchError::FetchFailed {
                status: 404,
                url: instance_id.to_string(),
            })
    }
}
