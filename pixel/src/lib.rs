pub mod error;
pub mod raw;
pub mod rescale;

pub use error::DecodeError;
pub use raw::{decode_raw, DecodeParams};
pub use rescale::rescale_to_hu;
