pub mod index;
pub mod instance;
pub mod plane;
pub mod value_types;
pub mod volume;

pub use index::{voxel_index, IndexError};
pub use instance::{Instance, InstanceBuildError, InstanceBuilder};
pub use plane::{PaneState, Plane};
pub use value_types::{PhotometricInterpretation, PixelRepresentation};
pub use volume::{Orientation, Volume, VolumeBuildError, VolumeBuilder, AIR_HU};
