pub mod crosshair;
pub mod interp;
pub mod oblique;
pub mod slice;
pub mod window_level;

pub use crosshair::{
    get_crosshair_screen_position, scout_line, update_crosshair_from_click, Crosshair,
    LineOrientation, ScoutLine,
};
pub use oblique::{sample_oblique, trilerp, ObliquePlane};
pub use slice::{extract_slice, mip_slab, SliceImage};
pub use window_level::WindowLevelCache;
