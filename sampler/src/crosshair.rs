use mpr_model::Plane;

/// A 3D voxel-space crosshair position shared across all panes viewing one volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crosshair {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Updates `crosshair` from a normalized click `(cx, cy) ∈ [0,1]²` on a pane showing `plane`.
pub fn update_crosshair_from_click(
    plane: Plane,
    dims: (usize, usize, usize),
    cx: f64,
    cy: f64,
    crosshair: Crosshair,
) -> Crosshair {
    let (cols, rows, slices) = dims;
    let (c1, r1, s1) = (
        (cols.max(1) - 1) as f64,
        (rows.max(1) - 1) as f64,
        (slices.max(1) - 1) as f64,
    );
    match plane {
        Plane::Axial => Crosshair {
            x: (cx * c1).round(),
            y: (cy * r1).round(),
            z: crosshair.z,
        },
        Plane::Coronal => Crosshair {
            x: (cx * c1).round(),
            y: crosshair.y,
            z: ((1.0 - cy) * s1).round(),
        },
        Plane::Sagittal => Crosshair {
            x: crosshair.x,
            y: (cx * r1).round(),
            z: ((1.0 - cy) * s1).round(),
        },
    }
}

/// Inverse of [`update_crosshair_from_click`]: the normalized screen position of `crosshair`
/// on a pane showing `plane`, for overlay drawing.
pub fn get_crosshair_screen_position(
    plane: Plane,
    dims: (usize, usize, usize),
    crosshair: Crosshair,
) -> (f64, f64) {
    let (cols, rows, slices) = dims;
    let (c1, r1, s1) = (
        (cols.max(1) - 1) as f64,
        (rows.max(1) - 1) as f64,
        (slices.max(1) - 1) as f64,
    );
    match plane {
        Plane::Axial => (crosshair.x / c1, crosshair.y / r1),
        Plane::Coronal => (crosshair.x / c1, 1.0 - crosshair.z / s1),
        Plane::Sagittal => (crosshair.y / r1, 1.0 - crosshair.z / s1),
    }
}

/// Orientation of a scout line drawn in a target pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOrientation {
    Horizontal,
    Vertical,
}

/// A single reference line a source pane contributes to a target pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoutLine {
    pub orientation: LineOrientation,
    pub ratio: f64,
}

fn dim_along_plane(plane: Plane, dims: (usize, usize, usize)) -> usize {
    let (cols, rows, slices) = dims;
    match plane {
        Plane::Axial => slices,
        Plane::Coronal => rows,
        Plane::Sagittal => cols,
    }
}

/// Computes the scout line pane `source_plane` (at `source_index`) contributes to a pane
/// showing `target_plane`.
pub fn scout_line(
    source_plane: Plane,
    source_index: f64,
    target_plane: Plane,
    dims: (usize, usize, usize),
) -> ScoutLine {
    let dim1 = (dim_along_plane(source_plane, dims).max(1) - 1) as f64;
    let ratio = if dim1 == 0.0 { 0.0 } else { source_index / dim1 };

    if source_plane == target_plane {
        return ScoutLine {
            orientation: LineOrientation::Horizontal,
            ratio,
        };
    }

    use Plane::*;
    let (orientation, invert) = match (source_plane, target_plane) {
        (Axial, Coronal) => (LineOrientation::Horizontal, true),
        (Axial, Sagittal) => (LineOrientation::Horizontal, true),
        (Coronal, Axial) => (LineOrientation::Horizontal, false),
        (Coronal, Sagittal) => (LineOrientation::Vertical, false),
        (Sagittal, Axial) => (LineOrientation::Vertical, false),
        (Sagittal, Coronal) => (LineOrientation::Vertical, false),
        _ => unreachable!("source_plane == target_plane handled above"),
    };

    ScoutLine {
        orientation,
        ratio: if invert { 1.0 - ratio } else { ratio },
    }
}
