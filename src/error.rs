use derive_more::Display;

/// Structural errors on otherwise well-formed calls. Geometric "no answer"
/// cases (parallel lines, projections outside a segment, misses) are not
/// errors; they are `None`.
#[derive(Debug, Display, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[display(fmt = "vertex index {} out of range for {} vertices", index, num_vertices)]
    IndexOutOfRange { index: usize, num_vertices: usize },
    #[display(fmt = "face indices must be pairwise distinct, got ({}, {}, {})", _0, _1, _2)]
    RepeatedFaceIndex(usize, usize, usize),
    #[display(fmt = "epsilon must be non-negative, got {}", _0)]
    NegativeEpsilon(f64),
    #[display(fmt = "input point coordinates must be finite")]
    NonFiniteCoordinate,
}

impl std::error::Error for GeometryError {}
