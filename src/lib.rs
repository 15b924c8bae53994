//! # tmesh
//!
//! A small computational-geometry library built around two pieces:
//!
//! * a geometric kernel over 2D/3D points, segments and triangles
//!   (distances, projections, intersections, containment, barycentric
//!   coordinates), with every tolerance-sensitive predicate handling
//!   degenerate input by returning an explicit "no answer" instead of
//!   panicking;
//! * an incremental Delaunay triangulator ([`triangulate_2d`]) that turns a
//!   planar point set into a [`Trimesh2d`] satisfying the empty-circumcircle
//!   property, using a walking point location and stack-driven edge flips.
//!
//! ```
//! use tmesh::{triangulate_2d, Point2d};
//!
//! let points = vec![
//!     Point2d::new(0.0, 0.0),
//!     Point2d::new(1.0, 0.0),
//!     Point2d::new(0.0, 1.0),
//!     Point2d::new(1.0, 1.0),
//! ];
//! let mesh = triangulate_2d(&points).unwrap();
//! assert_eq!(mesh.vertices().len(), 4);
//! assert_eq!(mesh.faces().len(), 2);
//! ```

pub mod delaunay;
pub mod error;
pub mod extent;
mod indexed_arena;
pub mod precision;
pub mod primitives;
#[cfg(test)]
mod test_utils;
pub mod trimesh;

pub use crate::delaunay::triangulate_2d;
pub use crate::delaunay::triangulate_2d_with;
pub use crate::delaunay::TriangulateOptions;
pub use crate::error::GeometryError;
pub use crate::precision::DEFAULT_EPSILON;
pub use crate::primitives::rotate;
pub use crate::primitives::Line2d;
pub use crate::primitives::Line3d;
pub use crate::primitives::Point2d;
pub use crate::primitives::Point3d;
pub use crate::primitives::Triangle2d;
pub use crate::primitives::Triangle3d;
pub use crate::trimesh::Edge;
pub use crate::trimesh::Face;
pub use crate::trimesh::Trimesh2d;

pub mod prelude {
    pub use crate::delaunay::triangulate_2d;
    pub use crate::delaunay::triangulate_2d_with;
    pub use crate::delaunay::TriangulateOptions;
    pub use crate::error::GeometryError;
    pub use crate::primitives::Line2d;
    pub use crate::primitives::Line3d;
    pub use crate::primitives::Point2d;
    pub use crate::primitives::Point3d;
    pub use crate::primitives::Triangle2d;
    pub use crate::primitives::Triangle3d;
    pub use crate::trimesh::Trimesh2d;
}
