mod edge_info;
mod point_location;

use std::collections::HashMap;

use derive_more::From;
use derive_more::Into;
use generational_arena::Index;
use log::debug;
use log::warn;
use ordered_float::OrderedFloat;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde::Serialize;

pub use self::edge_info::EdgeInfo;
pub use self::edge_info::Neighbor;
use crate::error::GeometryError;
use crate::extent::Extent;
use crate::indexed_arena::IndexedArena;
use crate::precision::Sign;
use crate::precision::DEFAULT_EPSILON;
use crate::primitives::is_collinear_2d_with_epsilon;
use crate::primitives::lexicographic_cmp_2d;
use crate::primitives::Point2d;
use crate::primitives::Triangle2d;
use crate::trimesh::Trimesh2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From, Into)]
pub struct PointIndex(Index);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From, Into)]
pub struct EdgeIndex(Index);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From, Into)]
pub struct TriangleIndex(Index);

pub type PointList = IndexedArena<PointIndex, Point2d>;
pub type EdgeList = IndexedArena<EdgeIndex, Edge>;
pub type TriangleList = IndexedArena<TriangleIndex, Tri>;

/// A connectivity edge between two triangulation vertices.
#[derive(Clone, Debug)]
pub struct Edge {
    pub p1: PointIndex,
    pub p2: PointIndex,
}

impl Edge {
    pub fn contains_point(&self, point: PointIndex) -> bool {
        self.p1 == point || self.p2 == point
    }
}

/// A triangle of the triangulation. `e1` is the edge opposite `p1` and so
/// on; each `EdgeInfo` also records the neighbor across that edge.
#[derive(Clone, Debug)]
pub struct Tri {
    pub p1: PointIndex,
    pub p2: PointIndex,
    pub p3: PointIndex,
    pub e1: EdgeInfo,
    pub e2: EdgeInfo,
    pub e3: EdgeInfo,
}

impl Tri {
    pub fn points(&self) -> [PointIndex; 3] {
        [self.p1, self.p2, self.p3]
    }

    pub fn edges(&self) -> [EdgeInfo; 3] {
        [self.e1, self.e2, self.e3]
    }

    fn edges_mut(&mut self) -> [&mut EdgeInfo; 3] {
        [&mut self.e1, &mut self.e2, &mut self.e3]
    }

    pub fn contains_point(&self, p: PointIndex) -> bool {
        self.p1 == p || self.p2 == p || self.p3 == p
    }

    fn find_edge(&self, edge: EdgeIndex) -> EdgeInfo {
        self.edges()
            .into_iter()
            .find(|info| info.edge == edge)
            .expect("find_edge called with an edge that is not part of the triangle")
    }

    fn find_edge_mut(&mut self, edge: EdgeIndex) -> &mut EdgeInfo {
        self.edges_mut()
            .into_iter()
            .find(|info| info.edge == edge)
            .expect("find_edge_mut called with an edge that is not part of the triangle")
    }

    fn find_edge_opposite(&self, p: PointIndex) -> EdgeInfo {
        self.edges()
            .into_iter()
            .zip(self.points())
            .find(|(_, point)| *point == p)
            .map(|(info, _)| info)
            .expect("find_edge_opposite called with a point that is not part of the triangle")
    }

    fn find_point_opposite(&self, edge: EdgeIndex) -> PointIndex {
        self.edges()
            .into_iter()
            .zip(self.points())
            .find(|(info, _)| info.edge == edge)
            .map(|(_, point)| point)
            .expect("find_point_opposite called with an edge that is not part of the triangle")
    }
}

#[derive(Clone)]
struct FlipCheck {
    triangle: TriangleIndex,
    edge: EdgeIndex,
}

enum Placement {
    Inside,
    OnEdge(EdgeIndex),
}

pub struct DelaunayTriangulation {
    pub points: PointList,
    pub edges: EdgeList,
    pub triangles: TriangleList,
    pub epsilon: f64,
    to_check: Vec<FlipCheck>,
    last_insertion_triangle: Option<TriangleIndex>,
}

impl DelaunayTriangulation {
    fn new(epsilon: f64) -> Self {
        Self {
            points: PointList::new(),
            edges: EdgeList::new(),
            triangles: TriangleList::new(),
            epsilon,
            to_check: vec![],
            last_insertion_triangle: None,
        }
    }

    /// Starts from a triangle that strictly contains every point that will
    /// ever be inserted.
    pub fn all_encompassing(extent: &Extent, epsilon: f64) -> Self {
        let mut triangulation = Self::new(epsilon);
        triangulation.insert_basic_triangle(super_triangle(extent));
        triangulation
    }

    fn from_basic_triangle(data: Triangle2d, epsilon: f64) -> Self {
        let mut triangulation = Self::new(epsilon);
        triangulation.insert_basic_triangle(data);
        triangulation
    }

    fn insert_basic_triangle(&mut self, data: Triangle2d) {
        let p1 = self.points.insert(data.p1);
        let p2 = self.points.insert(data.p2);
        let p3 = self.points.insert(data.p3);
        let e1 = self.edges.insert(Edge { p1: p2, p2: p3 });
        let e2 = self.edges.insert(Edge { p1: p3, p2: p1 });
        let e3 = self.edges.insert(Edge { p1, p2 });
        let t = self.insert_positively_oriented_tri(Tri {
            p1,
            p2,
            p3,
            e1: EdgeInfo {
                edge: e1,
                opposing: None,
            },
            e2: EdgeInfo {
                edge: e2,
                opposing: None,
            },
            e3: EdgeInfo {
                edge: e3,
                opposing: None,
            },
        });
        self.last_insertion_triangle = Some(t);
    }

    pub fn get_triangle_data(&self, tri: &Tri) -> Triangle2d {
        Triangle2d::new(self.points[tri.p1], self.points[tri.p2], self.points[tri.p3])
    }

    /// Inserts a point, restoring the Delaunay property afterwards. Returns
    /// `None` for points that cannot be placed (outside every triangle, or
    /// coinciding with an existing vertex).
    pub fn insert(&mut self, point: Point2d) -> Option<PointIndex> {
        let t = point_location::find_containing_triangle(self, point)?;
        let placement = self.classify(t, point)?;
        let new_point_index = self.points.insert(point);
        match placement {
            Placement::Inside => self.split(t, new_point_index),
            Placement::OnEdge(edge) => self.split_on_edge(t, edge, new_point_index),
        }
        while let Some(check) = self.to_check.pop() {
            self.flip_check(check);
        }
        Some(new_point_index)
    }

    /// Distinguishes interior points from points lying on one of the
    /// triangle's edges. Two vanishing sign tests mean the point sits on a
    /// vertex, which insertion refuses.
    fn classify(&self, t: TriangleIndex, point: Point2d) -> Option<Placement> {
        let tri = &self.triangles[t];
        let sides = [
            (tri.e3, self.points[tri.p1], self.points[tri.p2]),
            (tri.e1, self.points[tri.p2], self.points[tri.p3]),
            (tri.e2, self.points[tri.p3], self.points[tri.p1]),
        ];
        let mut num_zero = 0;
        let mut on_edge = None;
        for (info, a, b) in sides {
            let val = (b - a).perp_dot(point - a);
            if Sign::of(val, self.epsilon).is_zero() {
                num_zero += 1;
                on_edge = Some(info.edge);
            }
        }
        match num_zero {
            0 => Some(Placement::Inside),
            1 => on_edge.map(Placement::OnEdge),
            _ => None,
        }
    }

    fn make_positively_oriented_tri(&self, tri: Tri) -> Tri {
        let data = Triangle2d::new(self.points[tri.p1], self.points[tri.p2], self.points[tri.p3]);
        if data.signed_area() >= 0.0 {
            tri
        } else {
            Tri {
                p1: tri.p2,
                p2: tri.p1,
                p3: tri.p3,
                e1: tri.e2,
                e2: tri.e1,
                e3: tri.e3,
            }
        }
    }

    fn insert_positively_oriented_tri(&mut self, tri: Tri) -> TriangleIndex {
        debug_assert!(self.edges[tri.e1.edge].contains_point(tri.p2));
        debug_assert!(self.edges[tri.e1.edge].contains_point(tri.p3));
        debug_assert!(self.edges[tri.e2.edge].contains_point(tri.p1));
        debug_assert!(self.edges[tri.e2.edge].contains_point(tri.p3));
        debug_assert!(self.edges[tri.e3.edge].contains_point(tri.p1));
        debug_assert!(self.edges[tri.e3.edge].contains_point(tri.p2));
        let tri = self.make_positively_oriented_tri(tri);
        self.triangles.insert(tri)
    }

    fn set_opposing_in_existing_tri(
        &mut self,
        shared_edge: EdgeInfo,
        new_triangle: TriangleIndex,
        new_point: PointIndex,
        old_triangle: TriangleIndex,
    ) {
        if let Some(opposing) = shared_edge.opposing {
            let existing = &mut self.triangles[opposing.triangle];
            let corresponding = existing.find_edge_mut(shared_edge.edge);
            assert!(corresponding.opposing.map(|opp| opp.triangle) == Some(old_triangle));
            corresponding.opposing = Some(Neighbor {
                triangle: new_triangle,
                point: new_point,
            });
        }
    }

    fn set_opposing_in_new_tri(
        &mut self,
        new_triangle: TriangleIndex,
        edge: EdgeIndex,
        triangle: TriangleIndex,
        point: PointIndex,
    ) {
        self.triangles[new_triangle].find_edge_mut(edge).opposing =
            Some(Neighbor { triangle, point });
    }

    fn make_tri(
        &mut self,
        p: PointIndex,
        p_a: PointIndex,
        p_b: PointIndex,
        e1: EdgeIndex,
        e2: EdgeIndex,
        old_edge: EdgeInfo,
    ) -> TriangleIndex {
        // Leave opposing data of the newly created edges uninitialized for
        // now, since we do not know the indices of the other triangles
        // before we have inserted them.
        self.insert_positively_oriented_tri(Tri {
            p1: p_a,
            p2: p_b,
            p3: p,
            e1: EdgeInfo {
                edge: e1,
                opposing: None,
            },
            e2: EdgeInfo {
                edge: e2,
                opposing: None,
            },
            e3: old_edge,
        })
    }

    /// Replaces the triangle containing `point` with three triangles fanning
    /// out from it.
    fn split(&mut self, old_triangle_index: TriangleIndex, point: PointIndex) {
        let old_tri = self.triangles.remove(old_triangle_index).unwrap();
        let e1 = self.edges.insert(Edge {
            p1: point,
            p2: old_tri.p1,
        });
        let e2 = self.edges.insert(Edge {
            p1: point,
            p2: old_tri.p2,
        });
        let e3 = self.edges.insert(Edge {
            p1: point,
            p2: old_tri.p3,
        });
        let t1 = self.make_tri(point, old_tri.p2, old_tri.p3, e3, e2, old_tri.e1);
        let t2 = self.make_tri(point, old_tri.p3, old_tri.p1, e1, e3, old_tri.e2);
        let t3 = self.make_tri(point, old_tri.p1, old_tri.p2, e2, e1, old_tri.e3);
        self.set_opposing_in_new_tri(t1, e3, t2, old_tri.p1);
        self.set_opposing_in_new_tri(t1, e2, t3, old_tri.p1);
        self.set_opposing_in_new_tri(t2, e3, t1, old_tri.p2);
        self.set_opposing_in_new_tri(t2, e1, t3, old_tri.p2);
        self.set_opposing_in_new_tri(t3, e1, t2, old_tri.p3);
        self.set_opposing_in_new_tri(t3, e2, t1, old_tri.p3);
        self.set_opposing_in_existing_tri(old_tri.e1, t1, point, old_triangle_index);
        self.set_opposing_in_existing_tri(old_tri.e2, t2, point, old_triangle_index);
        self.set_opposing_in_existing_tri(old_tri.e3, t3, point, old_triangle_index);
        for (triangle, info) in [(t1, old_tri.e1), (t2, old_tri.e2), (t3, old_tri.e3)] {
            self.to_check.push(FlipCheck {
                triangle,
                edge: info.edge,
            });
        }
        self.last_insertion_triangle = Some(t1);
    }

    /// Replaces the two triangles sharing the edge `point` lies on with four
    /// triangles (two, if the edge is on the boundary).
    fn split_on_edge(
        &mut self,
        old_triangle_index: TriangleIndex,
        edge_index: EdgeIndex,
        point: PointIndex,
    ) {
        let old_tri = self.triangles.remove(old_triangle_index).unwrap();
        let shared = old_tri.find_edge(edge_index);
        let w = old_tri.find_point_opposite(edge_index);
        let old_edge = self.edges.remove(edge_index).unwrap();
        let (u, v) = (old_edge.p1, old_edge.p2);
        let eu = self.edges.insert(Edge { p1: point, p2: u });
        let ev = self.edges.insert(Edge { p1: point, p2: v });
        let ew = self.edges.insert(Edge { p1: point, p2: w });
        let near_u = old_tri.find_edge_opposite(v);
        let near_v = old_tri.find_edge_opposite(u);
        let t1 = self.insert_positively_oriented_tri(Tri {
            p1: u,
            p2: w,
            p3: point,
            e1: EdgeInfo {
                edge: ew,
                opposing: None,
            },
            e2: EdgeInfo {
                edge: eu,
                opposing: None,
            },
            e3: near_u,
        });
        let t2 = self.insert_positively_oriented_tri(Tri {
            p1: v,
            p2: w,
            p3: point,
            e1: EdgeInfo {
                edge: ew,
                opposing: None,
            },
            e2: EdgeInfo {
                edge: ev,
                opposing: None,
            },
            e3: near_v,
        });
        self.set_opposing_in_new_tri(t1, ew, t2, v);
        self.set_opposing_in_new_tri(t2, ew, t1, u);
        self.set_opposing_in_existing_tri(near_u, t1, point, old_triangle_index);
        self.set_opposing_in_existing_tri(near_v, t2, point, old_triangle_index);
        self.to_check.push(FlipCheck {
            triangle: t1,
            edge: near_u.edge,
        });
        self.to_check.push(FlipCheck {
            triangle: t2,
            edge: near_v.edge,
        });
        if let Some(opposing) = shared.opposing {
            let other_tri = self.triangles.remove(opposing.triangle).unwrap();
            let x = opposing.point;
            let ex = self.edges.insert(Edge { p1: point, p2: x });
            let far_u = other_tri.find_edge_opposite(v);
            let far_v = other_tri.find_edge_opposite(u);
            let t3 = self.insert_positively_oriented_tri(Tri {
                p1: u,
                p2: x,
                p3: point,
                e1: EdgeInfo {
                    edge: ex,
                    opposing: None,
                },
                e2: EdgeInfo {
                    edge: eu,
                    opposing: None,
                },
                e3: far_u,
            });
            let t4 = self.insert_positively_oriented_tri(Tri {
                p1: v,
                p2: x,
                p3: point,
                e1: EdgeInfo {
                    edge: ex,
                    opposing: None,
                },
                e2: EdgeInfo {
                    edge: ev,
                    opposing: None,
                },
                e3: far_v,
            });
            self.set_opposing_in_new_tri(t3, ex, t4, v);
            self.set_opposing_in_new_tri(t4, ex, t3, u);
            self.set_opposing_in_new_tri(t1, eu, t3, x);
            self.set_opposing_in_new_tri(t3, eu, t1, w);
            self.set_opposing_in_new_tri(t2, ev, t4, x);
            self.set_opposing_in_new_tri(t4, ev, t2, w);
            self.set_opposing_in_existing_tri(far_u, t3, point, opposing.triangle);
            self.set_opposing_in_existing_tri(far_v, t4, point, opposing.triangle);
            self.to_check.push(FlipCheck {
                triangle: t3,
                edge: far_u.edge,
            });
            self.to_check.push(FlipCheck {
                triangle: t4,
                edge: far_v.edge,
            });
        }
        self.last_insertion_triangle = Some(t1);
    }

    /// Tests the popped edge and flips it when the neighbor's far vertex
    /// invades the circumcircle. Entries whose triangle was already replaced
    /// by an earlier flip are stale and skipped.
    fn flip_check(&mut self, check: FlipCheck) {
        let Some(tri) = self.triangles.get(check.triangle) else {
            return;
        };
        let Some(opposing) = tri.find_edge(check.edge).opposing else {
            return;
        };
        let data = self.get_triangle_data(tri);
        if data.circumcircle_contains(self.points[opposing.point], self.epsilon) {
            self.flip(check);
        }
    }

    /// Replaces the diagonal of the quadrilateral formed by the triangle and
    /// its neighbor across the edge with the other diagonal.
    fn flip(&mut self, check: FlipCheck) {
        let old_tri = self.triangles.remove(check.triangle).unwrap();
        let old_edge = self.edges.remove(check.edge).unwrap();
        let opposing = old_tri.find_edge(check.edge).opposing.unwrap();
        let opposing_old_tri = self.triangles.remove(opposing.triangle).unwrap();
        let opposing_point = opposing.point;
        let check_point = old_tri.find_point_opposite(check.edge);
        let new_edge = self.edges.insert(Edge {
            p1: check_point,
            p2: opposing_point,
        });

        let e1_far = opposing_old_tri.find_edge_opposite(old_edge.p2);
        let e1_near = old_tri.find_edge_opposite(old_edge.p2);
        let e2_far = opposing_old_tri.find_edge_opposite(old_edge.p1);
        let e2_near = old_tri.find_edge_opposite(old_edge.p1);

        let t1 = self.insert_positively_oriented_tri(Tri {
            p1: old_edge.p1,
            p2: check_point,
            p3: opposing_point,
            // Leave uninitialized for now
            e1: EdgeInfo {
                edge: new_edge,
                opposing: None,
            },
            e2: e1_far,
            e3: e1_near,
        });
        let t2 = self.insert_positively_oriented_tri(Tri {
            p1: old_edge.p2,
            p2: check_point,
            p3: opposing_point,
            // Leave uninitialized for now
            e1: EdgeInfo {
                edge: new_edge,
                opposing: None,
            },
            e2: e2_far,
            e3: e2_near,
        });
        // Set previously uninitialized opposing data, now that we know the
        // triangle indices
        self.triangles[t1].find_edge_mut(new_edge).opposing = Some(Neighbor {
            triangle: t2,
            point: old_edge.p2,
        });
        self.triangles[t2].find_edge_mut(new_edge).opposing = Some(Neighbor {
            triangle: t1,
            point: old_edge.p1,
        });
        self.set_opposing_in_existing_tri(e1_far, t1, check_point, opposing.triangle);
        self.set_opposing_in_existing_tri(e1_near, t1, opposing_point, check.triangle);
        self.set_opposing_in_existing_tri(e2_far, t2, check_point, opposing.triangle);
        self.set_opposing_in_existing_tri(e2_near, t2, opposing_point, check.triangle);
        // Now that we have flipped this edge, we have to check the far edges
        // of the flipped quadrilateral as well
        self.to_check.push(FlipCheck {
            triangle: t1,
            edge: e1_far.edge,
        });
        self.to_check.push(FlipCheck {
            triangle: t2,
            edge: e2_far.edge,
        });
    }
}

fn super_triangle(extent: &Extent) -> Triangle2d {
    // A margin of twice the larger box extent for numerical safety
    let margin = 2.0 * extent.max_side_length();
    let lower = extent.min - Point2d::splat(margin);
    let upper = extent.max + Point2d::splat(margin);
    let span = (upper.x - lower.x) + (upper.y - lower.y);
    Triangle2d::new(
        lower,
        Point2d::new(lower.x + 2.0 * span, lower.y),
        Point2d::new(lower.x, lower.y + 2.0 * span),
    )
}

/// Options for [`triangulate_2d_with`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriangulateOptions {
    /// Randomize the insertion order. Keeps the expected runtime at
    /// `O(n log n)`; disable for deterministic face ordering.
    pub shuffle: bool,
    /// Tolerance for degeneracy and on-circle decisions.
    pub epsilon: f64,
}

impl Default for TriangulateOptions {
    fn default() -> Self {
        Self {
            shuffle: true,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// Delaunay triangulation of a planar point set with default options.
///
/// The output mesh's vertices are the deduplicated input points in input
/// order. Fewer than three distinct points, or a fully collinear set,
/// produce a mesh without faces.
pub fn triangulate_2d(points: &[Point2d]) -> Result<Trimesh2d, GeometryError> {
    triangulate_2d_with(points, TriangulateOptions::default())
}

pub fn triangulate_2d_with(
    points: &[Point2d],
    options: TriangulateOptions,
) -> Result<Trimesh2d, GeometryError> {
    let TriangulateOptions { shuffle, epsilon } = options;
    if epsilon < 0.0 {
        return Err(GeometryError::NegativeEpsilon(epsilon));
    }
    if points.iter().any(|p| !p.is_finite()) {
        return Err(GeometryError::NonFiniteCoordinate);
    }
    let points = dedup_points(points, epsilon);
    let mut mesh = Trimesh2d::new();
    for p in &points {
        mesh.add_vertex(*p);
    }
    if points.len() < 3 {
        warn!(
            "not enough distinct points to triangulate ({}), returning a mesh without faces",
            points.len()
        );
        return Ok(mesh);
    }
    if all_collinear(&points, epsilon) {
        warn!("all input points are collinear, returning a mesh without faces");
        return Ok(mesh);
    }
    let extent =
        Extent::from_points(points.iter().copied()).expect("non-empty point set has an extent");
    let mut triangulation = DelaunayTriangulation::all_encompassing(&extent, epsilon);
    let mut order: Vec<usize> = (0..points.len()).collect();
    if shuffle {
        order.shuffle(&mut rand::thread_rng());
    }
    let mut original_index = HashMap::new();
    for i in order {
        match triangulation.insert(points[i]) {
            Some(index) => {
                original_index.insert(index, i);
            }
            None => warn!("could not place point {}, skipping it", points[i]),
        }
    }
    debug!(
        "triangulated {} points into {} triangles (before cleanup)",
        points.len(),
        triangulation.triangles.len()
    );
    // Faces incident to a super-triangle vertex have no entry in the index
    // map and are dropped here.
    for (_, tri) in triangulation.triangles.iter() {
        let [a, b, c] = tri.points();
        let (Some(&a), Some(&b), Some(&c)) = (
            original_index.get(&a),
            original_index.get(&b),
            original_index.get(&c),
        ) else {
            continue;
        };
        mesh.add_face(a, b, c)?;
    }
    Ok(mesh)
}

/// Drops every point within `epsilon` of an earlier point, keeping first
/// occurrences in input order. The sweep only compares points whose `x`
/// coordinates are within `epsilon` of each other.
fn dedup_points(points: &[Point2d], epsilon: f64) -> Vec<Point2d> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|a, b| lexicographic_cmp_2d(points[*a], points[*b]));
    let mut removed = vec![false; points.len()];
    for (rank, &i) in order.iter().enumerate() {
        if removed[i] {
            continue;
        }
        for &j in &order[rank + 1..] {
            if points[j].x - points[i].x > epsilon {
                break;
            }
            if removed[j] || points[i].distance(points[j]) > epsilon {
                continue;
            }
            if j < i {
                removed[i] = true;
                break;
            } else {
                removed[j] = true;
            }
        }
    }
    points
        .iter()
        .enumerate()
        .filter(|(i, _)| !removed[*i])
        .map(|(_, p)| *p)
        .collect()
}

fn all_collinear(points: &[Point2d], epsilon: f64) -> bool {
    let a = points[0];
    let b = points
        .iter()
        .copied()
        .max_by_key(|p| OrderedFloat(a.distance_squared(*p)))
        .expect("non-empty point set");
    if a.distance(b) <= epsilon {
        return true;
    }
    points
        .iter()
        .all(|p| is_collinear_2d_with_epsilon(a, b, *p, epsilon))
}
