use super::Line2d;
use super::Line3d;
use super::Point2d;
use super::Point3d;
use crate::precision::determinant3x3;
use crate::precision::DEFAULT_EPSILON;

fn sign(p1: Point2d, p2: Point2d, p3: Point2d) -> f64 {
    (p1.x - p3.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p3.y)
}

/// A triangle in the plane. Vertices may wind either way; predicates do not
/// assume an orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle2d {
    pub p1: Point2d,
    pub p2: Point2d,
    pub p3: Point2d,
}

impl Triangle2d {
    pub fn new(p1: Point2d, p2: Point2d, p3: Point2d) -> Self {
        Self { p1, p2, p3 }
    }

    pub fn vertices(&self) -> [Point2d; 3] {
        [self.p1, self.p2, self.p3]
    }

    /// Boundary segments in order `(p1,p2), (p2,p3), (p3,p1)`.
    pub fn edges(&self) -> [Line2d; 3] {
        [
            Line2d::new(self.p1, self.p2),
            Line2d::new(self.p2, self.p3),
            Line2d::new(self.p3, self.p1),
        ]
    }

    /// Twice the signed area is the cross product of two edge vectors;
    /// positive for counterclockwise winding.
    pub fn signed_area(&self) -> f64 {
        0.5 * (self.p2 - self.p1).perp_dot(self.p3 - self.p1)
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_degenerate(&self) -> bool {
        self.is_degenerate_with_epsilon(DEFAULT_EPSILON)
    }

    pub fn is_degenerate_with_epsilon(&self, epsilon: f64) -> bool {
        super::point::is_collinear_2d_with_epsilon(self.p1, self.p2, self.p3, epsilon)
    }

    pub fn contains_point(&self, point: Point2d) -> bool {
        self.contains_point_with_epsilon(point, DEFAULT_EPSILON)
    }

    /// Closed-triangle membership: boundary points are inside, for either
    /// winding. A point is outside only if the three half-plane tests
    /// disagree beyond `epsilon`.
    pub fn contains_point_with_epsilon(&self, point: Point2d, epsilon: f64) -> bool {
        let d1 = sign(point, self.p1, self.p2);
        let d2 = sign(point, self.p2, self.p3);
        let d3 = sign(point, self.p3, self.p1);

        let has_neg = d1 < -epsilon || d2 < -epsilon || d3 < -epsilon;
        let has_pos = d1 > epsilon || d2 > epsilon || d3 > epsilon;

        !(has_neg && has_pos)
    }

    pub fn barycentric(&self, point: Point2d) -> Option<[f64; 3]> {
        self.barycentric_with_epsilon(point, DEFAULT_EPSILON)
    }

    /// Weights `(w1, w2, w3)` with `w1 + w2 + w3 = 1` expressing `point`
    /// over the vertices. `None` for a degenerate triangle.
    pub fn barycentric_with_epsilon(&self, point: Point2d, epsilon: f64) -> Option<[f64; 3]> {
        let a = self.p2 - self.p1;
        let b = self.p3 - self.p1;
        let denom = a.perp_dot(b);
        if denom.abs() < epsilon {
            return None;
        }
        let c = point - self.p1;
        let r = c.perp_dot(b) / denom;
        let s = a.perp_dot(c) / denom;
        Some([1.0 - r - s, r, s])
    }

    /// Center and radius of the circle through the three vertices.
    /// `None` for a degenerate triangle.
    pub fn circumcircle(&self) -> Option<(Point2d, f64)> {
        let a = self.p1;
        let b = self.p2;
        let c = self.p3;
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        if d.abs() < DEFAULT_EPSILON {
            return None;
        }
        let center = Point2d {
            x: 1.0 / d
                * ((a.x.powi(2) + a.y.powi(2)) * (b.y - c.y)
                    + (b.x.powi(2) + b.y.powi(2)) * (c.y - a.y)
                    + (c.x.powi(2) + c.y.powi(2)) * (a.y - b.y)),
            y: 1.0 / d
                * ((a.x.powi(2) + a.y.powi(2)) * (c.x - b.x)
                    + (b.x.powi(2) + b.y.powi(2)) * (a.x - c.x)
                    + (c.x.powi(2) + c.y.powi(2)) * (b.x - a.x)),
        };
        Some((center, center.distance(a)))
    }

    /// Strict in-circumcircle test via the lifted 3x3 determinant. Points
    /// on the circle (determinant within `epsilon`) count as outside, which
    /// keeps cocircular quadrilaterals from flipping forever.
    pub fn circumcircle_contains(&self, point: Point2d, epsilon: f64) -> bool {
        let a = self.p1;
        let b = self.p2;
        let c = self.p3;
        let d = point;
        let det = determinant3x3([
            [b.x - a.x, b.y - a.y, (b.x - a.x).powi(2) + (b.y - a.y).powi(2)],
            [c.x - a.x, c.y - a.y, (c.x - a.x).powi(2) + (c.y - a.y).powi(2)],
            [d.x - a.x, d.y - a.y, (d.x - a.x).powi(2) + (d.y - a.y).powi(2)],
        ]);
        // The determinant is negative for interior points of a
        // counterclockwise triangle.
        if self.signed_area() >= 0.0 {
            det < -epsilon
        } else {
            det > epsilon
        }
    }

    pub fn min_distance_to_point(&self, point: Point2d) -> f64 {
        if self.contains_point(point) {
            return 0.0;
        }
        self.edges()
            .iter()
            .map(|edge| edge.min_distance_to_point(point))
            .fold(f64::INFINITY, f64::min)
    }

    pub fn min_distance_to_line(&self, line: &Line2d) -> f64 {
        if self.contains_point(line.p1) || self.contains_point(line.p2) {
            return 0.0;
        }
        self.edges()
            .iter()
            .map(|edge| edge.min_distance_to_line(line))
            .fold(f64::INFINITY, f64::min)
    }

    pub fn min_distance_to_triangle(&self, other: &Triangle2d) -> f64 {
        if other.vertices().iter().any(|v| self.contains_point(*v))
            || self.vertices().iter().any(|v| other.contains_point(*v))
        {
            return 0.0;
        }
        self.edges()
            .iter()
            .map(|edge| other.min_distance_to_line(edge))
            .fold(f64::INFINITY, f64::min)
    }
}

/// A triangle embedded in 3D space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle3d {
    pub p1: Point3d,
    pub p2: Point3d,
    pub p3: Point3d,
}

impl Triangle3d {
    pub fn new(p1: Point3d, p2: Point3d, p3: Point3d) -> Self {
        Self { p1, p2, p3 }
    }

    pub fn vertices(&self) -> [Point3d; 3] {
        [self.p1, self.p2, self.p3]
    }

    pub fn edges(&self) -> [Line3d; 3] {
        [
            Line3d::new(self.p1, self.p2),
            Line3d::new(self.p2, self.p3),
            Line3d::new(self.p3, self.p1),
        ]
    }

    pub fn area(&self) -> f64 {
        0.5 * (self.p2 - self.p1).cross(self.p3 - self.p1).length()
    }

    /// Unit normal of the supporting plane, `None` for a degenerate
    /// triangle.
    pub fn normal(&self) -> Option<Point3d> {
        let n = (self.p2 - self.p1).cross(self.p3 - self.p1);
        if n.length_squared() < DEFAULT_EPSILON {
            return None;
        }
        Some(n.normalize())
    }

    pub fn barycentric(&self, point: Point3d) -> Option<[f64; 3]> {
        self.barycentric_with_epsilon(point, DEFAULT_EPSILON)
    }

    /// Barycentric weights of a point with respect to the supporting plane.
    pub fn barycentric_with_epsilon(&self, point: Point3d, epsilon: f64) -> Option<[f64; 3]> {
        let v0 = self.p2 - self.p1;
        let v1 = self.p3 - self.p1;
        let v2 = point - self.p1;
        let d00 = v0.dot(v0);
        let d01 = v0.dot(v1);
        let d11 = v1.dot(v1);
        let d20 = v2.dot(v0);
        let d21 = v2.dot(v1);
        let denom = d00 * d11 - d01 * d01;
        if denom.abs() < epsilon {
            return None;
        }
        let r = (d11 * d20 - d01 * d21) / denom;
        let s = (d00 * d21 - d01 * d20) / denom;
        Some([1.0 - r - s, r, s])
    }

    pub fn project(&self, point: Point3d) -> Option<Point3d> {
        self.project_with_epsilon(point, DEFAULT_EPSILON)
    }

    /// Orthogonal projection onto the triangle's plane, defined only when
    /// the foot lands inside the closed triangle.
    pub fn project_with_epsilon(&self, point: Point3d, epsilon: f64) -> Option<Point3d> {
        let n = (self.p2 - self.p1).cross(self.p3 - self.p1);
        let n_length_squared = n.length_squared();
        if n_length_squared < epsilon {
            return None;
        }
        let projected = point - n * ((point - self.p1).dot(n) / n_length_squared);
        let weights = self.barycentric_with_epsilon(projected, epsilon)?;
        if weights
            .iter()
            .all(|w| (-epsilon..=1.0 + epsilon).contains(w))
        {
            Some(projected)
        } else {
            None
        }
    }

    pub fn intersection(&self, line: &Line3d) -> Option<Point3d> {
        self.intersection_with_epsilon(line, DEFAULT_EPSILON)
    }

    /// Segment-triangle intersection, Moeller-Trumbore style. Boundary hits
    /// count; segments parallel to the plane (in it or not) return `None`.
    pub fn intersection_with_epsilon(&self, line: &Line3d, epsilon: f64) -> Option<Point3d> {
        let e1 = self.p2 - self.p1;
        let e2 = self.p3 - self.p1;
        let d = line.delta();
        let h = d.cross(e2);
        let det = e1.dot(h);
        if det.abs() < epsilon {
            return None;
        }
        let inv = 1.0 / det;
        let s = line.p1 - self.p1;
        let u = inv * s.dot(h);
        if u < -epsilon || u > 1.0 + epsilon {
            return None;
        }
        let q = s.cross(e1);
        let v = inv * d.dot(q);
        if v < -epsilon || u + v > 1.0 + epsilon {
            return None;
        }
        let t = inv * e2.dot(q);
        if t < -epsilon || t > 1.0 + epsilon {
            return None;
        }
        Some(line.p1 + d * t.clamp(0.0, 1.0))
    }

    pub fn intersects(&self, line: &Line3d) -> bool {
        self.intersection(line).is_some()
    }

    /// Point of the closed triangle closest to `p`.
    // This is the method employed by embree
    // (https://github.com/embree/embree/blob/master/tutorials/common/math/closest_point.h)
    pub fn closest_point(&self, p: Point3d) -> Point3d {
        let a = self.p1;
        let b = self.p2;
        let c = self.p3;
        let ab = b - a;
        let ac = c - a;
        let ap = p - a;

        let d1 = ab.dot(ap);
        let d2 = ac.dot(ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return a;
        };

        let bp = p - b;
        let d3 = ab.dot(bp);
        let d4 = ac.dot(bp);
        if d3 >= 0.0 && d4 <= d3 {
            return b;
        };

        let cp = p - c;
        let d5 = ab.dot(cp);
        let d6 = ac.dot(cp);
        if d6 >= 0.0 && d5 <= d6 {
            return c;
        };

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v = d1 / (d1 - d3);
            return a + ab * v;
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let v = d2 / (d2 - d6);
            return a + ac * v;
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let v = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return b + (c - b) * v;
        }

        let denom = 1.0 / (va + vb + vc);
        let v = vb * denom;
        let w = vc * denom;
        a + ab * v + ac * w
    }

    pub fn min_distance_to_point(&self, point: Point3d) -> f64 {
        point.distance(self.closest_point(point))
    }

    pub fn min_distance_to_line(&self, line: &Line3d) -> f64 {
        if self.intersection(line).is_some() {
            return 0.0;
        }
        let endpoints = self
            .min_distance_to_point(line.p1)
            .min(self.min_distance_to_point(line.p2));
        self.edges()
            .iter()
            .map(|edge| edge.min_distance_to_line(line))
            .fold(endpoints, f64::min)
    }

    pub fn min_distance_to_triangle(&self, other: &Triangle3d) -> f64 {
        let to_other = other
            .edges()
            .iter()
            .map(|edge| self.min_distance_to_line(edge))
            .fold(f64::INFINITY, f64::min);
        self.edges()
            .iter()
            .map(|edge| other.min_distance_to_line(edge))
            .fold(to_other, f64::min)
    }
}
