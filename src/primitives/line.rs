use super::Point2d;
use super::Point3d;
use crate::precision::DEFAULT_EPSILON;

/// A closed 2D segment between two endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line2d {
    pub p1: Point2d,
    pub p2: Point2d,
}

impl Line2d {
    pub fn new(p1: Point2d, p2: Point2d) -> Self {
        Self { p1, p2 }
    }

    pub fn reversed(&self) -> Self {
        Self {
            p1: self.p2,
            p2: self.p1,
        }
    }

    pub fn delta(&self) -> Point2d {
        self.p2 - self.p1
    }

    pub fn length(&self) -> f64 {
        self.delta().length()
    }

    pub fn project(&self, point: Point2d) -> Option<Point2d> {
        self.project_with_epsilon(point, DEFAULT_EPSILON)
    }

    /// Foot of the perpendicular from `point`, if it falls within the
    /// segment. The parameter window is endpoint-inclusive: a foot at
    /// `t = 0` or `t = 1` returns that endpoint.
    pub fn project_with_epsilon(&self, point: Point2d, epsilon: f64) -> Option<Point2d> {
        let d = self.delta();
        let length_squared = d.length_squared();
        if length_squared < epsilon {
            return None;
        }
        let t = (point - self.p1).dot(d) / length_squared;
        if t < -epsilon || t > 1.0 + epsilon {
            return None;
        }
        Some(self.p1 + d * t.clamp(0.0, 1.0))
    }

    /// Point of the closed segment closest to `point`.
    pub fn closest_point(&self, point: Point2d) -> Point2d {
        let d = self.delta();
        let length_squared = d.length_squared();
        if length_squared == 0.0 {
            return self.p1;
        }
        let t = ((point - self.p1).dot(d) / length_squared).clamp(0.0, 1.0);
        self.p1 + d * t
    }

    pub fn intersection(&self, other: &Line2d) -> Option<Point2d> {
        self.intersection_with_epsilon(other, DEFAULT_EPSILON)
    }

    /// Proper segment-segment intersection. Parallel and collinear pairs
    /// have no unique answer and return `None`; segments touching at an
    /// endpoint return that endpoint.
    pub fn intersection_with_epsilon(&self, other: &Line2d, epsilon: f64) -> Option<Point2d> {
        let d1 = self.delta();
        let d2 = other.delta();
        let denom = d1.perp_dot(d2);
        if denom.abs() < epsilon {
            return None;
        }
        let r = other.p1 - self.p1;
        let s = r.perp_dot(d2) / denom;
        let t = r.perp_dot(d1) / denom;
        if s < -epsilon || s > 1.0 + epsilon || t < -epsilon || t > 1.0 + epsilon {
            return None;
        }
        Some(self.p1 + d1 * s.clamp(0.0, 1.0))
    }

    pub fn intersects(&self, other: &Line2d) -> bool {
        self.intersection(other).is_some()
    }

    pub fn min_distance_to_point(&self, point: Point2d) -> f64 {
        point.distance(self.closest_point(point))
    }

    pub fn min_distance_to_line(&self, other: &Line2d) -> f64 {
        if self.intersection(other).is_some() {
            return 0.0;
        }
        self.min_distance_to_point(other.p1)
            .min(self.min_distance_to_point(other.p2))
            .min(other.min_distance_to_point(self.p1))
            .min(other.min_distance_to_point(self.p2))
    }
}

/// A closed 3D segment between two endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line3d {
    pub p1: Point3d,
    pub p2: Point3d,
}

impl Line3d {
    pub fn new(p1: Point3d, p2: Point3d) -> Self {
        Self { p1, p2 }
    }

    pub fn reversed(&self) -> Self {
        Self {
            p1: self.p2,
            p2: self.p1,
        }
    }

    pub fn delta(&self) -> Point3d {
        self.p2 - self.p1
    }

    pub fn length(&self) -> f64 {
        self.delta().length()
    }

    pub fn project(&self, point: Point3d) -> Option<Point3d> {
        self.project_with_epsilon(point, DEFAULT_EPSILON)
    }

    pub fn project_with_epsilon(&self, point: Point3d, epsilon: f64) -> Option<Point3d> {
        let d = self.delta();
        let length_squared = d.length_squared();
        if length_squared < epsilon {
            return None;
        }
        let t = (point - self.p1).dot(d) / length_squared;
        if t < -epsilon || t > 1.0 + epsilon {
            return None;
        }
        Some(self.p1 + d * t.clamp(0.0, 1.0))
    }

    pub fn closest_point(&self, point: Point3d) -> Point3d {
        let d = self.delta();
        let length_squared = d.length_squared();
        if length_squared == 0.0 {
            return self.p1;
        }
        let t = ((point - self.p1).dot(d) / length_squared).clamp(0.0, 1.0);
        self.p1 + d * t
    }

    pub fn nearest_points(&self, other: &Line3d) -> Option<(Point3d, Point3d)> {
        self.nearest_points_with_epsilon(other, DEFAULT_EPSILON)
    }

    /// Closest pair of points on two segments, solved via the two-parameter
    /// linear system and re-optimized over the boundary when the unclamped
    /// solution leaves the unit square. Parallel segments (collinear and
    /// degenerate ones included) return `None`.
    pub fn nearest_points_with_epsilon(
        &self,
        other: &Line3d,
        epsilon: f64,
    ) -> Option<(Point3d, Point3d)> {
        let d1 = self.delta();
        let d2 = other.delta();
        let r = self.p1 - other.p1;
        let a = d1.dot(d1);
        let e = d2.dot(d2);
        let b = d1.dot(d2);
        let c = d1.dot(r);
        let f = d2.dot(r);
        let denom = a * e - b * b;
        if denom.abs() < epsilon {
            return None;
        }
        let mut s = ((b * f - c * e) / denom).clamp(0.0, 1.0);
        let t = (b * s + f) / e;
        if t < 0.0 {
            s = (-c / a).clamp(0.0, 1.0);
            return Some((self.p1 + d1 * s, other.p1));
        }
        if t > 1.0 {
            s = ((b - c) / a).clamp(0.0, 1.0);
            return Some((self.p1 + d1 * s, other.p2));
        }
        Some((self.p1 + d1 * s, other.p1 + d2 * t))
    }

    pub fn min_distance_to_point(&self, point: Point3d) -> f64 {
        point.distance(self.closest_point(point))
    }

    pub fn min_distance_to_line(&self, other: &Line3d) -> f64 {
        if let Some((q1, q2)) = self.nearest_points(other) {
            return q1.distance(q2);
        }
        self.min_distance_to_point(other.p1)
            .min(self.min_distance_to_point(other.p2))
            .min(other.min_distance_to_point(self.p1))
            .min(other.min_distance_to_point(self.p2))
    }
}

#[cfg(test)]
mod tests {
    use super::Line2d;
    use super::Line3d;
    use super::Point2d;
    use super::Point3d;
    use crate::test_utils::assert_float_is_close;
    use crate::test_utils::assert_points_2d_are_close;
    use crate::test_utils::assert_points_3d_are_close;

    fn line_2d(p1: (f64, f64), p2: (f64, f64)) -> Line2d {
        Line2d::new(Point2d::new(p1.0, p1.1), Point2d::new(p2.0, p2.1))
    }

    fn line_3d(p1: (f64, f64, f64), p2: (f64, f64, f64)) -> Line3d {
        Line3d::new(
            Point3d::new(p1.0, p1.1, p1.2),
            Point3d::new(p2.0, p2.1, p2.2),
        )
    }

    #[test]
    fn project_point_to_line_2d() {
        let cases = [
            ((0.0, 0.0), ((0.0, 0.0), (1.0, 0.0)), Some((0.0, 0.0))),
            ((0.0, 0.0), ((0.0, 0.0), (0.0, 1.0)), Some((0.0, 0.0))),
            ((0.0, 0.0), ((1.0, 0.0), (2.0, 0.0)), None),
            ((0.0, 0.0), ((1.0, 0.0), (0.0, 1.0)), Some((0.5, 0.5))),
        ];
        for (point, (p1, p2), expected) in cases {
            let result = line_2d(p1, p2).project(Point2d::new(point.0, point.1));
            match expected {
                None => assert_eq!(result, None),
                Some(q) => {
                    assert_points_2d_are_close(result.unwrap(), Point2d::new(q.0, q.1));
                }
            }
        }
    }

    #[test]
    fn project_point_to_degenerate_line_is_undefined() {
        let line = line_2d((1.0, 1.0), (1.0, 1.0));
        assert_eq!(line.project(Point2d::new(1.0, 1.0)), None);
    }

    #[test]
    fn project_point_to_line_3d() {
        let cases = [
            ((0.0, 0.0, 0.0), ((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)), Some((0.0, 0.0, 0.0))),
            ((0.0, 0.0, 0.0), ((0.0, 0.0, 0.0), (0.0, 1.0, 0.0)), Some((0.0, 0.0, 0.0))),
            ((0.0, 0.0, 0.0), ((0.0, 0.0, 0.0), (0.0, 0.0, 1.0)), Some((0.0, 0.0, 0.0))),
            ((0.0, 0.0, 0.0), ((1.0, 0.0, 0.0), (2.0, 0.0, 0.0)), None),
            ((0.0, 0.0, 0.0), ((1.0, 0.0, 0.0), (0.0, 1.0, 0.0)), Some((0.5, 0.5, 0.0))),
        ];
        for (point, (p1, p2), expected) in cases {
            let result = line_3d(p1, p2).project(Point3d::new(point.0, point.1, point.2));
            match expected {
                None => assert_eq!(result, None),
                Some(q) => {
                    assert_points_3d_are_close(result.unwrap(), Point3d::new(q.0, q.1, q.2));
                }
            }
        }
    }

    #[test]
    fn line_line_intersection_2d() {
        let cases = [
            // Intersect, but not within the first segment
            (((0.0, 0.0), (1.0, 0.0)), ((0.0, 1.0), (0.0, 2.0)), None),
            // Parallel
            (((0.0, 0.0), (1.0, 1.0)), ((1.0, 1.0), (2.0, 2.0)), None),
            // Parallel, overlapping
            (((0.0, 0.0), (1.0, 1.0)), ((-1.0, -1.0), (2.0, 2.0)), None),
            // Proper crossing
            (((0.0, 0.0), (1.0, 1.0)), ((0.0, 1.0), (1.0, 0.0)), Some((0.5, 0.5))),
            // Crossing outside the segments
            (((0.0, 0.0), (-1.0, -1.0)), ((0.0, 1.0), (1.0, 0.0)), None),
        ];
        for (l1, l2, expected) in cases {
            let result = line_2d(l1.0, l1.1).intersection(&line_2d(l2.0, l2.1));
            match expected {
                None => assert_eq!(result, None),
                Some(q) => {
                    assert_points_2d_are_close(result.unwrap(), Point2d::new(q.0, q.1));
                }
            }
        }
    }

    #[test]
    fn touching_segments_intersect_at_the_shared_endpoint() {
        let l1 = line_2d((0.0, 0.0), (1.0, 1.0));
        let l2 = line_2d((1.0, 1.0), (2.0, 0.0));
        assert_points_2d_are_close(l1.intersection(&l2).unwrap(), Point2d::new(1.0, 1.0));
        assert!(l1.intersects(&l2));
    }

    #[test]
    fn line_line_nearest_points_3d() {
        let l1 = line_3d((0.0, 0.0, 0.0), (0.0, 1.0, 1.0));
        let l2 = line_3d((0.0, 0.0, 1.0), (0.0, 1.0, 0.0));
        let (q1, q2) = l1.nearest_points(&l2).unwrap();
        assert_points_3d_are_close(q1, Point3d::new(0.0, 0.5, 0.5));
        assert_points_3d_are_close(q2, Point3d::new(0.0, 0.5, 0.5));

        let l1 = line_3d((0.0, 0.0, 0.0), (1.0, 1.0, 1.0));
        let l2 = line_3d((0.0, 0.0, 1.0), (1.0, 1.0, 0.0));
        let (q1, q2) = l1.nearest_points(&l2).unwrap();
        assert_points_3d_are_close(q1, Point3d::new(0.5, 0.5, 0.5));
        assert_points_3d_are_close(q2, Point3d::new(0.5, 0.5, 0.5));

        // Parallel
        let l1 = line_3d((0.0, 0.0, 0.0), (1.0, 1.0, 1.0));
        let l2 = line_3d((0.0, 0.0, 1.0), (1.0, 1.0, 2.0));
        assert_eq!(l1.nearest_points(&l2), None);
    }

    #[test]
    fn point_to_line_min_distance_2d() {
        let cases = [
            ((0.0, 0.0), ((0.0, 0.0), (1.0, 0.0)), 0.0),
            ((0.0, 0.0), ((0.0, 0.0), (0.0, 1.0)), 0.0),
            ((0.0, 0.0), ((1.0, 0.0), (2.0, 0.0)), 1.0),
            ((0.0, 0.0), ((0.0, 1.0), (1.0, 1.0)), 1.0),
        ];
        for (point, (p1, p2), expected) in cases {
            let p = Point2d::new(point.0, point.1);
            let line = line_2d(p1, p2);
            assert_float_is_close(line.min_distance_to_point(p), expected);
            assert_float_is_close(line.reversed().min_distance_to_point(p), expected);
        }
    }

    #[test]
    fn line_to_line_min_distance_2d() {
        let cases = [
            (((0.0, 0.0), (1.0, 0.0)), ((0.0, 0.0), (1.0, 0.0)), 0.0),
            (((0.0, 0.0), (1.0, 0.0)), ((0.0, 0.0), (0.0, 1.0)), 0.0),
            (((0.0, 0.0), (1.0, 0.0)), ((1.0, 0.0), (2.0, 0.0)), 0.0),
            (((0.0, 0.0), (1.0, 0.0)), ((0.0, 1.0), (1.0, 1.0)), 1.0),
            (((0.0, 0.0), (1.0, 0.0)), ((0.0, 1.0), (0.0, 2.0)), 1.0),
            (((0.0, 0.0), (1.0, 0.0)), ((0.0, 2.0), (0.0, 3.0)), 2.0),
            (((0.0, 0.0), (0.0, 1.0)), ((1.0, 2.0), (1.0, 3.0)), 2.0f64.sqrt()),
        ];
        for (l1, l2, expected) in cases {
            let l1 = line_2d(l1.0, l1.1);
            let l2 = line_2d(l2.0, l2.1);
            assert_float_is_close(l1.min_distance_to_line(&l2), expected);
            assert_float_is_close(l1.min_distance_to_line(&l2.reversed()), expected);
            assert_float_is_close(l1.reversed().min_distance_to_line(&l2), expected);
            assert_float_is_close(l2.min_distance_to_line(&l1), expected);
        }
    }

    #[test]
    fn point_to_line_min_distance_3d() {
        let cases = [
            ((0.0, 0.0, 0.0), ((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)), 0.0),
            ((0.0, 0.0, 0.0), ((0.0, 0.0, 0.0), (0.0, 1.0, 0.0)), 0.0),
            ((0.0, 0.0, 0.0), ((0.0, 0.0, 0.0), (0.0, 0.0, 1.0)), 0.0),
            ((0.0, 0.0, 0.0), ((1.0, 0.0, 0.0), (2.0, 0.0, 0.0)), 1.0),
            ((0.0, 0.0, 0.0), ((0.0, 1.0, 0.0), (1.0, 1.0, 0.0)), 1.0),
            ((0.0, 0.0, 0.0), ((0.0, 0.0, -1.0), (0.0, 0.0, 1.0)), 0.0),
        ];
        for (point, (p1, p2), expected) in cases {
            let p = Point3d::new(point.0, point.1, point.2);
            let line = line_3d(p1, p2);
            assert_float_is_close(line.min_distance_to_point(p), expected);
            assert_float_is_close(line.reversed().min_distance_to_point(p), expected);
        }
    }

    #[test]
    fn line_to_line_min_distance_3d() {
        let cases = [
            (((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)), ((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)), 0.0),
            (((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)), ((0.0, 0.0, 0.0), (0.0, 1.0, 0.0)), 0.0),
            (((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)), ((0.0, 0.0, 0.0), (0.0, 0.0, 1.0)), 0.0),
            (((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)), ((1.0, 0.0, 1.0), (2.0, 0.0, 1.0)), 1.0),
            (((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)), ((0.0, 1.0, 0.0), (1.0, 1.0, 0.0)), 1.0),
            (((0.0, 0.0, -1.0), (0.0, 0.0, 1.0)), ((-1.0, 1.0, 0.0), (1.0, 1.0, 0.0)), 1.0),
        ];
        for (l1, l2, expected) in cases {
            let l1 = line_3d(l1.0, l1.1);
            let l2 = line_3d(l2.0, l2.1);
            assert_float_is_close(l1.min_distance_to_line(&l2), expected);
            assert_float_is_close(l1.min_distance_to_line(&l2.reversed()), expected);
            assert_float_is_close(l1.reversed().min_distance_to_line(&l2), expected);
            assert_float_is_close(
                l1.reversed().min_distance_to_line(&l2.reversed()),
                expected,
            );
        }
    }
}
