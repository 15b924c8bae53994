use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use crate::precision::DEFAULT_EPSILON;

pub type Point2d = glam::DVec2;
pub type Point3d = glam::DVec3;

/// Rotates a point counterclockwise around the origin.
pub fn rotate(p: Point2d, angle: f64) -> Point2d {
    let (sin, cos) = angle.sin_cos();
    Point2d::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
}

/// Lexicographic order (`x`, then `y`). Total because all coordinates are
/// finite by the crate's domain checks.
pub fn lexicographic_cmp_2d(a: Point2d, b: Point2d) -> Ordering {
    (OrderedFloat(a.x), OrderedFloat(a.y)).cmp(&(OrderedFloat(b.x), OrderedFloat(b.y)))
}

/// Lexicographic order (`x`, then `y`, then `z`).
pub fn lexicographic_cmp_3d(a: Point3d, b: Point3d) -> Ordering {
    (OrderedFloat(a.x), OrderedFloat(a.y), OrderedFloat(a.z)).cmp(&(
        OrderedFloat(b.x),
        OrderedFloat(b.y),
        OrderedFloat(b.z),
    ))
}

pub fn sort_points_2d(points: &mut [Point2d]) {
    points.sort_by(|a, b| lexicographic_cmp_2d(*a, *b));
}

pub fn is_collinear_2d(a: Point2d, b: Point2d, c: Point2d) -> bool {
    is_collinear_2d_with_epsilon(a, b, c, DEFAULT_EPSILON)
}

/// Whether `c` lies within `epsilon` of the infinite line through `a` and
/// `b`. A degenerate `ab` reduces to a distance check against the point.
pub fn is_collinear_2d_with_epsilon(a: Point2d, b: Point2d, c: Point2d, epsilon: f64) -> bool {
    let ab = b - a;
    let length = ab.length();
    if length < epsilon {
        return a.distance(c) <= epsilon;
    }
    (ab.perp_dot(c - a) / length).abs() <= epsilon
}

pub fn is_collinear_3d(a: Point3d, b: Point3d, c: Point3d) -> bool {
    is_collinear_3d_with_epsilon(a, b, c, DEFAULT_EPSILON)
}

pub fn is_collinear_3d_with_epsilon(a: Point3d, b: Point3d, c: Point3d, epsilon: f64) -> bool {
    let ab = b - a;
    let length = ab.length();
    if length < epsilon {
        return a.distance(c) <= epsilon;
    }
    (ab.cross(c - a).length() / length) <= epsilon
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::is_collinear_2d;
    use super::is_collinear_3d;
    use super::lexicographic_cmp_2d;
    use super::rotate;
    use super::sort_points_2d;
    use super::Point2d;
    use super::Point3d;
    use crate::test_utils::assert_points_2d_are_close;

    #[test]
    fn rotate_quarter_turns() {
        let p = Point2d::new(1.0, 0.0);
        assert_points_2d_are_close(rotate(p, PI / 2.0), Point2d::new(0.0, 1.0));
        assert_points_2d_are_close(rotate(p, PI), Point2d::new(-1.0, 0.0));
        assert_points_2d_are_close(rotate(p, 3.0 * PI / 2.0), Point2d::new(0.0, -1.0));
        assert_points_2d_are_close(rotate(p, 2.0 * PI), p);
    }

    #[test]
    fn rotate_is_periodic() {
        let p = Point2d::new(0.3, -1.7);
        for i in 0..8 {
            let angle = 0.25 * PI * i as f64;
            assert_points_2d_are_close(rotate(p, angle + 2.0 * PI), rotate(p, angle));
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point2d::new(0.0, 0.0);
        let b = Point2d::new(1.0, 1.0);
        assert_eq!(a.distance(b), b.distance(a));
        assert_eq!(a.distance(b), 2.0f64.sqrt());
        let a = Point3d::new(0.0, 0.0, 0.0);
        let b = Point3d::new(1.0, 1.0, 1.0);
        assert_eq!(a.distance(b), b.distance(a));
        assert_eq!(a.distance(b), 3.0f64.sqrt());
    }

    #[test]
    fn collinearity() {
        assert!(is_collinear_2d(
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 1.0),
            Point2d::new(2.0, 2.0),
        ));
        assert!(!is_collinear_2d(
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 1.0),
            Point2d::new(2.0, 2.1),
        ));
        assert!(is_collinear_3d(
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 1.0, 1.0),
            Point3d::new(-3.0, -3.0, -3.0),
        ));
        assert!(!is_collinear_3d(
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 1.0, 1.0),
            Point3d::new(1.0, 1.0, 2.0),
        ));
    }

    #[test]
    fn lexicographic_sorting() {
        let mut points = vec![
            Point2d::new(1.0, 0.0),
            Point2d::new(0.0, 1.0),
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, -1.0),
        ];
        sort_points_2d(&mut points);
        assert_eq!(
            points,
            vec![
                Point2d::new(0.0, 0.0),
                Point2d::new(0.0, 1.0),
                Point2d::new(1.0, -1.0),
                Point2d::new(1.0, 0.0),
            ]
        );
        assert_eq!(
            lexicographic_cmp_2d(Point2d::new(0.0, 5.0), Point2d::new(0.0, 5.0)),
            std::cmp::Ordering::Equal
        );
    }
}
