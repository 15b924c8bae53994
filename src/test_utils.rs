use crate::primitives::Point2d;
use crate::primitives::Point3d;

pub fn assert_float_is_close(x: f64, y: f64) {
    assert!((x - y).abs() < 1e-10, "{} {}", x, y)
}

pub fn assert_points_2d_are_close(x: Point2d, y: Point2d) {
    assert!((x - y).length() < 1e-10, "{} {}", x, y)
}

pub fn assert_points_3d_are_close(x: Point3d, y: Point3d) {
    assert!((x - y).length() < 1e-10, "{} {}", x, y)
}
