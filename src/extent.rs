use crate::primitives::Point2d;

/// Axis-aligned bounding box of a 2D point cloud.
#[derive(Clone, Copy, Debug)]
pub struct Extent {
    pub min: Point2d,
    pub max: Point2d,
}

impl Extent {
    pub fn from_points(mut points: impl Iterator<Item = Point2d>) -> Option<Self> {
        let first = points.next()?;
        let mut min = first;
        let mut max = first;
        for p in points {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Extent { min, max })
    }

    pub fn side_lengths(&self) -> Point2d {
        self.max - self.min
    }

    pub fn max_side_length(&self) -> f64 {
        self.side_lengths().max_element()
    }
}
