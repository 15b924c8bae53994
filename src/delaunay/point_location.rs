use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::collections::HashSet;

use ordered_float::OrderedFloat;

use super::DelaunayTriangulation;
use super::Tri;
use super::TriangleIndex;
use crate::primitives::Point2d;
use crate::primitives::Triangle2d;

#[derive(PartialEq, Eq)]
struct CheckData {
    heuristic_distance: OrderedFloat<f64>,
    triangle: TriangleIndex,
}

impl PartialOrd for CheckData {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CheckData {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse here because the binary heap is a max heap
        self.heuristic_distance
            .cmp(&other.heuristic_distance)
            .reverse()
    }
}

/// Signed walking distance from `point` to the triangle: positive outside,
/// decreasing towards the interior. Only the ordering matters; it steers
/// the walk towards triangles closer to the query point.
fn walk_distance(triangle: &Triangle2d, point: Point2d) -> f64 {
    let distance_to_side = |pa: Point2d, pb: Point2d| {
        ((pb.y - pa.y) * point.x - (pb.x - pa.x) * point.y + pb.x * pa.y - pa.x * pb.y)
            / pa.distance(pb)
    };

    let d1 = distance_to_side(triangle.p1, triangle.p2);
    let d2 = distance_to_side(triangle.p2, triangle.p3);
    let d3 = distance_to_side(triangle.p3, triangle.p1);

    d1.max(d2).max(d3)
}

fn triangle_contains_point(t: &DelaunayTriangulation, tri: &Tri, point: Point2d) -> bool {
    t.get_triangle_data(tri)
        .contains_point_with_epsilon(point, t.epsilon)
}

fn find_best_first(
    t: &DelaunayTriangulation,
    point: Point2d,
    first_to_check: TriangleIndex,
) -> Option<TriangleIndex> {
    let mut already_checked: HashSet<TriangleIndex> = HashSet::default();
    let mut to_check: BinaryHeap<CheckData> = BinaryHeap::default();
    to_check.push(CheckData {
        triangle: first_to_check,
        // Heuristic doesn't matter for the first item anyways
        heuristic_distance: OrderedFloat(0.0),
    });
    already_checked.insert(first_to_check);
    while let Some(check) = to_check.pop() {
        let tri = &t.triangles[check.triangle];
        if triangle_contains_point(t, tri, point) {
            return Some(check.triangle);
        }
        for info in tri.edges() {
            if let Some(opp) = info.opposing {
                if already_checked.insert(opp.triangle) {
                    let heuristic_distance = OrderedFloat(walk_distance(
                        &t.get_triangle_data(&t.triangles[opp.triangle]),
                        point,
                    ));
                    to_check.push(CheckData {
                        heuristic_distance,
                        triangle: opp.triangle,
                    });
                }
            }
        }
    }
    None
}

pub fn find_containing_triangle(
    t: &DelaunayTriangulation,
    point: Point2d,
) -> Option<TriangleIndex> {
    if let Some(last_insertion_triangle) = t.last_insertion_triangle {
        find_best_first(t, point, last_insertion_triangle)
    } else {
        t.triangles
            .iter()
            .find(|(_, tri)| triangle_contains_point(t, tri, point))
            .map(|(index, _)| index)
    }
}
