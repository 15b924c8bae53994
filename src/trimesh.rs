use std::ops::Add;
use std::ops::AddAssign;

use crate::error::GeometryError;
use crate::primitives::Point2d;
use crate::primitives::Triangle2d;

/// A pair of vertex indices. Directed by default; `undirected` normalizes
/// the order so that equality and hashing ignore direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    pub fn undirected(a: usize, b: usize) -> Self {
        Self {
            a: a.min(b),
            b: a.max(b),
        }
    }
}

/// A triple of vertex indices into a mesh's vertex list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Face {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    pub fn vertices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }

    /// Boundary edges in iteration order `(a,b), (b,c), (c,a)`.
    pub fn edges(&self) -> [Edge; 3] {
        [
            Edge::new(self.a, self.b),
            Edge::new(self.b, self.c),
            Edge::new(self.c, self.a),
        ]
    }

    pub fn undirected_edges(&self) -> [Edge; 3] {
        [
            Edge::undirected(self.a, self.b),
            Edge::undirected(self.b, self.c),
            Edge::undirected(self.c, self.a),
        ]
    }

    pub fn contains(&self, vertex: usize) -> bool {
        self.a == vertex || self.b == vertex || self.c == vertex
    }

    fn shifted(&self, offset: usize) -> Face {
        Face::new(self.a + offset, self.b + offset, self.c + offset)
    }
}

/// A 2D triangle mesh: an insertion-ordered vertex list and faces indexing
/// into it. Construction is append-only; `add_face` checks structural
/// validity but intentionally nothing geometric.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trimesh2d {
    vertices: Vec<Point2d>,
    faces: Vec<Face>,
}

impl Trimesh2d {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, p: Point2d) -> usize {
        self.vertices.push(p);
        self.vertices.len() - 1
    }

    pub fn add_face(&mut self, a: usize, b: usize, c: usize) -> Result<(), GeometryError> {
        for index in [a, b, c] {
            if index >= self.vertices.len() {
                return Err(GeometryError::IndexOutOfRange {
                    index,
                    num_vertices: self.vertices.len(),
                });
            }
        }
        if a == b || b == c || a == c {
            return Err(GeometryError::RepeatedFaceIndex(a, b, c));
        }
        self.faces.push(Face::new(a, b, c));
        Ok(())
    }

    pub fn vertices(&self) -> &[Point2d] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn get_triangle(&self, face: Face) -> Result<Triangle2d, GeometryError> {
        for index in face.vertices() {
            if index >= self.vertices.len() {
                return Err(GeometryError::IndexOutOfRange {
                    index,
                    num_vertices: self.vertices.len(),
                });
            }
        }
        Ok(Triangle2d::new(
            self.vertices[face.a],
            self.vertices[face.b],
            self.vertices[face.c],
        ))
    }

    /// Triangles of all stored faces. Stored faces are structurally valid,
    /// so this cannot fail.
    pub fn get_triangles(&self) -> impl Iterator<Item = Triangle2d> + '_ {
        self.faces.iter().map(|face| {
            Triangle2d::new(
                self.vertices[face.a],
                self.vertices[face.b],
                self.vertices[face.c],
            )
        })
    }

    /// Appends `other`, shifting its face indices past this mesh's vertices.
    pub fn append(&mut self, other: &Trimesh2d) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.faces
            .extend(other.faces.iter().map(|face| face.shifted(offset)));
    }
}

impl Add<&Trimesh2d> for &Trimesh2d {
    type Output = Trimesh2d;

    fn add(self, other: &Trimesh2d) -> Trimesh2d {
        let mut result = self.clone();
        result.append(other);
        result
    }
}

impl AddAssign<&Trimesh2d> for Trimesh2d {
    fn add_assign(&mut self, other: &Trimesh2d) {
        self.append(other);
    }
}
