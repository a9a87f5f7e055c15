mod builder;
mod remove_small_steps;
mod ribbon_style;
mod tessellate_ribbon;

pub use builder::RibbonMeshBuilder;
pub use remove_small_steps::RemoveSmallSteps;
pub use ribbon_style::{NormalMode, RibbonStyle};
pub use tessellate_ribbon::{Profile, TessellateRibbon};

use crate::math::{normalize_or_zero, Point2, Point3, Vector3};

/// Submesh index of the floor triangles.
pub const FLOOR_SUBMESH: usize = 0;

/// Submesh index of the edge (curb) triangles.
pub const EDGE_SUBMESH: usize = 1;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Smallest box containing every point, `None` for no points.
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self {
            min: *first,
            max: *first,
        };
        for p in rest {
            aabb.min = aabb.min.inf(p);
            aabb.max = aabb.max.sup(p);
        }
        Some(aabb)
    }
}

/// A ribbon mesh with a floor submesh and an edge submesh over one shared vertex buffer.
///
/// Vertices are ordered floor first, then left edge, then right edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RibbonMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Area-weighted vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates. `v` grows with distance along the path.
    pub uvs: Vec<Point2>,
    /// Floor triangles (submesh 0).
    pub floor_indices: Vec<[u32; 3]>,
    /// Edge triangles (submesh 1).
    pub edge_indices: Vec<[u32; 3]>,
    /// Bounds of all vertices, `None` for an empty mesh.
    pub bounds: Option<Aabb>,
}

impl RibbonMesh {
    /// Returns `true` if the mesh has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Triangles of submesh `index` ([`FLOOR_SUBMESH`] or [`EDGE_SUBMESH`]).
    #[must_use]
    pub fn submesh(&self, index: usize) -> &[[u32; 3]] {
        match index {
            FLOOR_SUBMESH => &self.floor_indices,
            EDGE_SUBMESH => &self.edge_indices,
            _ => &[],
        }
    }

    /// Total number of triangles in both submeshes.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.floor_indices.len() + self.edge_indices.len()
    }

    /// Recomputes vertex normals from the triangles of both submeshes.
    ///
    /// Each triangle adds its area-weighted face normal to its corners.
    /// Vertices not used by any triangle get a zero normal.
    pub fn recalculate_normals(&mut self) {
        let mut normals = vec![Vector3::zeros(); self.vertices.len()];
        for tri in self.floor_indices.iter().chain(&self.edge_indices) {
            let [a, b, c] = tri.map(|i| i as usize);
            let (Some(pa), Some(pb), Some(pc)) =
                (self.vertices.get(a), self.vertices.get(b), self.vertices.get(c))
            else {
                continue;
            };
            let face = (pb - pa).cross(&(pc - pa));
            for i in [a, b, c] {
                normals[i] += face;
            }
        }
        self.normals = normals.iter().map(normalize_or_zero).collect();
    }

    /// Recomputes the bounding box.
    pub fn recalculate_bounds(&mut self) {
        self.bounds = Aabb::from_points(&self.vertices);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad() -> RibbonMesh {
        RibbonMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(9.0, 9.0, 9.0),
            ],
            floor_indices: vec![[0, 1, 2], [0, 2, 3]],
            ..RibbonMesh::default()
        }
    }

    #[test]
    fn normals_follow_winding() {
        let mut mesh = quad();
        mesh.recalculate_normals();
        for n in &mesh.normals[..4] {
            assert_relative_eq!(*n, Vector3::z());
        }
        assert_eq!(mesh.normals[4], Vector3::zeros());
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let mut mesh = quad();
        mesh.recalculate_bounds();
        let bounds = mesh.bounds.unwrap();
        assert_eq!(bounds.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bounds.max, Point3::new(9.0, 9.0, 9.0));
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn submesh_lookup() {
        let mesh = quad();
        assert_eq!(mesh.submesh(FLOOR_SUBMESH).len(), 2);
        assert!(mesh.submesh(EDGE_SUBMESH).is_empty());
        assert!(mesh.submesh(7).is_empty());
        assert_eq!(mesh.triangle_count(), 2);
    }
}
