use std::collections::HashMap;

use spade::{ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation};
use tracing::{debug, instrument};

use crate::error::{GeometryError, Result};
use crate::geometry::{Area, Polygon, Triangle};
use crate::math::polygon_2d::{crosses_odd, signed_area, turn};
use crate::math::{almost_zero, Point2, Precision};

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Splits a simple polygon into triangles over its own vertices.
///
/// Every triangle winds the same way as the polygon.
pub struct Triangulate<'a, const D: usize> {
    polygon: &'a Polygon<D>,
}

impl<'a, const D: usize> Triangulate<'a, D> {
    /// Creates a new `Triangulate` operation.
    #[must_use]
    pub fn new(polygon: &'a Polygon<D>) -> Self {
        Self { polygon }
    }

    /// Executes the triangulation.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the boundary cannot be
    /// inserted as a closed chain of constraints.
    #[instrument(skip_all, fields(vertices = self.polygon.vertex_count()))]
    pub fn execute(&self, p: Precision) -> Result<Vec<Triangle<D>>> {
        let vertices = self.polygon.vertices();
        let triangles = triangulate_ring(&self.polygon.local_ring(), p)?;
        Ok(triangles
            .into_iter()
            .map(|[a, b, c]| Triangle::new_unchecked(vertices[a], vertices[b], vertices[c]))
            .collect())
    }
}

/// Constrained Delaunay triangulation of a simple ring, as vertex index triples.
///
/// Triangles follow the ring's winding. Slivers flatter than precision `p`
/// are dropped.
pub(crate) fn triangulate_ring(ring: &[Point2], p: Precision) -> Result<Vec<[usize; 3]>> {
    if ring.len() < 3 {
        return Err(GeometryError::degenerate(format!(
            "cannot triangulate a ring of {} vertices",
            ring.len()
        )));
    }

    let mut cdt = Cdt::new();
    let mut ring_index: HashMap<usize, usize> = HashMap::with_capacity(ring.len());
    let mut handles = Vec::with_capacity(ring.len());
    for (i, q) in ring.iter().enumerate() {
        let handle = cdt
            .insert(SpadePoint2::new(q.x, q.y))
            .map_err(|e: InsertionError| GeometryError::degenerate(format!("CDT insert: {e}")))?;
        if ring_index.insert(handle.index(), i).is_some() {
            return Err(GeometryError::degenerate("ring visits a vertex twice"));
        }
        handles.push(handle);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if !cdt.can_add_constraint(from, to) {
            return Err(GeometryError::degenerate("ring edges cross each other"));
        }
        cdt.add_constraint(from, to);
    }

    // Every ring edge is a constraint, so each face lies wholly inside or
    // outside the ring and its centroid decides which.
    let clockwise = signed_area(ring) < 0.0;
    let mut triangles = Vec::with_capacity(ring.len() - 2);
    for face in cdt.inner_faces() {
        let mut corners = [0usize; 3];
        for (slot, vertex) in corners.iter_mut().zip(face.vertices()) {
            *slot = *ring_index
                .get(&vertex.fix().index())
                .ok_or_else(|| GeometryError::degenerate("triangulation introduced a vertex"))?;
        }
        let [a, b, c] = corners;
        let centroid = Point2::from((ring[a].coords + ring[b].coords + ring[c].coords) / 3.0);
        if !crosses_odd(&centroid, ring) || almost_zero(turn(&ring[a], &ring[b], &ring[c]), p) {
            continue;
        }
        triangles.push(if clockwise { [a, c, b] } else { [a, b, c] });
    }

    debug!(vertices = ring.len(), triangles = triangles.len(), "ring triangulated");
    Ok(triangles)
}
