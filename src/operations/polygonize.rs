use std::collections::{HashMap, VecDeque};

use tracing::{debug, instrument};

use crate::error::{GeometryError, Result};
use crate::geometry::{Area, Polygon, Triangle};
use crate::math::vector::vector_to_3d;
use crate::math::{AlmostEq, Point, Precision, Vector3};

/// Undirected edge between two welded vertices, smaller index first.
type EdgeKey = (usize, usize);

fn edge_key(a: usize, b: usize) -> EdgeKey {
    (a.min(b), a.max(b))
}

/// Merges edge-adjacent coplanar triangles into polygons.
///
/// Vertices closer than precision `p` are welded first. Each connected group
/// of triangles becomes one polygon, wound like the group's first triangle.
pub struct Polygonize<'a, const D: usize> {
    triangles: &'a [Triangle<D>],
}

impl<'a, const D: usize> Polygonize<'a, D> {
    /// Creates a new `Polygonize` operation.
    #[must_use]
    pub fn new(triangles: &'a [Triangle<D>]) -> Self {
        Self { triangles }
    }

    /// Executes the merge, returning one polygon per connected group.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if a group's outline is not
    /// a single simple loop (it encloses a hole or pinches at a vertex).
    #[instrument(skip_all, fields(triangles = self.triangles.len()))]
    pub fn execute(&self, p: Precision) -> Result<Vec<Polygon<D>>> {
        let (points, corners) = weld(self.triangles, p);

        let mut edge_faces: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
        for (t, c) in corners.iter().enumerate() {
            for k in 0..3 {
                edge_faces.entry(edge_key(c[k], c[(k + 1) % 3])).or_default().push(t);
            }
        }

        let components = self.connected_components(&corners, &edge_faces, p);
        debug!(components = components.len(), "triangles grouped");

        let mut polygons = Vec::with_capacity(components.len());
        for component in &components {
            let oriented = self.orient(component, &corners);
            let outline = boundary_loop(&oriented)?;
            polygons.push(Polygon::new(outline.into_iter().map(|i| points[i]).collect(), p)?);
        }
        Ok(polygons)
    }

    /// Groups triangles sharing an edge and lying in the plane of the group's seed.
    fn connected_components(
        &self,
        corners: &[[usize; 3]],
        edge_faces: &HashMap<EdgeKey, Vec<usize>>,
        p: Precision,
    ) -> Vec<Vec<usize>> {
        let n = corners.len();
        let mut visited = vec![false; n];
        let mut components: Vec<Vec<usize>> = Vec::new();

        for seed in 0..n {
            if visited[seed] {
                continue;
            }
            visited[seed] = true;
            let frame = self.triangles[seed].frame();
            let mut component = vec![seed];
            let mut queue = VecDeque::from([seed]);

            while let Some(current) = queue.pop_front() {
                let c = corners[current];
                for k in 0..3 {
                    let Some(neighbors) = edge_faces.get(&edge_key(c[k], c[(k + 1) % 3])) else {
                        continue;
                    };
                    for &neighbor in neighbors {
                        let coplanar = self.triangles[neighbor]
                            .vertices()
                            .iter()
                            .all(|q| frame.is_coplanar(q, p));
                        if !visited[neighbor] && coplanar {
                            visited[neighbor] = true;
                            component.push(neighbor);
                            queue.push_back(neighbor);
                        }
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// Corner triples of a component, flipped where needed to wind like its first triangle.
    fn orient(&self, component: &[usize], corners: &[[usize; 3]]) -> Vec<[usize; 3]> {
        let reference = winding_normal(&self.triangles[component[0]]);
        component
            .iter()
            .map(|&t| {
                let [a, b, c] = corners[t];
                if winding_normal(&self.triangles[t]).dot(&reference) < 0.0 {
                    [a, c, b]
                } else {
                    [a, b, c]
                }
            })
            .collect()
    }
}

/// Normal of `P0 → P1 → P2`, embedded in 3D so planar triangles share the `Z` axis.
fn winding_normal<const D: usize>(t: &Triangle<D>) -> Vector3 {
    vector_to_3d(&t.u().into_inner()).cross(&vector_to_3d(&t.v().into_inner()))
}

/// Welds triangle corners equal at precision `p` into shared vertex indices.
fn weld<const D: usize>(
    triangles: &[Triangle<D>],
    p: Precision,
) -> (Vec<Point<D>>, Vec<[usize; 3]>) {
    let mut points: Vec<Point<D>> = Vec::new();
    let corners = triangles
        .iter()
        .map(|t| {
            let mut c = [0usize; 3];
            for (slot, q) in c.iter_mut().zip(t.vertices()) {
                let known = points.iter().position(|known| known.almost_eq(q, p));
                *slot = known.unwrap_or_else(|| {
                    points.push(*q);
                    points.len() - 1
                });
            }
            c
        })
        .collect();
    (points, corners)
}

/// Chains the edges used by exactly one triangle into the component's outline.
fn boundary_loop(oriented: &[[usize; 3]]) -> Result<Vec<usize>> {
    let mut uses: HashMap<EdgeKey, usize> = HashMap::new();
    for c in oriented {
        for k in 0..3 {
            *uses.entry(edge_key(c[k], c[(k + 1) % 3])).or_insert(0) += 1;
        }
    }
    let boundary: Vec<(usize, usize)> = oriented
        .iter()
        .flat_map(|c| (0..3).map(move |k| (c[k], c[(k + 1) % 3])))
        .filter(|&(a, b)| uses.get(&edge_key(a, b)) == Some(&1))
        .collect();

    let loops = chain_into_loops(&boundary)?;
    match <[Vec<usize>; 1]>::try_from(loops) {
        Ok([outline]) => Ok(outline),
        Err(loops) => Err(GeometryError::degenerate(format!(
            "triangle group outline forms {} loops",
            loops.len()
        ))),
    }
}

/// Chains directed edges into closed loops of vertex indices.
fn chain_into_loops(edges: &[(usize, usize)]) -> Result<Vec<Vec<usize>>> {
    let mut outgoing: HashMap<usize, Vec<usize>> = HashMap::new();
    for (i, &(start, _)) in edges.iter().enumerate() {
        outgoing.entry(start).or_default().push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut loops = Vec::new();
    for seed in 0..edges.len() {
        if used[seed] {
            continue;
        }
        used[seed] = true;
        let (start, mut current) = edges[seed];
        let mut chain = vec![start];
        while current != start {
            chain.push(current);
            let next = outgoing
                .get(&current)
                .and_then(|candidates| candidates.iter().copied().find(|&i| !used[i]))
                .ok_or_else(|| GeometryError::degenerate("outline edges do not close"))?;
            used[next] = true;
            current = edges[next].1;
        }
        loops.push(chain);
    }
    Ok(loops)
}
