//! Polygon algorithms, each an operation struct run with `execute(p)`.

mod convex_hull;
mod polygonize;
pub(crate) mod triangulate;

pub use convex_hull::ConvexHull;
pub use polygonize::Polygonize;
pub use triangulate::Triangulate;
