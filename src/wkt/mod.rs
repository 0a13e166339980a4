//! Well-known-text codec.
//!
//! Every primitive reads and writes as one line of text:
//!
//! | Kind | Text |
//! |------|------|
//! | point | `POINT (x y)`, `POINT (x y z)` |
//! | segment, polyline | `LINESTRING (x y, x y, ...)` |
//! | triangle | `TRIANGLE ((a, b, c, a))` |
//! | polygon | `POLYGON ((v0, v1, ..., v0))` |
//! | multi-polygon | `MULTIPOLYGON (((...)), ((...)))` or `MULTIPOLYGON EMPTY` |
//! | collection | `GEOMETRYCOLLECTION (POINT (..), ...)` or `GEOMETRYCOLLECTION EMPTY` |
//! | line | `LINE (ox oy, dx dy)` |
//! | ray | `RAY (ox oy, dx dy)` |
//! | plane | `PLANE (ox oy oz, nx ny nz, ux uy uz)` |
//!
//! Coordinates are written rounded to the precision and trimmed of trailing
//! zeros; a value on a rounding tie keeps one more digit. `LINE`, `RAY` and
//! `PLANE` carry an origin and a unit direction (or normal and U axis) at full
//! precision, so they read back exactly. A `PLANE` without its U axis gets one
//! chosen for it.
//!
//! Tags are case-insensitive and may be followed by `Z`. A two-number
//! coordinate read into 3D gets `z = 0`. A `LINESTRING` of two points reads
//! as a segment, a longer one as a polyline. Polygon holes are rejected.

mod file;
mod lexer;
mod reader;
mod writer;

pub use file::{read_file, write_file};

use crate::error::{GeokernError, Result, WktError};
use crate::geometry::{Geometry, Line, LineSegment, Plane, Polygon, Polyline, Ray, Triangle};
use crate::math::{Point, Precision};

use reader::Parser;

/// Serializes a value as WKT.
pub trait ToWkt {
    /// WKT text with coordinates rounded to `p` digits.
    fn to_wkt(&self, p: Precision) -> String;
}

/// Parses a value from WKT.
pub trait FromWkt: Sized {
    /// Reads one value spanning all of `text`.
    ///
    /// # Errors
    ///
    /// Returns [`WktError`] for malformed text or text of another kind, and
    /// [`GeometryError`](crate::error::GeometryError) when the coordinates do
    /// not form a valid value at precision `p`.
    fn from_wkt(text: &str, p: Precision) -> Result<Self>;
}

fn kind_mismatch<const D: usize>(expected: &'static str, found: &Geometry<D>) -> GeokernError {
    WktError::KindMismatch {
        expected,
        found: found.kind_name(),
    }
    .into()
}

impl<const D: usize> FromWkt for Geometry<D> {
    fn from_wkt(text: &str, p: Precision) -> Result<Self> {
        let mut parser = Parser::new(text, p)?;
        let geometry = parser.geometry()?;
        parser.finish()?;
        Ok(geometry)
    }
}

/// Reads a [`Geometry`] and unwraps the one variant the type maps to.
macro_rules! from_variant {
    ($($ty:ident => $variant:ident, $name:literal);* $(;)?) => {
        $(
            impl<const D: usize> FromWkt for $ty<D> {
                fn from_wkt(text: &str, p: Precision) -> Result<Self> {
                    match Geometry::<D>::from_wkt(text, p)? {
                        Geometry::$variant(value) => Ok(value),
                        other => Err(kind_mismatch($name, &other)),
                    }
                }
            }
        )*
    };
}

from_variant! {
    Point => Point, "point";
    Line => Line, "line";
    Ray => Ray, "ray";
    LineSegment => Segment, "segment";
    Triangle => Triangle, "triangle";
}

impl<const D: usize> FromWkt for Polyline<D> {
    /// Two-point linestrings are accepted as well.
    fn from_wkt(text: &str, p: Precision) -> Result<Self> {
        match Geometry::<D>::from_wkt(text, p)? {
            Geometry::Polyline(polyline) => Ok(polyline),
            Geometry::Segment(segment) => Polyline::new(segment.endpoints().to_vec(), p),
            other => Err(kind_mismatch("polyline", &other)),
        }
    }
}

impl<const D: usize> FromWkt for Polygon<D> {
    /// `TRIANGLE` text is accepted as well.
    fn from_wkt(text: &str, p: Precision) -> Result<Self> {
        match Geometry::<D>::from_wkt(text, p)? {
            Geometry::Polygon(polygon) => Ok(polygon),
            Geometry::Triangle(triangle) => Ok(Polygon::from(triangle)),
            other => Err(kind_mismatch("polygon", &other)),
        }
    }
}

impl FromWkt for Plane {
    fn from_wkt(text: &str, p: Precision) -> Result<Self> {
        let mut parser = Parser::new(text, p)?;
        let plane = parser.plane()?;
        parser.finish()?;
        Ok(plane)
    }
}
