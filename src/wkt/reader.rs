use crate::error::{GeometryError, Result, WktError};
use crate::geometry::{Geometry, Line, LineSegment, Plane, Polygon, Polyline, Ray, Triangle};
use crate::math::{AlmostEq, Point, Point3, Precision, Vector};

use super::lexer::{tokenize, Spanned, Token};

/// Recursive-descent reader over a token stream.
pub(crate) struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    end: usize,
    p: Precision,
}

impl Parser {
    pub(crate) fn new(text: &str, p: Precision) -> Result<Self> {
        Ok(Self {
            tokens: tokenize(text)?,
            pos: 0,
            end: text.len(),
            p,
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |&(_, offset)| offset)
    }

    fn unexpected(&self, expected: &'static str) -> WktError {
        match self.peek() {
            Some(token) => WktError::UnexpectedToken {
                expected,
                found: token.to_string(),
                offset: self.offset(),
            },
            None => WktError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, token: &Token, expected: &'static str) -> Result<()> {
        if self.peek() == Some(token) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected(expected).into())
        }
    }

    /// Consumes `token` if it comes next.
    fn accept(&mut self, token: &Token) -> bool {
        let found = self.peek() == Some(token);
        if found {
            self.pos += 1;
        }
        found
    }

    /// Fails unless every token was consumed.
    pub(crate) fn finish(&self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(self.unexpected("end of input").into()),
        }
    }

    /// Reads a geometry tag and its optional `Z` marker.
    fn tag(&mut self) -> Result<(String, bool)> {
        let Some(Token::Word(tag)) = self.peek().cloned() else {
            return Err(self.unexpected("geometry tag").into());
        };
        self.pos += 1;
        let z = self.accept(&Token::Word("Z".into()));
        Ok((tag, z))
    }

    fn empty(&mut self) -> bool {
        self.accept(&Token::Word("EMPTY".into()))
    }

    /// One coordinate tuple. Two numbers read into 3D get `z = 0`.
    fn coordinate<const D: usize>(&mut self, z: bool) -> Result<Point<D>> {
        let mut values = Vec::with_capacity(3);
        while let Some(&Token::Number(x)) = self.peek() {
            values.push(x);
            self.pos += 1;
        }
        if values.is_empty() {
            return Err(self.unexpected("coordinate").into());
        }
        let fits = if z {
            values.len() == 3 && D == 3
        } else {
            values.len() == D || (D == 3 && values.len() == 2)
        };
        if !fits {
            return Err(WktError::DimensionMismatch {
                expected: if z { 3 } else { D },
                found: values.len(),
            }
            .into());
        }
        Ok(Point::from(Vector::<D>::from_fn(|i, _| values.get(i).copied().unwrap_or(0.0))))
    }

    /// `(c, c, ...)`
    fn coordinates<const D: usize>(&mut self, z: bool) -> Result<Vec<Point<D>>> {
        self.expect(&Token::Open, "`(`")?;
        let mut points = vec![self.coordinate(z)?];
        while self.accept(&Token::Comma) {
            points.push(self.coordinate(z)?);
        }
        self.expect(&Token::Close, "`)` or `,`")?;
        Ok(points)
    }

    /// `(c, c, ..., c)` with the closing repeat of the first vertex removed.
    fn ring<const D: usize>(&mut self, z: bool) -> Result<Vec<Point<D>>> {
        let mut points = self.coordinates::<D>(z)?;
        if points.len() > 1 && points[0].almost_eq(&points[points.len() - 1], self.p) {
            points.pop();
        }
        Ok(points)
    }

    /// `(origin, direction)` of the unbounded extensions.
    fn anchor<const D: usize>(&mut self, z: bool) -> Result<(Point<D>, Vector<D>)> {
        self.expect(&Token::Open, "`(`")?;
        let origin = self.coordinate(z)?;
        self.expect(&Token::Comma, "`,`")?;
        let direction = self.coordinate::<D>(z)?.coords;
        self.expect(&Token::Close, "`)`")?;
        Ok((origin, direction))
    }

    /// Reads any tagged geometry.
    pub(crate) fn geometry<const D: usize>(&mut self) -> Result<Geometry<D>> {
        let (tag, z) = self.tag()?;
        let p = self.p;
        let geometry = match tag.as_str() {
            "POINT" => {
                self.expect(&Token::Open, "`(`")?;
                let point = self.coordinate(z)?;
                self.expect(&Token::Close, "`)`")?;
                Geometry::Point(point)
            }
            "LINE" => {
                let (origin, direction) = self.anchor(z)?;
                Geometry::Line(Line::new(origin, direction, p)?)
            }
            "RAY" => {
                let (origin, direction) = self.anchor(z)?;
                Geometry::Ray(Ray::new(origin, direction, p)?)
            }
            "LINESTRING" => {
                let points = self.coordinates(z)?;
                if let [start, end] = points[..] {
                    Geometry::Segment(LineSegment::new(start, end, p)?)
                } else {
                    Geometry::Polyline(Polyline::new(points, p)?)
                }
            }
            "TRIANGLE" => {
                self.expect(&Token::Open, "`(`")?;
                let ring = self.ring(z)?;
                self.expect(&Token::Close, "`)`")?;
                let [a, b, c] = ring[..] else {
                    return Err(GeometryError::degenerate(format!(
                        "triangle ring has {} distinct vertices",
                        ring.len()
                    )));
                };
                Geometry::Triangle(Triangle::new(a, b, c, p)?)
            }
            "POLYGON" => Geometry::Polygon(self.polygon_body(z)?),
            "MULTIPOLYGON" => {
                let mut polygons = Vec::new();
                if !self.empty() {
                    self.expect(&Token::Open, "`(`")?;
                    polygons.push(self.polygon_body(z)?);
                    while self.accept(&Token::Comma) {
                        polygons.push(self.polygon_body(z)?);
                    }
                    self.expect(&Token::Close, "`)` or `,`")?;
                }
                Geometry::MultiPolygon(polygons)
            }
            "GEOMETRYCOLLECTION" => {
                let mut members = Vec::new();
                if !self.empty() {
                    self.expect(&Token::Open, "`(`")?;
                    members.push(self.geometry()?);
                    while self.accept(&Token::Comma) {
                        members.push(self.geometry()?);
                    }
                    self.expect(&Token::Close, "`)` or `,`")?;
                }
                Geometry::Collection(members)
            }
            "PLANE" => {
                return Err(WktError::KindMismatch {
                    expected: "geometry",
                    found: "plane",
                }
                .into())
            }
            _ => return Err(WktError::UnknownTag(tag).into()),
        };
        Ok(geometry)
    }

    /// `((c, ..., c))`; holes are not supported.
    fn polygon_body<const D: usize>(&mut self, z: bool) -> Result<Polygon<D>> {
        self.expect(&Token::Open, "`(`")?;
        let ring = self.ring(z)?;
        self.expect(&Token::Close, "`)`")?;
        Polygon::new(ring, self.p)
    }

    /// `PLANE (ox oy oz, nx ny nz[, ux uy uz])`; without the U axis one is chosen.
    pub(crate) fn plane(&mut self) -> Result<Plane> {
        let (tag, z) = self.tag()?;
        if tag != "PLANE" {
            return Err(WktError::UnknownTag(tag).into());
        }
        self.expect(&Token::Open, "`(`")?;
        let origin: Point3 = self.coordinate(z)?;
        self.expect(&Token::Comma, "`,`")?;
        let normal = self.coordinate::<3>(z)?.coords;
        let axis_u = if self.accept(&Token::Comma) {
            Some(self.coordinate::<3>(z)?.coords)
        } else {
            None
        };
        self.expect(&Token::Close, "`)` or `,`")?;
        match axis_u {
            Some(axis_u) => Plane::from_normal_and_axis(origin, normal, axis_u, self.p),
            None => Plane::from_normal(origin, normal, self.p),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GeokernError;
    use crate::math::{Point2, Point3};

    const P: Precision = Precision::DEFAULT;

    fn read<const D: usize>(text: &str) -> Result<Geometry<D>> {
        let mut parser = Parser::new(text, P)?;
        let geometry = parser.geometry()?;
        parser.finish()?;
        Ok(geometry)
    }

    #[test]
    fn planar_coordinates_lift_to_zero_height() {
        let Geometry::Point(q) = read::<3>("POINT (1 2)").unwrap() else {
            panic!("expected a point");
        };
        assert_eq!(q, Point3::new(1.0, 2.0, 0.0));
        let Geometry::Point(q) = read::<3>("point z (1 2 3)").unwrap() else {
            panic!("expected a point");
        };
        assert_eq!(q, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn spatial_coordinates_do_not_fit_the_plane() {
        let err = read::<2>("POINT (1 2 3)").unwrap_err();
        assert!(matches!(
            err,
            GeokernError::Wkt(WktError::DimensionMismatch { expected: 2, found: 3 })
        ));
        assert!(read::<3>("POINT Z (1 2)").is_err());
    }

    #[test]
    fn two_point_linestring_is_a_segment() {
        assert!(matches!(read::<2>("LINESTRING (0 0, 1 1)").unwrap(), Geometry::Segment(_)));
        assert!(matches!(
            read::<2>("LINESTRING (0 0, 1 1, 2 0)").unwrap(),
            Geometry::Polyline(_)
        ));
    }

    #[test]
    fn closing_vertex_is_optional() {
        let closed = read::<2>("POLYGON ((0 0, 1 0, 1 1, 0 1, 0 0))").unwrap();
        let open = read::<2>("POLYGON ((0 0, 1 0, 1 1, 0 1))").unwrap();
        assert!(closed.almost_eq(&open, P));
        let Geometry::Polygon(poly) = closed else {
            panic!("expected a polygon");
        };
        assert_eq!(poly.vertex_count(), 4);
    }

    #[test]
    fn empty_containers() {
        assert!(read::<2>("GEOMETRYCOLLECTION EMPTY").unwrap().is_empty());
        assert!(read::<2>("MULTIPOLYGON EMPTY").unwrap().is_empty());
        assert!(read::<2>("POINT EMPTY").is_err());
    }

    #[test]
    fn nested_collection() {
        let text = "GEOMETRYCOLLECTION (POINT (1 1), GEOMETRYCOLLECTION (RAY (0 0, 0 2)))";
        let g = read::<2>(text).unwrap();
        let Geometry::Collection(members) = g else {
            panic!("expected a collection");
        };
        assert_eq!(members.len(), 2);
        assert!(members[0].almost_eq(&Geometry::Point(Point2::new(1.0, 1.0)), P));
    }

    #[test]
    fn malformed_input_reports_position() {
        assert!(matches!(
            read::<2>("POINT (1 2"),
            Err(GeokernError::Wkt(WktError::UnexpectedEnd))
        ));
        assert!(matches!(
            read::<2>("POINT (1 2) x"),
            Err(GeokernError::Wkt(WktError::UnexpectedToken { offset: 12, .. }))
        ));
        assert!(matches!(
            read::<2>("CIRCLE (0 0, 1)"),
            Err(GeokernError::Wkt(WktError::UnknownTag(tag))) if tag == "CIRCLE"
        ));
        assert!(matches!(
            read::<2>("POLYGON ((0 0, 1 0, 1 1), (0 0, 1 1, 0 1))"),
            Err(GeokernError::Wkt(WktError::UnexpectedToken { expected: "`)`", .. }))
        ));
    }

    #[test]
    fn invalid_shapes_surface_geometry_errors() {
        assert!(matches!(
            read::<2>("LINE (0 0, 0 0)"),
            Err(GeokernError::Geometry(GeometryError::DegenerateInput(_)))
        ));
        assert!(read::<2>("TRIANGLE ((0 0, 1 0, 2 0, 0 0))").is_err());
        assert!(read::<2>("TRIANGLE ((0 0, 1 0, 1 1, 0 1, 0 0))").is_err());
    }

    #[test]
    fn plane_requires_its_tag() {
        let mut parser = Parser::new("PLANE (0 0 1, 0 0 2)", P).unwrap();
        let plane = parser.plane().unwrap();
        assert!(plane.contains_point(&Point3::new(5.0, -3.0, 1.0), P));
        assert!(Parser::new("POINT (0 0 1)", P).unwrap().plane().is_err());
        assert!(read::<3>("PLANE (0 0 1, 0 0 2)").is_err());
    }

    #[test]
    fn plane_keeps_its_u_axis() {
        let mut parser = Parser::new("PLANE (0 0 1, 0 0 2, 0 3 0)", P).unwrap();
        let plane = parser.plane().unwrap();
        assert!(plane.axis_u().into_inner().almost_eq(&Vector::<3>::y(), P));
        assert!(plane.axis_v().into_inner().almost_eq(&-Vector::<3>::x(), P));
        let along_normal = Parser::new("PLANE (0 0 1, 0 0 2, 0 0 1)", P).unwrap().plane();
        assert!(matches!(
            along_normal,
            Err(GeokernError::Geometry(GeometryError::DegenerateInput(_)))
        ));
    }
}
