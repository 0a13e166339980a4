//! Reading and writing WKT files.

#![allow(clippy::unwrap_used)]

mod common;

use std::fs;

use geokern::geometry::{Geometry, Line, Polygon, Polyline, Ray, Triangle};
use geokern::math::{Point3, Vector3};
use geokern::operations::Triangulate;
use geokern::wkt::{read_file, write_file};
use geokern::{AlmostEq, GeokernError, Precision, WktError};

const P: Precision = Precision::DEFAULT;

fn p(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

fn sample() -> Vec<Geometry<3>> {
    let wall = Polygon::new(
        vec![
            p(0.0, 0.0, 0.0),
            p(4.0, 0.0, 0.0),
            p(4.0, 0.0, 3.0),
            p(2.0, 0.0, 1.5),
            p(0.0, 0.0, 3.0),
        ],
        P,
    )
    .unwrap();
    let pieces: Vec<Geometry<3>> = Triangulate::new(&wall)
        .execute(P)
        .unwrap()
        .into_iter()
        .map(Geometry::from)
        .collect();
    vec![
        Geometry::Point(p(1.125, -2.0, 0.333_333)),
        Line::new(p(0.0, 0.0, 1.0), Vector3::new(1.0, 1.0, 1.0), P).unwrap().into(),
        Ray::from_points(p(1.0, 1.0, 1.0), p(1.0, 5.0, 1.0), P).unwrap().into(),
        Polyline::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 2.0)], P)
            .unwrap()
            .into(),
        Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 0.0, 1.0), P).unwrap().into(),
        Geometry::MultiPolygon(vec![wall]),
        Geometry::Collection(pieces),
        Geometry::Collection(Vec::new()),
    ]
}

#[test]
fn spatial_geometries_survive_a_file_round_trip() {
    common::init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.wkt");
    let geometries = sample();

    write_file(&path, &geometries, P).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), geometries.len());
    assert!(text.starts_with("POINT (1.125 -2 0.333)\n"));

    let back = read_file::<3>(&path, P).unwrap();
    assert_eq!(back.len(), geometries.len());
    for (read, written) in back.iter().zip(&geometries) {
        assert!(read.almost_eq(written, P), "{read:?} != {written:?}");
    }
}

#[test]
fn planar_file_reads_into_space() {
    common::init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.wkt");
    fs::write(&path, "POLYGON ((0 0, 2 0, 2 2, 0 2, 0 0))\npoint z (1 1 1)\n").unwrap();

    let back = read_file::<3>(&path, P).unwrap();
    let square = Polygon::new(
        vec![p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(2.0, 2.0, 0.0), p(0.0, 2.0, 0.0)],
        P,
    )
    .unwrap();
    assert!(back[0].almost_eq(&square.into(), P));
    assert!(back[1].almost_eq(&Geometry::Point(p(1.0, 1.0, 1.0)), P));
}

#[test]
fn first_bad_line_fails_the_read() {
    common::init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.wkt");
    fs::write(&path, "POINT (0 0)\nPOINT (0 0 0)\n").unwrap();

    let err = read_file::<2>(&path, P).unwrap_err();
    assert!(matches!(
        err,
        GeokernError::Wkt(WktError::DimensionMismatch { expected: 2, found: 3 })
    ));
}
