//! Shared test model for linewise integration tests.
//!
//! A problem holds two parameters and `N` shapes, each shape holding a
//! list of points whose size is read on the shape's own line.

#![allow(dead_code)]

use linewise::{impl_fields, Parser, RootReader, Size};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl_fields!(Point { x, y });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub name: String,
    pub n_points: usize,
    pub points: Vec<Point>,
}

impl_fields!(Shape { name, n_points });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Problem {
    pub param1: i32,
    pub param2: i32,
    pub n_shapes: usize,
    pub shapes: Box<[Shape]>,
}

impl_fields!(Problem { param1, param2, n_shapes });

pub fn point_reader() -> RootReader<Point> {
    RootReader::create(Point::default).then_fields(["x", "y"])
}

pub fn shape_reader() -> RootReader<Shape> {
    RootReader::create(Shape::default)
        .then_fields(["name", "n_points"])
        .then_list(
            |shape, points| shape.points = points,
            Size::parent(|shape: &Shape| shape.n_points),
            point_reader(),
        )
}

pub fn problem_reader() -> RootReader<Problem> {
    RootReader::create(Problem::default)
        .then_fields(["param1", "param2", "n_shapes@N"])
        .then_array(|problem, shapes| problem.shapes = shapes, "N", shape_reader())
}

pub fn problem_parser() -> Parser<Problem> {
    Parser::new(problem_reader())
}

pub const PROBLEM_INPUT: &str = "\
42 24 2
first 3
1.11 1.12
1.21 1.22
1.31 1.32
second 2
2.11 2.12
2.21 2.22
";

/// Generate a problem input with `shapes` shapes of `points` points each
pub fn generate_problem(shapes: usize, points: usize) -> String {
    let mut input = format!("1 2 {}\n", shapes);
    for s in 0..shapes {
        input.push_str(&format!("shape{} {}\n", s, points));
        for p in 0..points {
            input.push_str(&format!("{}.5 {}.25\n", s, p));
        }
    }
    input
}

/// A path in the system temp directory, unique to this process
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("linewise_{}_{}", std::process::id(), name))
}
