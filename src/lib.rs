//! # linewise
//!
//! A declarative, composable parser for line-oriented text inputs.
//!
//! Inputs made of newline-delimited records (numbers, words, blocks repeated
//! as many times as an earlier value says) are turned into a tree of typed
//! objects by a pipeline of small readers, each consuming zero or more lines.
//!
//! ## Features
//!
//! - Field and variable assignment from a single line (`"field@VAR"` labels)
//! - Containers whose size comes from a variable or a field of the parent
//! - Root readers built from variables read by pre-readers
//! - Line numbers and text attached to every parse error
//! - UTF-8 or fallback-encoded files, parsed in parallel if needed
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use linewise::{impl_fields, Parser, RootReader, Size};
//!
//! #[derive(Debug, Default)]
//! struct Point { x: f64, y: f64 }
//! impl_fields!(Point { x, y });
//!
//! #[derive(Debug, Default)]
//! struct Shape { name: String, n_points: usize, points: Vec<Point> }
//! impl_fields!(Shape { name, n_points });
//!
//! let point = RootReader::create(Point::default).then_fields(["x", "y"]);
//! let shape = RootReader::create(Shape::default)
//!     .then_fields(["name", "n_points"])
//!     .then_list(|s, p| s.points = p, Size::parent(|s: &Shape| s.n_points), point);
//!
//! let shape = Parser::new(shape).parse("square 2\n0 0\n1 1\n")?;
//! # Ok::<(), linewise::ParseError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`Context`] - Line cursor, pending tokens and variables of one parse
//! - [`ObjectReader`] / [`SectionReader`] / [`ChildReader`] - Reader contracts
//! - [`Fields`] - Named field setters, usually from [`impl_fields!`]
//! - [`Parser`] - Entry points running a root reader over whole inputs

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod context;
pub mod convert;
pub mod error;
pub mod fields;
pub mod parser;
pub mod readers;

pub use config::ParserConfig;
pub use context::Context;
pub use convert::{convert, Scalar, ScalarKind, Value};
pub use error::{LoadError, ParseError, ReadError, Result};
pub use fields::{FieldTable, Fields};
pub use parser::Parser;

// Re-export reader types
pub use readers::{
    ArrayLineReader, ChildReader, ChildReaderExt, Container, ContainerReader, FieldAndVarReader,
    FieldLabel, FieldsReader, ObjectReader, ReaderBuilder, RootReader, SectionChild,
    SectionReader, Size,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
