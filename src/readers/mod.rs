//! Reader contracts and their implementations
//!
//! Three kinds of readers compose a parse:
//!
//! - [`ObjectReader`] creates a value from the [`Context`] alone (root values)
//! - [`SectionReader`] updates an existing parent and/or context variables
//! - [`ChildReader`] produces a value with access to its (optional) parent,
//!   which is how items of containers are read
//!
//! Readers hold no mutable state: everything that changes during a parse
//! lives in the [`Context`], so a reader can be built once and shared across
//! parses and threads.

use crate::context::Context;
use crate::error::Result;
use std::sync::Arc;

pub mod builder;
pub mod container;
pub mod line;
pub mod root;
pub mod token;

pub use builder::ReaderBuilder;
pub use container::{Container, ContainerReader, Size};
pub use line::{ArrayLineReader, FieldLabel, FieldsReader};
pub use root::RootReader;
pub use token::FieldAndVarReader;

/// Reads a value from the context, consuming as many lines as necessary
pub trait ObjectReader<T>: Send + Sync {
    /// Read the value
    fn read(&self, context: &mut Context) -> Result<T>;
}

/// Reads a section of input and updates a parent object
pub trait SectionReader<P>: Send + Sync {
    /// Consume input and update `parent` and/or the context variables
    fn read_section(&self, parent: &mut P, context: &mut Context) -> Result<()>;
}

/// Reads a value that is part of a parent object
pub trait ChildReader<T, P>: Send + Sync {
    /// Read the value.
    ///
    /// `parent` is `None` when the value is read as a root value. Readers
    /// may update the parent while reading.
    fn read(&self, context: &mut Context, parent: Option<&mut P>) -> Result<T>;
}

impl<T, R: ObjectReader<T> + ?Sized> ObjectReader<T> for Arc<R> {
    fn read(&self, context: &mut Context) -> Result<T> {
        (**self).read(context)
    }
}

impl<P, R: SectionReader<P> + ?Sized> SectionReader<P> for Arc<R> {
    fn read_section(&self, parent: &mut P, context: &mut Context) -> Result<()> {
        (**self).read_section(parent, context)
    }
}

impl<T, P, R: ChildReader<T, P> + ?Sized> ChildReader<T, P> for Arc<R> {
    fn read(&self, context: &mut Context, parent: Option<&mut P>) -> Result<T> {
        (**self).read(context, parent)
    }
}

/// Extension methods for child readers
pub trait ChildReaderExt<T, P>: ChildReader<T, P> + Sized {
    /// Transform the values produced by this reader
    fn map<U, F>(self, f: F) -> MapReader<Self, F, T>
    where
        F: Fn(T) -> U + Send + Sync,
    {
        MapReader {
            reader: self,
            f,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T, P, R: ChildReader<T, P>> ChildReaderExt<T, P> for R {}

/// A child reader whose values are transformed by a function
pub struct MapReader<R, F, T> {
    reader: R,
    f: F,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T, U, P, R, F> ChildReader<U, P> for MapReader<R, F, T>
where
    R: ChildReader<T, P>,
    F: Fn(T) -> U + Send + Sync,
{
    fn read(&self, context: &mut Context, parent: Option<&mut P>) -> Result<U> {
        self.reader.read(context, parent).map(&self.f)
    }
}

/// Uses a section reader as a child reader.
///
/// The parent is updated in place and a copy of it is returned. Without a
/// parent, the section is applied to `P::default()`.
pub struct SectionChild<S> {
    section: S,
}

impl<S> SectionChild<S> {
    /// Use a section reader as a child reader
    pub fn new(section: S) -> Self {
        Self { section }
    }
}

impl<P, S> ChildReader<P, P> for SectionChild<S>
where
    P: Clone + Default,
    S: SectionReader<P>,
{
    fn read(&self, context: &mut Context, parent: Option<&mut P>) -> Result<P> {
        match parent {
            Some(parent) => {
                self.section.read_section(parent, context)?;
                Ok(parent.clone())
            }
            None => {
                let mut value = P::default();
                self.section.read_section(&mut value, context)?;
                Ok(value)
            }
        }
    }
}

/// Stores the value of a child reader on the parent
pub(crate) struct ChildStep<C, P> {
    reader: Arc<dyn ChildReader<C, P>>,
    setter: Arc<dyn Fn(&mut P, C) + Send + Sync>,
}

impl<C, P> ChildStep<C, P> {
    pub(crate) fn new<R, F>(reader: R, setter: F) -> Self
    where
        R: ChildReader<C, P> + 'static,
        F: Fn(&mut P, C) + Send + Sync + 'static,
    {
        Self {
            reader: Arc::new(reader),
            setter: Arc::new(setter),
        }
    }
}

impl<C, P> SectionReader<P> for ChildStep<C, P> {
    fn read_section(&self, parent: &mut P, context: &mut Context) -> Result<()> {
        let value = self.reader.read(context, Some(&mut *parent))?;
        (self.setter)(parent, value);
        Ok(())
    }
}
