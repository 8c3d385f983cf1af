//! Root readers: object construction followed by field population

use super::container::{ContainerReader, Size};
use super::line::{ArrayLineReader, FieldsReader};
use super::token::FieldAndVarReader;
use super::{ChildReader, ChildStep, ObjectReader, SectionReader};
use crate::context::Context;
use crate::convert::Scalar;
use crate::error::{ReadError, Result};
use crate::fields::Fields;
use std::sync::Arc;

type Creator<T> = dyn Fn(&mut Context) -> std::result::Result<T, ReadError> + Send + Sync;

/// Creates an object, then completes it with section readers.
///
/// Reading runs in three steps:
///
/// 1. the pre-readers, which only set context variables
/// 2. the creator, which builds the object, usually from those variables
/// 3. the registered steps, in registration order, on the new object
///
/// Readers are cheap to clone and can be shared between parses.
pub struct RootReader<T> {
    pre_readers: Vec<Arc<dyn SectionReader<()>>>,
    creator: Arc<Creator<T>>,
    steps: Vec<Arc<dyn SectionReader<T>>>,
}

impl<T> Clone for RootReader<T> {
    fn clone(&self) -> Self {
        Self {
            pre_readers: self.pre_readers.clone(),
            creator: Arc::clone(&self.creator),
            steps: self.steps.clone(),
        }
    }
}

impl<T: 'static> RootReader<T> {
    /// Create objects with the given constructor, without consuming input
    pub fn create<F>(constructor: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::with_creator(Vec::new(), move |_| Ok(constructor()))
    }

    /// Create objects from the context after running pre-readers
    pub(crate) fn with_creator<F>(pre_readers: Vec<Arc<dyn SectionReader<()>>>, creator: F) -> Self
    where
        F: Fn(&mut Context) -> std::result::Result<T, ReadError> + Send + Sync + 'static,
    {
        Self {
            pre_readers,
            creator: Arc::new(creator),
            steps: Vec::new(),
        }
    }

    /// Run a section reader on each created object
    pub fn then_section<S>(mut self, section: S) -> Self
    where
        S: SectionReader<T> + 'static,
    {
        self.steps.push(Arc::new(section));
        self
    }

    /// Read one line into fields and/or variables (see [`FieldLabel`](super::FieldLabel))
    pub fn then_fields<I, S>(self, labels: I) -> Self
    where
        T: Fields,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.then_section(FieldsReader::<T>::new(labels))
    }

    /// Read one line into variables only
    pub fn then_vars<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<String> = names.into_iter().map(|n| format!("@{}", n.as_ref())).collect();
        self.then_section(VarsStep(FieldsReader::<()>::new(labels)))
    }

    /// Read a single token into a field and/or a variable.
    ///
    /// Fails with [`ReadError::EmptyName`] if a given name is empty.
    pub fn then_token(
        self,
        field: Option<&str>,
        variable: Option<&str>,
    ) -> std::result::Result<Self, ReadError>
    where
        T: Fields,
    {
        Ok(self.then_section(FieldAndVarReader::<T>::new(field, variable)?))
    }

    /// Read one line of scalars and pass them to `setter`
    pub fn then_array_line<E, F>(self, setter: F) -> Self
    where
        E: Scalar + 'static,
        F: Fn(&mut T, Vec<E>) + Send + Sync + 'static,
    {
        self.then_section(ArrayLineReader::new(setter))
    }

    /// Read a value with a child reader and pass it to `setter`
    pub fn then_child<C, R, F>(self, setter: F, reader: R) -> Self
    where
        C: 'static,
        R: ChildReader<C, T> + 'static,
        F: Fn(&mut T, C) + Send + Sync + 'static,
    {
        self.then_section(ChildStep::new(reader, setter))
    }

    /// Read a container and pass it to `setter`
    pub fn then_container<E, C, F>(self, setter: F, reader: ContainerReader<E, C, T>) -> Self
    where
        E: 'static,
        C: 'static,
        F: Fn(&mut T, C) + Send + Sync + 'static,
    {
        self.then_child(setter, reader)
    }

    /// Read a list of `size` items and pass it to `setter`
    pub fn then_list<E, R, F>(self, setter: F, size: impl Into<Size<T>>, item_reader: R) -> Self
    where
        E: 'static,
        R: ChildReader<E, T> + 'static,
        F: Fn(&mut T, Vec<E>) + Send + Sync + 'static,
    {
        self.then_child(setter, ContainerReader::<E, Vec<E>, T>::list(size, item_reader))
    }

    /// Read an array of `size` items and pass it to `setter`
    pub fn then_array<E, R, F>(self, setter: F, size: impl Into<Size<T>>, item_reader: R) -> Self
    where
        E: 'static,
        R: ChildReader<E, T> + 'static,
        F: Fn(&mut T, Box<[E]>) + Send + Sync + 'static,
    {
        self.then_child(setter, ContainerReader::<E, Vec<E>, T>::array(size, item_reader))
    }

    /// Number of steps run after construction
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Read an object
    pub fn read(&self, context: &mut Context) -> Result<T> {
        for pre_reader in &self.pre_readers {
            pre_reader.read_section(&mut (), context)?;
        }
        let lines_before = context.lines_read();
        let mut object = match (self.creator)(context) {
            Ok(object) => object,
            // Report the line the constructor stopped on, if it consumed any
            Err(e) if context.lines_read() > lines_before => {
                let line = context.current_line().unwrap_or_default().to_string();
                return Err(e.at_line(context.lines_read(), line));
            }
            Err(e) => return Err(e.at(lines_before + 1)),
        };
        for step in &self.steps {
            step.read_section(&mut object, context)?;
        }
        Ok(object)
    }
}

/// Variable-only line reader running on any parent
struct VarsStep(FieldsReader<()>);

impl<P> SectionReader<P> for VarsStep {
    fn read_section(&self, _parent: &mut P, context: &mut Context) -> Result<()> {
        self.0.read_section(&mut (), context)
    }
}

impl<T: 'static> ObjectReader<T> for RootReader<T> {
    fn read(&self, context: &mut Context) -> Result<T> {
        RootReader::read(self, context)
    }
}

/// A root reader nested in a larger pipeline ignores its parent
impl<T: 'static, P> ChildReader<T, P> for RootReader<T> {
    fn read(&self, context: &mut Context, _parent: Option<&mut P>) -> Result<T> {
        RootReader::read(self, context)
    }
}
