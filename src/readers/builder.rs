//! Fluent assembly of root readers built from context variables

use super::line::FieldsReader;
use super::root::RootReader;
use super::SectionReader;
use crate::context::Context;
use crate::error::ReadError;
use std::sync::Arc;

/// Collects pre-readers, then produces a [`RootReader`] whose constructor
/// pulls its arguments from the variables those pre-readers set.
///
/// ```rust,ignore
/// let reader = ReaderBuilder::new()
///     .with_vars(["W", "H"])
///     .of_n(["W", "H"], |[w, h]| Grid::new(w as usize, h as usize));
/// ```
#[derive(Clone, Default)]
pub struct ReaderBuilder {
    pre_readers: Vec<Arc<dyn SectionReader<()>>>,
}

impl ReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pre-reader
    pub fn add<S>(mut self, reader: S) -> Self
    where
        S: SectionReader<()> + 'static,
    {
        self.pre_readers.push(Arc::new(reader));
        self
    }

    /// Add a pre-reader storing the tokens of one line in the named variables.
    ///
    /// Names may carry their own `@` prefix; `"@"` alone skips a token.
    pub fn with_vars<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<String> = names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                if name.starts_with('@') {
                    name.to_string()
                } else {
                    format!("@{}", name)
                }
            })
            .collect();
        self.add(FieldsReader::<()>::new(labels))
    }

    /// Number of pre-readers registered so far
    pub fn len(&self) -> usize {
        self.pre_readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pre_readers.is_empty()
    }

    /// Finish with a constructor reading whatever it needs from the context
    pub fn of<T, F>(self, creator: F) -> RootReader<T>
    where
        T: 'static,
        F: Fn(&mut Context) -> Result<T, ReadError> + Send + Sync + 'static,
    {
        RootReader::with_creator(self.pre_readers, creator)
    }

    /// Finish with a constructor taking the named variables as integers
    pub fn of_ints<T, I, S, F>(self, names: I, constructor: F) -> RootReader<T>
    where
        T: 'static,
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&[i64]) -> T + Send + Sync + 'static,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        self.of(move |ctx| {
            let values = names
                .iter()
                .map(|name| ctx.get_variable_as_int(name))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(constructor(&values))
        })
    }

    /// Finish with a constructor taking exactly `N` named variables as integers
    pub fn of_n<T, F, const N: usize>(self, names: [&str; N], constructor: F) -> RootReader<T>
    where
        T: 'static,
        F: Fn([i64; N]) -> T + Send + Sync + 'static,
    {
        let names = names.map(str::to_string);
        self.of(move |ctx| {
            let mut values = [0i64; N];
            for (value, name) in values.iter_mut().zip(&names) {
                *value = ctx.get_variable_as_int(name)?;
            }
            Ok(constructor(values))
        })
    }

    /// Finish with a constructor taking the next `N` integer tokens of the input
    pub fn of_tokens<T, F, const N: usize>(self, constructor: F) -> RootReader<T>
    where
        T: 'static,
        F: Fn([i64; N]) -> T + Send + Sync + 'static,
    {
        self.of(move |ctx| {
            let mut values = [0i64; N];
            for value in values.iter_mut() {
                *value = ctx.read_int()?;
            }
            Ok(constructor(values))
        })
    }
}
