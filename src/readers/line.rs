//! Readers consuming exactly one line of input

use super::SectionReader;
use crate::context::Context;
use crate::convert::Scalar;
use crate::error::{ReadError, Result};
use crate::fields::{FieldTable, Fields};
use std::fmt;
use std::sync::Arc;

/// Consume one line, split it, and hand its tokens to `set_values`.
///
/// Any failure is reported with the number and text of the consumed line.
pub(crate) fn read_single_line<F>(context: &mut Context, set_values: F) -> Result<()>
where
    F: FnOnce(&[&str], &mut Context) -> std::result::Result<(), ReadError>,
{
    let line_number = context.next_line_number();
    let line = context.read_line().map_err(|e| e.at(line_number))?;
    let values = context.config().split(&line);
    set_values(&values, context).map_err(|e| e.at_line(line_number, line.as_str()))
}

/// Destination of one token: a field of the parent, a context variable, both, or neither.
///
/// Written `"field"`, `"@variable"` or `"field@variable"`. An empty side of
/// the `@` means that assignment is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLabel {
    pub field: Option<String>,
    pub variable: Option<String>,
}

impl FieldLabel {
    /// Parse a label.
    ///
    /// Only the text between the first and second `@` names the variable;
    /// anything after a second `@` is ignored.
    pub fn parse(label: &str) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        let mut parts = label.split('@');
        Self {
            field: parts.next().and_then(non_empty),
            variable: parts.next().and_then(non_empty),
        }
    }

    /// Assign the token to the variable, then to the field
    pub fn assign<P>(
        &self,
        table: &FieldTable<P>,
        parent: &mut P,
        token: &str,
        context: &mut Context,
    ) -> std::result::Result<(), ReadError> {
        if let Some(variable) = &self.variable {
            context.set_variable(variable.as_str(), token);
        }
        if let Some(field) = &self.field {
            table.set(parent, field, token)?;
        }
        Ok(())
    }
}

impl fmt::Display for FieldLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.field, &self.variable) {
            (Some(field), Some(variable)) => write!(f, "{}@{}", field, variable),
            (Some(field), None) => write!(f, "{}", field),
            (None, Some(variable)) => write!(f, "@{}", variable),
            (None, None) => write!(f, "@"),
        }
    }
}

/// Reads one line holding one token per label, assigning each token to a
/// field of the parent and/or a context variable.
pub struct FieldsReader<P> {
    labels: Vec<FieldLabel>,
    table: Arc<FieldTable<P>>,
}

impl<P: Fields> FieldsReader<P> {
    /// Create a reader for the given labels (see [`FieldLabel`])
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_table(labels, Arc::new(P::field_table()))
    }
}

impl<P> FieldsReader<P> {
    /// Create a reader setting fields through an existing table
    pub fn with_table<I, S>(labels: I, table: Arc<FieldTable<P>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            labels: labels.into_iter().map(|l| FieldLabel::parse(l.as_ref())).collect(),
            table,
        }
    }

    /// Labels of the expected tokens
    pub fn labels(&self) -> &[FieldLabel] {
        &self.labels
    }

    fn set_values(
        &self,
        parent: &mut P,
        values: &[&str],
        context: &mut Context,
    ) -> std::result::Result<(), ReadError> {
        if values.len() != self.labels.len() {
            return Err(ReadError::ArityMismatch {
                expected: self.labels.iter().map(ToString::to_string).collect(),
                actual: values.len(),
            });
        }
        for (label, value) in self.labels.iter().zip(values) {
            label.assign(&self.table, parent, value, context)?;
        }
        Ok(())
    }
}

impl<P> SectionReader<P> for FieldsReader<P> {
    fn read_section(&self, parent: &mut P, context: &mut Context) -> Result<()> {
        read_single_line(context, |values, ctx| self.set_values(parent, values, ctx))
    }
}

/// Reads one line of scalar values of the same type and hands them to the parent
pub struct ArrayLineReader<E, P> {
    setter: Arc<dyn Fn(&mut P, Vec<E>) + Send + Sync>,
}

impl<E: Scalar, P> ArrayLineReader<E, P> {
    /// Create a reader passing the converted values to `setter`
    pub fn new<F>(setter: F) -> Self
    where
        F: Fn(&mut P, Vec<E>) + Send + Sync + 'static,
    {
        Self {
            setter: Arc::new(setter),
        }
    }
}

impl<E: Scalar, P> SectionReader<P> for ArrayLineReader<E, P> {
    fn read_section(&self, parent: &mut P, context: &mut Context) -> Result<()> {
        read_single_line(context, |values, _| {
            let converted = values
                .iter()
                .map(|v| E::convert(v))
                .collect::<std::result::Result<Vec<E>, _>>()?;
            (self.setter)(parent, converted);
            Ok(())
        })
    }
}
