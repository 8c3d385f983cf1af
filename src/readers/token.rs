//! Single-token reader

use super::SectionReader;
use crate::context::Context;
use crate::error::{ReadError, Result};
use crate::fields::{FieldTable, Fields};
use std::sync::Arc;

/// Reads one token from the input and assigns it to a field of the parent
/// and/or a context variable.
///
/// The token may sit on the current line or on a following one. Without
/// field nor variable, the token is consumed and dropped.
pub struct FieldAndVarReader<P> {
    field: Option<String>,
    variable: Option<String>,
    table: Arc<FieldTable<P>>,
}

impl<P: Fields> FieldAndVarReader<P> {
    /// Create a reader for an optional field and an optional variable.
    ///
    /// A name that is given but empty is rejected with
    /// [`ReadError::EmptyName`]; omit it with `None` instead.
    pub fn new(field: Option<&str>, variable: Option<&str>) -> std::result::Result<Self, ReadError> {
        if field.map_or(false, str::is_empty) {
            return Err(ReadError::EmptyName("field"));
        }
        if variable.map_or(false, str::is_empty) {
            return Err(ReadError::EmptyName("variable"));
        }
        Ok(Self {
            field: field.map(str::to_string),
            variable: variable.map(str::to_string),
            table: Arc::new(P::field_table()),
        })
    }

    /// Read into a field only
    pub fn field(name: &str) -> std::result::Result<Self, ReadError> {
        Self::new(Some(name), None)
    }

    /// Read into a variable only
    pub fn variable(name: &str) -> std::result::Result<Self, ReadError> {
        Self::new(None, Some(name))
    }
}

impl<P> SectionReader<P> for FieldAndVarReader<P> {
    fn read_section(&self, parent: &mut P, context: &mut Context) -> Result<()> {
        let line_number = context.next_line_number();
        let value = context.read_string().map_err(|e| e.at(line_number))?;
        if let Some(variable) = &self.variable {
            context.set_variable(variable.as_str(), value.as_str());
        }
        if let Some(field) = &self.field {
            if let Err(e) = self.table.set(parent, field, &value) {
                let line = context.current_line().unwrap_or_default().to_string();
                return Err(e.at_line(context.lines_read(), line));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impl_fields;

    #[derive(Debug, Default)]
    struct Item {
        id: u32,
        label: String,
    }

    impl_fields!(Item { id, label });

    #[test]
    fn test_reads_tokens_across_lines() {
        let id = FieldAndVarReader::<Item>::new(Some("id"), Some("ID")).unwrap();
        let label = FieldAndVarReader::<Item>::field("label").unwrap();
        let mut item = Item::default();
        let mut ctx = Context::from_text("7\nbox");

        id.read_section(&mut item, &mut ctx).unwrap();
        label.read_section(&mut item, &mut ctx).unwrap();

        assert_eq!(item.id, 7);
        assert_eq!(item.label, "box");
        assert_eq!(ctx.get_variable_as_int("ID").unwrap(), 7);
    }

    #[test]
    fn test_reads_tokens_of_the_same_line() {
        let skip = FieldAndVarReader::<Item>::new(None, None).unwrap();
        let var = FieldAndVarReader::<Item>::variable("V").unwrap();
        let mut ctx = Context::from_text("a b");

        skip.read_section(&mut Item::default(), &mut ctx).unwrap();
        var.read_section(&mut Item::default(), &mut ctx).unwrap();

        assert_eq!(ctx.get_variable("V").unwrap(), "b");
        assert_eq!(ctx.lines_read(), 1);
    }

    #[test]
    fn test_conversion_error_reports_line() {
        let id = FieldAndVarReader::<Item>::field("id").unwrap();
        let mut ctx = Context::from_text("\nnope");
        let err = id.read_section(&mut Item::default(), &mut ctx).unwrap_err();
        assert_eq!(err.line_number, 2);
        assert_eq!(err.line.as_deref(), Some("nope"));
        assert!(matches!(err.cause, ReadError::TypeConversion { .. }));
    }

    #[test]
    fn test_empty_names_rejected() {
        assert!(matches!(
            FieldAndVarReader::<Item>::new(Some(""), None),
            Err(ReadError::EmptyName("field"))
        ));
        assert!(matches!(
            FieldAndVarReader::<Item>::variable(""),
            Err(ReadError::EmptyName("variable"))
        ));
    }
}
