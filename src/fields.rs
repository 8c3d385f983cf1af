//! Assignment of object fields by name
//!
//! A type exposes the fields that line readers may set through a
//! [`FieldTable`]: an ordered map from field name to a typed setter. The
//! [`impl_fields!`](crate::impl_fields) macro generates the table for plain
//! scalar struct fields.

use crate::convert::{Scalar, ScalarKind};
use crate::error::ReadError;
use indexmap::IndexMap;
use std::fmt;

type Setter<P> = Box<dyn Fn(&mut P, &str) -> Result<(), ReadError> + Send + Sync>;

/// A settable field of `P`
struct FieldSetter<P> {
    kind: ScalarKind,
    set: Setter<P>,
}

/// Named, typed setters for the fields of `P`
pub struct FieldTable<P> {
    type_name: String,
    fields: IndexMap<String, FieldSetter<P>>,
}

impl<P> FieldTable<P> {
    /// Create an empty table for the named type
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Register a field; the token is converted to `V` before the setter is called
    pub fn field<V, F>(mut self, name: impl Into<String>, setter: F) -> Self
    where
        V: Scalar,
        F: Fn(&mut P, V) + Send + Sync + 'static,
    {
        let set: Setter<P> = Box::new(move |parent, token| {
            setter(parent, V::convert(token)?);
            Ok(())
        });
        self.fields.insert(name.into(), FieldSetter { kind: V::KIND, set });
        self
    }

    /// Name of the type this table sets fields on
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Check if a field is registered
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get the declared kind of a field
    pub fn kind(&self, name: &str) -> Option<ScalarKind> {
        self.fields.get(name).map(|f| f.kind)
    }

    /// Field names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of registered fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the table has no field
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert `token` to the type of field `name` and assign it on `parent`
    pub fn set(&self, parent: &mut P, name: &str, token: &str) -> Result<(), ReadError> {
        let field = self.fields.get(name).ok_or_else(|| ReadError::UnknownField {
            type_name: self.type_name.clone(),
            field: name.to_string(),
        })?;
        (field.set)(parent, token).map_err(|e| match e {
            ReadError::TypeConversion { value, kind, .. } => ReadError::TypeConversion {
                value,
                kind,
                field: Some(name.to_string()),
            },
            other => other,
        })
    }
}

impl<P> fmt::Debug for FieldTable<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldTable")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields.iter().map(|(n, s)| (n, s.kind)).collect::<Vec<_>>())
            .finish()
    }
}

/// A type whose fields can be assigned from input tokens by name
pub trait Fields: Sized {
    /// Build the setter table of this type
    fn field_table() -> FieldTable<Self>;
}

/// The unit type has no field; readers on `()` may only set variables
impl Fields for () {
    fn field_table() -> FieldTable<Self> {
        FieldTable::new("()")
    }
}

/// Implement [`Fields`] for the listed scalar fields of a struct.
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Point { x: f64, y: f64 }
///
/// linewise::impl_fields!(Point { x, y });
/// ```
#[macro_export]
macro_rules! impl_fields {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::Fields for $ty {
            fn field_table() -> $crate::FieldTable<Self> {
                $crate::FieldTable::new(stringify!($ty))
                    $(.field(stringify!($field), |p: &mut $ty, v| p.$field = v))*
            }
        }
    };
}
