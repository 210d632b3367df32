use crate::converter::Converter;

/// A named field and the converter its values go through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<C> {
    name: String,
    converter: C,
}

impl<C: Converter> Field<C> {
    pub fn new(name: impl Into<String>, converter: C) -> Self {
        Self {
            name: name.into(),
            converter,
        }
    }

    /// Logical field name, before any prefix is applied
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }
}

/// A fixed set of fields, declared as a struct of [`Field`] members.
///
/// Typed operations select fields with closures over the schema
/// (`|s| &s.count`), so an instance can only address its own fields.
/// Implement this by hand or declare the struct with [`typed_schema!`](crate::typed_schema).
pub trait Schema {
    /// Logical names of every field, in declaration order
    fn field_names(&self) -> Vec<&str>;
}

/// Declare a schema struct whose fields are named after its members.
///
/// ```
/// use typed_storage::converter::{enumeration, Boolean, Enumeration, Integer};
///
/// typed_storage::typed_schema! {
///     pub struct Preferences {
///         pub visits: Integer = Integer,
///         pub dark_mode: Boolean = Boolean,
///         pub layout: Enumeration = enumeration(["grid", "list"]),
///     }
/// }
///
/// let prefs = Preferences::new();
/// assert_eq!(prefs.dark_mode.name(), "dark_mode");
/// ```
#[macro_export]
macro_rules! typed_schema {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $converter:ty = $init:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $crate::typed::Field<$converter>,
            )+
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    $( $field: $crate::typed::Field::new(stringify!($field), $init), )+
                }
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $crate::typed::Schema for $name {
            fn field_names(&self) -> ::std::vec::Vec<&str> {
                ::std::vec![ $( self.$field.name(), )+ ]
            }
        }
    };
}
