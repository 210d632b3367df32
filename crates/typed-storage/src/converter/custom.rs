use std::fmt;
use std::marker::PhantomData;

use crate::converter::Converter;

/// Converter assembled from a parse closure and a stringify closure
pub struct Custom<V, P, S> {
    parse: P,
    stringify: S,
    _value: PhantomData<fn() -> V>,
}

/// Build a converter from two closures.
///
/// The closures must uphold the converter laws themselves: `parse` returns
/// `None` instead of panicking, and `parse(&stringify(&v))` gives back `v`.
pub fn custom<V, P, S>(parse: P, stringify: S) -> Custom<V, P, S>
where
    P: Fn(&str) -> Option<V>,
    S: Fn(&V) -> String,
{
    Custom {
        parse,
        stringify,
        _value: PhantomData,
    }
}

impl<V, P, S> Converter for Custom<V, P, S>
where
    P: Fn(&str) -> Option<V>,
    S: Fn(&V) -> String,
{
    type Value = V;

    fn parse(&self, raw: &str) -> Option<V> {
        (self.parse)(raw)
    }

    fn stringify(&self, value: &V) -> String {
        (self.stringify)(value)
    }
}

impl<V, P: Clone, S: Clone> Clone for Custom<V, P, S> {
    fn clone(&self) -> Self {
        Self {
            parse: self.parse.clone(),
            stringify: self.stringify.clone(),
            _value: PhantomData,
        }
    }
}

impl<V, P, S> fmt::Debug for Custom<V, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Custom<{}>", std::any::type_name::<V>())
    }
}
