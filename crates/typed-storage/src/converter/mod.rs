//! # Converters
//!
//! A [`Converter`] is a pure, stateless, bidirectional mapping between one raw
//! stored string and one typed value. Typed fields pick a converter once, at
//! schema declaration, and every read and write of the field runs through it.
//!
//! Two laws hold for every converter in this module:
//!
//! - `parse` never panics. Input that cannot be faithfully read as a value
//!   yields `None`.
//! - For every value `v` in the converter's documented domain,
//!   `parse(&stringify(&v)) == Some(v)`.
//!
//! Built-ins: [`Boolean`], [`Text`], [`Integer`], [`Float`], [`IsoDate`],
//! [`Enumeration`], [`Json`], plus [`custom`] for closure-built converters.
pub mod builtin;
pub mod custom;
pub mod date;
pub mod enumeration;
pub mod json;
pub mod numeric;

pub use builtin::{Boolean, Text};
pub use custom::{custom, Custom};
pub use date::IsoDate;
pub use enumeration::{enumeration, Enumeration};
pub use json::{json, Json};
pub use numeric::{Float, Integer};

/// Bidirectional mapping between a raw string and a typed value
pub trait Converter {
    /// The typed value this converter produces
    type Value;

    /// Interpret `raw`, or `None` when it is not a faithful encoding of a value
    fn parse(&self, raw: &str) -> Option<Self::Value>;

    /// Encode `value` as a string `parse` maps back to an equal value
    fn stringify(&self, value: &Self::Value) -> String;
}

impl<C: Converter + ?Sized> Converter for Box<C> {
    type Value = C::Value;

    fn parse(&self, raw: &str) -> Option<Self::Value> {
        (**self).parse(raw)
    }

    fn stringify(&self, value: &Self::Value) -> String {
        (**self).stringify(value)
    }
}

#[cfg(test)]
mod tests;
