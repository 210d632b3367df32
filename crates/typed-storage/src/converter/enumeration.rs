use crate::converter::Converter;

/// Closed-membership converter: each member is stored as its own string,
/// and only an exact member string parses.
///
/// Members are any `AsRef<str>` type: string literals for ad-hoc sets, or a
/// Rust enum whose `as_ref` gives its stored name, in which case the type
/// system already rules out non-members on the write side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration<T = &'static str> {
    members: Vec<T>,
}

/// Build an [`Enumeration`] over the exhaustive list of valid `members`
pub fn enumeration<T, I>(members: I) -> Enumeration<T>
where
    T: AsRef<str> + Clone,
    I: IntoIterator<Item = T>,
{
    Enumeration {
        members: members.into_iter().collect(),
    }
}

impl<T: AsRef<str> + Clone> Enumeration<T> {
    pub fn members(&self) -> &[T] {
        &self.members
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.members.iter().any(|m| m.as_ref() == raw)
    }
}

impl<T: AsRef<str> + Clone> Converter for Enumeration<T> {
    type Value = T;

    fn parse(&self, raw: &str) -> Option<T> {
        self.members.iter().find(|m| m.as_ref() == raw).cloned()
    }

    fn stringify(&self, value: &T) -> String {
        value.as_ref().to_string()
    }
}
