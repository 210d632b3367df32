use crate::converter::Converter;

/// `bool` stored as `"1"` / `"0"`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Boolean;

impl Converter for Boolean {
    type Value = bool;

    fn parse(&self, raw: &str) -> Option<bool> {
        match raw {
            "1" => Some(true),
            "0" => Some(false),
            _ => None,
        }
    }

    fn stringify(&self, value: &bool) -> String {
        let raw = if *value { "1" } else { "0" };
        raw.to_string()
    }
}

/// `String` stored as itself. Never fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Text;

impl Converter for Text {
    type Value = String;

    fn parse(&self, raw: &str) -> Option<String> {
        Some(raw.to_string())
    }

    fn stringify(&self, value: &String) -> String {
        value.clone()
    }
}
