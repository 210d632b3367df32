//! Integer and float converters.
//!
//! Parsing is prefix-permissive: leading whitespace is skipped, an optional
//! sign is accepted, and the longest numeric prefix is read while anything
//! after it is ignored, so `"42abc"` reads as `42`. Input with no numeric
//! prefix at all reads as `None`.
use crate::converter::Converter;

/// `i64` stored in decimal.
///
/// Parsing also accepts a `0x` / `0X` hexadecimal prefix. A numeric prefix
/// outside the `i64` range reads as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Integer;

impl Converter for Integer {
    type Value = i64;

    fn parse(&self, raw: &str) -> Option<i64> {
        parse_int_prefix(raw)
    }

    fn stringify(&self, value: &i64) -> String {
        value.to_string()
    }
}

/// `f64` stored as its shortest round-tripping decimal, with infinities
/// stored as `Infinity` / `-Infinity`.
///
/// NaN is outside this converter's domain: it is stored as `"NaN"`, which
/// reads back as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Float;

impl Converter for Float {
    type Value = f64;

    fn parse(&self, raw: &str) -> Option<f64> {
        parse_float_prefix(raw)
    }

    fn stringify(&self, value: &f64) -> String {
        if value.is_nan() {
            "NaN".to_string()
        } else if *value == f64::INFINITY {
            "Infinity".to_string()
        } else if *value == f64::NEG_INFINITY {
            "-Infinity".to_string()
        } else {
            value.to_string()
        }
    }
}

fn trim_leading(raw: &str) -> &str {
    raw.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Split an optional leading sign off `s`, returning (sign, rest)
fn split_sign(s: &str) -> (&str, &str) {
    match s.as_bytes().first() {
        Some(b'-') => ("-", &s[1..]),
        Some(b'+') => ("", &s[1..]),
        _ => ("", s),
    }
}

/// Read the longest integer prefix of `raw`
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let (sign, rest) = split_sign(trim_leading(raw));

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    i64::from_str_radix(&format!("{}{}", sign, &digits[..end]), radix).ok()
}

/// Read the longest float prefix of `raw`
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let (sign, rest) = split_sign(trim_leading(raw));

    if rest.starts_with("Infinity") {
        return Some(if sign == "-" { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let bytes = rest.as_bytes();
    let count_digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let int_digits = count_digits(0);
    let mut end = int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // An exponent only counts when at least one digit follows it
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+') | Some(b'-')) {
            exp_start += 1;
        }
        let exp_digits = count_digits(exp_start.min(bytes.len()));
        if exp_digits > 0 {
            end = exp_start + exp_digits;
        }
    }

    format!("{}{}", sign, &rest[..end]).parse::<f64>().ok()
}
