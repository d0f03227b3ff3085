//! Translation values: literal text, month lists and formatting templates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of entries in every list value (one per calendar month).
pub const MONTH_COUNT: usize = 12;

/// A value stored under a translation key.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text rendered as-is. May contain inline markup the renderer trusts.
    Literal(String),
    /// Ordered month names or abbreviations, index 0 = January.
    List(Vec<String>),
    /// Single-argument formatting function.
    Template(Template),
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Literal(_) => ValueKind::Literal,
            Self::List(_) => ValueKind::List,
            Self::Template(_) => ValueKind::Template,
        }
    }
}

/// Shape of a value, independent of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Literal,
    List,
    Template,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Literal => "literal",
            Self::List => "list",
            Self::Template => "template",
        })
    }
}

/// Argument passed to a [`Template`].
///
/// Dates and names arrive already formatted by the caller as text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatArg<'a> {
    Text(&'a str),
    Number(i64),
}

impl FormatArg<'_> {
    /// Numeric reading of the argument.
    ///
    /// Text follows the web UI's string-to-number conversion: surrounding
    /// whitespace is ignored, empty text is zero, `0x`/`0o`/`0b` select a
    /// radix, and only `Infinity` spells infinity. Non-numeric text yields
    /// `None`.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n as f64),
            Self::Text(s) => text_to_number(s),
        }
    }
}

fn text_to_number(text: &str) -> Option<f64> {
    let s = text.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }

    match s {
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        // `str::parse` also takes `inf`, `infinity` and `nan`.
        _ if s
            .bytes()
            .any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E')) =>
        {
            None
        }
        _ => s.parse::<f64>().ok(),
    }
}

impl fmt::Display for FormatArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl<'a> From<&'a str> for FormatArg<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(s)
    }
}

impl<'a> From<&'a String> for FormatArg<'a> {
    fn from(s: &'a String) -> Self {
        Self::Text(s.as_str())
    }
}

impl From<i64> for FormatArg<'_> {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for FormatArg<'_> {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<u32> for FormatArg<'_> {
    fn from(n: u32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<usize> for FormatArg<'_> {
    fn from(n: usize) -> Self {
        Self::Number(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

/// Pure formatting function bound to one key in one locale.
#[derive(Clone, Copy)]
pub struct Template {
    render: fn(FormatArg<'_>) -> String,
}

impl Template {
    #[must_use]
    pub const fn new(render: fn(FormatArg<'_>) -> String) -> Self {
        Self { render }
    }

    /// Render the template with `arg`.
    #[must_use]
    pub fn render(&self, arg: FormatArg<'_>) -> String {
        (self.render)(arg)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Template(..)")
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::fn_addr_eq(self.render, other.render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Value::Literal("x".into()).kind(), ValueKind::Literal);
        assert_eq!(Value::List(vec![]).kind(), ValueKind::List);
        let t = Template::new(|arg| format!("<{arg}>"));
        assert_eq!(Value::Template(t).kind(), ValueKind::Template);
    }

    #[test]
    fn arg_display() {
        assert_eq!(FormatArg::from("01.02.2025").to_string(), "01.02.2025");
        assert_eq!(FormatArg::from(42_i64).to_string(), "42");
        assert_eq!(FormatArg::from(-3_i32).to_string(), "-3");
    }

    #[test]
    fn arg_numeric_reading() {
        assert_eq!(FormatArg::Number(2).as_number(), Some(2.0));
        assert_eq!(FormatArg::Text(" 3 ").as_number(), Some(3.0));
        assert_eq!(FormatArg::Text("2.5").as_number(), Some(2.5));
        assert_eq!(FormatArg::Text("Anna").as_number(), None);
    }

    #[test]
    fn text_numbers_follow_web_conversion() {
        let n = |s| FormatArg::Text(s).as_number();
        assert_eq!(n("0x10"), Some(16.0));
        assert_eq!(n("0b101"), Some(5.0));
        assert_eq!(n("0o17"), Some(15.0));
        assert_eq!(n("0x"), None);
        assert_eq!(n("0xZ"), None);
        assert_eq!(n("-0x10"), None);
        assert_eq!(n("inf"), None);
        assert_eq!(n("infinity"), None);
        assert_eq!(n("NaN"), None);
        assert_eq!(n("Infinity"), Some(f64::INFINITY));
        assert_eq!(n("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(n("1e3"), Some(1000.0));
        assert_eq!(n("+5"), Some(5.0));
        assert_eq!(n(".5"), Some(0.5));
        assert_eq!(n("   "), Some(0.0));
        assert_eq!(n("1_000"), None);
    }

    #[test]
    fn template_renders() {
        let t = Template::new(|arg| format!("Up to {arg} users"));
        assert_eq!(t.render(FormatArg::Number(5)), "Up to 5 users");
        assert_eq!(format!("{t:?}"), "Template(..)");
    }

    #[test]
    fn kind_display() {
        assert_eq!(ValueKind::Template.to_string(), "template");
        assert_eq!(
            serde_json::to_string(&ValueKind::List).unwrap(),
            "\"list\""
        );
    }
}
