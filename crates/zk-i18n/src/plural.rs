//! Two-way singular/plural choice used by the counting templates.
//!
//! English and German only need `one` vs `other`, and the UI strings pick the
//! plural form strictly when the count is greater than one. Zero, negative
//! and non-numeric arguments therefore render the singular form.

use crate::value::FormatArg;

/// Plural category selected for an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralCategory {
    One,
    Other,
}

impl PluralCategory {
    #[must_use]
    pub fn of(arg: FormatArg<'_>) -> Self {
        match arg.as_number() {
            Some(n) if n > 1.0 => Self::Other,
            _ => Self::One,
        }
    }

    /// Pick `one` or `other` for this category.
    #[must_use]
    pub fn select<'a>(self, one: &'a str, other: &'a str) -> &'a str {
        match self {
            Self::One => one,
            Self::Other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greater_than_one_is_plural() {
        assert_eq!(PluralCategory::of(FormatArg::Number(2)), PluralCategory::Other);
        assert_eq!(PluralCategory::of(FormatArg::Number(100)), PluralCategory::Other);
        assert_eq!(PluralCategory::of(FormatArg::Text("7")), PluralCategory::Other);
    }

    #[test]
    fn one_zero_and_negative_are_singular() {
        assert_eq!(PluralCategory::of(FormatArg::Number(1)), PluralCategory::One);
        assert_eq!(PluralCategory::of(FormatArg::Number(0)), PluralCategory::One);
        assert_eq!(PluralCategory::of(FormatArg::Number(-4)), PluralCategory::One);
    }

    #[test]
    fn fractional_text_above_one_is_plural() {
        assert_eq!(PluralCategory::of(FormatArg::Text("1.5")), PluralCategory::Other);
    }

    #[test]
    fn non_numeric_is_singular() {
        assert_eq!(PluralCategory::of(FormatArg::Text("many")), PluralCategory::One);
        assert_eq!(PluralCategory::of(FormatArg::Text("")), PluralCategory::One);
        assert_eq!(PluralCategory::of(FormatArg::Text("inf")), PluralCategory::One);
    }

    #[test]
    fn radix_text_counts_by_value() {
        assert_eq!(PluralCategory::of(FormatArg::Text("0x10")), PluralCategory::Other);
        assert_eq!(PluralCategory::of(FormatArg::Text("0b1")), PluralCategory::One);
    }

    #[test]
    fn select_form() {
        assert_eq!(PluralCategory::One.select("day", "days"), "day");
        assert_eq!(PluralCategory::Other.select("day", "days"), "days");
    }
}
