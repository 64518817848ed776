//! Parsers for user-supplied filter strings
//!
//! Filter criteria arrive as free text. Every parser here is total:
//! malformed input degrades to a zero default instead of an error, so
//! a bad criterion can narrow a listing but never abort a query.

/// An area criterion parsed from its string form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaBound {
    /// Carpet area must equal this value exactly
    Exact(u64),
    /// Carpet area must be at least this value
    AtLeast(u64),
}

/// Extract the numeric value from a string by stripping every
/// non-digit character.
///
/// "Rs. 5,000,000" -> 5000000, "abc" -> 0. Digit runs too long for a
/// u64 saturate instead of overflowing.
pub fn extract_digits(s: &str) -> u64 {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

/// Parse a price range string into `(min, max)` bounds.
///
/// `"min-max"` is an inclusive range, `"min+"` is open-ended, and a
/// plain number is the degenerate exact range. Each component goes
/// through [`extract_digits`], so `"abc-def"` becomes the range 0-0.
pub fn parse_price_range(s: &str) -> (u64, Option<u64>) {
    let s = s.trim();
    if let Some((low, high)) = s.split_once('-') {
        (extract_digits(low), Some(extract_digits(high)))
    } else if let Some(base) = s.strip_suffix('+') {
        (extract_digits(base), None)
    } else {
        let exact = extract_digits(s);
        (exact, Some(exact))
    }
}

/// Parse an area criterion: `"N"` for an exact match, `"N+"` for
/// at-least.
pub fn parse_area(s: &str) -> AreaBound {
    let s = s.trim();
    if let Some(base) = s.strip_suffix('+') {
        AreaBound::AtLeast(extract_digits(base))
    } else {
        AreaBound::Exact(extract_digits(s))
    }
}
