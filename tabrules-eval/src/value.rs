//! Row storage and the coercion rules used to compare and combine cells.

use rustc_hash::FxHashMap;

/// One ingested row: a 1-based column index to its raw, already-trimmed
/// cell text. Keyed by `FxHashMap` since columns are small dense integers
/// looked up repeatedly during a row's rule evaluations, and the keys never
/// come from untrusted external sources that would need a DoS-resistant
/// hash.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    cells: FxHashMap<u32, String>,
}

impl Row {
    /// Builds a row from an ordered sequence of raw cell strings, as
    /// produced by CSV splitting. Column 1 is `cells[0]`. Every cell is
    /// trimmed before storage, per the coercion contract.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = FxHashMap::default();
        for (idx, cell) in cells.into_iter().enumerate() {
            map.insert(idx as u32 + 1, cell.as_ref().trim().to_string());
        }
        Row { cells: map }
    }

    /// The raw trimmed text at `col` (1-based), or `None` if the row has
    /// fewer columns than `col`.
    pub fn get(&self, col: u32) -> Option<&str> {
        self.cells.get(&col).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The result of attempting to treat a cell's text as a number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Coerced {
    Numeric(f64),
    NotNumeric,
}

/// Tolerance for numeric equality comparisons.
pub const EPSILON: f64 = 1e-3;

/// Coerces trimmed text to a double. A text value coerces when it parses as
/// a signed decimal with at most one fractional part; Rust's `f64::from_str`
/// already implements exactly that grammar (plus accepting `inf`/`nan`
/// spellings, which this rejects explicitly - a data cell spelling "nan"
/// is not a number in this domain).
pub fn coerce_numeric(text: &str) -> Coerced {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Coerced::NotNumeric;
    }
    if !is_plain_decimal(trimmed) {
        return Coerced::NotNumeric;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Coerced::Numeric(v),
        _ => Coerced::NotNumeric,
    }
}

/// Accepts an optional leading `-`, a run of digits, and an optional `.`
/// followed by more digits. Rejects exponents, `inf`, `nan` and leading `+`,
/// none of which the rule language treats as numeric literals.
fn is_plain_decimal(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    if s.is_empty() {
        return false;
    }
    let mut parts = s.splitn(2, '.');
    let int_part = parts.next().unwrap_or("");
    let frac_part = parts.next();

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if let Some(frac) = frac_part {
        if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }
    true
}

/// Renders a numeric value to text: integral values with no fractional
/// part, non-integral values with at least one fractional digit.
pub fn render_number(v: f64) -> String {
    if v.fract() == 0.0 && v.is_finite() {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// Formats an arithmetic-expression result for a diagnostic message, always
/// with two fractional digits.
pub fn render_diagnostic_number(v: f64) -> String {
    format!("{:.2}", v)
}

/// Numeric equality within [`EPSILON`].
pub fn numeric_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// `x / 0` is defined as `0`, not an error and not `NaN`/`inf`.
pub fn safe_div(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        0.0
    } else {
        a / b
    }
}

/// Datatype predicates evaluated against a cell's trimmed text.
pub mod predicate {
    use super::is_plain_decimal;

    pub fn is_alphanum(text: &str) -> bool {
        !text.is_empty() && text.bytes().all(|b| b.is_ascii_alphanumeric())
    }

    pub fn is_numeric(text: &str) -> bool {
        is_plain_decimal(text.trim())
    }

    pub fn is_integer(text: &str) -> bool {
        let t = text.trim();
        let digits = t.strip_prefix('-').unwrap_or(t);
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn is_floating(text: &str) -> bool {
        is_plain_decimal(text.trim())
    }
}
