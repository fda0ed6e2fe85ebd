//! Per-rule verdicts and the row driver.

use crate::regexcache;
use crate::value::{self, coerce_numeric, predicate, Coerced, Row};
use tabrules_par::{BinOp, CompareOp, DatatypeKind, Expr, ParsedRule, PatternOp, Rule, Value};
use tabrules_util::InternalError;

/// The outcome of evaluating one rule against one row.
#[derive(Clone, Debug, PartialEq)]
pub struct Verdict {
    pub passed: bool,
    pub message: String,
    pub rule_index: usize,
}

fn ok(rule_index: usize, message: impl Into<String>) -> Verdict {
    Verdict {
        passed: true,
        message: message.into(),
        rule_index,
    }
}

fn fail(rule_index: usize, message: impl Into<String>) -> Verdict {
    Verdict {
        passed: false,
        message: message.into(),
        rule_index,
    }
}

fn check_col(col: u32) -> Result<(), InternalError> {
    if col == 0 {
        Err(InternalError::NonPositiveColumn(col as i64))
    } else {
        Ok(())
    }
}

/// Evaluates one parsed rule against one row, returning its verdict.
///
/// Only `InternalError` is surfaced as `Err`: a `passed=false` verdict is
/// the expected, non-error result of a failing rule.
pub fn evaluate_rule(parsed: &ParsedRule, row: &Row) -> Result<Verdict, InternalError> {
    check_col(parsed.rule.primary_col())?;
    let idx = parsed.rule_index;
    Ok(match &parsed.rule {
        Rule::Required { col } => eval_required(*col, row, idx),
        Rule::Datatype { col, kind } => eval_datatype(*col, *kind, row, idx),
        Rule::Comparison { col, op, value } => eval_comparison(*col, *op, value, row, idx),
        Rule::Pattern { col, op, text } => eval_pattern(*col, *op, text, row, idx),
        Rule::Range { col, min, max } => eval_range(*col, *min, *max, row, idx),
        Rule::Arithmetic { target, expr } => eval_arithmetic(*target, expr, row, idx),
    })
}

fn eval_required(col: u32, row: &Row, idx: usize) -> Verdict {
    match row.get(col) {
        Some(text) if !text.trim().is_empty() => ok(idx, format!("Column {col}C is present")),
        _ => fail(idx, format!("Column {col}C is required but empty")),
    }
}

fn eval_datatype(col: u32, kind: DatatypeKind, row: &Row, idx: usize) -> Verdict {
    let Some(text) = row.get(col) else {
        return fail(idx, format!("Column {col}C is empty"));
    };
    let (name, matches) = match kind {
        DatatypeKind::Alphanum => ("alphanum", predicate::is_alphanum(text)),
        DatatypeKind::Numeric => ("numeric", predicate::is_numeric(text)),
        DatatypeKind::Integer => ("integer", predicate::is_integer(text)),
        DatatypeKind::Float => ("floating", predicate::is_floating(text)),
        DatatypeKind::StringType => ("string", true),
    };
    if matches {
        ok(idx, format!("Column {col}C is {name}"))
    } else {
        fail(idx, format!("Column {col}C value '{text}' is not {name}"))
    }
}

fn resolve_value_text<'a>(value: &'a Value, row: &'a Row) -> (Option<f64>, String) {
    match value {
        Value::Number(n) => (Some(*n), value::render_number(*n)),
        Value::Text(s) => (None, s.clone()),
        Value::Col(c) => {
            let text = row.get(*c).unwrap_or("").to_string();
            let numeric = match coerce_numeric(&text) {
                Coerced::Numeric(v) => Some(v),
                Coerced::NotNumeric => None,
            };
            (numeric, text)
        }
    }
}

fn eval_comparison(col: u32, op: CompareOp, value: &Value, row: &Row, idx: usize) -> Verdict {
    let Some(left_text) = row.get(col) else {
        return fail(idx, format!("Column {col}C is empty"));
    };
    let (rhs_numeric, rhs_text) = resolve_value_text(value, row);
    let left_numeric = coerce_numeric(left_text);

    if let (Coerced::Numeric(l), Some(r)) = (left_numeric, rhs_numeric) {
        let passes = match op {
            CompareOp::Eq => value::numeric_eq(l, r),
            CompareOp::NotEq => !value::numeric_eq(l, r),
            CompareOp::Gt => l > r,
            CompareOp::Lt => l < r,
            CompareOp::GtEq => l >= r,
            CompareOp::LtEq => l <= r,
        };
        return verdict_for_comparison(passes, col, op, left_text, &rhs_text, idx);
    }

    match op {
        CompareOp::Eq => verdict_for_comparison(left_text == rhs_text, col, op, left_text, &rhs_text, idx),
        CompareOp::NotEq => verdict_for_comparison(left_text != rhs_text, col, op, left_text, &rhs_text, idx),
        _ => fail(
            idx,
            format!("Column {col}C value '{left_text}' is not numeric; cannot apply {op:?}"),
        ),
    }
}

fn verdict_for_comparison(
    passed: bool,
    col: u32,
    op: CompareOp,
    left_text: &str,
    rhs_text: &str,
    idx: usize,
) -> Verdict {
    let op_str = compare_op_str(op);
    if passed {
        ok(idx, format!("Column {col}C value '{left_text}' {op_str} '{rhs_text}'"))
    } else {
        fail(idx, format!("Column {col}C value '{left_text}' fails {op_str} '{rhs_text}'"))
    }
}

fn compare_op_str(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "=",
        CompareOp::NotEq => "!=",
        CompareOp::Gt => ">",
        CompareOp::Lt => "<",
        CompareOp::GtEq => ">=",
        CompareOp::LtEq => "<=",
    }
}

fn eval_pattern(col: u32, op: PatternOp, text: &str, row: &Row, idx: usize) -> Verdict {
    let cell = row.get(col).unwrap_or("");
    let (name, matches) = match op {
        PatternOp::Matches => match regexcache::anchored(text) {
            Ok(re) => ("matches", re.is_match(cell)),
            Err(_) => ("matches", false),
        },
        PatternOp::Contains => ("contains", cell.contains(text)),
        PatternOp::NotContains => ("not_contains", !cell.contains(text)),
        PatternOp::StartsWith => ("starts_with", cell.starts_with(text)),
        PatternOp::EndsWith => ("ends_with", cell.ends_with(text)),
    };
    if matches {
        ok(idx, format!("Column {col}C value '{cell}' {name} '{text}'"))
    } else {
        fail(idx, format!("Column {col}C value '{cell}' fails {name} '{text}'"))
    }
}

fn eval_range(col: u32, min: f64, max: f64, row: &Row, idx: usize) -> Verdict {
    let Some(text) = row.get(col) else {
        return fail(idx, format!("Column {col}C is empty"));
    };
    match coerce_numeric(text) {
        Coerced::Numeric(v) if v >= min && v <= max => {
            ok(idx, format!("Column {col}C value {text} is between {min} and {max}"))
        }
        Coerced::Numeric(v) => fail(
            idx,
            format!("Column {col}C value {v} is not between {min} and {max}"),
        ),
        Coerced::NotNumeric => fail(idx, format!("Column {col}C value '{text}' is not numeric")),
    }
}

/// Evaluates an arithmetic expression against a row. `None` marks a
/// coercion failure anywhere in the tree, which the caller turns into a
/// failing verdict naming the target column.
fn eval_expr(expr: &Expr, row: &Row) -> Option<f64> {
    match expr {
        Expr::Number(n) => Some(*n),
        Expr::Col(c) => {
            let text = row.get(*c)?;
            match coerce_numeric(text) {
                Coerced::Numeric(v) => Some(v),
                Coerced::NotNumeric => None,
            }
        }
        Expr::Binary(op, lhs, rhs) => {
            let l = eval_expr(lhs, row)?;
            let r = eval_expr(rhs, row)?;
            Some(match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                BinOp::Div => value::safe_div(l, r),
            })
        }
    }
}

fn eval_arithmetic(target: u32, expr: &Expr, row: &Row, idx: usize) -> Verdict {
    let Some(target_text) = row.get(target) else {
        return fail(idx, format!("Column {target}C is empty"));
    };
    let target_value = match coerce_numeric(target_text) {
        Coerced::Numeric(v) => v,
        Coerced::NotNumeric => {
            return fail(
                idx,
                format!("Column {target}C value '{target_text}' is not numeric"),
            )
        }
    };
    let Some(expr_value) = eval_expr(expr, row) else {
        return fail(
            idx,
            format!("Column {target}C: right-hand side does not evaluate numerically"),
        );
    };
    if value::numeric_eq(target_value, expr_value) {
        ok(
            idx,
            format!(
                "Column {target}C value {} matches computed {}",
                value::render_diagnostic_number(target_value),
                value::render_diagnostic_number(expr_value)
            ),
        )
    } else {
        fail(
            idx,
            format!(
                "Column {target}C value {} does not match computed {}",
                value::render_diagnostic_number(target_value),
                value::render_diagnostic_number(expr_value)
            ),
        )
    }
}

/// Evaluates every rule in `rules` against `row`, in declaration order. No
/// rule's verdict affects another's evaluation.
pub fn evaluate_row(rules: &[ParsedRule], row: &Row) -> Result<Vec<Verdict>, InternalError> {
    rules.iter().map(|r| evaluate_rule(r, row)).collect()
}

/// Evaluates every row against the full ruleset, preserving row order: row
/// `i`'s verdicts precede row `j`'s whenever `i < j`.
pub fn evaluate_rows(rules: &[ParsedRule], rows: &[Row]) -> Result<Vec<Vec<Verdict>>, InternalError> {
    rows.iter().map(|row| evaluate_row(rules, row)).collect()
}

#[cfg(feature = "parallel")]
/// Evaluates every row against the full ruleset in parallel, assembling
/// results back into row order before returning. Rule evaluation has no
/// shared mutable state (the regex cache is lock-free read-dominated), so
/// rows may run on any worker.
pub fn evaluate_rows_parallel(
    rules: &[ParsedRule],
    rows: &[Row],
) -> Result<Vec<Vec<Verdict>>, InternalError> {
    use rayon::prelude::*;
    rows.par_iter().map(|row| evaluate_row(rules, row)).collect()
}
