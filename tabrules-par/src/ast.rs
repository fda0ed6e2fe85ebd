//! AST node definitions for a parsed rule.
//!
//! There is exactly one production per line, so the tree here is shallow:
//! a `Rule` variant plus whatever operands its shape needs. Arithmetic is
//! the only shape with a recursive sub-expression.

/// A value operand: the right-hand side of a comparison, or a `BETWEEN`
/// bound. `NUMBER | STRING | COL` in the grammar.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Col(u32),
}

/// An arithmetic expression, built from `+ - * /` over columns, numeric
/// literals and parenthesized sub-expressions.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Col(u32),
    Number(f64),
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternOp {
    Matches,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatatypeKind {
    Alphanum,
    Numeric,
    Integer,
    Float,
    StringType,
}

/// One of the six parsed rule shapes. Column indices are meant to be
/// 1-based and positive, but the lexer accepts a leading `0` before `C`
/// (e.g. `0C`) as a digit run like any other, so the parser cannot rule out
/// a zero column reference by construction; `tabrules-eval` defends the
/// invariant at evaluation time instead (`InternalError::NonPositiveColumn`).
#[derive(Clone, Debug, PartialEq)]
pub enum Rule {
    Arithmetic { target: u32, expr: Expr },
    Comparison { col: u32, op: CompareOp, value: Value },
    Datatype { col: u32, kind: DatatypeKind },
    Pattern { col: u32, op: PatternOp, text: String },
    Range { col: u32, min: f64, max: f64 },
    Required { col: u32 },
}

impl Rule {
    /// The column this rule is ultimately anchored on, used to label
    /// verdict messages uniformly across shapes.
    pub fn primary_col(&self) -> u32 {
        match self {
            Rule::Arithmetic { target, .. } => *target,
            Rule::Comparison { col, .. } => *col,
            Rule::Datatype { col, .. } => *col,
            Rule::Pattern { col, .. } => *col,
            Rule::Range { col, .. } => *col,
            Rule::Required { col } => *col,
        }
    }
}
