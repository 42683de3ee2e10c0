//! Binary and unary operator semantics (§4.4).
//!
//! Arithmetic is integer-preserving except division, which always
//! yields a float. String semantics: `+` concatenates, `-` removes the
//! longest trailing occurrence of the right operand (or leaves the left
//! unchanged if it isn't a trailing suffix), `*` repeats a string
//! `n` times. Any operator applied across mismatched types it has no
//! defined meaning for — including every comparison between `String`
//! and `Number` — evaluates to `Number(0)` rather than erroring, per the
//! source's own catch-all.

use wispc_par::ast::{BinOpKind, UnaryOpKind};
use wispc_util::{Span, WispResult};

use crate::value::{Number, Value};

fn zero() -> Value {
    Value::Number(Number::Int(0))
}

fn bool_value(b: bool) -> Value {
    Value::Number(Number::from_bool(b))
}

/// Removes the longest trailing occurrence of `suffix` from `s`. Since
/// a string only ever has one occurrence of itself as a suffix, this is
/// just "strip the suffix if present", but phrased this way to match
/// the semantics as specified rather than as an implementation detail.
fn strip_trailing(s: &str, suffix: &str) -> String {
    if !suffix.is_empty() && s.ends_with(suffix) {
        s[..s.len() - suffix.len()].to_string()
    } else {
        s.to_string()
    }
}

pub(super) fn eval_binop(op: BinOpKind, lhs: Value, rhs: Value, _span: Span) -> WispResult<Value> {
    use BinOpKind::*;
    Ok(match (op, lhs, rhs) {
        (Add, Value::Number(a), Value::Number(b)) => Value::Number(a.add(b)),
        (Sub, Value::Number(a), Value::Number(b)) => Value::Number(a.sub(b)),
        (Mul, Value::Number(a), Value::Number(b)) => Value::Number(a.mul(b)),
        (Div, Value::Number(a), Value::Number(b)) => Value::Number(a.div(b)),
        (Pow, Value::Number(a), Value::Number(b)) => Value::Number(a.pow(b)),

        (Add, Value::Str(a), Value::Str(b)) => Value::str(format!("{a}{b}")),
        (Sub, Value::Str(a), Value::Str(b)) => Value::str(strip_trailing(&a, &b)),
        (Mul, Value::Str(a), Value::Number(n)) | (Mul, Value::Number(n), Value::Str(a)) => {
            let count = match n {
                Number::Int(i) if i > 0 => i as usize,
                Number::Float(f) if f > 0.0 => f as usize,
                _ => 0,
            };
            Value::str(a.repeat(count))
        }

        (Add, Value::List(a), Value::List(b)) => {
            let mut joined = a.borrow().clone();
            joined.extend(b.borrow().iter().cloned());
            Value::list(joined)
        }

        (IsEq, a, b) => bool_value(a.structural_eq(&b)),
        (NEq, a, b) => bool_value(!a.structural_eq(&b)),

        (Lt | Gt | Lte | Gte, Value::Number(a), Value::Number(b)) => {
            let ord = a.partial_cmp(b);
            bool_value(matches_ordering(op, ord))
        }
        (Lt | Gt | Lte | Gte, Value::Str(a), Value::Str(b)) => {
            let ord = a.as_str().cmp(b.as_str());
            bool_value(matches_ordering(op, ord))
        }

        (And, a, b) => bool_value(a.is_truthy() && b.is_truthy()),
        (Or, a, b) => bool_value(a.is_truthy() || b.is_truthy()),

        // Every other type combination (including any String/Number
        // comparison) has no defined meaning; §4.4 codifies the
        // source's catch-all as `Number(0)`.
        _ => zero(),
    })
}

fn matches_ordering(op: BinOpKind, ord: std::cmp::Ordering) -> bool {
    use std::cmp::Ordering::*;
    match op {
        BinOpKind::Lt => ord == Less,
        BinOpKind::Gt => ord == Greater,
        BinOpKind::Lte => ord != Greater,
        BinOpKind::Gte => ord != Less,
        _ => unreachable!("matches_ordering only called for comparison operators"),
    }
}

pub(super) fn eval_unary(op: UnaryOpKind, operand: Value, _span: Span) -> WispResult<Value> {
    Ok(match (op, operand) {
        (UnaryOpKind::Pos, Value::Number(n)) => Value::Number(n),
        (UnaryOpKind::Neg, Value::Number(n)) => Value::Number(n.neg()),
        (UnaryOpKind::Not, v) => bool_value(!v.is_truthy()),
        (UnaryOpKind::Pos | UnaryOpKind::Neg, _) => zero(),
    })
}
