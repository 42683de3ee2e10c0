//! Runtime values.
//!
//! Collapses the two dual representations the language defines a value
//! in terms of (a `Number`/`String`/`List` algebra plus an AST-shaped
//! `Function`/`Object` pair) into one `Value` enum with no leftover
//! parser types inside it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use wispc_par::ast::FunctionDef;

use crate::class::{ClassDef, Instance};
use crate::env::Env;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    pub fn is_truthy(self) -> bool {
        self.as_f64() != 0.0
    }

    pub fn from_bool(b: bool) -> Number {
        Number::Int(if b { 1 } else { 0 })
    }

    /// Parses a lexed `INT`/`FLOAT` lexeme. The lexer guarantees the
    /// text is well-formed (at most one `.`, never a bare `.`).
    pub fn parse(lexeme: &str, is_float: bool) -> Number {
        if is_float {
            Number::Float(lexeme.parse().expect("lexer guarantees well-formed float text"))
        } else {
            Number::Int(lexeme.parse().expect("lexer guarantees well-formed int text"))
        }
    }

    pub fn add(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_add(b) {
                Some(v) => Number::Int(v),
                None => Number::Float(a as f64 + b as f64),
            },
            _ => Number::Float(self.as_f64() + other.as_f64()),
        }
    }

    pub fn sub(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_sub(b) {
                Some(v) => Number::Int(v),
                None => Number::Float(a as f64 - b as f64),
            },
            _ => Number::Float(self.as_f64() - other.as_f64()),
        }
    }

    pub fn mul(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_mul(b) {
                Some(v) => Number::Int(v),
                None => Number::Float(a as f64 * b as f64),
            },
            _ => Number::Float(self.as_f64() * other.as_f64()),
        }
    }

    /// Division always yields a float, per §4.4.
    pub fn div(self, other: Number) -> Number {
        Number::Float(self.as_f64() / other.as_f64())
    }

    pub fn pow(self, other: Number) -> Number {
        if let (Number::Int(a), Number::Int(b)) = (self, other) {
            if b >= 0 {
                if let Ok(exp) = u32::try_from(b) {
                    if let Some(v) = a.checked_pow(exp) {
                        return Number::Int(v);
                    }
                }
            }
        }
        Number::Float(self.as_f64().powf(other.as_f64()))
    }

    pub fn neg(self) -> Number {
        match self {
            Number::Int(i) => Number::Int(-i),
            Number::Float(f) => Number::Float(-f),
        }
    }

    pub fn partial_cmp(self, other: Number) -> std::cmp::Ordering {
        self.as_f64().partial_cmp(&other.as_f64()).unwrap_or(std::cmp::Ordering::Equal)
    }

    pub fn eq(self, other: Number) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

/// A function value: the definition plus the environment it closed
/// over at the point it was defined. Every call creates a fresh child
/// of `closure`, never reusing a shared activation frame — this is
/// what makes recursive and re-entrant calls safe (§9: function
/// activations should carry a parent pointer to their definition
/// environment rather than a single mutable local table).
#[derive(Clone)]
pub struct FunctionValue {
    pub def: Rc<FunctionDef>,
    pub closure: Env,
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionValue({})", self.def.name)
    }
}

#[derive(Clone)]
pub enum Value {
    Number(Number),
    Str(Rc<String>),
    List(Rc<RefCell<Vec<Value>>>),
    Function(Rc<FunctionValue>),
    Class(Rc<ClassDef>),
    Instance(Rc<Instance>),
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({})", self.display())
    }
}

impl Value {
    pub fn str(s: impl Into<String>) -> Value {
        Value::Str(Rc::new(s.into()))
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => n.is_truthy(),
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.borrow().is_empty(),
            Value::Function(_) | Value::Class(_) | Value::Instance(_) => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Str(_) => "String",
            Value::List(_) => "List",
            Value::Function(_) => "Function",
            Value::Class(_) => "Class",
            Value::Instance(_) => "Instance",
        }
    }

    /// The textual form used by `print` and by list/string display.
    pub fn display(&self) -> String {
        match self {
            Value::Number(n) => n.to_string(),
            Value::Str(s) => s.to_string(),
            Value::List(items) => {
                let rendered: Vec<String> = items.borrow().iter().map(Value::display).collect();
                format!("[{}]", rendered.join(", "))
            }
            Value::Function(func) => format!("<function {}>", func.def.name),
            Value::Class(class) => format!("<class {}>", class.name),
            Value::Instance(inst) => format!("<{} instance>", inst.class.name),
        }
    }

    /// Structural equality used by `==`/`!=`. Mismatched types are
    /// never equal; this is consulted only after the binary-operator
    /// dispatch has already confirmed both sides share a comparable
    /// type, except for the general `==`/`!=` fallback which uses it
    /// directly across arbitrary value pairs.
    pub fn structural_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.eq(*b),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                let a = a.borrow();
                let b = b.borrow();
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.structural_eq(y))
            }
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
