//! The closed set of built-in function names (§4.10).
//!
//! The parser needs to know these at parse time, not call time: a call
//! to one of these names becomes [`crate::ast::Expr::BuiltinCall`]
//! rather than [`crate::ast::Expr::FunctionCall`], so the interpreter
//! never has to consult a user symbol table to find them and users
//! cannot shadow them by defining a function of the same name.
pub const BUILTIN_NAMES: &[&str] = &[
    "print",
    "input",
    "input_int",
    "is_number",
    "is_string",
    "is_list",
    "append",
    "pop",
    "extend",
];

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_NAMES.contains(&name)
}
