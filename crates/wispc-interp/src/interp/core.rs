//! The interpreter's top-level state and statement-sequencing logic.

use wispc_par::ast::Expr;
use wispc_util::WispResult;

use crate::class::ClassDef;
use crate::env::Env;
use crate::value::{Number, Value};
use std::rc::Rc;

/// The result of evaluating one node: either a plain value, or a value
/// wrapped in a `return` signal that must unwind the enclosing function
/// body without running any more of its statements. `if`/`while`/`for`
/// do not catch `Return` themselves — only a function call boundary
/// does (§4.9/§9: "control-flow unwinding").
pub(crate) enum Flow {
    Value(Value),
    Return(Value),
}

impl Flow {
    pub(crate) fn into_value(self) -> Value {
        match self {
            Flow::Value(v) | Flow::Return(v) => v,
        }
    }

    pub(crate) fn is_return(&self) -> bool {
        matches!(self, Flow::Return(_))
    }
}

/// A tree-walking evaluator over the parsed program.
///
/// Holds the global environment and the line buffer that `print`
/// appends to. The driver drains that buffer after `run` completes;
/// nothing is written to stdout from inside the interpreter itself,
/// which keeps this crate testable without capturing process output.
pub struct Interpreter {
    pub(crate) globals: Env,
    pub(crate) output: Vec<String>,
    /// The class whose method is currently executing, if any. Consulted
    /// when resolving `super`, which has no token of its own in the
    /// grammar and is instead a plain identifier the interpreter
    /// special-cases on access (§4.9).
    pub(crate) method_class_stack: Vec<Rc<ClassDef>>,
}

impl Interpreter {
    /// Builds a fresh interpreter with `true`, `false`, and `null` bound
    /// in the root environment to `Number(1)`, `Number(0)`, and
    /// `Number(0)` respectively (§3) — the language has no dedicated
    /// boolean or null value kind, only these conventional names.
    pub fn new() -> Self {
        let globals = Env::root();
        globals.set("true", Value::Number(Number::Int(1)));
        globals.set("false", Value::Number(Number::Int(0)));
        globals.set("null", Value::Number(Number::Int(0)));
        Interpreter { globals, output: Vec::new(), method_class_stack: Vec::new() }
    }

    /// Runs a full program to completion and returns everything
    /// `print` collected, joined with newlines and trimmed of any
    /// leading/trailing blank lines (§6.1).
    pub fn run(&mut self, program: &[Expr]) -> WispResult<String> {
        let env = self.globals.clone();
        self.eval_block(program, &env)?;
        Ok(self.output.join("\n").trim_matches('\n').to_string())
    }

    pub(crate) fn push_output(&mut self, line: String) {
        self.output.push(line);
    }

    /// Evaluates a sequence of statements in `env`, stopping the moment
    /// one of them signals `Return`. Bodies never push their own scope
    /// here: `if`/`while`/`for` execute directly in the caller's `env`,
    /// matching the source language's scoping (§4.7-4.8).
    pub(crate) fn eval_block(&mut self, body: &[Expr], env: &Env) -> WispResult<Flow> {
        let mut last = Flow::Value(Value::Number(Number::Int(0)));
        for stmt in body {
            last = self.eval(stmt, env)?;
            if last.is_return() {
                return Ok(last);
            }
        }
        Ok(last)
    }

    /// Evaluates a single expression purely for its value: a `return`
    /// reachable from within it still yields its payload here, but the
    /// signal to stop the enclosing block is only observed by
    /// [`Interpreter::eval_block`].
    pub(crate) fn eval_value(&mut self, expr: &Expr, env: &Env) -> WispResult<Value> {
        Ok(self.eval(expr, env)?.into_value())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wispc_par::parse;

    fn run_source(source: &str) -> String {
        let tokens = wispc_lex::Lexer::tokenize_source(source).unwrap();
        let program = parse(tokens).unwrap();
        Interpreter::new().run(&program).unwrap()
    }

    #[test]
    fn empty_program_produces_empty_output() {
        assert_eq!(run_source(""), "");
    }

    #[test]
    fn arithmetic_and_print() {
        assert_eq!(run_source("x = 1 + 2 * 3\nprint(x)\n"), "7");
    }

    #[test]
    fn true_false_null_are_preseeded_in_the_root_environment() {
        assert_eq!(run_source("print(true)\nprint(false)\nprint(null)\n"), "1\n0\n0");
    }

    #[test]
    fn user_code_can_shadow_true_without_corrupting_the_root() {
        let interp = Interpreter::new();
        assert!(matches!(interp.globals.get("true"), Some(Value::Number(n)) if n.eq(Number::Int(1))));
    }
}
