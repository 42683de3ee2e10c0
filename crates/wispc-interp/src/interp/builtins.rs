//! Built-in function contracts (§4.10).
//!
//! Unlike user functions, a built-in's argument list is evaluated here
//! directly rather than bound into a fresh environment frame — there is
//! no closure, no recursion, and no `self`/`super` concern for any of
//! these. List mutation (`append`/`pop`/`extend`) operates on the
//! single `Vec<Value>` representation directly (§9 collapses the
//! source's index-map-plus-linear-sequence duplication), so there is no
//! separate renumbering step to get right.

use std::io::{self, Write};

use wispc_par::ast::Expr;
use wispc_util::{Span, WispError, WispResult};

use crate::env::Env;
use crate::interp::core::Interpreter;
use crate::value::{Number, Value};

fn bool_value(b: bool) -> Value {
    Value::Number(Number::from_bool(b))
}

fn index_from_number(n: Number, span: Span) -> WispResult<usize> {
    match n {
        Number::Int(i) if i >= 0 => Ok(i as usize),
        Number::Float(f) if f >= 0.0 && f.fract() == 0.0 => Ok(f as usize),
        _ => Err(WispError::index(format!("'{n}' is not a valid index"), span)),
    }
}

impl Interpreter {
    pub(super) fn eval_builtin(&mut self, name: &str, args: &[Expr], span: Span, env: &Env) -> WispResult<Value> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_value(arg, env)?);
        }

        match name {
            "print" => Ok(self.builtin_print(values)),
            "input" => self.builtin_input(values, span),
            "input_int" => self.builtin_input_int(values, span),
            "is_number" => Ok(bool_value(matches!(one_arg(&values, "is_number", span)?, Value::Number(_)))),
            "is_string" => Ok(bool_value(matches!(one_arg(&values, "is_string", span)?, Value::Str(_)))),
            "is_list" => Ok(bool_value(matches!(one_arg(&values, "is_list", span)?, Value::List(_)))),
            "append" => builtin_append(values, span),
            "pop" => builtin_pop(values, span),
            "extend" => builtin_extend(values, span),
            other => unreachable!("parser only emits BuiltinCall for known names, got '{other}'"),
        }
    }

    /// `print(v1, v2, ...)`: each argument's display form becomes its
    /// own output line. The driver only surfaces what lands here; the
    /// return value itself is rarely used by callers.
    fn builtin_print(&mut self, values: Vec<Value>) -> Value {
        let lines: Vec<String> = values.iter().map(Value::display).collect();
        for line in &lines {
            self.push_output(line.clone());
        }
        Value::str(lines.join("\n"))
    }

    fn builtin_input(&mut self, values: Vec<Value>, span: Span) -> WispResult<Value> {
        if let Some(prompt) = values.first() {
            print!("{}", prompt.display());
            io::stdout().flush().map_err(|e| WispError::runtime(format!("failed to write prompt: {e}"), span))?;
        }
        let mut line = String::new();
        io::stdin()
            .read_line(&mut line)
            .map_err(|e| WispError::runtime(format!("failed to read input: {e}"), span))?;
        Ok(Value::str(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Reads a line exactly like `input`, but parses it as a number.
    /// Per §7, a parse failure is not fatal: it is a `RuntimeError`
    /// handled by returning an error string rather than aborting
    /// evaluation.
    fn builtin_input_int(&mut self, values: Vec<Value>, span: Span) -> WispResult<Value> {
        let text = match self.builtin_input(values, span)? {
            Value::Str(s) => s,
            _ => unreachable!("builtin_input always returns a String"),
        };
        let trimmed = text.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return Ok(Value::Number(Number::Int(i)));
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return Ok(Value::Number(Number::Float(f)));
        }
        Ok(Value::str(format!("'{trimmed}' is not a number")))
    }
}

fn one_arg<'a>(values: &'a [Value], builtin: &str, span: Span) -> WispResult<&'a Value> {
    values.first().ok_or_else(|| WispError::runtime(format!("{builtin}() expects 1 argument"), span))
}

fn two_args(mut values: Vec<Value>, builtin: &str, span: Span) -> WispResult<(Value, Value)> {
    if values.len() != 2 {
        return Err(WispError::runtime(format!("{builtin}() expects 2 arguments, got {}", values.len()), span));
    }
    let second = values.pop().unwrap();
    let first = values.pop().unwrap();
    Ok((first, second))
}

fn builtin_append(values: Vec<Value>, span: Span) -> WispResult<Value> {
    let (list, item) = two_args(values, "append", span)?;
    match list {
        Value::List(items) => {
            items.borrow_mut().push(item);
            Ok(Value::List(items))
        }
        other => Err(WispError::type_error(format!("append() expects a List, got {}", other.type_name()), span)),
    }
}

fn builtin_pop(values: Vec<Value>, span: Span) -> WispResult<Value> {
    let (list, idx) = two_args(values, "pop", span)?;
    match (list, idx) {
        (Value::List(items), Value::Number(n)) => {
            let idx = index_from_number(n, span)?;
            let mut items_mut = items.borrow_mut();
            if idx >= items_mut.len() {
                return Err(WispError::index(format!("index {idx} out of range for list of length {}", items_mut.len()), span));
            }
            items_mut.remove(idx);
            drop(items_mut);
            Ok(Value::List(items))
        }
        (other, _) => Err(WispError::type_error(format!("pop() expects a List, got {}", other.type_name()), span)),
    }
}

fn builtin_extend(values: Vec<Value>, span: Span) -> WispResult<Value> {
    let (a, b) = two_args(values, "extend", span)?;
    match (a, b) {
        (Value::List(a_items), Value::List(b_items)) => {
            let extra: Vec<Value> = b_items.borrow().clone();
            a_items.borrow_mut().extend(extra);
            Ok(Value::List(a_items))
        }
        (other, _) => Err(WispError::type_error(format!("extend() expects two Lists, got {}", other.type_name()), span)),
    }
}

#[cfg(test)]
mod tests {
    use wispc_par::parse;

    use crate::interp::core::Interpreter;

    fn run_source(source: &str) -> String {
        let tokens = wispc_lex::Lexer::tokenize_source(source).unwrap();
        let program = parse(tokens).unwrap();
        Interpreter::new().run(&program).unwrap()
    }

    #[test]
    fn append_pop_round_trip_keeps_list_contiguous() {
        assert_eq!(run_source("lst = [1, 2, 3]\nappend(lst, 4)\npop(lst, 0)\nprint(lst)\n"), "[2, 3, 4]");
    }

    #[test]
    fn extend_appends_every_element() {
        assert_eq!(run_source("a = [1, 2]\nb = [3, 4]\nextend(a, b)\nprint(a)\n"), "[1, 2, 3, 4]");
    }

    #[test]
    fn is_number_is_string_is_list() {
        assert_eq!(run_source("print(is_number(1))\n"), "1");
        assert_eq!(run_source("print(is_string(\"x\"))\n"), "1");
        assert_eq!(run_source("print(is_list([1]))\n"), "1");
        assert_eq!(run_source("print(is_number(\"x\"))\n"), "0");
    }

    #[test]
    fn pop_out_of_range_is_an_index_error() {
        let tokens = wispc_lex::Lexer::tokenize_source("lst = [1]\npop(lst, 5)\n").unwrap();
        let program = parse(tokens).unwrap();
        let err = Interpreter::new().run(&program).unwrap_err();
        assert!(err.to_string().contains("IndexError"));
    }

    #[test]
    fn print_multiple_args_each_on_their_own_line() {
        assert_eq!(run_source("print(1, 2, 3)\n"), "1\n2\n3");
    }
}
