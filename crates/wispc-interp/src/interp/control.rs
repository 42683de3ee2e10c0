//! `if`/`while`/`for`.
//!
//! None of the three pushes a new environment frame for its body — they
//! run directly in the caller's `env`, matching §4.6's "evaluate in the
//! current table" wording exactly. Only function calls and object
//! instantiation introduce a new scope (see `call.rs`).

use wispc_par::ast::{Expr, ForLoop, IfCase};
use wispc_util::WispError;

use crate::env::Env;
use crate::interp::core::{Flow, Interpreter};
use crate::value::{Number, Value};

impl Interpreter {
    /// A case passes when every one of its conditions evaluates
    /// truthy, evaluated left to right (§4.6: "the conjunction of
    /// conditions in order").
    fn all_truthy(&mut self, conditions: &[Expr], env: &Env) -> wispc_util::WispResult<bool> {
        for cond in conditions {
            if !self.eval_value(cond, env)?.is_truthy() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub(super) fn eval_if(
        &mut self,
        cases: &[IfCase],
        else_body: &Option<Vec<Expr>>,
        env: &Env,
    ) -> wispc_util::WispResult<Flow> {
        for case in cases {
            if self.all_truthy(&case.conditions, env)? {
                return self.eval_block(&case.body, env);
            }
        }
        if let Some(body) = else_body {
            return self.eval_block(body, env);
        }
        Ok(Flow::Value(Value::Number(Number::Int(0))))
    }

    pub(super) fn eval_while(&mut self, conditions: &[Expr], body: &[Expr], env: &Env) -> wispc_util::WispResult<Flow> {
        loop {
            if !self.all_truthy(conditions, env)? {
                return Ok(Flow::Value(Value::Number(Number::Int(0))));
            }
            let result = self.eval_block(body, env)?;
            if result.is_return() {
                return Ok(result);
            }
        }
    }

    pub(super) fn eval_for(&mut self, for_loop: &ForLoop, env: &Env) -> wispc_util::WispResult<Flow> {
        let span = for_loop.span;
        let start = as_number(self.eval_value(&for_loop.start, env)?, span)?;
        let end = as_number(self.eval_value(&for_loop.end, env)?, span)?;
        let step = as_number(self.eval_value(&for_loop.step, env)?, span)?;

        let mut current = start;
        env.set(for_loop.var_name.clone(), Value::Number(current));

        let counts_up = step.as_f64() > 0.0;
        loop {
            let continues = if counts_up { current.as_f64() < end.as_f64() } else { current.as_f64() > end.as_f64() };
            if !continues {
                return Ok(Flow::Value(Value::Number(Number::Int(0))));
            }
            let result = self.eval_block(&for_loop.body, env)?;
            if result.is_return() {
                return Ok(result);
            }
            current = current.add(step);
            env.set(for_loop.var_name.clone(), Value::Number(current));
        }
    }
}

fn as_number(value: Value, span: wispc_util::Span) -> wispc_util::WispResult<Number> {
    match value {
        Value::Number(n) => Ok(n),
        other => Err(WispError::type_error(format!("for loop bound must be a Number, got {}", other.type_name()), span)),
    }
}
