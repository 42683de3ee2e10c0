//! The main evaluation dispatch: one arm per [`Expr`] variant.
//!
//! This is the tagged-sum replacement for the source's attribute-name
//! reflection (`visit_{type(node).__name__}`, §9). Every variant is
//! matched exhaustively, so adding a node kind without teaching the
//! interpreter about it is a compile error rather than a runtime
//! "no visit method defined" exception.

use wispc_lex::TokenKind;
use wispc_par::ast::{AssignTarget, Expr};
use wispc_util::{WispError, WispResult};

use crate::env::Env;
use crate::interp::core::{Flow, Interpreter};
use crate::value::{FunctionValue, Number, Value};
use std::rc::Rc;

impl Interpreter {
    pub(crate) fn eval(&mut self, expr: &Expr, env: &Env) -> WispResult<Flow> {
        match expr {
            Expr::Number(tok) => {
                let is_float = tok.kind == TokenKind::Float;
                Ok(Flow::Value(Value::Number(Number::parse(&tok.lexeme, is_float))))
            }
            Expr::Str(tok) => Ok(Flow::Value(Value::str(tok.lexeme.clone()))),
            Expr::ListLit(items, _) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval_value(item, env)?);
                }
                Ok(Flow::Value(Value::list(values)))
            }
            Expr::VarAccess(name, span) => {
                let value = env
                    .get(name)
                    .ok_or_else(|| WispError::name(format!("name '{name}' is not defined"), *span))?;
                Ok(Flow::Value(value))
            }
            Expr::VarAssign(target, value_expr, span) => {
                let value = self.eval_value(value_expr, env)?;
                match target {
                    AssignTarget::Name(name) => env.set(name.clone(), value.clone()),
                    AssignTarget::Access(access_expr) => {
                        self.eval_set_access(access_expr, value.clone(), env, *span)?
                    }
                }
                Ok(Flow::Value(value))
            }
            Expr::BinOp(lhs, op, rhs, span) => {
                let lhs = self.eval_value(lhs, env)?;
                let rhs = self.eval_value(rhs, env)?;
                Ok(Flow::Value(super::binop::eval_binop(*op, lhs, rhs, *span)?))
            }
            Expr::UnaryOp(op, operand, span) => {
                let operand = self.eval_value(operand, env)?;
                Ok(Flow::Value(super::binop::eval_unary(*op, operand, *span)?))
            }
            Expr::If(cases, else_case, _) => self.eval_if(cases, else_case, env),
            Expr::While(cond, body, _) => self.eval_while(cond, body, env),
            Expr::For(for_loop) => self.eval_for(for_loop, env),
            Expr::FunctionDef(def) => {
                let func = Value::Function(Rc::new(FunctionValue { def: Rc::new(def.clone()), closure: env.clone() }));
                env.set(def.name.clone(), func.clone());
                Ok(Flow::Value(func))
            }
            Expr::FunctionCall(call) => Ok(Flow::Value(self.eval_function_call(call, env)?)),
            Expr::Return(expr, _) => Ok(Flow::Return(self.eval_value(expr, env)?)),
            Expr::ObjectDef(obj) => Ok(Flow::Value(self.eval_object_def(obj, env)?)),
            Expr::Access(accessor, item, span) => Ok(Flow::Value(self.eval_access(accessor, item, *span, env)?)),
            Expr::BuiltinCall(name, args, span) => Ok(Flow::Value(self.eval_builtin(name, args, *span, env)?)),
        }
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
    fn string_concat_and_repeat() {
        assert_eq!(run_source("s = \"ab\" + \"cd\"\nprint(s * 2)\n"), "abcdabcd");
    }

    #[test]
    fn for_loop_prints_range() {
        assert_eq!(run_source("for (i = 0, 3) { print(i) }\n"), "0\n1\n2");
    }

    #[test]
    fn function_definition_and_call() {
        assert_eq!(run_source("define f(a, b) { return a + b }\nprint(f(2, 3))\n"), "5");
    }

    #[test]
    fn if_and_logical_expression() {
        assert_eq!(
            run_source("if 1 == 1 and 2 > 1 { print(\"yes\") } else { print(\"no\") }\n"),
            "yes"
        );
    }

    #[test]
    fn undefined_name_is_a_name_error() {
        let tokens = wispc_lex::Lexer::tokenize_source("print(missing)\n").unwrap();
        let program = parse(tokens).unwrap();
        let err = Interpreter::new().run(&program).unwrap_err();
        assert!(err.to_string().contains("NameError"));
    }

    #[test]
    fn list_literal_round_trips_through_print() {
        assert_eq!(run_source("print([1, 2, 3])\n"), "[1, 2, 3]");
    }
}
