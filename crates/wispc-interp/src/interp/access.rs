//! Dotted and indexed access: `a.b`, `a.b(...)`, `a.0`, and the `super`
//! special case (§4.9). The grammar has no separate `a[i]` token; a
//! numeric access item (`a.0`) is how both string and list indexing are
//! spelled.

use std::rc::Rc;

use wispc_lex::TokenKind;
use wispc_par::ast::{Expr, FunctionCallExpr};
use wispc_util::{Span, WispError, WispResult};

use crate::class::Instance;
use crate::env::Env;
use crate::interp::call::SELF_BINDING;
use crate::interp::core::Interpreter;
use crate::value::{Number, Value};

fn is_super(expr: &Expr) -> bool {
    matches!(expr, Expr::VarAccess(name, _) if name == "super")
}

impl Interpreter {
    pub(super) fn eval_access(&mut self, accessor: &Expr, item: &Expr, span: Span, env: &Env) -> WispResult<Value> {
        if is_super(accessor) {
            return self.eval_super_access(item, span, env);
        }

        let accessing = self.eval_value(accessor, env)?;
        match item {
            Expr::FunctionCall(call) => self.eval_method_call(accessing, call, env),
            Expr::Number(tok) => {
                let idx = index_from_token(tok, span)?;
                eval_index(&accessing, idx, span)
            }
            Expr::VarAccess(name, _) => self.eval_attr_get(&accessing, name, env, span),
            _ => Err(WispError::parse("expected an attribute name, index, or method call after '.'", span)),
        }
    }

    /// Writes into the place named by an access expression used as an
    /// assignment target: `a.b = v` sets attribute `b` on whatever
    /// instance `a` evaluates to (§4.5: "writes into the accessor's
    /// environment").
    pub(super) fn eval_set_access(&mut self, access_expr: &Expr, value: Value, env: &Env, span: Span) -> WispResult<()> {
        let (accessor, item) = match access_expr {
            Expr::Access(accessor, item, _) => (accessor.as_ref(), item.as_ref()),
            _ => return Err(WispError::parse("assignment target is not an access expression", span)),
        };
        let name = match item {
            Expr::VarAccess(name, _) => name,
            _ => return Err(WispError::parse("can only assign to a bare attribute name", span)),
        };

        let target = if is_super(accessor) {
            self.current_receiver(env, span)?
        } else {
            match self.eval_value(accessor, env)? {
                Value::Instance(inst) => inst,
                other => {
                    return Err(WispError::type_error(
                        format!("cannot assign an attribute on a {}", other.type_name()),
                        span,
                    ))
                }
            }
        };
        target.set_attr(name.clone(), value);
        Ok(())
    }

    fn eval_method_call(&mut self, accessing: Value, call: &FunctionCallExpr, env: &Env) -> WispResult<Value> {
        match accessing {
            Value::Instance(inst) => {
                let resolved = if call.callee == "init" { inst.class.resolve_init() } else { inst.class.resolve_method(&call.callee) };
                let (owner, def) = resolved.ok_or_else(|| {
                    WispError::name(format!("'{}' has no method '{}'", inst.class.name, call.callee), call.span)
                })?;
                let args = self.eval_args(&call.args, env)?;
                self.call_method(owner, &def, inst, args, call.span)
            }
            Value::Class(class) => {
                let args = self.eval_args(&call.args, env)?;
                self.instantiate(&class, args, call.span)
            }
            Value::Function(func) => {
                let args = self.eval_args(&call.args, env)?;
                self.call_function(&func, args, call.span)
            }
            other => Err(WispError::type_error(
                format!("'{}' is not callable (got {})", call.callee, other.type_name()),
                call.span,
            )),
        }
    }

    fn eval_attr_get(&mut self, accessing: &Value, name: &str, env: &Env, span: Span) -> WispResult<Value> {
        match accessing {
            Value::Instance(inst) => inst
                .get_attr(name)
                .or_else(|| inst.class.resolve_class_attr(name))
                .or_else(|| env.get(name))
                .ok_or_else(|| WispError::name(format!("'{}' has no attribute '{name}'", inst.class.name), span)),
            Value::Class(class) => class
                .resolve_class_attr(name)
                .or_else(|| env.get(name))
                .ok_or_else(|| WispError::name(format!("'{}' has no attribute '{name}'", class.name), span)),
            other => env
                .get(name)
                .ok_or_else(|| WispError::name(format!("'{}' has no attribute '{name}'", other.type_name()), span)),
        }
    }

    fn eval_super_access(&mut self, item: &Expr, span: Span, env: &Env) -> WispResult<Value> {
        let owner = self
            .method_class_stack
            .last()
            .cloned()
            .ok_or_else(|| WispError::name("'super' used outside of a method body", span))?;
        let parent = owner
            .parent
            .clone()
            .ok_or_else(|| WispError::type_error(format!("'{}' has no superclass", owner.name), span))?;
        let receiver = self.current_receiver(env, span)?;

        match item {
            Expr::FunctionCall(call) => {
                let resolved = if call.callee == "init" { parent.resolve_init() } else { parent.resolve_method(&call.callee) };
                let (def_owner, def) = resolved.ok_or_else(|| {
                    WispError::name(format!("superclass has no method '{}'", call.callee), call.span)
                })?;
                let args = self.eval_args(&call.args, env)?;
                self.call_method(def_owner, &def, receiver, args, call.span)
            }
            Expr::VarAccess(name, _) => receiver
                .get_attr(name)
                .or_else(|| parent.resolve_class_attr(name))
                .ok_or_else(|| WispError::name(format!("name '{name}' is not defined"), span)),
            _ => Err(WispError::parse("expected a method call or attribute name after 'super.'", span)),
        }
    }

    fn current_receiver(&self, env: &Env, span: Span) -> WispResult<Rc<Instance>> {
        match env.get(SELF_BINDING) {
            Some(Value::Instance(inst)) => Ok(inst),
            _ => Err(WispError::name("'super' used outside of a method body", span)),
        }
    }

    fn eval_args(&mut self, args: &[Expr], env: &Env) -> WispResult<Vec<Value>> {
        args.iter().map(|a| self.eval_value(a, env)).collect()
    }
}

fn index_from_token(tok: &wispc_lex::Token, span: Span) -> WispResult<usize> {
    let n = Number::parse(&tok.lexeme, tok.kind == TokenKind::Float);
    match n {
        Number::Int(i) if i >= 0 => Ok(i as usize),
        Number::Float(f) if f >= 0.0 && f.fract() == 0.0 => Ok(f as usize),
        _ => Err(WispError::index(format!("'{}' is not a valid index", tok.lexeme), span)),
    }
}

fn eval_index(accessing: &Value, idx: usize, span: Span) -> WispResult<Value> {
    match accessing {
        Value::Str(s) => s
            .chars()
            .nth(idx)
            .map(|c| Value::str(c.to_string()))
            .ok_or_else(|| WispError::index(format!("index {idx} out of range for string of length {}", s.chars().count()), span)),
        Value::List(items) => {
            let items = items.borrow();
            items
                .get(idx)
                .cloned()
                .ok_or_else(|| WispError::index(format!("index {idx} out of range for list of length {}", items.len()), span))
        }
        other => Err(WispError::type_error(format!("cannot index into a {}", other.type_name()), span)),
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
    fn object_init_and_method() {
        let src = "object A { define init(inst, x) { inst.x = x } define get(inst) { return inst.x } }\na = A(7)\nprint(a.get())\n";
        assert_eq!(run_source(src), "7");
    }

    #[test]
    fn inheritance_and_super_init() {
        let src = "object A { define init(inst, x) { inst.x = x } define get(inst) { return inst.x } }\nobject B(A) { define init(inst, x) { super.init(x) } }\nb = B(9)\nprint(b.get())\n";
        assert_eq!(run_source(src), "9");
    }

    #[test]
    fn overridden_method_shadows_parent() {
        let src = "object A { define speak(inst) { return \"a\" } }\nobject B(A) { define speak(inst) { return \"b\" } }\nb = B()\nprint(b.speak())\n";
        assert_eq!(run_source(src), "b");
    }

    #[test]
    fn list_indexing() {
        assert_eq!(run_source("lst = [10, 20, 30]\nprint(lst.1)\n"), "20");
    }

    #[test]
    fn string_indexing() {
        assert_eq!(run_source("s = \"abc\"\nprint(s.1)\n"), "b");
    }

    #[test]
    fn out_of_range_index_is_an_index_error() {
        let tokens = wispc_lex::Lexer::tokenize_source("lst = [1]\nprint(lst.5)\n").unwrap();
        let program = parse(tokens).unwrap();
        let err = Interpreter::new().run(&program).unwrap_err();
        assert!(err.to_string().contains("IndexError"));
    }

    #[test]
    fn class_attribute_is_shared_across_instances() {
        let src = "object A { cls legs = 4\ndefine init(inst) { } }\na = A()\nprint(a.legs)\n";
        assert_eq!(run_source(src), "4");
    }
}
