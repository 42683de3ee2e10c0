//! Function calls, object instantiation, and method dispatch.
//!
//! Every call pushes a brand-new environment frame rather than reusing
//! a shared activation table, which is what makes recursion and
//! re-entrant calls safe (§9 — the source's single mutable
//! `local_symbol_table` per function node is not replicated here).

use std::rc::Rc;

use indexmap::IndexMap;
use wispc_par::ast::{FunctionCallExpr, FunctionDef, ObjectDef};
use wispc_util::{Span, WispError, WispResult};

use crate::class::{ClassDef, Instance};
use crate::env::Env;
use crate::interp::core::Interpreter;
use crate::value::{FunctionValue, Value};

/// The reserved binding every method activation carries in addition to
/// whatever name the user gave its first (receiver) parameter. `super`
/// resolution reads this rather than guessing the user's parameter
/// name.
pub(super) const SELF_BINDING: &str = "self";

impl Interpreter {
    pub(super) fn eval_function_call(&mut self, call: &FunctionCallExpr, env: &Env) -> WispResult<Value> {
        let callee = env.get(&call.callee).ok_or_else(|| {
            WispError::name(format!("name '{}' is not defined", call.callee), call.span)
        })?;

        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.eval_value(arg, env)?);
        }

        match callee {
            Value::Function(f) => self.call_function(&f, args, call.span),
            Value::Class(c) => self.instantiate(&c, args, call.span),
            other => Err(WispError::type_error(
                format!("'{}' is not callable (got {})", call.callee, other.type_name()),
                call.span,
            )),
        }
    }

    pub(super) fn call_function(&mut self, func: &FunctionValue, args: Vec<Value>, span: Span) -> WispResult<Value> {
        let call_env = func.closure.child();
        bind_params(&call_env, &func.def.params, args, span)?;
        Ok(self.eval_block(&func.def.body, &call_env)?.into_value())
    }

    /// Calls `def`, owned by `owner_class`, against `receiver`. Binds
    /// `self` plus the user's own first parameter name (the explicit
    /// receiver convention: a method's first declared parameter is the
    /// instance, never taken from the caller's argument list) to the
    /// same instance, then the remaining declared parameters
    /// positionally to `args`.
    pub(super) fn call_method(
        &mut self,
        owner_class: Rc<ClassDef>,
        def: &FunctionDef,
        receiver: Rc<Instance>,
        args: Vec<Value>,
        span: Span,
    ) -> WispResult<Value> {
        let call_env = self.globals.child();
        call_env.set(SELF_BINDING, Value::Instance(receiver.clone()));
        if let Some(self_param) = def.params.first() {
            call_env.set(self_param.clone(), Value::Instance(receiver));
        }
        bind_params(&call_env, &def.params[1.min(def.params.len())..], args, span)?;

        self.method_class_stack.push(owner_class);
        let result = self.eval_block(&def.body, &call_env);
        self.method_class_stack.pop();
        Ok(result?.into_value())
    }

    pub(super) fn instantiate(&mut self, class: &Rc<ClassDef>, args: Vec<Value>, span: Span) -> WispResult<Value> {
        let instance = Rc::new(Instance::new(class.clone()));
        if let Some((owner, init)) = class.resolve_init() {
            self.call_method(owner, &init, instance.clone(), args, span)?;
        }
        Ok(Value::Instance(instance))
    }

    /// Builds a `ClassDef` from an `object` definition and binds it
    /// into `env` under its own name, mirroring how `FunctionDef`
    /// binds a callable value (§4.9).
    pub(super) fn eval_object_def(&mut self, obj: &ObjectDef, env: &Env) -> WispResult<Value> {
        let parent = match &obj.parent {
            Some(name) => match env.get(name) {
                Some(Value::Class(c)) => Some(c),
                Some(_) => {
                    return Err(WispError::type_error(format!("'{name}' is not an object type"), obj.span))
                }
                None => return Err(WispError::name(format!("name '{name}' is not defined"), obj.span)),
            },
            None => None,
        };

        let mut class_attrs = wispc_util::FxHashMap::default();
        for (name, expr) in &obj.class_attrs {
            class_attrs.insert(name.clone(), self.eval_value(expr, env)?);
        }

        let mut methods = IndexMap::new();
        for (name, def) in &obj.methods {
            methods.insert(name.clone(), Rc::new(def.clone()));
        }
        let init = obj.special_methods.get("init").cloned().map(Rc::new);

        let class = Rc::new(ClassDef { name: obj.name.clone(), parent, methods, init, class_attrs });
        let value = Value::Class(class);
        env.set(obj.name.clone(), value.clone());
        Ok(value)
    }
}

fn bind_params(env: &Env, params: &[String], args: Vec<Value>, span: Span) -> WispResult<()> {
    if params.len() != args.len() {
        return Err(WispError::type_error(
            format!("expected {} argument(s), got {}", params.len(), args.len()),
            span,
        ));
    }
    for (param, arg) in params.iter().zip(args) {
        env.set(param.clone(), arg);
    }
    Ok(())
}
