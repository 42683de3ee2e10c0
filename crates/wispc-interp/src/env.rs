//! Lexical environments.
//!
//! Replaces the original's three-level lookup (local table, then a
//! `params` sentinel slot, then a root table) with a plain parent-pointer
//! chain (§9). A function call or object instantiation is the only thing
//! that pushes a new frame; `if`/`while`/`for` bodies execute directly in
//! the enclosing frame, matching the language's own scoping rules.

use std::cell::RefCell;
use std::rc::Rc;

use wispc_util::FxHashMap;

use crate::value::Value;

struct EnvInner {
    vars: RefCell<FxHashMap<String, Value>>,
    parent: Option<Env>,
}

#[derive(Clone)]
pub struct Env(Rc<EnvInner>);

impl Env {
    pub fn root() -> Env {
        Env(Rc::new(EnvInner { vars: RefCell::new(FxHashMap::default()), parent: None }))
    }

    pub fn child(&self) -> Env {
        Env(Rc::new(EnvInner { vars: RefCell::new(FxHashMap::default()), parent: Some(self.clone()) }))
    }

    /// Walks the parent chain looking for `name`.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(v) = self.0.vars.borrow().get(name) {
            return Some(v.clone());
        }
        self.0.parent.as_ref().and_then(|p| p.get(name))
    }

    /// Declares or overwrites `name` in THIS frame, never a parent one.
    /// This is how the language's assignment works: `x = 1` always binds
    /// in the current scope, it never mutates an outer `x`.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.0.vars.borrow_mut().insert(name.into(), value);
    }
}
