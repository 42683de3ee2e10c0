//! Single-inheritance object model.
//!
//! The original eagerly merges a subclass's methods into a copy of its
//! parent's table at definition time and represents an instance as a
//! `(ObjectNode, attrs_dict)` tuple threaded by hand through every call
//! site. Here a class keeps only its own methods plus an optional
//! pointer to its parent `ClassDef`; resolution walks that pointer at
//! call time instead of flattening it up front (§9: "prefer a single
//! instance record... method resolution walks parent pointers").

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use wispc_par::ast::FunctionDef;
use wispc_util::FxHashMap;

use crate::value::Value;

#[derive(Debug)]
pub struct ClassDef {
    pub name: String,
    pub parent: Option<Rc<ClassDef>>,
    pub methods: IndexMap<String, Rc<FunctionDef>>,
    pub init: Option<Rc<FunctionDef>>,
    pub class_attrs: FxHashMap<String, Value>,
}

impl ClassDef {
    /// Looks up a method by name, walking up the single-inheritance
    /// chain. Returns the owning class alongside the method so the
    /// caller can tell which class's closure environment to resolve
    /// `super` against.
    pub fn resolve_method(self: &Rc<Self>, name: &str) -> Option<(Rc<ClassDef>, Rc<FunctionDef>)> {
        let mut class = self.clone();
        loop {
            if let Some(def) = class.methods.get(name) {
                return Some((class.clone(), def.clone()));
            }
            match &class.parent {
                Some(parent) => class = parent.clone(),
                None => return None,
            }
        }
    }

    pub fn resolve_init(self: &Rc<Self>) -> Option<(Rc<ClassDef>, Rc<FunctionDef>)> {
        let mut class = self.clone();
        loop {
            if let Some(def) = &class.init {
                return Some((class.clone(), def.clone()));
            }
            match &class.parent {
                Some(parent) => class = parent.clone(),
                None => return None,
            }
        }
    }

    pub fn resolve_class_attr(&self, name: &str) -> Option<Value> {
        if let Some(v) = self.class_attrs.get(name) {
            return Some(v.clone());
        }
        self.parent.as_ref().and_then(|p| p.resolve_class_attr(name))
    }

    pub fn is_instance_of(self: &Rc<Self>, other: &Rc<ClassDef>) -> bool {
        let mut class = self.clone();
        loop {
            if Rc::ptr_eq(&class, other) {
                return true;
            }
            match &class.parent {
                Some(parent) => class = parent.clone(),
                None => return false,
            }
        }
    }
}

/// A single, shared instance record: one object, one attribute table,
/// referenced by every alias of it, matching the reference-object
/// semantics the language's assignment and parameter passing rely on.
#[derive(Debug)]
pub struct Instance {
    pub class: Rc<ClassDef>,
    pub attrs: RefCell<FxHashMap<String, Value>>,
}

impl Instance {
    pub fn new(class: Rc<ClassDef>) -> Instance {
        Instance { class, attrs: RefCell::new(FxHashMap::default()) }
    }

    pub fn get_attr(&self, name: &str) -> Option<Value> {
        self.attrs.borrow().get(name).cloned()
    }

    pub fn set_attr(&self, name: impl Into<String>, value: Value) {
        self.attrs.borrow_mut().insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wispc_util::Span;

    fn make_def(name: &str) -> Rc<FunctionDef> {
        Rc::new(FunctionDef { name: name.to_string(), params: vec![], body: vec![], span: Span::new(1) })
    }

    #[test]
    fn method_resolves_through_parent_chain() {
        let base = Rc::new(ClassDef {
            name: "Animal".into(),
            parent: None,
            methods: IndexMap::from([("speak".to_string(), make_def("speak"))]),
            init: None,
            class_attrs: FxHashMap::default(),
        });
        let dog = Rc::new(ClassDef {
            name: "Dog".into(),
            parent: Some(base.clone()),
            methods: IndexMap::new(),
            init: None,
            class_attrs: FxHashMap::default(),
        });
        let (owner, _) = dog.resolve_method("speak").expect("inherited method");
        assert_eq!(owner.name, "Animal");
    }

    #[test]
    fn own_method_shadows_parent() {
        let base = Rc::new(ClassDef {
            name: "Animal".into(),
            parent: None,
            methods: IndexMap::from([("speak".to_string(), make_def("speak"))]),
            init: None,
            class_attrs: FxHashMap::default(),
        });
        let dog = Rc::new(ClassDef {
            name: "Dog".into(),
            parent: Some(base),
            methods: IndexMap::from([("speak".to_string(), make_def("speak"))]),
            init: None,
            class_attrs: FxHashMap::default(),
        });
        let (owner, _) = dog.resolve_method("speak").expect("own method");
        assert_eq!(owner.name, "Dog");
    }

    #[test]
    fn missing_method_is_none() {
        let base = Rc::new(ClassDef {
            name: "Animal".into(),
            parent: None,
            methods: IndexMap::new(),
            init: None,
            class_attrs: FxHashMap::default(),
        });
        assert!(base.resolve_method("fly").is_none());
    }

    #[test]
    fn instance_attrs_are_mutable_through_shared_handle() {
        let class = Rc::new(ClassDef {
            name: "Thing".into(),
            parent: None,
            methods: IndexMap::new(),
            init: None,
            class_attrs: FxHashMap::default(),
        });
        let inst = Rc::new(Instance::new(class));
        let alias = inst.clone();
        inst.set_attr("x", Value::Number(crate::value::Number::Int(5)));
        assert!(alias.get_attr("x").is_some());
    }
}
