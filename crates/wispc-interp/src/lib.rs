//! wispc-interp - tree-walking evaluator for the Wisp interpreter pipeline.
//!
//! Consumes the AST produced by `wispc-par` and evaluates it against a
//! chain of lexical [`env::Env`] frames, producing [`value::Value`]s.
//! Function activations, object instantiation, and method dispatch each
//! get exactly one new frame (§4.7-4.9); `if`/`while`/`for` bodies never
//! do, matching the source language's own scoping rules.

pub mod class;
pub mod env;
mod interp;
pub mod value;

pub use interp::Interpreter;
