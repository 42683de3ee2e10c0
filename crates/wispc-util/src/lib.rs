//! wispc-util - shared foundation types for the Wisp interpreter pipeline.
//!
//! Every other crate in the workspace (lexer, parser, interpreter,
//! driver) depends on this one for the two things they all need to
//! agree on: where a piece of source text came from (`Span`) and how a
//! stage reports that it gave up (`WispError`). Keeping both here avoids
//! every crate inventing its own incompatible error enum.

mod error;
mod span;

pub use error::{WispError, WispResult};
pub use span::Span;

pub use rustc_hash::{FxHashMap, FxHashSet};
