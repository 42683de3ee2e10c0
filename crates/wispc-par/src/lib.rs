//! wispc-par - recursive-descent parser for the Wisp interpreter pipeline.
//!
//! Consumes the token stream produced by `wispc-lex` and builds the AST
//! defined in [`ast`]. There is exactly one point of backtracking, and
//! it is folded away entirely: see [`parser::logical`] for how
//! parenthesized groups unify arithmetic grouping and logical grouping
//! into a single production.

pub mod ast;
pub mod builtins;
mod parser;

pub use parser::Parser;

use wispc_util::WispResult;

/// Parses a token stream (including its trailing `Eof`) into a program:
/// a flat sequence of top-level expressions.
pub fn parse(tokens: Vec<wispc_lex::Token>) -> WispResult<Vec<ast::Expr>> {
    Parser::new(tokens).parse_program()
}
