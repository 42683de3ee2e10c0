//! Token kinds and the token record itself.
//!
//! A token is a `(kind, lexeme)` pair: `kind` drives the parser's
//! dispatch, `lexeme` is the original text fragment and is how the
//! parser recovers string contents, numeric text, and identifier names
//! without a second lookup into the source.

use wispc_util::Span;

/// The closed set of token kinds the lexer can produce.
///
/// `Method` and `Slice` are carried for completeness with the language's
/// historical token set but are not reachable through the current
/// grammar — nothing in the parser dispatches on them, mirroring how the
/// interpreter defines string subtraction but never exercises it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Keyword,
    BlockOpen,
    BlockClose,
    Method,
    Eq,
    Int,
    Float,
    Plus,
    Minus,
    Mult,
    Div,
    Exp,
    Newline,
    LParen,
    RParen,
    Separator,
    String,
    IsEq,
    NEq,
    Gt,
    Lt,
    Lte,
    Gte,
    Access,
    List,
    Slice,
    Eof,
}

/// A single lexed token: its kind, its source text, and the line it
/// started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self { kind, lexeme: lexeme.into(), span }
    }

    /// The keywords recognized by the identifier scanner.
    pub const KEYWORDS: &'static [&'static str] = &[
        "define", "cls", "give", "if", "elif", "else", "and", "or", "not", "for", "while", "return", "object",
    ];

    /// Returns true if `text` is one of the language's reserved words.
    pub fn is_keyword(text: &str) -> bool {
        Self::KEYWORDS.contains(&text)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.lexeme)
    }
}
