//! Core lexer implementation.
//!
//! This module holds the `Lexer` struct and its dispatch table. The
//! individual scanning routines (identifiers, numbers, strings,
//! operators) live in their own sibling modules; this file only decides
//! which one to call for a given lead character.

use wispc_util::{Span, WispError, WispResult};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Lexer for the language: transforms source text into a stream of
/// tokens.
///
/// Per §4.1, consecutive newlines are collapsed to single newlines
/// before scanning begins; everything after that is a single left to
/// right pass over the source with no backtracking.
pub struct Lexer<'a> {
    pub(super) cursor: Cursor<'a>,
    /// True once the previous token could end a primary expression
    /// (a name, a literal, `)`, or `]`). Distinguishes a leading-dot
    /// decimal like `.5` from a dotted index like `a.0`: the same `.`
    /// followed by a digit means different things depending on what
    /// came before it, and the lexer has no parser to ask.
    prev_ends_value: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`, which must outlive the lexer.
    ///
    /// The caller is expected to pass in source text that has already
    /// had consecutive newlines collapsed via [`Lexer::normalize`]; see
    /// [`Lexer::tokenize_source`] for a convenience entry point that
    /// does this for you.
    pub fn new(source: &'a str) -> Self {
        Self { cursor: Cursor::new(source), prev_ends_value: false }
    }

    /// Collapses every run of two consecutive newlines in `source` down
    /// to one, matching §4.1's input normalization rule.
    pub fn normalize(source: &str) -> String {
        source.replace("\n\n", "\n")
    }

    /// Normalizes `source` and tokenizes it in one step.
    pub fn tokenize_source(source: &str) -> WispResult<Vec<Token>> {
        let normalized = Self::normalize(source);
        Lexer::new(&normalized).tokenize()
    }

    /// Runs the lexer to completion, returning every token in order
    /// (the lexer is total: it always consumes the whole input, ending
    /// with an implicit EOF that the caller need not store).
    pub fn tokenize(mut self) -> WispResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn span(&self) -> Span {
        Span::new(self.cursor.line())
    }

    pub(super) fn span_here(&self) -> Span {
        self.span()
    }

    /// Scans and returns the next token, or a terminal `Eof` token once
    /// the source is exhausted.
    fn next_token(&mut self) -> WispResult<Token> {
        self.skip_whitespace();

        if self.cursor.is_at_end() {
            return Ok(Token::new(TokenKind::Eof, "", self.span()));
        }

        let span = self.span();
        let prev_ends_value = self.prev_ends_value;
        let tok = match self.cursor.current_char() {
            '\n' => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::Newline, "\n", span))
            }
            '"' | '\'' => self.lex_string(),
            ',' => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::Separator, ",", span))
            }
            '{' => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::BlockOpen, "{", span))
            }
            '}' => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::BlockClose, "}", span))
            }
            '[' => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::List, "[", span))
            }
            ']' => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::List, "]", span))
            }
            '.' if !prev_ends_value && self.cursor.peek_char(1).is_ascii_digit() => self.lex_number(),
            '.' => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::Access, ".", span))
            }
            ':' => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::Slice, ":", span))
            }
            '+' | '-' | '*' | '/' | '^' | '(' | ')' | '!' | '=' | '<' | '>' => self.lex_operator(),
            c if c.is_ascii_digit() => self.lex_number(),
            c if c.is_alphabetic() || c == '_' => self.lex_identifier(),
            c => Err(WispError::lex(format!("unexpected character '{c}'"), span)),
        }?;

        self.prev_ends_value = matches!(
            tok.kind,
            TokenKind::Identifier | TokenKind::Int | TokenKind::Float | TokenKind::String | TokenKind::RParen
        ) || (tok.kind == TokenKind::List && tok.lexeme == "]");

        Ok(tok)
    }

    fn skip_whitespace(&mut self) {
        while !self.cursor.is_at_end() {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' => self.cursor.advance(),
                _ => break,
            }
        }
    }
}
