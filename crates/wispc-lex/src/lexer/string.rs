//! String literal scanning.
//!
//! Strings are delimited by a matching single or double quote; there is
//! no escape processing, so a backslash is just a literal backslash. A
//! string missing its closing quote is not an error: scanning simply
//! runs to end of input and the token covers whatever was captured,
//! matching the source language's reference lexer.

use wispc_util::WispResult;

use crate::token::{Token, TokenKind};

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(super) fn lex_string(&mut self) -> WispResult<Token> {
        let span = self.span_here();
        let quote = self.cursor.current_char();
        self.cursor.advance();

        let start = self.cursor.position();
        while !self.cursor.is_at_end() && self.cursor.current_char() != quote {
            self.cursor.advance();
        }

        let lexeme = self.cursor.slice_from(start).to_owned();
        if !self.cursor.is_at_end() {
            self.cursor.advance();
        }
        Ok(Token::new(TokenKind::String, lexeme, span))
    }
}
