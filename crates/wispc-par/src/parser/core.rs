//! Token cursor and the small helpers every parsing stage shares.

use wispc_lex::{Token, TokenKind};
use wispc_util::{Span, WispError, WispResult};

/// Consumes a flat token stream and builds an [`crate::ast::Expr`] tree.
///
/// There is no separate statement grammar: `parse_program` and
/// `parse_block` both just collect a sequence of expressions, exactly
/// as the language itself makes no statement/expression distinction.
pub struct Parser {
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses an entire program: a sequence of top-level expressions
    /// separated by newlines, terminated by [`TokenKind::Eof`].
    pub fn parse_program(mut self) -> WispResult<Vec<crate::ast::Expr>> {
        let mut body = Vec::new();
        self.skip_newlines();
        while !self.at(TokenKind::Eof) {
            body.push(self.parse_value()?);
            self.end_of_statement()?;
        }
        Ok(body)
    }

    pub(super) fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub(super) fn span(&self) -> Span {
        self.peek().span
    }

    pub(super) fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(super) fn at_keyword(&self, word: &str) -> bool {
        self.peek().kind == TokenKind::Keyword && self.peek().lexeme == word
    }

    pub(super) fn expect(&mut self, kind: TokenKind) -> WispResult<Token> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            let found = self.peek().clone();
            Err(WispError::parse(
                format!("expected {:?}, found {}", kind, found),
                found.span,
            ))
        }
    }

    pub(super) fn expect_keyword(&mut self, word: &str) -> WispResult<Token> {
        if self.at_keyword(word) {
            Ok(self.advance())
        } else {
            let found = self.peek().clone();
            Err(WispError::parse(
                format!("expected keyword '{word}', found {found}"),
                found.span,
            ))
        }
    }

    /// Skips any run of blank-line tokens. Blank lines carry no meaning
    /// once the token stream is built; only the single newline that
    /// terminates a statement matters.
    pub(super) fn skip_newlines(&mut self) {
        while self.at(TokenKind::Newline) {
            self.advance();
        }
    }

    /// A statement ends at a newline, a closing brace (end of the
    /// enclosing block), or end of input. Newlines are consumed; the
    /// brace/EOF is left for the caller to see.
    pub(super) fn end_of_statement(&mut self) -> WispResult<()> {
        if self.at(TokenKind::Newline) {
            self.skip_newlines();
            Ok(())
        } else if self.at(TokenKind::BlockClose) || self.at(TokenKind::Eof) {
            Ok(())
        } else {
            let found = self.peek().clone();
            Err(WispError::parse(
                format!("expected end of statement, found {found}"),
                found.span,
            ))
        }
    }

    /// Parses a `{ ... }` block: a sequence of statements up to the
    /// matching `}`.
    pub(super) fn parse_block(&mut self) -> WispResult<Vec<crate::ast::Expr>> {
        self.expect(TokenKind::BlockOpen)?;
        self.skip_newlines();
        let mut body = Vec::new();
        while !self.at(TokenKind::BlockClose) {
            if self.at(TokenKind::Eof) {
                return Err(WispError::parse("unterminated block", self.span()));
            }
            body.push(self.parse_value()?);
            self.end_of_statement()?;
            self.skip_newlines();
        }
        self.expect(TokenKind::BlockClose)?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use wispc_lex::Lexer;

    use super::Parser;

    #[test]
    fn empty_program_parses_to_no_statements() {
        let tokens = Lexer::tokenize_source("").unwrap();
        let body = Parser::new(tokens).parse_program().unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn blank_lines_between_statements_are_ignored() {
        let tokens = Lexer::tokenize_source("x = 1\n\n\ny = 2").unwrap();
        let body = Parser::new(tokens).parse_program().unwrap();
        assert_eq!(body.len(), 2);
    }

    #[test]
    fn unterminated_block_is_a_parse_error() {
        let tokens = Lexer::tokenize_source("while x < 1 {\nprint(x)\n").unwrap();
        let err = Parser::new(tokens).parse_program().unwrap_err();
        assert!(err.to_string().contains("ParseError"));
    }

    #[test]
    fn stray_token_after_a_statement_is_a_parse_error() {
        let tokens = Lexer::tokenize_source("1 2").unwrap();
        let err = Parser::new(tokens).parse_program().unwrap_err();
        assert!(err.to_string().contains("ParseError"));
    }
}
