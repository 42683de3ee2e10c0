//! Identifier and keyword scanning.

use wispc_util::WispResult;

use crate::token::{Token, TokenKind};

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(super) fn lex_identifier(&mut self) -> WispResult<Token> {
        let span = self.span_here();
        let start = self.cursor.position();

        while !self.cursor.is_at_end() {
            let c = self.cursor.current_char();
            if c.is_alphanumeric() || c == '_' {
                self.cursor.advance();
            } else {
                break;
            }
        }

        let lexeme = self.cursor.slice_from(start).to_owned();
        let kind = if Token::is_keyword(&lexeme) { TokenKind::Keyword } else { TokenKind::Identifier };
        Ok(Token::new(kind, lexeme, span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<Token> {
        Lexer::tokenize_source(source).unwrap()
    }

    #[test]
    fn plain_identifier() {
        let toks = lex_all("foo_bar1");
        assert_eq!(toks[0].kind, TokenKind::Identifier);
        assert_eq!(toks[0].lexeme, "foo_bar1");
    }

    #[test]
    fn keyword_is_tagged_as_such() {
        let toks = lex_all("return");
        assert_eq!(toks[0].kind, TokenKind::Keyword);
    }

    #[test]
    fn non_keyword_identifier_is_not_tagged_as_keyword() {
        let toks = lex_all("returned");
        assert_eq!(toks[0].kind, TokenKind::Identifier);
    }
}
