//! Number scanning.
//!
//! Accepts at most one decimal point. A leading `.` is normalized to
//! `0.x`; a trailing `.` is normalized to `x.0`. A second decimal point
//! stops the scan rather than erroring — the digits already collected
//! are returned as the token and the extra `.` starts the next token.

use wispc_util::WispResult;

use crate::token::{Token, TokenKind};

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(super) fn lex_number(&mut self) -> WispResult<Token> {
        let span = self.span_here();
        let start = self.cursor.position();
        let mut dot_count = 0;

        while !self.cursor.is_at_end() {
            let c = self.cursor.current_char();
            if c == '.' {
                if dot_count == 1 {
                    break;
                }
                dot_count += 1;
            } else if !c.is_ascii_digit() {
                break;
            }
            self.cursor.advance();
        }

        let raw = self.cursor.slice_from(start);
        let mut lexeme = raw.to_owned();
        if lexeme.starts_with('.') {
            lexeme.insert(0, '0');
        } else if lexeme.ends_with('.') {
            lexeme.push('0');
        }

        let kind = if dot_count == 0 { TokenKind::Int } else { TokenKind::Float };
        Ok(Token::new(kind, lexeme, span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Token {
        Lexer::tokenize_source(source).unwrap().into_iter().next().unwrap()
    }

    #[test]
    fn plain_integer() {
        let t = lex("42");
        assert_eq!(t.kind, TokenKind::Int);
        assert_eq!(t.lexeme, "42");
    }

    #[test]
    fn plain_float() {
        let t = lex("3.14");
        assert_eq!(t.kind, TokenKind::Float);
        assert_eq!(t.lexeme, "3.14");
    }

    #[test]
    fn leading_dot_gets_a_leading_zero() {
        let t = lex(".5");
        assert_eq!(t.lexeme, "0.5");
    }

    #[test]
    fn trailing_dot_gets_a_trailing_zero() {
        let t = lex("5.");
        assert_eq!(t.lexeme, "5.0");
    }

    #[test]
    fn second_dot_ends_the_number() {
        let toks = Lexer::tokenize_source("1.2.3").unwrap();
        assert_eq!(toks[0].lexeme, "1.2");
        assert_eq!(toks[1].kind, TokenKind::Access);
        assert_eq!(toks[2].lexeme, "3");
    }
}
