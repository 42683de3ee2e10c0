//! Operator scanning: one or two character operators, disambiguated by
//! a single character of lookahead.

use wispc_util::{WispError, WispResult};

use crate::token::{Token, TokenKind};

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(super) fn lex_operator(&mut self) -> WispResult<Token> {
        let span = self.span_here();
        let c = self.cursor.current_char();
        self.cursor.advance();

        let single = |kind: TokenKind, lexeme: &str| Ok(Token::new(kind, lexeme, span));

        match c {
            '+' => single(TokenKind::Plus, "+"),
            '-' => single(TokenKind::Minus, "-"),
            '*' => single(TokenKind::Mult, "*"),
            '/' => single(TokenKind::Div, "/"),
            '^' => single(TokenKind::Exp, "^"),
            '(' => single(TokenKind::LParen, "("),
            ')' => single(TokenKind::RParen, ")"),
            '=' => {
                if self.cursor.current_char() == '=' {
                    self.cursor.advance();
                    single(TokenKind::IsEq, "==")
                } else {
                    single(TokenKind::Eq, "=")
                }
            }
            '!' => {
                if self.cursor.current_char() == '=' {
                    self.cursor.advance();
                    single(TokenKind::NEq, "!=")
                } else {
                    Err(WispError::lex("'!' must be followed by '='", span))
                }
            }
            '<' => {
                if self.cursor.current_char() == '=' {
                    self.cursor.advance();
                    single(TokenKind::Lte, "<=")
                } else {
                    single(TokenKind::Lt, "<")
                }
            }
            '>' => {
                if self.cursor.current_char() == '=' {
                    self.cursor.advance();
                    single(TokenKind::Gte, ">=")
                } else {
                    single(TokenKind::Gt, ">")
                }
            }
            _ => unreachable!("lex_operator dispatched on a non-operator character"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::token::TokenKind;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::tokenize_source(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn single_char_operators() {
        assert_eq!(
            kinds("+-*/^"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Mult,
                TokenKind::Div,
                TokenKind::Exp,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn eq_vs_is_eq() {
        assert_eq!(kinds("="), vec![TokenKind::Eq, TokenKind::Eof]);
        assert_eq!(kinds("=="), vec![TokenKind::IsEq, TokenKind::Eof]);
    }

    #[test]
    fn bang_eq_is_n_eq() {
        assert_eq!(kinds("!="), vec![TokenKind::NEq, TokenKind::Eof]);
    }

    #[test]
    fn bare_bang_is_a_lex_error() {
        assert!(Lexer::tokenize_source("!").is_err());
    }

    #[test]
    fn lt_gt_and_their_eq_variants() {
        assert_eq!(kinds("< <= > >="), vec![
            TokenKind::Lt,
            TokenKind::Lte,
            TokenKind::Gt,
            TokenKind::Gte,
            TokenKind::Eof,
        ]);
    }
}
