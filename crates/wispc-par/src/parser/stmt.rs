//! Block-level constructs: `if`/`elif`/`else`, `while`, `for`,
//! `define`, and `object`.

use indexmap::IndexMap;
use wispc_lex::TokenKind;
use wispc_util::WispError;

use crate::ast::{Expr, ForLoop, FunctionDef, IfCase, ObjectDef};

use super::core::Parser;

impl Parser {
    /// `if <conditions> { body } (elif <conditions> { body })* (else { body })?`
    pub(super) fn parse_if(&mut self) -> wispc_util::WispResult<Expr> {
        let span = self.span();
        self.expect_keyword("if")?;
        let mut cases = vec![self.parse_if_case()?];

        while self.at_keyword("elif") {
            self.advance();
            cases.push(self.parse_if_case()?);
        }

        let else_body = if self.at_keyword("else") {
            self.advance();
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Expr::If(cases, else_body, span))
    }

    fn parse_if_case(&mut self) -> wispc_util::WispResult<IfCase> {
        let conditions = self.parse_condition_list()?;
        let body = self.parse_block()?;
        Ok(IfCase { conditions, body })
    }

    /// `while <conditions> { body }`
    pub(super) fn parse_while(&mut self) -> wispc_util::WispResult<Expr> {
        let span = self.span();
        self.expect_keyword("while")?;
        let conditions = self.parse_condition_list()?;
        let body = self.parse_block()?;
        Ok(Expr::While(conditions, body, span))
    }

    /// `for (name = start, end[, step]) { body }`
    pub(super) fn parse_for(&mut self) -> wispc_util::WispResult<Expr> {
        let span = self.span();
        self.expect_keyword("for")?;
        self.expect(TokenKind::LParen)?;

        let var_tok = self.expect(TokenKind::Identifier)?;
        let var_name = var_tok.lexeme;
        self.expect(TokenKind::Eq)?;
        let start = self.parse_value()?;
        self.expect(TokenKind::Separator)?;
        let end = self.parse_value()?;
        let step = if self.at(TokenKind::Separator) {
            self.advance();
            self.parse_value()?
        } else {
            Expr::Number(wispc_lex::Token::new(TokenKind::Int, "1", span))
        };
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;

        Ok(Expr::For(ForLoop {
            var_name,
            start: Box::new(start),
            end: Box::new(end),
            step: Box::new(step),
            body,
            span,
        }))
    }

    /// `define name(params) { body }`
    pub(super) fn parse_function_def(&mut self) -> wispc_util::WispResult<Expr> {
        let def = self.parse_function_def_raw()?;
        Ok(Expr::FunctionDef(def))
    }

    fn parse_function_def_raw(&mut self) -> wispc_util::WispResult<FunctionDef> {
        let span = self.span();
        self.expect_keyword("define")?;
        let name = self.expect(TokenKind::Identifier)?.lexeme;
        let params = self.parse_param_list()?;
        let body = self.parse_block()?;
        Ok(FunctionDef { name, params, body, span })
    }

    fn parse_param_list(&mut self) -> wispc_util::WispResult<Vec<String>> {
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.at(TokenKind::RParen) {
            params.push(self.expect(TokenKind::Identifier)?.lexeme);
            while self.at(TokenKind::Separator) {
                self.advance();
                params.push(self.expect(TokenKind::Identifier)?.lexeme);
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(params)
    }

    /// `object Name[(Parent)] { (cls name = value | define ...)* }`
    pub(super) fn parse_object_def(&mut self) -> wispc_util::WispResult<Expr> {
        let span = self.span();
        self.expect_keyword("object")?;
        let name = self.expect(TokenKind::Identifier)?.lexeme;

        let parent = if self.at(TokenKind::LParen) {
            self.advance();
            let parent_name = self.expect(TokenKind::Identifier)?.lexeme;
            self.expect(TokenKind::RParen)?;
            Some(parent_name)
        } else {
            None
        };

        self.expect(TokenKind::BlockOpen)?;
        self.skip_newlines();

        let mut methods = IndexMap::new();
        let mut special_methods = IndexMap::new();
        let mut class_attrs = Vec::new();

        while !self.at(TokenKind::BlockClose) {
            if self.at(TokenKind::Eof) {
                return Err(WispError::parse("unterminated object body", self.span()));
            }
            if self.at_keyword("cls") {
                self.advance();
                let attr_name = self.expect(TokenKind::Identifier)?.lexeme;
                self.expect(TokenKind::Eq)?;
                let value = self.parse_value()?;
                class_attrs.push((attr_name, value));
                self.end_of_statement()?;
            } else if self.at_keyword("define") {
                let def = self.parse_function_def_raw()?;
                if def.name == "init" {
                    special_methods.insert(def.name.clone(), def);
                } else {
                    methods.insert(def.name.clone(), def);
                }
            } else {
                let found = self.peek().clone();
                return Err(WispError::parse(
                    format!("expected 'cls' or 'define' inside object body, found {found}"),
                    found.span,
                ));
            }
            self.skip_newlines();
        }
        self.expect(TokenKind::BlockClose)?;

        Ok(Expr::ObjectDef(ObjectDef { name, parent, methods, special_methods, class_attrs, span }))
    }
}

#[cfg(test)]
mod tests {
    use wispc_lex::Lexer;

    use crate::ast::Expr;
    use crate::parser::Parser;

    fn parse_one(source: &str) -> Expr {
        let tokens = Lexer::tokenize_source(source).unwrap();
        let mut program = Parser::new(tokens).parse_program().unwrap();
        assert_eq!(program.len(), 1);
        program.remove(0)
    }

    #[test]
    fn if_elif_else_chain() {
        let expr = parse_one("if 1 == 1 {\nprint(1)\n} elif 2 == 2 {\nprint(2)\n} else {\nprint(3)\n}");
        match expr {
            Expr::If(cases, else_body, _) => {
                assert_eq!(cases.len(), 2);
                assert!(else_body.is_some());
            }
            other => panic!("expected If, got {other:?}"),
        }
    }

    #[test]
    fn if_without_else() {
        let expr = parse_one("if 1 == 1 {\nprint(1)\n}");
        assert!(matches!(expr, Expr::If(_, None, _)));
    }

    #[test]
    fn while_loop() {
        let expr = parse_one("while x < 10 {\nx = x + 1\n}");
        match expr {
            Expr::While(conditions, body, _) => {
                assert_eq!(conditions.len(), 1);
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected While, got {other:?}"),
        }
    }

    #[test]
    fn for_loop_with_explicit_step() {
        let expr = parse_one("for (i = 0, 10, 2) {\nprint(i)\n}");
        match expr {
            Expr::For(for_loop) => {
                assert_eq!(for_loop.var_name, "i");
                assert_eq!(for_loop.body.len(), 1);
            }
            other => panic!("expected For, got {other:?}"),
        }
    }

    #[test]
    fn for_loop_defaults_step_to_one() {
        let expr = parse_one("for (i = 0, 10) {\nprint(i)\n}");
        match expr {
            Expr::For(for_loop) => assert!(matches!(*for_loop.step, Expr::Number(_))),
            other => panic!("expected For, got {other:?}"),
        }
    }

    #[test]
    fn function_def_with_params() {
        let expr = parse_one("define add(a, b) {\nreturn a + b\n}");
        match expr {
            Expr::FunctionDef(def) => {
                assert_eq!(def.name, "add");
                assert_eq!(def.params, vec!["a", "b"]);
                assert_eq!(def.body.len(), 1);
            }
            other => panic!("expected FunctionDef, got {other:?}"),
        }
    }

    #[test]
    fn object_def_splits_init_from_other_methods() {
        let src = "object Animal {\ncls legs = 4\ndefine init(inst, name) {\ninst.name = name\n}\ndefine speak(inst) {\nprint(1)\n}\n}";
        let expr = parse_one(src);
        match expr {
            Expr::ObjectDef(obj) => {
                assert_eq!(obj.name, "Animal");
                assert!(obj.parent.is_none());
                assert_eq!(obj.class_attrs.len(), 1);
                assert!(obj.special_methods.contains_key("init"));
                assert!(obj.methods.contains_key("speak"));
                assert!(!obj.methods.contains_key("init"));
            }
            other => panic!("expected ObjectDef, got {other:?}"),
        }
    }

    #[test]
    fn object_def_with_parent() {
        let src = "object Dog(Animal) {\ndefine speak() {\nprint(1)\n}\n}";
        let expr = parse_one(src);
        match expr {
            Expr::ObjectDef(obj) => assert_eq!(obj.parent.as_deref(), Some("Animal")),
            other => panic!("expected ObjectDef, got {other:?}"),
        }
    }
}
