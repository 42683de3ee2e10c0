//! Arithmetic precedence climbing: `expr -> term -> pow -> factor`.
//!
//! `factor` is also where every other primary production lives: literals,
//! parenthesized groups, unary operators, variable references, function
//! calls, and dotted access chains.

use wispc_lex::TokenKind;
use wispc_util::WispError;

use crate::ast::{AssignTarget, BinOpKind, Expr, UnaryOpKind};

use super::core::Parser;

impl Parser {
    /// `term ((PLUS | MINUS) term)*`
    pub(crate) fn parse_expr(&mut self) -> wispc_util::WispResult<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinOpKind::Add,
                TokenKind::Minus => BinOpKind::Sub,
                _ => break,
            };
            let span = self.span();
            self.advance();
            let right = self.parse_term()?;
            left = Expr::BinOp(Box::new(left), op, Box::new(right), span);
        }
        Ok(left)
    }

    /// `pow ((MULT | DIV) pow)*`
    fn parse_term(&mut self) -> wispc_util::WispResult<Expr> {
        let mut left = self.parse_pow()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Mult => BinOpKind::Mul,
                TokenKind::Div => BinOpKind::Div,
                _ => break,
            };
            let span = self.span();
            self.advance();
            let right = self.parse_pow()?;
            left = Expr::BinOp(Box::new(left), op, Box::new(right), span);
        }
        Ok(left)
    }

    /// `factor (EXP factor)*`
    fn parse_pow(&mut self) -> wispc_util::WispResult<Expr> {
        let mut left = self.parse_factor()?;
        while self.at(TokenKind::Exp) {
            let span = self.span();
            self.advance();
            let right = self.parse_factor()?;
            left = Expr::BinOp(Box::new(left), BinOpKind::Pow, Box::new(right), span);
        }
        Ok(left)
    }

    /// The primary production: literals, groups, unary operators, names,
    /// calls, and dotted access. Every factor is followed by zero or more
    /// `.item` suffixes, each folding the running value into an `Access`
    /// node (`a.b.0.c`).
    fn parse_factor(&mut self) -> wispc_util::WispResult<Expr> {
        let span = self.span();
        let mut node = match self.peek().kind {
            TokenKind::Int | TokenKind::Float => Expr::Number(self.advance()),
            TokenKind::String => Expr::Str(self.advance()),
            TokenKind::Plus => {
                self.advance();
                Expr::UnaryOp(UnaryOpKind::Pos, Box::new(self.parse_factor()?), span)
            }
            TokenKind::Minus => {
                self.advance();
                Expr::UnaryOp(UnaryOpKind::Neg, Box::new(self.parse_factor()?), span)
            }
            TokenKind::Keyword if self.peek().lexeme == "not" => {
                self.advance();
                Expr::UnaryOp(UnaryOpKind::Not, Box::new(self.parse_factor()?), span)
            }
            TokenKind::List if self.peek().lexeme == "[" => self.parse_list_literal()?,
            TokenKind::LParen => {
                self.advance();
                let atoms = self.parse_atom_list()?;
                self.expect(TokenKind::RParen)?;
                Self::fold_and(atoms, span)
            }
            TokenKind::Keyword if self.peek().lexeme == "return" => {
                self.advance();
                Expr::Return(Box::new(self.parse_value()?), span)
            }
            TokenKind::Keyword if self.peek().lexeme == "if" => self.parse_if()?,
            TokenKind::Keyword if self.peek().lexeme == "while" => self.parse_while()?,
            TokenKind::Keyword if self.peek().lexeme == "for" => self.parse_for()?,
            TokenKind::Keyword if self.peek().lexeme == "define" => self.parse_function_def()?,
            TokenKind::Keyword if self.peek().lexeme == "object" => self.parse_object_def()?,
            TokenKind::Identifier => self.parse_identifier_led()?,
            _ => {
                let found = self.peek().clone();
                return Err(WispError::parse(format!("unexpected token {found}"), found.span));
            }
        };

        loop {
            if !self.at(TokenKind::Access) {
                break;
            }
            let access_span = self.span();
            self.advance();
            let item = self.parse_access_item()?;
            node = Expr::Access(Box::new(node), Box::new(item), access_span);
        }

        if self.at(TokenKind::Eq) {
            if let Some(target) = Self::as_assign_target(&node) {
                let eq_span = self.span();
                self.advance();
                let value = self.parse_value()?;
                return Ok(Expr::VarAssign(target, Box::new(value), eq_span));
            }
        }
        Ok(node)
    }

    /// One item of a dotted access chain: a numeric index (`a.0`), a
    /// bare attribute name (`a.b`), or a method call (`a.speak()`).
    /// Deliberately narrower than `parse_factor`: an access item never
    /// itself carries a further access chain or a trailing assignment —
    /// those belong to the chain as a whole, handled by the caller.
    fn parse_access_item(&mut self) -> wispc_util::WispResult<Expr> {
        let span = self.span();
        match self.peek().kind {
            TokenKind::Int | TokenKind::Float => Ok(Expr::Number(self.advance())),
            TokenKind::Identifier => {
                let name_tok = self.advance();
                let name = name_tok.lexeme;
                if self.at(TokenKind::LParen) {
                    self.advance();
                    let mut args = Vec::new();
                    if !self.at(TokenKind::RParen) {
                        args.push(self.parse_value()?);
                        while self.at(TokenKind::Separator) {
                            self.advance();
                            args.push(self.parse_value()?);
                        }
                    }
                    self.expect(TokenKind::RParen)?;
                    Ok(Expr::FunctionCall(crate::ast::FunctionCallExpr { callee: name, args, span }))
                } else {
                    Ok(Expr::VarAccess(name, span))
                }
            }
            _ => {
                let found = self.peek().clone();
                Err(WispError::parse(format!("expected an access item, found {found}"), found.span))
            }
        }
    }

    /// A node can be assigned to only if it names a place: a bare
    /// variable or a dotted access chain (`a.b = v`).
    fn as_assign_target(node: &Expr) -> Option<AssignTarget> {
        match node {
            Expr::VarAccess(name, _) => Some(AssignTarget::Name(name.clone())),
            Expr::Access(..) => Some(AssignTarget::Access(Box::new(node.clone()))),
            _ => None,
        }
    }

    fn parse_list_literal(&mut self) -> wispc_util::WispResult<Expr> {
        let span = self.span();
        self.advance();
        let mut items = Vec::new();
        if !(self.at(TokenKind::List) && self.peek().lexeme == "]") {
            items.push(self.parse_value()?);
            while self.at(TokenKind::Separator) {
                self.advance();
                items.push(self.parse_value()?);
            }
        }
        if self.at(TokenKind::List) && self.peek().lexeme == "]" {
            self.advance();
        } else {
            let found = self.peek().clone();
            return Err(WispError::parse(format!("expected ']', found {found}"), found.span));
        }
        Ok(Expr::ListLit(items, span))
    }

    /// An identifier can lead a bare variable reference, an assignment,
    /// or a call (builtin or user-defined); disambiguated by the next
    /// token.
    fn parse_identifier_led(&mut self) -> wispc_util::WispResult<Expr> {
        let name_tok = self.advance();
        let name = name_tok.lexeme.clone();
        let span = name_tok.span;

        if self.at(TokenKind::LParen) {
            self.advance();
            let mut args = Vec::new();
            if !self.at(TokenKind::RParen) {
                args.push(self.parse_value()?);
                while self.at(TokenKind::Separator) {
                    self.advance();
                    args.push(self.parse_value()?);
                }
            }
            self.expect(TokenKind::RParen)?;
            return Ok(if crate::builtins::is_builtin(&name) {
                Expr::BuiltinCall(name, args, span)
            } else {
                Expr::FunctionCall(crate::ast::FunctionCallExpr { callee: name, args, span })
            });
        }

        Ok(Expr::VarAccess(name, span))
    }
}

#[cfg(test)]
mod tests {
    use wispc_lex::Lexer;

    use crate::ast::{BinOpKind, Expr};
    use crate::parser::Parser;

    fn parse_one(source: &str) -> Expr {
        let tokens = Lexer::tokenize_source(source).unwrap();
        let mut program = Parser::new(tokens).parse_program().unwrap();
        assert_eq!(program.len(), 1, "expected exactly one top-level expression");
        program.remove(0)
    }

    #[test]
    fn arithmetic_respects_precedence() {
        // 1 + 2 * 3 should parse as 1 + (2 * 3), not (1 + 2) * 3.
        let expr = parse_one("1 + 2 * 3");
        match expr {
            Expr::BinOp(lhs, BinOpKind::Add, rhs, _) => {
                assert!(matches!(*lhs, Expr::Number(_)));
                assert!(matches!(*rhs, Expr::BinOp(_, BinOpKind::Mul, _, _)));
            }
            other => panic!("expected Add at the top, got {other:?}"),
        }
    }

    #[test]
    fn power_is_right_of_term() {
        let expr = parse_one("2 * 3 ^ 2");
        match expr {
            Expr::BinOp(_, BinOpKind::Mul, rhs, _) => {
                assert!(matches!(*rhs, Expr::BinOp(_, BinOpKind::Pow, _, _)));
            }
            other => panic!("expected Mul at the top, got {other:?}"),
        }
    }

    #[test]
    fn parenthesized_arithmetic_group_folds_to_inner_expr() {
        let expr = parse_one("(1 + 2) * 3");
        assert!(matches!(expr, Expr::BinOp(_, BinOpKind::Mul, _, _)));
    }

    #[test]
    fn dotted_access_chains() {
        let expr = parse_one("a.b.0");
        match expr {
            Expr::Access(outer, item, _) => {
                assert!(matches!(*item, Expr::Number(_)));
                assert!(matches!(*outer, Expr::Access(..)));
            }
            other => panic!("expected nested Access, got {other:?}"),
        }
    }

    #[test]
    fn assignment_to_bare_name() {
        let expr = parse_one("x = 5");
        assert!(matches!(expr, Expr::VarAssign(crate::ast::AssignTarget::Name(_), _, _)));
    }

    #[test]
    fn assignment_to_dotted_target() {
        let expr = parse_one("a.b = 5");
        assert!(matches!(expr, Expr::VarAssign(crate::ast::AssignTarget::Access(_), _, _)));
    }

    #[test]
    fn builtin_call_is_tagged_distinctly() {
        let expr = parse_one("print(1)");
        assert!(matches!(expr, Expr::BuiltinCall(name, _, _) if name == "print"));
    }

    #[test]
    fn user_function_call() {
        let expr = parse_one("double(21)");
        assert!(matches!(expr, Expr::FunctionCall(call) if call.callee == "double"));
    }

    #[test]
    fn list_literal() {
        let expr = parse_one("[1, 2, 3]");
        match expr {
            Expr::ListLit(items, _) => assert_eq!(items.len(), 3),
            other => panic!("expected ListLit, got {other:?}"),
        }
    }

    #[test]
    fn empty_list_literal() {
        let expr = parse_one("[]");
        assert!(matches!(expr, Expr::ListLit(items, _) if items.is_empty()));
    }

    #[test]
    fn leading_dot_float_is_not_confused_with_access() {
        let expr = parse_one(".5");
        assert!(matches!(expr, Expr::Number(_)));
    }
}
