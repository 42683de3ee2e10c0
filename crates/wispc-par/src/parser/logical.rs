//! Logical-expression parsing.
//!
//! The grammar keeps comparisons and boolean combinators out of the
//! arithmetic precedence chain entirely: `expr`/`term`/`pow`/`factor`
//! only ever see `+ - * / ^` and literals. A logical expression is a
//! flat, left-associative list of *atoms* joined by `and`/`or`, each
//! atom optionally negated by a leading `not` and optionally itself a
//! comparison (`expr (== | != | < | > | <= | >=) expr`).
//!
//! A parenthesized group (`(a and b)`) is just a nested atom list,
//! folded down to one atom by `and` before it rejoins its parent list.
//! This also doubles as plain arithmetic grouping: `(1 + 2)` is a
//! one-atom list with no comparison in it, so it folds to exactly the
//! inner expression. That sidesteps the single-token rewind the
//! original parser needed to tell "(expr)" and "(cond and cond)" apart:
//! here there is only ever one kind of parenthesized group.

use wispc_lex::TokenKind;
use wispc_util::Span;

use crate::ast::{BinOpKind, Expr, UnaryOpKind};

use super::core::Parser;

impl Parser {
    /// The general-purpose "value" production used everywhere a single
    /// expression is expected: function arguments, assignment
    /// right-hand sides, `return` operands, loop bounds, list elements.
    /// A bare arithmetic expression and a full logical expression are
    /// both values here; this is what lets `x = a and b` and
    /// `print(a == b)` parse without a separate grammar rule.
    pub(crate) fn parse_value(&mut self) -> wispc_util::WispResult<Expr> {
        let span = self.span();
        let atoms = self.parse_atom_list()?;
        Ok(Self::fold_and(atoms, span))
    }

    /// Parses a condition list for an `if`/`elif`/`while` header: kept
    /// as a `Vec<Expr>` rather than folded, since each element must
    /// pass independently (§ data model: `IfCase.conditions`).
    pub(crate) fn parse_condition_list(&mut self) -> wispc_util::WispResult<Vec<Expr>> {
        self.parse_atom_list()
    }

    /// Collects atoms combined by `and`/`or`, with `not` binding to the
    /// single atom that follows it. Stops as soon as the next token
    /// isn't a combinator; the caller decides what must follow
    /// (`)`, `{`, a separator, a newline, ...).
    pub(super) fn parse_atom_list(&mut self) -> wispc_util::WispResult<Vec<Expr>> {
        let mut atoms: Vec<Expr> = Vec::new();
        let mut pending_not = false;
        let mut pending_combinator: Option<BinOpKind> = None;

        loop {
            if self.at_keyword("not") {
                self.advance();
                pending_not = true;
                continue;
            }

            let atom_span = self.span();
            let mut atom = self.parse_comparison_atom()?;
            if pending_not {
                atom = Expr::UnaryOp(UnaryOpKind::Not, Box::new(atom), atom_span);
                pending_not = false;
            }

            if let Some(op) = pending_combinator.take() {
                let prev = atoms.pop().expect("combinator always follows a prior atom");
                atoms.push(Expr::BinOp(Box::new(prev), op, Box::new(atom), atom_span));
            } else {
                atoms.push(atom);
            }

            if self.at_keyword("and") {
                self.advance();
                pending_combinator = Some(BinOpKind::And);
                continue;
            }
            if self.at_keyword("or") {
                self.advance();
                pending_combinator = Some(BinOpKind::Or);
                continue;
            }
            break;
        }

        Ok(atoms)
    }

    /// One comparison-or-bare atom: `expr`, optionally followed by a
    /// comparison operator and a second `expr`.
    fn parse_comparison_atom(&mut self) -> wispc_util::WispResult<Expr> {
        let span = self.span();
        let left = self.parse_expr()?;
        let op = match self.peek().kind {
            TokenKind::IsEq => BinOpKind::IsEq,
            TokenKind::NEq => BinOpKind::NEq,
            TokenKind::Lt => BinOpKind::Lt,
            TokenKind::Gt => BinOpKind::Gt,
            TokenKind::Lte => BinOpKind::Lte,
            TokenKind::Gte => BinOpKind::Gte,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_expr()?;
        Ok(Expr::BinOp(Box::new(left), op, Box::new(right), span))
    }

    /// Folds a list of atoms into one expression by implicit `and`,
    /// matching how the interpreter evaluates a condition list: it
    /// passes only if every member does.
    pub(super) fn fold_and(mut atoms: Vec<Expr>, span: Span) -> Expr {
        match atoms.len() {
            0 => Expr::Number(wispc_lex::Token::new(TokenKind::Int, "1", span)),
            1 => atoms.remove(0),
            _ => {
                let mut iter = atoms.into_iter();
                let first = iter.next().unwrap();
                iter.fold(first, |acc, next| {
                    Expr::BinOp(Box::new(acc), BinOpKind::And, Box::new(next), span)
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use wispc_lex::Lexer;

    use crate::ast::{BinOpKind, Expr, UnaryOpKind};
    use crate::parser::Parser;

    fn parse_one(source: &str) -> Expr {
        let tokens = Lexer::tokenize_source(source).unwrap();
        let mut program = Parser::new(tokens).parse_program().unwrap();
        assert_eq!(program.len(), 1);
        program.remove(0)
    }

    #[test]
    fn bare_comparison() {
        let expr = parse_one("1 == 1");
        assert!(matches!(expr, Expr::BinOp(_, BinOpKind::IsEq, _, _)));
    }

    #[test]
    fn and_combines_two_atoms() {
        let expr = parse_one("1 == 1 and 2 > 1");
        match expr {
            Expr::BinOp(lhs, BinOpKind::And, rhs, _) => {
                assert!(matches!(*lhs, Expr::BinOp(_, BinOpKind::IsEq, _, _)));
                assert!(matches!(*rhs, Expr::BinOp(_, BinOpKind::Gt, _, _)));
            }
            other => panic!("expected And at the top, got {other:?}"),
        }
    }

    #[test]
    fn not_binds_to_the_next_atom_only() {
        let expr = parse_one("not 1 == 2 and 3 == 3");
        match expr {
            Expr::BinOp(lhs, BinOpKind::And, rhs, _) => {
                assert!(matches!(*lhs, Expr::UnaryOp(UnaryOpKind::Not, _, _)));
                assert!(matches!(*rhs, Expr::BinOp(_, BinOpKind::IsEq, _, _)));
            }
            other => panic!("expected And at the top, got {other:?}"),
        }
    }

    #[test]
    fn parenthesized_logical_group_is_a_single_atom() {
        let expr = parse_one("(1 == 1 and 2 == 2) or 3 == 4");
        assert!(matches!(expr, Expr::BinOp(_, BinOpKind::Or, _, _)));
    }

    #[test]
    fn bare_value_with_no_comparison_is_used_as_is() {
        let expr = parse_one("x");
        assert!(matches!(expr, Expr::VarAccess(name, _) if name == "x"));
    }
}
