//! The source-program grammar (§6.2): lexing, recursive-descent parsing, declaration checking,
//! and alias inlining, producing the [`Expr`] trees the engine builds from.

mod lexer;

use crate::error::{ProgramError, SemanticError, SyntaxError};
use crate::expr::Expr;
use crate::variable::VariableOrder;
use fxhash::FxHashMap;
use lexer::{tokenize, Token, TokenKind, RESERVED};
use std::sync::Arc;

/// One `show` or `show_ones` statement, already resolved to the (inlined) expression for each
/// requested output name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTask {
    Show { outputs: Vec<(Arc<str>, Expr)> },
    ShowOnes { outputs: Vec<(Arc<str>, Expr)> },
}

/// Parses `source` into the program's declared variable order and its sequence of render tasks.
///
/// Per §9's resolution of the assignments-as-variables open question, assignment targets are
/// aliases: they never extend the returned `VariableOrder`, and every use of an alias in a later
/// expression is replaced by a clone of its (already inlined) expression tree before this function
/// returns.
pub fn parse(source: &str) -> Result<(VariableOrder, Vec<RenderTask>), ProgramError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        var_order: Vec::new(),
        aliases: FxHashMap::default(),
        tasks: Vec::new(),
    };
    parser.parse_program()?;
    Ok((VariableOrder::new(parser.var_order), parser.tasks))
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    var_order: Vec<Arc<str>>,
    aliases: FxHashMap<Arc<str>, Expr>,
    tasks: Vec<RenderTask>,
}

fn keyword_text(kind: &TokenKind) -> &'static str {
    match kind {
        TokenKind::Var => "var",
        TokenKind::Show => "show",
        TokenKind::ShowOnes => "show_ones",
        TokenKind::Not => "not",
        TokenKind::And => "and",
        TokenKind::Or => "or",
        TokenKind::True => "True",
        TokenKind::False => "False",
        TokenKind::Identifier(_) => "identifier",
        TokenKind::Equals => "=",
        TokenKind::LParen => "(",
        TokenKind::RParen => ")",
        TokenKind::Semicolon => ";",
    }
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eof_position(&self) -> (usize, usize) {
        match self.tokens.last() {
            Some(last) => (last.line, last.column + 1),
            None => (1, 1),
        }
    }

    fn unexpected_eof(&self) -> ProgramError {
        let (line, column) = self.eof_position();
        SyntaxError::UnexpectedEof { line, column }.into()
    }

    fn unexpected_token(&self, token: &Token) -> ProgramError {
        SyntaxError::UnexpectedToken {
            found: keyword_text(&token.kind).to_string(),
            line: token.line,
            column: token.column,
        }
        .into()
    }

    fn expect_semicolon(&mut self) -> Result<(), ProgramError> {
        match self.advance() {
            Some(token) if token.kind == TokenKind::Semicolon => Ok(()),
            Some(token) => Err(SyntaxError::MissingSemicolon { line: token.line, column: token.column }.into()),
            None => Err(self.unexpected_eof()),
        }
    }

    /// A single identifier in a position the grammar calls for one name: an assignment's LHS.
    /// A reserved word here is the one case this parser classifies as a [`SemanticError`] rather
    /// than a generic syntax error, since the position unambiguously wants a user-chosen name.
    fn expect_single_identifier(&mut self) -> Result<(Arc<str>, usize, usize), ProgramError> {
        match self.advance() {
            Some(token) => match &token.kind {
                TokenKind::Identifier(name) => Ok((Arc::clone(name), token.line, token.column)),
                other if RESERVED.contains(&keyword_text(other)) => Err(SemanticError::ReservedKeyword {
                    name: Arc::from(keyword_text(other)),
                    line: token.line,
                    column: token.column,
                }
                .into()),
                _ => Err(self.unexpected_token(token)),
            },
            None => Err(self.unexpected_eof()),
        }
    }

    fn identifier_list(&mut self) -> Vec<(Arc<str>, usize, usize)> {
        let mut names = Vec::new();
        while let Some(token) = self.peek() {
            match &token.kind {
                TokenKind::Identifier(name) => {
                    let entry = (Arc::clone(name), token.line, token.column);
                    self.advance();
                    names.push(entry);
                }
                _ => break,
            }
        }
        names
    }

    fn check_not_declared(&self, name: &Arc<str>, line: usize, column: usize) -> Result<(), ProgramError> {
        if self.aliases.contains_key(name) {
            return Err(SemanticError::Redeclaration { name: Arc::clone(name), line, column }.into());
        }
        Ok(())
    }

    fn resolve(&self, name: &Arc<str>, line: usize, column: usize) -> Result<Expr, ProgramError> {
        self.aliases
            .get(name)
            .cloned()
            .ok_or_else(|| SemanticError::UndeclaredIdentifier { name: Arc::clone(name), line, column }.into())
    }

    fn parse_program(&mut self) -> Result<(), ProgramError> {
        while let Some(token) = self.peek() {
            match &token.kind {
                TokenKind::Var => self.parse_var_decl()?,
                TokenKind::Show => self.parse_show(false)?,
                TokenKind::ShowOnes => self.parse_show(true)?,
                TokenKind::Identifier(_) => self.parse_assignment()?,
                _ => return Err(self.unexpected_token(token)),
            }
        }
        Ok(())
    }

    fn parse_var_decl(&mut self) -> Result<(), ProgramError> {
        self.advance();
        let names = self.identifier_list();
        if names.is_empty() {
            return match self.peek() {
                Some(token) => Err(self.unexpected_token(&token.clone())),
                None => Err(self.unexpected_eof()),
            };
        }
        for (name, line, column) in &names {
            self.check_not_declared(name, *line, *column)?;
            self.aliases.insert(Arc::clone(name), Expr::Var(Arc::clone(name)));
            self.var_order.push(Arc::clone(name));
        }
        self.expect_semicolon()
    }

    fn parse_show(&mut self, is_ones: bool) -> Result<(), ProgramError> {
        self.advance();
        let names = self.identifier_list();
        if names.is_empty() {
            return match self.peek() {
                Some(token) => Err(self.unexpected_token(&token.clone())),
                None => Err(self.unexpected_eof()),
            };
        }
        let mut outputs = Vec::with_capacity(names.len());
        for (name, line, column) in &names {
            let expr = self.resolve(name, *line, *column)?;
            outputs.push((Arc::clone(name), expr));
        }
        self.expect_semicolon()?;
        self.tasks.push(if is_ones {
            RenderTask::ShowOnes { outputs }
        } else {
            RenderTask::Show { outputs }
        });
        Ok(())
    }

    fn parse_assignment(&mut self) -> Result<(), ProgramError> {
        let (name, line, column) = self.expect_single_identifier()?;
        self.check_not_declared(&name, line, column)?;
        match self.advance() {
            Some(token) if token.kind == TokenKind::Equals => {}
            Some(token) => return Err(self.unexpected_token(&token.clone())),
            None => return Err(self.unexpected_eof()),
        }
        let expr = self.parse_expr()?;
        self.expect_semicolon()?;
        self.aliases.insert(name, expr);
        Ok(())
    }

    /// `expr := term ( op term )*`, rejecting a mix of `and` and `or` at one parenthesis level.
    fn parse_expr(&mut self) -> Result<Expr, ProgramError> {
        let first = self.parse_term()?;

        let level_op = match self.peek().map(|t| &t.kind) {
            Some(TokenKind::And) => TokenKind::And,
            Some(TokenKind::Or) => TokenKind::Or,
            _ => return Ok(first),
        };

        let mut terms = vec![first];
        loop {
            match self.peek().map(|t| &t.kind) {
                Some(kind) if *kind == level_op => {
                    self.advance();
                    terms.push(self.parse_term()?);
                }
                Some(TokenKind::And) | Some(TokenKind::Or) => {
                    let token = self.peek().unwrap().clone();
                    return Err(SyntaxError::MixedOperators { line: token.line, column: token.column }.into());
                }
                _ => break,
            }
        }

        Ok(match level_op {
            TokenKind::And => Expr::And(terms),
            _ => Expr::Or(terms),
        })
    }

    /// `term := IDENT | "True" | "False" | "not" term | "(" expr ")"`.
    fn parse_term(&mut self) -> Result<Expr, ProgramError> {
        let token = self.advance().ok_or_else(|| self.unexpected_eof())?.clone();
        match token.kind {
            TokenKind::Identifier(name) => self.resolve(&name, token.line, token.column),
            TokenKind::True => Ok(Expr::Const(true)),
            TokenKind::False => Ok(Expr::Const(false)),
            TokenKind::Not => Ok(Expr::Not(Box::new(self.parse_term()?))),
            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                match self.advance() {
                    Some(t) if t.kind == TokenKind::RParen => Ok(inner),
                    Some(t) => Err(self.unexpected_token(&t.clone())),
                    None => Err(self.unexpected_eof()),
                }
            }
            _ => Err(self.unexpected_token(&token)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(order: &VariableOrder) -> Vec<String> {
        order.names().iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn two_variable_or_parses_into_one_show_task() {
        let (order, tasks) = parse("var x y; z = x or y; show z;").unwrap();
        assert_eq!(names(&order), vec!["x", "y"]);
        assert_eq!(tasks.len(), 1);
        match &tasks[0] {
            RenderTask::Show { outputs } => {
                assert_eq!(outputs.len(), 1);
                assert_eq!(outputs[0].0.as_ref(), "z");
                assert_eq!(outputs[0].1, Expr::var("x").or(Expr::var("y")));
            }
            other => panic!("expected Show, got {other:?}"),
        }
    }

    #[test]
    fn assignments_are_aliases_not_new_variables() {
        let (order, _) = parse("var x; f = x and True; show f;").unwrap();
        assert_eq!(names(&order), vec!["x"]);
    }

    #[test]
    fn nested_aliases_are_fully_inlined() {
        let (_, tasks) = parse("var x; a = not x; b = a and x; show b;").unwrap();
        match &tasks[0] {
            RenderTask::Show { outputs } => {
                assert_eq!(outputs[0].1, Expr::var("x").not().and(Expr::var("x")));
            }
            other => panic!("expected Show, got {other:?}"),
        }
    }

    #[test]
    fn show_ones_parses_to_the_show_ones_variant() {
        let (_, tasks) = parse("var a b c; f = a and b and c; show_ones f;").unwrap();
        assert!(matches!(tasks[0], RenderTask::ShowOnes { .. }));
    }

    #[test]
    fn undeclared_identifier_is_a_semantic_error() {
        let err = parse("var x; z = x and t;").unwrap_err();
        assert!(matches!(err, ProgramError::Semantic(SemanticError::UndeclaredIdentifier { .. })));
    }

    #[test]
    fn mixed_operators_without_parentheses_is_a_syntax_error() {
        let err = parse("var x y; z = x and y or x;").unwrap_err();
        assert!(matches!(err, ProgramError::Syntax(SyntaxError::MixedOperators { .. })));
    }

    #[test]
    fn redeclared_variable_is_a_semantic_error() {
        let err = parse("var x; var x;").unwrap_err();
        assert!(matches!(err, ProgramError::Semantic(SemanticError::Redeclaration { .. })));
    }

    #[test]
    fn missing_semicolon_is_a_syntax_error() {
        let err = parse("var x; z = not not x").unwrap_err();
        assert!(matches!(err, ProgramError::Syntax(SyntaxError::UnexpectedEof { .. })));
    }

    #[test]
    fn parenthesized_mixed_operators_are_allowed() {
        let (_, tasks) = parse("var x y; z = (x and y) or x; show z;").unwrap();
        match &tasks[0] {
            RenderTask::Show { outputs } => {
                assert_eq!(
                    outputs[0].1,
                    Expr::var("x").and(Expr::var("y")).or(Expr::var("x"))
                );
            }
            other => panic!("expected Show, got {other:?}"),
        }
    }
}
