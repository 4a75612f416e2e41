//! Recursive descent parser for Xenon.
//!
//! Statements and declarations are parsed top-down with one token of
//! lookahead. Binary expressions use precedence climbing over the levels
//! given by [`TokenKind::precedence`]. The first error aborts parsing.
//!
//! Later stages walk the AST recursively, so the parser caps how deeply
//! expressions and blocks may nest (see [`MAX_NESTING`]).

use crate::{
    ast::{
        AssignTarget, BinaryOp, Block, ClassDef, Expr, FieldDef, MethodDef,
        Param, Program, Stmt, TypeExpr, TypeKind, UnaryOp, Visibility,
    },
    error::{ParserError, ParserResult},
    span::{Span, Spanned},
    token::{Token, TokenKind},
};
use xenon_log::{debug, trace};
use xenon_mem::{StringInterner, Symbol};

/// Minimum precedence for parsing.
const MIN_PRECEDENCE: u8 = 1;

/// Deepest allowed nesting of expressions and blocks.
///
/// Every parenthesis, unary operator, binary operator, `.` access, block and
/// `else if` adds a level, so this also bounds the depth of the AST.
pub const MAX_NESTING: usize = 256;

/// Parser for Xenon token streams.
///
/// The token stream is expected to end in [`TokenKind::Eof`], as produced by
/// [`Lexer`](crate::lexer::Lexer).
pub struct Parser<'input> {
    /// Token stream from lexer
    tokens: Vec<Token>,
    /// Current position in token stream
    pos: usize,
    /// Source code for error reporting
    source: &'input str,
    /// Interner that produced the token symbols
    interner: StringInterner,
    /// Set while parsing a method body; gates `return`
    in_method: bool,
    /// Current nesting level, at most [`MAX_NESTING`]
    depth: usize,
}

impl<'input> Parser<'input> {
    /// Creates a new parser.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Token stream from lexer
    /// * `source` - Source code for error reporting
    /// * `interner` - Interner the lexer used
    #[must_use]
    pub fn new(
        tokens: Vec<Token>,
        source: &'input str,
        interner: StringInterner,
    ) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
            interner,
            in_method: false,
            depth: 0,
        }
    }

    /// The interner holding identifier and string literal symbols.
    #[must_use]
    pub const fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Consumes the parser and returns its interner.
    #[must_use]
    pub fn into_interner(self) -> StringInterner {
        self.interner
    }

    /// Resolves a symbol to its string representation.
    #[must_use]
    pub fn resolve_symbol(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym).unwrap_or("<unknown>")
    }

    /// Returns the current token.
    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Peeks at the current token without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&Token> {
        self.current()
    }

    /// Kind of the current token, `Eof` past the end.
    fn peek_kind(&self) -> TokenKind {
        self.peek().map_or(TokenKind::Eof, |t| t.kind)
    }

    /// Advances to the next token and returns the previous one.
    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Checks if the current token matches the given kind.
    #[must_use]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|token| token.kind == kind)
    }

    /// Expects the current token to be of the given kind.
    ///
    /// # Errors
    ///
    /// [`ParserError::UnexpectedToken`] naming `kind` and what was found.
    pub fn expect(&mut self, kind: TokenKind) -> ParserResult<Token> {
        if self.check(kind) {
            if let Some(token) = self.bump() {
                return Ok(token);
            }
        }
        Err(self.unexpected(&[format!("'{kind}'").as_str()]))
    }

    /// Checks if we're at EOF.
    fn is_at_eof(&self) -> bool {
        self.pos >= self.tokens.len() || self.check(TokenKind::Eof)
    }

    /// Span of the current token, or of the end of input.
    fn current_span(&self) -> Span {
        self.peek().map_or_else(|| self.eof_span(), |t| t.span)
    }

    fn eof_span(&self) -> Span {
        self.tokens
            .last()
            .map_or(Span::point(self.source.len(), 1, 1), |t| t.span)
    }

    /// Span of the last consumed token.
    fn previous_span(&self, fallback: Span) -> Span {
        self.tokens
            .get(self.pos.saturating_sub(1))
            .map_or(fallback, |t| t.span)
    }

    /// How a token is named in "found ..." messages.
    fn describe(&self, token: &Token) -> String {
        match token.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::StringLiteral(_) => {
                format!("string {}", token.lexeme(self.source))
            }
            _ => format!("'{}'", token.lexeme(self.source)),
        }
    }

    /// Builds an `UnexpectedToken` error at the current token.
    fn unexpected(&self, expected: &[&str]) -> ParserError {
        let found = self
            .peek()
            .map_or_else(|| "end of input".to_string(), |t| self.describe(t));

        ParserError::UnexpectedToken {
            expected: expected.iter().map(ToString::to_string).collect(),
            found,
            span: self.current_span(),
        }
    }

    /// Enters `levels` more levels of nesting.
    fn descend(&mut self, levels: usize) -> ParserResult<()> {
        self.depth += levels;
        if self.depth > MAX_NESTING {
            return Err(ParserError::NestingTooDeep {
                limit: MAX_NESTING,
                span: self.current_span(),
            });
        }
        Ok(())
    }

    fn ascend(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Parses a whole program: classes, then top-level statements.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParserError`].
    pub fn parse_program(&mut self) -> ParserResult<Program> {
        let mut program = Program::default();

        while !self.is_at_eof() {
            if self.check(TokenKind::Class) || self.check(TokenKind::Private) {
                if !program.statements.is_empty() {
                    return Err(ParserError::ClassAfterStatement {
                        span: self.current_span(),
                    });
                }
                let class = self.parse_class_def()?;
                program.classes.push(class);
            } else {
                let stmt = self.parse_stmt()?;
                program.statements.push(stmt);
            }
        }

        debug!(
            "parsed {} classes, {} top-level statements",
            program.classes.len(),
            program.statements.len()
        );

        Ok(program)
    }

    // ===== Declarations =====

    /// Parses an optional visibility modifier.
    ///
    /// Returns the visibility and whether it was written out.
    fn parse_visibility(&mut self) -> (Visibility, bool) {
        if self.check(TokenKind::Private) {
            self.bump();
            (Visibility::Private, true)
        } else {
            (Visibility::Private, false)
        }
    }

    /// Parses `visibility? class Name { member* }`.
    fn parse_class_def(&mut self) -> ParserResult<ClassDef> {
        let start_span = self.current_span();
        let (visibility, explicit_visibility) = self.parse_visibility();

        self.expect(TokenKind::Class)?;
        let name_span = self.current_span();
        let name = self.expect_identifier()?;
        self.expect(TokenKind::LBrace)?;

        let mut fields = Vec::new();
        let mut methods = Vec::new();

        loop {
            match self.peek_kind() {
                TokenKind::Var => fields.push(self.parse_field_def(visibility)?),
                TokenKind::Fun => methods.push(self.parse_method_def()?),
                TokenKind::RBrace => break,
                _ => return Err(self.unexpected(&["'var'", "'fun'", "'}'"])),
            }
        }

        self.expect(TokenKind::RBrace)?;
        let end_span = self.previous_span(start_span);

        trace!(
            "parsed class {} ({} fields, {} methods)",
            self.resolve_symbol(name),
            fields.len(),
            methods.len()
        );

        Ok(ClassDef {
            name,
            name_span,
            visibility,
            explicit_visibility,
            fields,
            methods,
            span: Span::merge(start_span, end_span),
        })
    }

    /// Parses `var name: type = init;` inside a class body.
    fn parse_field_def(&mut self, visibility: Visibility) -> ParserResult<FieldDef> {
        let start_span = self.expect(TokenKind::Var)?.span;
        let name_span = self.current_span();
        let name = self.expect_identifier()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        self.expect_initializer(name)?;
        let init = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;

        Ok(FieldDef {
            name,
            name_span,
            ty,
            init,
            visibility,
            span: Span::merge(start_span, self.previous_span(start_span)),
        })
    }

    /// Parses `fun name(params): type { body }`.
    fn parse_method_def(&mut self) -> ParserResult<MethodDef> {
        let start_span = self.expect(TokenKind::Fun)?.span;
        let name_span = self.current_span();
        let name = self.expect_identifier()?;

        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                params.push(self.parse_param()?);
                if self.check(TokenKind::Comma) {
                    self.bump();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;

        self.expect(TokenKind::Colon)?;
        let return_ty = self.parse_type()?;

        let outer = std::mem::replace(&mut self.in_method, true);
        let body = self.parse_block();
        self.in_method = outer;
        let body = body?;

        Ok(MethodDef {
            name,
            name_span,
            params,
            return_ty,
            span: Span::merge(start_span, body.span),
            body,
        })
    }

    fn parse_param(&mut self) -> ParserResult<Param> {
        let start_span = self.current_span();
        let name = self.expect_identifier()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;

        Ok(Param {
            name,
            ty,
            span: Span::merge(start_span, ty.span),
        })
    }

    /// Parses `int`, `bool`, `string`, `void` or a class name.
    fn parse_type(&mut self) -> ParserResult<TypeExpr> {
        let span = self.current_span();
        let kind = match self.peek_kind() {
            TokenKind::Int => TypeKind::Int,
            TokenKind::Bool => TypeKind::Bool,
            TokenKind::Str => TypeKind::Str,
            TokenKind::Void => TypeKind::Void,
            TokenKind::Ident(sym) => TypeKind::Class(sym),
            _ => return Err(self.unexpected(&["type"])),
        };
        self.bump();

        Ok(TypeExpr::new(kind, span))
    }

    /// Consumes the `=` of a declaration.
    fn expect_initializer(&mut self, name: Symbol) -> ParserResult<()> {
        if self.check(TokenKind::Eq) {
            self.bump();
            Ok(())
        } else {
            Err(ParserError::MissingInitializer {
                name: self.resolve_symbol(name).to_string(),
                span: self.current_span(),
            })
        }
    }

    // ===== Statements =====

    /// Parses `{ stmt* }`.
    fn parse_block(&mut self) -> ParserResult<Block> {
        let start_span = self.expect(TokenKind::LBrace)?.span;
        self.descend(1)?;

        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_eof() {
            stmts.push(self.parse_stmt()?);
        }

        let end_span = self.expect(TokenKind::RBrace)?.span;
        self.ascend(1);

        Ok(Block {
            stmts,
            span: Span::merge(start_span, end_span),
        })
    }

    /// Parses a single statement.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParserError`] in the statement.
    pub fn parse_stmt(&mut self) -> ParserResult<Stmt> {
        match self.peek_kind() {
            TokenKind::Var => self.parse_var_decl(),
            TokenKind::Print => self.parse_print_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            _ => self.parse_assign_or_expr_stmt(),
        }
    }

    fn parse_var_decl(&mut self) -> ParserResult<Stmt> {
        let start_span = self.expect(TokenKind::Var)?.span;
        let name = self.expect_identifier()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        self.expect_initializer(name)?;
        let init = self.parse_expression()?;
        let end_span = self.expect(TokenKind::Semicolon)?.span;

        Ok(Stmt::VarDecl {
            name,
            ty,
            init,
            span: Span::merge(start_span, end_span),
        })
    }

    fn parse_print_stmt(&mut self) -> ParserResult<Stmt> {
        let start_span = self.expect(TokenKind::Print)?.span;
        self.expect(TokenKind::LParen)?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let end_span = self.expect(TokenKind::Semicolon)?.span;

        Ok(Stmt::Print {
            value,
            span: Span::merge(start_span, end_span),
        })
    }

    fn parse_return_stmt(&mut self) -> ParserResult<Stmt> {
        let start_span = self.current_span();
        if !self.in_method {
            return Err(ParserError::ReturnOutsideMethod { span: start_span });
        }
        self.expect(TokenKind::Return)?;

        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        let end_span = self.expect(TokenKind::Semicolon)?.span;

        Ok(Stmt::Return {
            value,
            span: Span::merge(start_span, end_span),
        })
    }

    /// Parses `if (cond) block (else (if | block))?`.
    fn parse_if_stmt(&mut self) -> ParserResult<Stmt> {
        let start_span = self.expect(TokenKind::If)?.span;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let then_block = self.parse_block()?;

        let else_block = if self.check(TokenKind::Else) {
            self.bump();
            if self.check(TokenKind::If) {
                self.descend(1)?;
                let nested = self.parse_if_stmt()?;
                self.ascend(1);
                let span = nested.span();
                Some(Block {
                    stmts: vec![nested],
                    span,
                })
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };

        Ok(Stmt::If {
            cond,
            then_block,
            else_block,
            span: Span::merge(start_span, self.previous_span(start_span)),
        })
    }

    fn parse_while_stmt(&mut self) -> ParserResult<Stmt> {
        let start_span = self.expect(TokenKind::While)?.span;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;

        Ok(Stmt::While {
            cond,
            span: Span::merge(start_span, body.span),
            body,
        })
    }

    /// Parses `for (init; cond; step) block`.
    fn parse_for_stmt(&mut self) -> ParserResult<Stmt> {
        let start_span = self.expect(TokenKind::For)?.span;
        self.expect(TokenKind::LParen)?;

        let init = if self.check(TokenKind::Var) {
            self.parse_var_decl()?
        } else {
            self.parse_assign_or_expr_stmt()?
        };
        let cond = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;
        let step = self.parse_assign_or_expr()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;

        Ok(Stmt::For {
            init: Box::new(init),
            cond,
            step: Box::new(step),
            span: Span::merge(start_span, body.span),
            body,
        })
    }

    /// Parses `expr;` or `target = expr;`.
    fn parse_assign_or_expr_stmt(&mut self) -> ParserResult<Stmt> {
        let mut stmt = self.parse_assign_or_expr()?;
        let end_span = self.expect(TokenKind::Semicolon)?.span;

        if let Stmt::Assign { span, .. } | Stmt::Expr { span, .. } = &mut stmt {
            *span = Span::merge(*span, end_span);
        }
        Ok(stmt)
    }

    /// Parses `expr` or `target = expr` without a terminator.
    fn parse_assign_or_expr(&mut self) -> ParserResult<Stmt> {
        let expr = self.parse_expression()?;

        if self.check(TokenKind::Eq) {
            self.bump();

            let target = match expr {
                Expr::Identifier { name, span } => {
                    AssignTarget::Variable { name, span }
                }
                Expr::FieldAccess {
                    receiver,
                    field,
                    span,
                } => AssignTarget::Field {
                    receiver: *receiver,
                    field,
                    span,
                },
                other => {
                    return Err(ParserError::InvalidAssignTarget {
                        span: other.span(),
                    });
                }
            };

            let value = self.parse_expression()?;

            return Ok(Stmt::Assign {
                span: Span::merge(target.span(), value.span()),
                target,
                value,
            });
        }

        Ok(Stmt::Expr {
            span: expr.span(),
            expr,
        })
    }

    // ===== Expressions =====

    /// Parses a complete expression (entry point).
    ///
    /// # Errors
    ///
    /// Returns the first [`ParserError`] in the expression.
    pub fn parse_expression(&mut self) -> ParserResult<Expr> {
        self.parse_expr(MIN_PRECEDENCE)
    }

    /// Parses an expression with the given minimum precedence.
    ///
    /// Operators of equal precedence associate to the left.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParserError`] in the expression.
    pub fn parse_expr(&mut self, precedence: u8) -> ParserResult<Expr> {
        self.descend(1)?;
        let mut folds = 0;
        let mut left = self.parse_prefix_expr()?;

        loop {
            let kind = self.peek_kind();
            let Some(token_prec) = kind.precedence() else {
                break;
            };
            if token_prec < precedence {
                break;
            }
            let Some(op) = Self::token_kind_to_binary_op(kind) else {
                break;
            };

            self.bump(); // consume operator
            self.descend(1)?;
            folds += 1;

            let right = self.parse_expr(token_prec + 1)?;
            let span = Span::merge(left.span(), right.span());
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                span,
            };
        }

        self.ascend(1 + folds);
        Ok(left)
    }

    /// Parses `-expr`, `!expr` or a postfix expression.
    fn parse_prefix_expr(&mut self) -> ParserResult<Expr> {
        let op = match self.peek_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_postfix_expr(),
        };
        let start_span = self.current_span();
        self.bump();

        self.descend(1)?;
        let operand = self.parse_prefix_expr()?;
        self.ascend(1);
        let span = Span::merge(start_span, operand.span());

        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
            span,
        })
    }

    /// Parses a primary expression followed by `.field` or `.method(args)`.
    fn parse_postfix_expr(&mut self) -> ParserResult<Expr> {
        let mut expr = self.parse_primary_expr()?;
        let mut folds = 0;

        while self.check(TokenKind::Dot) {
            self.bump(); // consume .
            self.descend(1)?;
            folds += 1;
            let start_span = expr.span();
            let name = self.expect_identifier()?;

            if self.check(TokenKind::LParen) {
                let (args, end_span) = self.parse_args()?;
                expr = Expr::MethodCall {
                    receiver: Some(Box::new(expr)),
                    method: name,
                    args,
                    span: Span::merge(start_span, end_span),
                };
            } else {
                let end_span = self.previous_span(start_span);
                expr = Expr::FieldAccess {
                    receiver: Box::new(expr),
                    field: name,
                    span: Span::merge(start_span, end_span),
                };
            }
        }

        self.ascend(folds);
        Ok(expr)
    }

    fn parse_primary_expr(&mut self) -> ParserResult<Expr> {
        let span = self.current_span();

        match self.peek_kind() {
            TokenKind::IntLiteral(value) => {
                self.bump();
                Ok(Expr::IntLiteral { value, span })
            }
            TokenKind::StringLiteral(value) => {
                self.bump();
                Ok(Expr::StrLiteral { value, span })
            }
            TokenKind::BoolLiteral(value) => {
                self.bump();
                Ok(Expr::BoolLiteral { value, span })
            }
            TokenKind::New => self.parse_new_expr(),
            TokenKind::Ident(name) => {
                self.bump();
                if self.check(TokenKind::LParen) {
                    let (args, end_span) = self.parse_args()?;
                    Ok(Expr::MethodCall {
                        receiver: None,
                        method: name,
                        args,
                        span: Span::merge(span, end_span),
                    })
                } else {
                    Ok(Expr::Identifier { name, span })
                }
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(self.unexpected(&["expression"])),
        }
    }

    /// Parses `new Name()`.
    fn parse_new_expr(&mut self) -> ParserResult<Expr> {
        let start_span = self.expect(TokenKind::New)?.span;
        let class = self.expect_identifier()?;
        self.expect(TokenKind::LParen)?;
        let end_span = self.expect(TokenKind::RParen)?.span;

        Ok(Expr::New {
            class,
            span: Span::merge(start_span, end_span),
        })
    }

    /// Parses `( (expr ("," expr)*)? )` and returns the span of `)`.
    fn parse_args(&mut self) -> ParserResult<(Vec<Expr>, Span)> {
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if self.check(TokenKind::Comma) {
                    self.bump();
                } else {
                    break;
                }
            }
        }

        let end_span = self.expect(TokenKind::RParen)?.span;
        Ok((args, end_span))
    }

    /// Expects an identifier and returns its symbol.
    fn expect_identifier(&mut self) -> ParserResult<Symbol> {
        match self.peek_kind() {
            TokenKind::Ident(sym) => {
                self.bump();
                Ok(sym)
            }
            _ => Err(self.unexpected(&["identifier"])),
        }
    }

    /// Converts a `TokenKind` to a `BinaryOp`.
    const fn token_kind_to_binary_op(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::BangEq => Some(BinaryOp::Ne),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::LtEq => Some(BinaryOp::Le),
            TokenKind::GtEq => Some(BinaryOp::Ge),
            TokenKind::AmpAmp => Some(BinaryOp::And),
            TokenKind::PipePipe => Some(BinaryOp::Or),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parser(source: &str) -> Parser<'_> {
        let (tokens, interner) = match Lexer::new(source).lex_with_interner() {
            Ok(result) => result,
            Err(e) => panic!("Lexer failed: {e}"),
        };
        Parser::new(tokens, source, interner)
    }

    fn parse_expr(source: &str) -> ParserResult<Expr> {
        parser(source).parse_expression()
    }

    fn parse_program(source: &str) -> ParserResult<Program> {
        parser(source).parse_program()
    }

    #[test]
    fn test_parse_integer_literal() {
        let expr = parse_expr("42").unwrap();
        match expr {
            Expr::IntLiteral { value: 42, .. } => {}
            _ => panic!("Expected IntLiteral, got {expr:?}"),
        }
    }

    #[test]
    fn test_parse_unary_minus() {
        let expr = parse_expr("-42").unwrap();
        match expr {
            Expr::Unary {
                op: UnaryOp::Neg, ..
            } => {}
            _ => panic!("Expected Unary Neg, got {expr:?}"),
        }
    }

    #[test]
    fn test_operator_precedence() {
        let expr = parse_expr("1 + 2 * 3").unwrap();

        // 1 + (2 * 3)
        match expr {
            Expr::Binary {
                op: BinaryOp::Add,
                left,
                right,
                ..
            } => {
                assert!(matches!(*left, Expr::IntLiteral { value: 1, .. }));
                assert!(matches!(
                    *right,
                    Expr::Binary {
                        op: BinaryOp::Mul,
                        ..
                    }
                ));
            }
            _ => panic!("Expected Binary Add, got {expr:?}"),
        }
    }

    #[test]
    fn test_left_associativity() {
        let expr = parse_expr("10 - 4 - 3").unwrap();

        // (10 - 4) - 3
        match expr {
            Expr::Binary {
                op: BinaryOp::Sub,
                left,
                right,
                ..
            } => {
                assert!(matches!(
                    *left,
                    Expr::Binary {
                        op: BinaryOp::Sub,
                        ..
                    }
                ));
                assert!(matches!(*right, Expr::IntLiteral { value: 3, .. }));
            }
            _ => panic!("Expected Binary Sub, got {expr:?}"),
        }
    }

    #[test]
    fn test_logical_precedence() {
        let expr = parse_expr("a || b && c == d").unwrap();

        // a || (b && (c == d))
        match expr {
            Expr::Binary {
                op: BinaryOp::Or,
                right,
                ..
            } => match *right {
                Expr::Binary {
                    op: BinaryOp::And,
                    right,
                    ..
                } => assert!(matches!(
                    *right,
                    Expr::Binary {
                        op: BinaryOp::Eq,
                        ..
                    }
                )),
                other => panic!("Expected And, got {other:?}"),
            },
            _ => panic!("Expected Binary Or, got {expr:?}"),
        }
    }

    #[test]
    fn test_parenthesized_overrides_precedence() {
        let expr = parse_expr("(1 + 2) * 3").unwrap();
        assert!(matches!(
            expr,
            Expr::Binary {
                op: BinaryOp::Mul,
                ..
            }
        ));
    }

    #[test]
    fn test_unary_binds_tighter_than_field_access_receiver() {
        // -(s.id), not (-s).id
        let expr = parse_expr("-s.id").unwrap();
        match expr {
            Expr::Unary { operand, .. } => {
                assert!(matches!(*operand, Expr::FieldAccess { .. }));
            }
            _ => panic!("Expected Unary, got {expr:?}"),
        }
    }

    #[test]
    fn test_parse_method_call_chain() {
        let expr = parse_expr("a.b.c(1, 2)").unwrap();
        match expr {
            Expr::MethodCall {
                receiver: Some(receiver),
                args,
                ..
            } => {
                assert_eq!(args.len(), 2);
                assert!(matches!(*receiver, Expr::FieldAccess { .. }));
            }
            _ => panic!("Expected MethodCall, got {expr:?}"),
        }
    }

    #[test]
    fn test_parse_implicit_receiver_call() {
        let expr = parse_expr("getId()").unwrap();
        assert!(matches!(
            expr,
            Expr::MethodCall { receiver: None, ref args, .. } if args.is_empty()
        ));
    }

    #[test]
    fn test_parse_new() {
        let expr = parse_expr("new Student()").unwrap();
        assert!(matches!(expr, Expr::New { .. }));
        assert_eq!(expr.span(), Span::new(0, 13, 1, 1, 1, 14));
    }

    #[test]
    fn test_new_rejects_arguments() {
        let err = parse_expr("new Student(1)").unwrap_err();
        assert_eq!(err.to_string(), "expected ')', found '1'");
    }

    #[test]
    fn test_parse_sample_program() {
        let source = "\
class Student {
    var id: int = 101;
    fun getId(): int { return id; }
    fun setId(newId: int): void { id = newId; }
}
var s: Student = new Student();
print(s.getId());
s.setId(102);
print(s.getId());
";
        let program = parse_program(source).unwrap();

        assert_eq!(program.classes.len(), 1);
        assert_eq!(program.statements.len(), 4);

        let class = &program.classes[0];
        assert_eq!(class.visibility, Visibility::Private);
        assert!(!class.explicit_visibility);
        assert_eq!(class.fields.len(), 1);
        assert_eq!(class.methods.len(), 2);
        assert_eq!(class.methods[1].params.len(), 1);
        assert!(class.methods[1].return_ty.is_void());
        assert!(matches!(program.statements[2], Stmt::Expr { .. }));
    }

    #[test]
    fn test_parse_explicit_private() {
        let program = parse_program("private class A { }").unwrap();
        assert!(program.classes[0].explicit_visibility);
        assert_eq!(program.classes[0].visibility, Visibility::Private);
    }

    #[test]
    fn test_other_visibility_is_not_a_modifier() {
        let err = parse_program("public class A { }").unwrap_err();
        assert!(matches!(err, ParserError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse_program("class A {\n  var id: int = 101\n}").unwrap_err();
        assert_eq!(err.to_string(), "expected ';', found '}'");
        assert_eq!(err.span().start_line, 3);
    }

    #[test]
    fn test_missing_field_initializer() {
        let err = parse_program("class A { var id: int; }").unwrap_err();
        match err {
            ParserError::MissingInitializer { name, .. } => assert_eq!(name, "id"),
            _ => panic!("Expected MissingInitializer, got {err:?}"),
        }
    }

    #[test]
    fn test_missing_var_initializer() {
        let err = parse_program("var x: int;").unwrap_err();
        assert!(matches!(err, ParserError::MissingInitializer { .. }));
    }

    #[test]
    fn test_return_outside_method() {
        let err = parse_program("return 1;").unwrap_err();
        assert_eq!(
            err,
            ParserError::ReturnOutsideMethod {
                span: Span::new(0, 6, 1, 1, 1, 7)
            }
        );
    }

    #[test]
    fn test_invalid_assign_target() {
        let err = parse_program("1 + 2 = 3;").unwrap_err();
        assert!(matches!(err, ParserError::InvalidAssignTarget { .. }));

        let err = parse_program("s.getId() = 3;").unwrap_err();
        assert!(matches!(err, ParserError::InvalidAssignTarget { .. }));
    }

    #[test]
    fn test_field_assignment_target() {
        let program = parse_program("s.id = 5;").unwrap();
        match &program.statements[0] {
            Stmt::Assign {
                target: AssignTarget::Field { receiver, .. },
                ..
            } => assert!(matches!(receiver, Expr::Identifier { .. })),
            other => panic!("Expected field assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_class_after_statement() {
        let err = parse_program("print(1);\nclass A { }").unwrap_err();
        match err {
            ParserError::ClassAfterStatement { span } => {
                assert_eq!(span.start_line, 2);
            }
            _ => panic!("Expected ClassAfterStatement, got {err:?}"),
        }
    }

    #[test]
    fn test_else_if_chain() {
        let program =
            parse_program("if (a) { print(1); } else if (b) { print(2); } else { print(3); }")
                .unwrap();
        match &program.statements[0] {
            Stmt::If {
                else_block: Some(block),
                ..
            } => {
                assert_eq!(block.stmts.len(), 1);
                assert!(matches!(
                    block.stmts[0],
                    Stmt::If {
                        else_block: Some(_),
                        ..
                    }
                ));
            }
            other => panic!("Expected If with else, got {other:?}"),
        }
    }

    #[test]
    fn test_while_statement() {
        let program = parse_program("while (i < 3) { i = i + 1; }").unwrap();
        match &program.statements[0] {
            Stmt::While { body, .. } => assert_eq!(body.stmts.len(), 1),
            other => panic!("Expected While, got {other:?}"),
        }
    }

    #[test]
    fn test_for_statement() {
        let program =
            parse_program("for (var i: int = 0; i < 3; i = i + 1) { print(i); }").unwrap();
        match &program.statements[0] {
            Stmt::For {
                init,
                cond,
                step,
                body,
                span,
            } => {
                assert!(matches!(**init, Stmt::VarDecl { .. }));
                assert!(matches!(
                    cond,
                    Expr::Binary {
                        op: BinaryOp::Lt,
                        ..
                    }
                ));
                assert!(matches!(
                    **step,
                    Stmt::Assign {
                        target: AssignTarget::Variable { .. },
                        ..
                    }
                ));
                assert_eq!(body.stmts.len(), 1);
                assert_eq!(span.start_col, 1);
            }
            other => panic!("Expected For, got {other:?}"),
        }
    }

    #[test]
    fn test_for_with_assignment_init_and_call_step() {
        let program = parse_program("for (i = 0; i < n; c.bump()) { }").unwrap();
        match &program.statements[0] {
            Stmt::For { init, step, .. } => {
                assert!(matches!(**init, Stmt::Assign { .. }));
                assert!(matches!(**step, Stmt::Expr { .. }));
                // the step ends before ')'
                assert_eq!(step.span(), Span::new(19, 27, 1, 20, 1, 28));
            }
            other => panic!("Expected For, got {other:?}"),
        }
    }

    #[test]
    fn test_for_requires_all_clauses() {
        let err = parse_program("for (var i: int = 0; i < 3) { }").unwrap_err();
        assert_eq!(err.to_string(), "expected ';', found ')'");

        let err = parse_program("for (var i: int = 0; i < 3; var j: int = 1) { }").unwrap_err();
        assert_eq!(err.to_string(), "expected expression, found 'var'");
    }

    #[test]
    fn test_nesting_limit_on_parentheses() {
        let within = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert!(matches!(
            parse_expr(&within).unwrap(),
            Expr::IntLiteral { value: 1, .. }
        ));

        let source = format!("{}1{}", "(".repeat(20_000), ")".repeat(20_000));
        let err = parse_expr(&source).unwrap_err();
        assert_eq!(
            err,
            ParserError::NestingTooDeep {
                limit: MAX_NESTING,
                span: err.span(),
            }
        );
        assert!(err.span().start < 20_000);
    }

    #[test]
    fn test_nesting_limit_on_operator_chain() {
        let within = format!("1{}", " + 1".repeat(100));
        assert!(parse_expr(&within).is_ok());

        let source = format!("1{}", " + 1".repeat(20_000));
        let err = parse_expr(&source).unwrap_err();
        assert!(matches!(err, ParserError::NestingTooDeep { .. }));
    }

    #[test]
    fn test_nesting_limit_on_unary_and_access() {
        let err = parse_expr(&format!("{}x", "-".repeat(20_000))).unwrap_err();
        assert!(matches!(err, ParserError::NestingTooDeep { .. }));

        let err = parse_expr(&format!("a{}", ".b".repeat(20_000))).unwrap_err();
        assert!(matches!(err, ParserError::NestingTooDeep { .. }));
    }

    #[test]
    fn test_nesting_limit_on_blocks() {
        let within = format!("{}{}", "if (true) { ".repeat(50), "}".repeat(50));
        assert!(parse_program(&within).is_ok());

        let source = format!("{}{}", "while (true) { ".repeat(5_000), "}".repeat(5_000));
        let err = parse_program(&source).unwrap_err();
        assert!(matches!(err, ParserError::NestingTooDeep { .. }));

        let source = format!("if (a) {{ }}{} else {{ }}", " else if (a) { }".repeat(5_000));
        let err = parse_program(&source).unwrap_err();
        assert!(matches!(err, ParserError::NestingTooDeep { .. }));
    }

    #[test]
    fn test_nesting_resets_between_statements() {
        let deep = format!("print({}1{});\n", "(".repeat(200), ")".repeat(200));
        let source = deep.repeat(10);
        assert_eq!(parse_program(&source).unwrap().statements.len(), 10);
    }

    #[test]
    fn test_unclosed_block_reports_end_of_input() {
        let err = parse_program("class A { fun f(): void { print(1);").unwrap_err();
        assert_eq!(err.to_string(), "expected '}', found end of input");
    }

    #[test]
    fn test_class_member_must_be_var_or_fun() {
        let err = parse_program("class A { print(1); }").unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected one of: 'var', 'fun', '}', found 'print'"
        );
    }

    #[test]
    fn test_void_return_without_value() {
        let program = parse_program("class A { fun f(): void { return; } }").unwrap();
        let body = &program.classes[0].methods[0].body;
        assert!(matches!(body.stmts[0], Stmt::Return { value: None, .. }));
    }
}
