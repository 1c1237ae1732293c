//! Recursive descent parser for Lumen
//!
//! Parsing never fails wholesale: every syntax error becomes a
//! [`Diagnostic`] in the result and recovery resumes at the next statement
//! boundary, so a (possibly partial) tree is always produced.

use crate::arena::{Arena, NameId, NodeRef};
use crate::ast::{AstNode, BinaryOp, UnaryOp};
use crate::error::{expected_closing, expected_expression, expected_token, syntax_error};
use crate::interner::NameInterner;
use crate::lexer::{Keyword, Lexeme, LexemeKind, Lexer, Punct};
use core_types::{flags, Diagnostic, HotComment, Position, Span};

/// Everything one parse call produces
#[derive(Debug)]
pub struct ParseResult {
    /// Root block of the tree; always present, possibly partial
    pub root: NodeRef,
    /// Collected syntax errors, in source order
    pub diagnostics: Vec<Diagnostic>,
    /// `--!` comments, in encounter order
    pub hot_comments: Vec<HotComment>,
    /// Generation of the arena the tree was parsed into
    pub arena_generation: u32,
}

/// Run the full grammar over `source`, allocating the tree from `arena` and
/// names through `interner`.
pub fn parse(source: &str, interner: &mut NameInterner, arena: &mut Arena) -> ParseResult {
    let registry = flags::registry();
    let error_limit = registry
        .get_int(flags::FLAG_PARSE_ERROR_LIMIT)
        .unwrap_or(100)
        .max(1) as usize;
    let recursion_limit = registry
        .get_int(flags::FLAG_PARSE_RECURSION_LIMIT)
        .unwrap_or(256)
        .max(1) as u32;
    let allow_attributes = registry
        .get_bool(flags::FLAG_PARSE_ALLOW_ATTRIBUTES)
        .unwrap_or(true);

    let parser = Parser {
        lexer: Lexer::new(source),
        arena,
        interner,
        diagnostics: Vec::new(),
        prev_end: Position::new(0, 0),
        depth: 0,
        recursion_limit,
        error_limit,
        allow_attributes,
    };
    parser.run()
}

/// Lumen parser
pub struct Parser<'ctx> {
    lexer: Lexer,
    arena: &'ctx mut Arena,
    interner: &'ctx mut NameInterner,
    diagnostics: Vec<Diagnostic>,
    /// End position of the most recently consumed lexeme
    prev_end: Position,
    depth: u32,
    recursion_limit: u32,
    error_limit: usize,
    allow_attributes: bool,
}

const STATEMENT_KEYWORDS: &[Keyword] = &[
    Keyword::Local,
    Keyword::If,
    Keyword::While,
    Keyword::Repeat,
    Keyword::For,
    Keyword::Return,
    Keyword::Break,
    Keyword::Function,
    Keyword::Do,
    Keyword::End,
    Keyword::Until,
    Keyword::Else,
    Keyword::Elseif,
];

impl<'ctx> Parser<'ctx> {
    fn run(mut self) -> ParseResult {
        self.advance();
        let root = self.parse_block(&[]);
        if !self.at_eof() && self.diagnostics.len() < self.error_limit {
            let diag = expected_token("<eof>", self.cur());
            self.diagnostics.push(diag);
        }
        log::debug!(
            "parse finished: {} nodes, {} diagnostics",
            self.arena.node_count(),
            self.diagnostics.len()
        );
        ParseResult {
            root,
            diagnostics: self.diagnostics,
            hot_comments: self.lexer.take_hot_comments(),
            arena_generation: self.arena.generation(),
        }
    }

    // --- token plumbing ---

    fn cur(&self) -> &Lexeme {
        self.lexer.current()
    }

    fn advance(&mut self) {
        self.prev_end = self.lexer.current().span.end;
        self.lexer.next(self.arena, self.interner);
    }

    fn at_eof(&self) -> bool {
        matches!(self.cur().kind, LexemeKind::Eof)
    }

    fn check_punct(&self, punct: Punct) -> bool {
        matches!(self.cur().kind, LexemeKind::Punct(p) if p == punct)
    }

    fn accept_punct(&mut self, punct: Punct) -> bool {
        if self.check_punct(punct) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, punct: Punct, context: &str) -> bool {
        if self.accept_punct(punct) {
            return true;
        }
        let diag = expected_token(&format!("'{}' {}", punct.as_str(), context), self.cur());
        self.report(diag);
        false
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.cur().kind, LexemeKind::Keyword(k) if k == keyword)
    }

    fn accept_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_end(&mut self, construct: &str) {
        if !self.accept_keyword(Keyword::End) {
            let diag = expected_closing("'end'", construct, self.cur());
            self.report(diag);
        }
    }

    fn report(&mut self, diag: Diagnostic) {
        if self.diagnostics.len() < self.error_limit {
            self.diagnostics.push(diag);
        }
    }

    fn expect_name(&mut self, context: &str) -> Option<NameId> {
        let (id, text) = match &self.cur().kind {
            LexemeKind::Name { id, text } => (*id, text.clone()),
            _ => {
                let diag = expected_token(context, self.cur());
                self.report(diag);
                return None;
            }
        };
        self.advance();
        Some(match id {
            Some(id) => id,
            None => self.interner.intern(self.arena, &text),
        })
    }

    fn error_node(&mut self, span: Span) -> NodeRef {
        self.arena.alloc(AstNode::Error { span })
    }

    /// Skip forward to the next statement boundary, consuming at least one
    /// lexeme so the parse always makes progress.
    fn synchronize(&mut self) {
        if !self.at_eof() {
            self.advance();
        }
        while !self.at_eof() {
            match &self.cur().kind {
                LexemeKind::Keyword(k) if STATEMENT_KEYWORDS.contains(k) => return,
                LexemeKind::Punct(Punct::Semicolon) => {
                    self.advance();
                    return;
                }
                _ => self.advance(),
            }
        }
    }

    // --- statements ---

    fn parse_block(&mut self, terminators: &[Keyword]) -> NodeRef {
        let begin = self.cur().span.begin;
        let mut statements = Vec::new();
        loop {
            if self.at_eof() || self.diagnostics.len() >= self.error_limit {
                break;
            }
            if let LexemeKind::Keyword(k) = &self.cur().kind {
                if terminators.contains(k) {
                    break;
                }
            }
            match self.parse_statement() {
                Some(statement) => {
                    statements.push(statement);
                    self.accept_punct(Punct::Semicolon);
                }
                None => self.synchronize(),
            }
        }
        let span = Span::new(begin, self.prev_end.max(begin));
        self.arena.alloc(AstNode::Block { statements, span })
    }

    fn parse_statement(&mut self) -> Option<NodeRef> {
        if self.depth >= self.recursion_limit {
            let span = self.cur().span;
            let diag = syntax_error(span, "Exceeded allowed recursion depth");
            self.report(diag);
            self.advance();
            return Some(self.error_node(span));
        }
        self.depth += 1;
        let statement = self.parse_statement_inner();
        self.depth -= 1;
        statement
    }

    fn parse_statement_inner(&mut self) -> Option<NodeRef> {
        let begin = self.cur().span.begin;
        match self.cur().kind.clone() {
            LexemeKind::Keyword(Keyword::Local) => self.parse_local(begin),
            LexemeKind::Keyword(Keyword::If) => self.parse_if(begin),
            LexemeKind::Keyword(Keyword::While) => self.parse_while(begin),
            LexemeKind::Keyword(Keyword::Repeat) => self.parse_repeat(begin),
            LexemeKind::Keyword(Keyword::For) => self.parse_for(begin),
            LexemeKind::Keyword(Keyword::Return) => self.parse_return(begin),
            LexemeKind::Keyword(Keyword::Break) => {
                self.advance();
                let span = Span::new(begin, self.prev_end);
                Some(self.arena.alloc(AstNode::Break { span }))
            }
            LexemeKind::Keyword(Keyword::Do) => {
                self.advance();
                let body = self.parse_block(&[Keyword::End]);
                self.expect_end("'do'");
                Some(body)
            }
            LexemeKind::Keyword(Keyword::Function) => self.parse_function_statement(begin, false),
            LexemeKind::Attribute { .. } => {
                let native = self.parse_attributes();
                if self.check_keyword(Keyword::Function) {
                    self.parse_function_statement(begin, native)
                } else if self.check_keyword(Keyword::Local) {
                    self.parse_attributed_local(begin, native)
                } else {
                    let diag = expected_token("'function' after attribute", self.cur());
                    self.report(diag);
                    None
                }
            }
            _ => self.parse_expression_statement(begin),
        }
    }

    fn parse_local(&mut self, begin: Position) -> Option<NodeRef> {
        self.advance();
        if self.check_keyword(Keyword::Function) {
            return self.parse_local_function(begin, false);
        }

        let mut names = Vec::new();
        names.push(self.expect_name("identifier when parsing variable name")?);
        while self.accept_punct(Punct::Comma) {
            names.push(self.expect_name("identifier when parsing variable name")?);
        }

        let exprs = if self.accept_punct(Punct::Assign) {
            self.parse_expression_list()
        } else {
            Vec::new()
        };

        let span = Span::new(begin, self.prev_end);
        Some(
            self.arena
                .alloc(AstNode::LocalDeclaration { names, exprs, span }),
        )
    }

    fn parse_attributed_local(&mut self, begin: Position, native: bool) -> Option<NodeRef> {
        self.advance();
        if self.check_keyword(Keyword::Function) {
            self.parse_local_function(begin, native)
        } else {
            let diag = expected_token("'function' after attribute", self.cur());
            self.report(diag);
            None
        }
    }

    fn parse_local_function(&mut self, begin: Position, native: bool) -> Option<NodeRef> {
        self.advance();
        let name = self.expect_name("identifier when parsing function name")?;
        let function = self.parse_function_body(begin, Some(name), native);
        let span = Span::new(begin, self.prev_end);
        Some(self.arena.alloc(AstNode::FunctionDeclaration {
            name,
            function,
            local: true,
            span,
        }))
    }

    fn parse_function_statement(&mut self, begin: Position, native: bool) -> Option<NodeRef> {
        self.advance();
        let name = self.expect_name("identifier when parsing function name")?;
        let function = self.parse_function_body(begin, Some(name), native);
        let span = Span::new(begin, self.prev_end);
        Some(self.arena.alloc(AstNode::FunctionDeclaration {
            name,
            function,
            local: false,
            span,
        }))
    }

    /// Parse `(params) block end`; the `function` keyword and name have
    /// already been consumed.
    fn parse_function_body(
        &mut self,
        begin: Position,
        name: Option<NameId>,
        native: bool,
    ) -> NodeRef {
        self.expect_punct(Punct::LParen, "when parsing function parameters");

        let mut params = Vec::new();
        let mut is_vararg = false;
        if !self.check_punct(Punct::RParen) {
            loop {
                if self.accept_punct(Punct::Dot3) {
                    is_vararg = true;
                    break;
                }
                match self.expect_name("identifier when parsing parameter") {
                    Some(param) => params.push(param),
                    None => break,
                }
                if !self.accept_punct(Punct::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(Punct::RParen, "to close function parameters");

        let body = self.parse_block(&[Keyword::End]);
        self.expect_end("'function'");

        let span = Span::new(begin, self.prev_end);
        self.arena.alloc(AstNode::FunctionLiteral {
            name,
            params,
            is_vararg,
            body,
            native,
            span,
        })
    }

    fn parse_attributes(&mut self) -> bool {
        let mut native = false;
        while let LexemeKind::Attribute { name } = self.cur().kind.clone() {
            if !self.allow_attributes {
                let diag = syntax_error(self.cur().span, "Attributes are disabled");
                self.report(diag);
            } else if name == "native" {
                native = true;
            } else {
                let diag = syntax_error(self.cur().span, format!("Unknown attribute '@{}'", name));
                self.report(diag);
            }
            self.advance();
        }
        native
    }

    fn parse_if(&mut self, begin: Position) -> Option<NodeRef> {
        self.advance();
        let node = self.parse_if_tail(begin);
        Some(node)
    }

    /// Parse `cond then block` plus the elseif/else chain; `if`/`elseif`
    /// has already been consumed. `elseif` becomes a nested If node.
    fn parse_if_tail(&mut self, begin: Position) -> NodeRef {
        // An elseif chain recurses here without passing through
        // parse_statement, so it needs its own depth accounting.
        if self.depth >= self.recursion_limit {
            let span = self.cur().span;
            let diag = syntax_error(span, "Exceeded allowed recursion depth");
            self.report(diag);
            self.advance();
            return self.error_node(span);
        }
        self.depth += 1;
        let node = self.parse_if_tail_inner(begin);
        self.depth -= 1;
        node
    }

    fn parse_if_tail_inner(&mut self, begin: Position) -> NodeRef {
        let condition = self.parse_expression();
        if !self.accept_keyword(Keyword::Then) {
            let diag = expected_token("'then' when parsing if statement", self.cur());
            self.report(diag);
        }
        let then_body = self.parse_block(&[Keyword::End, Keyword::Else, Keyword::Elseif]);

        let else_body = if self.check_keyword(Keyword::Elseif) {
            let elseif_begin = self.cur().span.begin;
            self.advance();
            Some(self.parse_if_tail(elseif_begin))
        } else if self.accept_keyword(Keyword::Else) {
            let body = self.parse_block(&[Keyword::End]);
            self.expect_end("'if'");
            Some(body)
        } else {
            self.expect_end("'if'");
            None
        };

        // A nested elseif owns the closing `end`.
        let span = Span::new(begin, self.prev_end);
        self.arena.alloc(AstNode::If {
            condition,
            then_body,
            else_body,
            span,
        })
    }

    fn parse_while(&mut self, begin: Position) -> Option<NodeRef> {
        self.advance();
        let condition = self.parse_expression();
        if !self.accept_keyword(Keyword::Do) {
            let diag = expected_token("'do' when parsing while loop", self.cur());
            self.report(diag);
        }
        let body = self.parse_block(&[Keyword::End]);
        self.expect_end("'while'");
        let span = Span::new(begin, self.prev_end);
        Some(self.arena.alloc(AstNode::While {
            condition,
            body,
            span,
        }))
    }

    fn parse_repeat(&mut self, begin: Position) -> Option<NodeRef> {
        self.advance();
        let body = self.parse_block(&[Keyword::Until]);
        if !self.accept_keyword(Keyword::Until) {
            let diag = expected_closing("'until'", "'repeat'", self.cur());
            self.report(diag);
        }
        let condition = self.parse_expression();
        let span = Span::new(begin, self.prev_end);
        Some(self.arena.alloc(AstNode::Repeat {
            body,
            condition,
            span,
        }))
    }

    fn parse_for(&mut self, begin: Position) -> Option<NodeRef> {
        self.advance();
        let variable = self.expect_name("identifier when parsing for loop variable")?;
        if !self.accept_punct(Punct::Assign) {
            let diag = expected_token("'=' when parsing numeric for loop", self.cur());
            self.report(diag);
            return None;
        }
        let from = self.parse_expression();
        self.expect_punct(Punct::Comma, "when parsing numeric for loop");
        let to = self.parse_expression();
        let step = if self.accept_punct(Punct::Comma) {
            Some(self.parse_expression())
        } else {
            None
        };
        if !self.accept_keyword(Keyword::Do) {
            let diag = expected_token("'do' when parsing for loop", self.cur());
            self.report(diag);
        }
        let body = self.parse_block(&[Keyword::End]);
        self.expect_end("'for'");
        let span = Span::new(begin, self.prev_end);
        Some(self.arena.alloc(AstNode::NumericFor {
            variable,
            from,
            to,
            step,
            body,
            span,
        }))
    }

    fn parse_return(&mut self, begin: Position) -> Option<NodeRef> {
        self.advance();
        let exprs = if self.at_return_end() {
            Vec::new()
        } else {
            self.parse_expression_list()
        };
        let span = Span::new(begin, self.prev_end);
        Some(self.arena.alloc(AstNode::Return { exprs, span }))
    }

    fn at_return_end(&self) -> bool {
        if self.at_eof() || self.check_punct(Punct::Semicolon) {
            return true;
        }
        matches!(
            self.cur().kind,
            LexemeKind::Keyword(Keyword::End)
                | LexemeKind::Keyword(Keyword::Else)
                | LexemeKind::Keyword(Keyword::Elseif)
                | LexemeKind::Keyword(Keyword::Until)
        )
    }

    fn parse_expression_statement(&mut self, begin: Position) -> Option<NodeRef> {
        let first = self.parse_suffixed_expression()?;

        if self.check_punct(Punct::Assign) || self.check_punct(Punct::Comma) {
            let mut targets = vec![first];
            while self.accept_punct(Punct::Comma) {
                targets.push(self.parse_suffixed_expression()?);
            }
            for &target in &targets {
                if !matches!(
                    self.arena.get(target),
                    AstNode::Name { .. } | AstNode::Index { .. }
                ) {
                    let span = self.arena.get(target).span();
                    let diag = syntax_error(
                        span,
                        "Syntax error: assignment target must be a variable or index expression",
                    );
                    self.report(diag);
                }
            }
            self.expect_punct(Punct::Assign, "when parsing assignment");
            let exprs = self.parse_expression_list();
            let span = Span::new(begin, self.prev_end);
            Some(self.arena.alloc(AstNode::Assignment {
                targets,
                exprs,
                span,
            }))
        } else if matches!(self.arena.get(first), AstNode::Call { .. }) {
            let span = Span::new(begin, self.prev_end);
            Some(self.arena.alloc(AstNode::CallStatement { call: first, span }))
        } else {
            let span = self.arena.get(first).span();
            let diag = syntax_error(
                span,
                "Incomplete statement: expected assignment or a function call",
            );
            self.report(diag);
            None
        }
    }

    // --- expressions ---

    fn parse_expression_list(&mut self) -> Vec<NodeRef> {
        let mut exprs = vec![self.parse_expression()];
        while self.accept_punct(Punct::Comma) {
            exprs.push(self.parse_expression());
        }
        exprs
    }

    /// Parse an expression; on failure, records a diagnostic and yields an
    /// Error placeholder node so statement parsing can continue.
    fn parse_expression(&mut self) -> NodeRef {
        self.parse_binary_expression(0)
    }

    fn binary_op(&self) -> Option<(BinaryOp, u8, u8)> {
        // (op, left priority, right priority); higher binds tighter.
        // Concat and pow are right-associative.
        let op = match self.cur().kind {
            LexemeKind::Keyword(Keyword::Or) => (BinaryOp::Or, 1, 1),
            LexemeKind::Keyword(Keyword::And) => (BinaryOp::And, 2, 2),
            LexemeKind::Punct(Punct::Eq) => (BinaryOp::Eq, 3, 3),
            LexemeKind::Punct(Punct::NotEq) => (BinaryOp::NotEq, 3, 3),
            LexemeKind::Punct(Punct::Lt) => (BinaryOp::Lt, 3, 3),
            LexemeKind::Punct(Punct::LtEq) => (BinaryOp::LtEq, 3, 3),
            LexemeKind::Punct(Punct::Gt) => (BinaryOp::Gt, 3, 3),
            LexemeKind::Punct(Punct::GtEq) => (BinaryOp::GtEq, 3, 3),
            LexemeKind::Punct(Punct::Dot2) => (BinaryOp::Concat, 5, 4),
            LexemeKind::Punct(Punct::Plus) => (BinaryOp::Add, 6, 6),
            LexemeKind::Punct(Punct::Minus) => (BinaryOp::Sub, 6, 6),
            LexemeKind::Punct(Punct::Star) => (BinaryOp::Mul, 7, 7),
            LexemeKind::Punct(Punct::Slash) => (BinaryOp::Div, 7, 7),
            LexemeKind::Punct(Punct::Percent) => (BinaryOp::Mod, 7, 7),
            LexemeKind::Punct(Punct::Caret) => (BinaryOp::Pow, 10, 9),
            _ => return None,
        };
        Some(op)
    }

    fn parse_binary_expression(&mut self, limit: u8) -> NodeRef {
        if self.depth >= self.recursion_limit {
            let span = self.cur().span;
            let diag = syntax_error(span, "Exceeded allowed recursion depth");
            self.report(diag);
            self.advance();
            return self.error_node(span);
        }
        self.depth += 1;

        let begin = self.cur().span.begin;
        let unary_op = match self.cur().kind {
            LexemeKind::Keyword(Keyword::Not) => Some(UnaryOp::Not),
            LexemeKind::Punct(Punct::Minus) => Some(UnaryOp::Neg),
            LexemeKind::Punct(Punct::Hash) => Some(UnaryOp::Len),
            _ => None,
        };

        let mut lhs = if let Some(op) = unary_op {
            self.advance();
            // Unary binds tighter than every binary operator except pow.
            let operand = self.parse_binary_expression(8);
            let span = Span::new(begin, self.prev_end);
            self.arena.alloc(AstNode::Unary { op, operand, span })
        } else {
            self.parse_simple_expression()
        };

        while let Some((op, left, right)) = self.binary_op() {
            if left <= limit {
                break;
            }
            self.advance();
            let rhs = self.parse_binary_expression(right);
            let span = Span::new(begin, self.prev_end);
            lhs = self.arena.alloc(AstNode::Binary { op, lhs, rhs, span });
        }

        self.depth -= 1;
        lhs
    }

    fn parse_simple_expression(&mut self) -> NodeRef {
        let begin = self.cur().span.begin;
        match self.cur().kind.clone() {
            LexemeKind::Keyword(Keyword::Nil) => self.leaf(|span| AstNode::Nil { span }),
            LexemeKind::Keyword(Keyword::True) => self.leaf(|span| AstNode::True { span }),
            LexemeKind::Keyword(Keyword::False) => self.leaf(|span| AstNode::False { span }),
            LexemeKind::Number { value } => self.leaf(move |span| AstNode::Number { value, span }),
            LexemeKind::Str { value } => self.leaf(move |span| AstNode::Str { value, span }),
            LexemeKind::Punct(Punct::Dot3) => self.leaf(|span| AstNode::Vararg { span }),
            LexemeKind::Punct(Punct::LBrace) => self.parse_table(begin),
            LexemeKind::Keyword(Keyword::Function) => {
                self.advance();
                self.parse_function_body(begin, None, false)
            }
            LexemeKind::Attribute { .. } => {
                let native = self.parse_attributes();
                if self.accept_keyword(Keyword::Function) {
                    self.parse_function_body(begin, None, native)
                } else {
                    let diag = expected_token("'function' after attribute", self.cur());
                    self.report(diag);
                    self.error_node(self.cur().span)
                }
            }
            LexemeKind::Broken { message } => {
                let span = self.cur().span;
                self.report(syntax_error(span, message));
                self.advance();
                self.error_node(span)
            }
            _ => match self.parse_suffixed_expression() {
                Some(node) => node,
                None => self.error_node(self.cur().span),
            },
        }
    }

    fn leaf(&mut self, build: impl FnOnce(Span) -> AstNode) -> NodeRef {
        let span = self.cur().span;
        self.advance();
        self.arena.alloc(build(span))
    }

    fn parse_table(&mut self, begin: Position) -> NodeRef {
        self.advance();
        let mut items = Vec::new();
        if !self.check_punct(Punct::RBrace) {
            loop {
                items.push(self.parse_expression());
                if !(self.accept_punct(Punct::Comma) || self.accept_punct(Punct::Semicolon)) {
                    break;
                }
                if self.check_punct(Punct::RBrace) {
                    break;
                }
            }
        }
        self.expect_punct(Punct::RBrace, "to close table constructor");
        let span = Span::new(begin, self.prev_end);
        self.arena.alloc(AstNode::Table { items, span })
    }

    /// Parse a name or parenthesized expression followed by any chain of
    /// `.field`, `[key]`, and `(args)` suffixes. Returns None (with a
    /// diagnostic) when the current lexeme cannot begin such an expression.
    fn parse_suffixed_expression(&mut self) -> Option<NodeRef> {
        let begin = self.cur().span.begin;
        let mut node = match self.cur().kind.clone() {
            LexemeKind::Name { .. } => {
                let span = self.cur().span;
                let name = self.expect_name("identifier")?;
                self.arena.alloc(AstNode::Name { name, span })
            }
            LexemeKind::Punct(Punct::LParen) => {
                self.advance();
                let inner = self.parse_expression();
                self.expect_punct(Punct::RParen, "to close parenthesized expression");
                inner
            }
            _ => {
                let diag = expected_expression(self.cur());
                self.report(diag);
                return None;
            }
        };

        loop {
            match self.cur().kind.clone() {
                LexemeKind::Punct(Punct::Dot) => {
                    self.advance();
                    let key_span = self.cur().span;
                    let field = match self.expect_name("identifier after '.'") {
                        Some(id) => self.arena.name(id).to_string(),
                        None => return Some(node),
                    };
                    let key = self.arena.alloc(AstNode::Str {
                        value: field,
                        span: key_span,
                    });
                    let span = Span::new(begin, self.prev_end);
                    node = self.arena.alloc(AstNode::Index {
                        object: node,
                        key,
                        span,
                    });
                }
                LexemeKind::Punct(Punct::LBracket) => {
                    self.advance();
                    let key = self.parse_expression();
                    self.expect_punct(Punct::RBracket, "to close index expression");
                    let span = Span::new(begin, self.prev_end);
                    node = self.arena.alloc(AstNode::Index {
                        object: node,
                        key,
                        span,
                    });
                }
                LexemeKind::Punct(Punct::LParen) => {
                    self.advance();
                    let mut args = Vec::new();
                    if !self.check_punct(Punct::RParen) {
                        args = self.parse_expression_list();
                    }
                    self.expect_punct(Punct::RParen, "to close function call");
                    let span = Span::new(begin, self.prev_end);
                    node = self.arena.alloc(AstNode::Call {
                        function: node,
                        args,
                        span,
                    });
                }
                _ => return Some(node),
            }
        }
    }
}
