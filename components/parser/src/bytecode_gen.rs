//! Bytecode generation from the parsed tree

use crate::arena::{Arena, NameId, NodeRef};
use crate::ast::{AstNode, BinaryOp, UnaryOp};
use crate::interner::NameInterner;
use crate::parser::ParseResult;
use bytecode_system::{Chunk, Constant, Module, Opcode};
use core_types::{flags, CompileError, Span};

/// Maximum local slots per function, including loop temporaries.
const MAX_LOCALS: usize = 200;

/// Knobs controlling bytecode generation.
///
/// The field order and types are part of the boundary layout contract; see
/// the C API's compile-options struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// 0 disables optimizations; 1+ enables constant folding (further gated
    /// by the `LumenCompileFoldConstants` flag)
    pub optimization_level: i32,
    /// 0 strips source positions from emitted instructions; 1+ keeps them
    pub debug_level: i32,
    /// Reserved; coverage instrumentation is not implemented
    pub coverage_level: i32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            optimization_level: 1,
            debug_level: 1,
            coverage_level: 0,
        }
    }
}

/// Compile a parse result into a bytecode module.
///
/// The caller is expected to have checked `result.diagnostics` first; a tree
/// containing error placeholder nodes cannot be compiled. The interner must
/// be the one used for parsing; passing an interner bound to a different
/// arena is a contract violation caught by an internal assertion.
pub fn compile(
    arena: &Arena,
    interner: &NameInterner,
    result: &ParseResult,
    options: &CompileOptions,
) -> Result<Module, CompileError> {
    core_types::runtime_assert!(result.arena_generation == arena.generation());
    core_types::runtime_assert!(interner.arena_generation() == arena.generation());

    let mut generator = BytecodeGenerator::new(arena, options);
    generator.generate(result)
}

/// Bytecode generator converting one parse result into a [`Module`]
pub struct BytecodeGenerator<'a> {
    arena: &'a Arena,
    module: Module,
    fold_constants: bool,
    debug_positions: bool,
}

struct FunctionState {
    chunk: Chunk,
    /// Active locals, innermost last; `None` names are loop temporaries
    locals: Vec<(Option<NameId>, u8)>,
    scope_starts: Vec<usize>,
    /// Break patch lists, one per enclosing loop
    loop_exits: Vec<Vec<usize>>,
    is_vararg: bool,
}

impl FunctionState {
    fn new(is_vararg: bool) -> Self {
        Self {
            chunk: Chunk::new(),
            locals: Vec::new(),
            scope_starts: Vec::new(),
            loop_exits: Vec::new(),
            is_vararg,
        }
    }

    fn begin_scope(&mut self) {
        self.scope_starts.push(self.locals.len());
    }

    fn end_scope(&mut self) {
        let start = self.scope_starts.pop().unwrap_or(0);
        self.locals.truncate(start);
    }

    fn declare_local(&mut self, name: Option<NameId>, span: Span) -> Result<u8, CompileError> {
        let slot = self.locals.len();
        if slot >= MAX_LOCALS {
            return Err(CompileError::new(span, "Out of local registers"));
        }
        self.locals.push((name, slot as u8));
        let needed = (slot + 1) as u8;
        if self.chunk.register_count < needed {
            self.chunk.register_count = needed;
        }
        Ok(slot as u8)
    }

    fn resolve(&self, name: NameId) -> Option<u8> {
        self.locals
            .iter()
            .rev()
            .find(|(local, _)| *local == Some(name))
            .map(|&(_, slot)| slot)
    }
}

impl<'a> BytecodeGenerator<'a> {
    /// Create a generator reading nodes from `arena`
    pub fn new(arena: &'a Arena, options: &CompileOptions) -> Self {
        let fold_flag = flags::registry()
            .get_bool(flags::FLAG_COMPILE_FOLD_CONSTANTS)
            .unwrap_or(true);
        if options.coverage_level > 0 {
            log::debug!("coverage_level > 0 requested; coverage instrumentation is not implemented");
        }
        Self {
            arena,
            module: Module::new(),
            fold_constants: options.optimization_level >= 1 && fold_flag,
            debug_positions: options.debug_level >= 1,
        }
    }

    /// Generate the whole module; the main chunk is compiled last so nested
    /// function chunks always precede it.
    pub fn generate(&mut self, result: &ParseResult) -> Result<Module, CompileError> {
        let main = self.compile_function(&[], true, result.root, None, 0, false)?;
        self.module.main = main;
        log::debug!(
            "compiled module: {} chunks, {} strings",
            self.module.chunks.len(),
            self.module.strings.len()
        );
        Ok(std::mem::take(&mut self.module))
    }

    fn compile_function(
        &mut self,
        params: &[NameId],
        is_vararg: bool,
        body: NodeRef,
        name: Option<NameId>,
        line_defined: u32,
        native: bool,
    ) -> Result<u32, CompileError> {
        let mut state = FunctionState::new(is_vararg);
        let body_span = self.arena.get(body).span();

        for &param in params {
            state.declare_local(Some(param), body_span)?;
        }

        self.statement(&mut state, body)?;

        let needs_return = !matches!(
            state.chunk.instructions.last().map(|i| i.opcode),
            Some(Opcode::Return(_))
        );
        if needs_return {
            state.chunk.emit(Opcode::Return(0));
        }

        state.chunk.num_params = params.len() as u8;
        state.chunk.is_vararg = is_vararg;
        state.chunk.line_defined = line_defined;
        state.chunk.native = native;
        state.chunk.name = name.map(|id| self.module.add_string(self.arena.name(id)));

        Ok(self.module.add_chunk(state.chunk))
    }

    fn emit(&mut self, state: &mut FunctionState, opcode: Opcode, span: Span) {
        if self.debug_positions {
            state.chunk.emit_with_position(opcode, span.begin);
        } else {
            state.chunk.emit(opcode);
        }
    }

    // --- statements ---

    fn statement(&mut self, state: &mut FunctionState, node: NodeRef) -> Result<(), CompileError> {
        let ast = self.arena.get(node).clone();
        let span = ast.span();
        match ast {
            AstNode::Block { statements, .. } => {
                state.begin_scope();
                for statement in statements {
                    self.statement(state, statement)?;
                }
                state.end_scope();
            }

            AstNode::LocalDeclaration { names, exprs, .. } => {
                self.push_adjusted(state, &exprs, names.len(), span)?;
                let mut slots = Vec::with_capacity(names.len());
                for &name in &names {
                    slots.push(state.declare_local(Some(name), span)?);
                }
                for &slot in slots.iter().rev() {
                    self.emit(state, Opcode::StoreLocal(slot), span);
                }
            }

            AstNode::Assignment { targets, exprs, .. } => {
                self.compile_assignment(state, &targets, &exprs, span)?;
            }

            AstNode::CallStatement { call, .. } => {
                self.compile_call(state, call, 0)?;
            }

            AstNode::If {
                condition,
                then_body,
                else_body,
                ..
            } => {
                self.expression(state, condition)?;
                let else_jump = state.chunk.emit(Opcode::JumpIfFalse(0));
                self.statement(state, then_body)?;
                match else_body {
                    Some(else_body) => {
                        let end_jump = state.chunk.emit(Opcode::Jump(0));
                        let else_target = state.chunk.instruction_count() as u32;
                        state.chunk.patch_jump(else_jump, else_target);
                        self.statement(state, else_body)?;
                        let end_target = state.chunk.instruction_count() as u32;
                        state.chunk.patch_jump(end_jump, end_target);
                    }
                    None => {
                        let end_target = state.chunk.instruction_count() as u32;
                        state.chunk.patch_jump(else_jump, end_target);
                    }
                }
            }

            AstNode::While {
                condition, body, ..
            } => {
                let loop_start = state.chunk.instruction_count() as u32;
                self.expression(state, condition)?;
                let exit_jump = state.chunk.emit(Opcode::JumpIfFalse(0));
                state.loop_exits.push(Vec::new());
                self.statement(state, body)?;
                self.emit(state, Opcode::Jump(loop_start), span);
                self.close_loop(state, &[exit_jump]);
            }

            AstNode::Repeat {
                body, condition, ..
            } => {
                let loop_start = state.chunk.instruction_count() as u32;
                state.loop_exits.push(Vec::new());
                self.statement(state, body)?;
                self.expression(state, condition)?;
                self.emit(state, Opcode::JumpIfFalse(loop_start), span);
                self.close_loop(state, &[]);
            }

            AstNode::NumericFor {
                variable,
                from,
                to,
                step,
                body,
                ..
            } => {
                state.begin_scope();
                self.expression(state, from)?;
                let var_slot = state.declare_local(Some(variable), span)?;
                self.emit(state, Opcode::StoreLocal(var_slot), span);

                self.expression(state, to)?;
                let limit_slot = state.declare_local(None, span)?;
                self.emit(state, Opcode::StoreLocal(limit_slot), span);

                match step {
                    Some(step) => self.expression(state, step)?,
                    None => {
                        let one = state.chunk.add_constant(Constant::Number(1.0));
                        self.emit(state, Opcode::LoadConstant(one), span);
                    }
                }
                let step_slot = state.declare_local(None, span)?;
                self.emit(state, Opcode::StoreLocal(step_slot), span);

                let loop_start = state.chunk.instruction_count() as u32;
                self.emit(state, Opcode::LoadLocal(var_slot), span);
                self.emit(state, Opcode::LoadLocal(limit_slot), span);
                self.emit(state, Opcode::LtEq, span);
                let exit_jump = state.chunk.emit(Opcode::JumpIfFalse(0));

                state.loop_exits.push(Vec::new());
                self.statement(state, body)?;

                self.emit(state, Opcode::LoadLocal(var_slot), span);
                self.emit(state, Opcode::LoadLocal(step_slot), span);
                self.emit(state, Opcode::Add, span);
                self.emit(state, Opcode::StoreLocal(var_slot), span);
                self.emit(state, Opcode::Jump(loop_start), span);

                self.close_loop(state, &[exit_jump]);
                state.end_scope();
            }

            AstNode::Return { exprs, .. } => {
                if exprs.len() > u8::MAX as usize {
                    return Err(CompileError::new(span, "Too many return values"));
                }
                for &expr in &exprs {
                    self.expression(state, expr)?;
                }
                self.emit(state, Opcode::Return(exprs.len() as u8), span);
            }

            AstNode::Break { .. } => {
                let jump = state.chunk.emit(Opcode::Jump(0));
                match state.loop_exits.last_mut() {
                    Some(exits) => exits.push(jump),
                    None => {
                        return Err(CompileError::new(
                            span,
                            "break statement must be inside a loop",
                        ))
                    }
                }
            }

            AstNode::FunctionDeclaration {
                name,
                function,
                local,
                ..
            } => {
                let chunk_index = self.compile_literal(function)?;
                self.emit(state, Opcode::NewClosure(chunk_index), span);
                if local {
                    let slot = state.declare_local(Some(name), span)?;
                    self.emit(state, Opcode::StoreLocal(slot), span);
                } else {
                    let global = self.module.add_string(self.arena.name(name));
                    self.emit(state, Opcode::StoreGlobal(global), span);
                }
            }

            AstNode::Error { .. } => {
                return Err(CompileError::new(
                    span,
                    "Cannot compile a tree containing syntax errors",
                ));
            }

            _ => {
                // Expression node in statement position: evaluate and drop.
                self.expression(state, node)?;
                self.emit(state, Opcode::Pop(1), span);
            }
        }
        Ok(())
    }

    fn close_loop(&mut self, state: &mut FunctionState, exit_jumps: &[usize]) {
        let target = state.chunk.instruction_count() as u32;
        for &jump in exit_jumps {
            state.chunk.patch_jump(jump, target);
        }
        if let Some(breaks) = state.loop_exits.pop() {
            for jump in breaks {
                state.chunk.patch_jump(jump, target);
            }
        }
    }

    /// Push exactly `wanted` values from `exprs`, padding with nil or
    /// popping extras.
    fn push_adjusted(
        &mut self,
        state: &mut FunctionState,
        exprs: &[NodeRef],
        wanted: usize,
        span: Span,
    ) -> Result<(), CompileError> {
        for &expr in exprs {
            self.expression(state, expr)?;
        }
        if exprs.len() < wanted {
            for _ in exprs.len()..wanted {
                self.emit(state, Opcode::LoadNil, span);
            }
        } else if exprs.len() > wanted {
            let extra = exprs.len() - wanted;
            if extra > u8::MAX as usize {
                return Err(CompileError::new(span, "Too many expressions in list"));
            }
            self.emit(state, Opcode::Pop(extra as u8), span);
        }
        Ok(())
    }

    fn compile_assignment(
        &mut self,
        state: &mut FunctionState,
        targets: &[NodeRef],
        exprs: &[NodeRef],
        span: Span,
    ) -> Result<(), CompileError> {
        if targets.len() == 1 {
            if let AstNode::Index { object, key, .. } = self.arena.get(targets[0]).clone() {
                self.expression(state, object)?;
                self.expression(state, key)?;
                self.push_adjusted(state, exprs, 1, span)?;
                self.emit(state, Opcode::StoreIndex, span);
                return Ok(());
            }
        }

        // Multiple assignment supports plain variable targets only; an
        // index target would interleave its table and key operands with
        // the value list on the stack.
        for &target in targets {
            if !matches!(self.arena.get(target), AstNode::Name { .. }) {
                return Err(CompileError::new(
                    self.arena.get(target).span(),
                    "Multiple assignment only supports variable targets",
                ));
            }
        }

        self.push_adjusted(state, exprs, targets.len(), span)?;
        for &target in targets.iter().rev() {
            if let AstNode::Name { name, .. } = *self.arena.get(target) {
                match state.resolve(name) {
                    Some(slot) => self.emit(state, Opcode::StoreLocal(slot), span),
                    None => {
                        let global = self.module.add_string(self.arena.name(name));
                        self.emit(state, Opcode::StoreGlobal(global), span);
                    }
                }
            }
        }
        Ok(())
    }

    // --- expressions ---

    fn expression(&mut self, state: &mut FunctionState, node: NodeRef) -> Result<(), CompileError> {
        let ast = self.arena.get(node).clone();
        let span = ast.span();
        match ast {
            AstNode::Nil { .. } => self.emit(state, Opcode::LoadNil, span),
            AstNode::True { .. } => self.emit(state, Opcode::LoadTrue, span),
            AstNode::False { .. } => self.emit(state, Opcode::LoadFalse, span),

            AstNode::Number { value, .. } => {
                let constant = state.chunk.add_constant(Constant::Number(value));
                self.emit(state, Opcode::LoadConstant(constant), span);
            }

            AstNode::Str { ref value, .. } => {
                let string = self.module.add_string(value);
                let constant = state.chunk.add_constant(Constant::Str(string));
                self.emit(state, Opcode::LoadConstant(constant), span);
            }

            AstNode::Vararg { .. } => {
                if !state.is_vararg {
                    return Err(CompileError::new(
                        span,
                        "Cannot use '...' outside a vararg function",
                    ));
                }
                self.emit(state, Opcode::Vararg(1), span);
            }

            AstNode::Name { name, .. } => match state.resolve(name) {
                Some(slot) => self.emit(state, Opcode::LoadLocal(slot), span),
                None => {
                    let global = self.module.add_string(self.arena.name(name));
                    self.emit(state, Opcode::LoadGlobal(global), span);
                }
            },

            AstNode::Index { object, key, .. } => {
                self.expression(state, object)?;
                self.expression(state, key)?;
                self.emit(state, Opcode::Index, span);
            }

            AstNode::Call { .. } => {
                self.compile_call(state, node, 1)?;
            }

            AstNode::Binary { op, lhs, rhs, .. } => {
                self.compile_binary(state, op, lhs, rhs, span)?;
            }

            AstNode::Unary { op, operand, .. } => {
                if self.fold_constants {
                    if let (UnaryOp::Neg, Some(value)) = (op, self.fold_number(operand)) {
                        let constant = state.chunk.add_constant(Constant::Number(-value));
                        self.emit(state, Opcode::LoadConstant(constant), span);
                        return Ok(());
                    }
                }
                self.expression(state, operand)?;
                let opcode = match op {
                    UnaryOp::Neg => Opcode::Neg,
                    UnaryOp::Not => Opcode::Not,
                    UnaryOp::Len => Opcode::Len,
                };
                self.emit(state, opcode, span);
            }

            AstNode::Table { ref items, .. } => {
                if items.len() > u16::MAX as usize {
                    return Err(CompileError::new(span, "Table constructor is too large"));
                }
                for &item in items {
                    self.expression(state, item)?;
                }
                self.emit(state, Opcode::NewTable(items.len() as u16), span);
            }

            AstNode::FunctionLiteral { .. } => {
                let chunk_index = self.compile_literal(node)?;
                self.emit(state, Opcode::NewClosure(chunk_index), span);
            }

            AstNode::Error { .. } => {
                return Err(CompileError::new(
                    span,
                    "Cannot compile a tree containing syntax errors",
                ));
            }

            _ => {
                return Err(CompileError::new(span, "Expected expression node"));
            }
        }
        Ok(())
    }

    fn compile_literal(&mut self, node: NodeRef) -> Result<u32, CompileError> {
        match self.arena.get(node).clone() {
            AstNode::FunctionLiteral {
                name,
                params,
                is_vararg,
                body,
                native,
                span,
            } => {
                if params.len() > u8::MAX as usize {
                    return Err(CompileError::new(span, "Too many parameters"));
                }
                self.compile_function(&params, is_vararg, body, name, span.begin.line, native)
            }
            other => Err(CompileError::new(other.span(), "Expected function literal")),
        }
    }

    fn compile_call(
        &mut self,
        state: &mut FunctionState,
        node: NodeRef,
        results: u8,
    ) -> Result<(), CompileError> {
        match self.arena.get(node).clone() {
            AstNode::Call {
                function,
                ref args,
                span,
            } => {
                if args.len() > u8::MAX as usize {
                    return Err(CompileError::new(span, "Too many arguments"));
                }
                self.expression(state, function)?;
                for &arg in args {
                    self.expression(state, arg)?;
                }
                self.emit(
                    state,
                    Opcode::Call {
                        args: args.len() as u8,
                        results,
                    },
                    span,
                );
                Ok(())
            }
            other => Err(CompileError::new(other.span(), "Expected call expression")),
        }
    }

    fn compile_binary(
        &mut self,
        state: &mut FunctionState,
        op: BinaryOp,
        lhs: NodeRef,
        rhs: NodeRef,
        span: Span,
    ) -> Result<(), CompileError> {
        // and/or evaluate the right side only when needed.
        if matches!(op, BinaryOp::And | BinaryOp::Or) {
            self.expression(state, lhs)?;
            self.emit(state, Opcode::Dup, span);
            let short = state.chunk.emit(match op {
                BinaryOp::And => Opcode::JumpIfFalse(0),
                _ => Opcode::JumpIfTrue(0),
            });
            self.emit(state, Opcode::Pop(1), span);
            self.expression(state, rhs)?;
            let target = state.chunk.instruction_count() as u32;
            state.chunk.patch_jump(short, target);
            return Ok(());
        }

        if self.fold_constants {
            if let (Some(a), Some(b)) = (self.fold_number(lhs), self.fold_number(rhs)) {
                if let Some(folded) = fold_numeric(op, a, b) {
                    let constant = state.chunk.add_constant(folded);
                    self.emit(state, Opcode::LoadConstant(constant), span);
                    return Ok(());
                }
            }
        }

        self.expression(state, lhs)?;
        self.expression(state, rhs)?;
        let opcode = match op {
            BinaryOp::Add => Opcode::Add,
            BinaryOp::Sub => Opcode::Sub,
            BinaryOp::Mul => Opcode::Mul,
            BinaryOp::Div => Opcode::Div,
            BinaryOp::Mod => Opcode::Mod,
            BinaryOp::Pow => Opcode::Pow,
            BinaryOp::Concat => Opcode::Concat,
            BinaryOp::Eq => Opcode::Eq,
            BinaryOp::NotEq => Opcode::NotEq,
            BinaryOp::Lt => Opcode::Lt,
            BinaryOp::LtEq => Opcode::LtEq,
            BinaryOp::Gt => Opcode::Gt,
            BinaryOp::GtEq => Opcode::GtEq,
            BinaryOp::And | BinaryOp::Or => unreachable!("handled above"),
        };
        self.emit(state, opcode, span);
        Ok(())
    }

    /// Evaluate a purely literal numeric subtree bottom-up. Any non-literal
    /// leaf or non-finite intermediate stops the fold.
    fn fold_number(&self, node: NodeRef) -> Option<f64> {
        let value = match self.arena.get(node) {
            AstNode::Number { value, .. } => *value,
            AstNode::Unary {
                op: UnaryOp::Neg,
                operand,
                ..
            } => -self.fold_number(*operand)?,
            AstNode::Binary { op, lhs, rhs, .. } => {
                let a = self.fold_number(*lhs)?;
                let b = self.fold_number(*rhs)?;
                match fold_numeric(*op, a, b)? {
                    Constant::Number(v) => v,
                    _ => return None,
                }
            }
            _ => return None,
        };
        value.is_finite().then_some(value)
    }
}

/// Fold an arithmetic or comparison over two number literals. Division by
/// zero and friends are left to runtime semantics and not folded.
fn fold_numeric(op: BinaryOp, a: f64, b: f64) -> Option<Constant> {
    let number = |value: f64| {
        if value.is_finite() {
            Some(Constant::Number(value))
        } else {
            None
        }
    };
    match op {
        BinaryOp::Add => number(a + b),
        BinaryOp::Sub => number(a - b),
        BinaryOp::Mul => number(a * b),
        BinaryOp::Div => number(a / b),
        BinaryOp::Mod => number(a - (a / b).floor() * b),
        BinaryOp::Pow => number(a.powf(b)),
        BinaryOp::Eq => Some(Constant::Bool(a == b)),
        BinaryOp::NotEq => Some(Constant::Bool(a != b)),
        BinaryOp::Lt => Some(Constant::Bool(a < b)),
        BinaryOp::LtEq => Some(Constant::Bool(a <= b)),
        BinaryOp::Gt => Some(Constant::Bool(a > b)),
        BinaryOp::GtEq => Some(Constant::Bool(a >= b)),
        BinaryOp::Concat | BinaryOp::And | BinaryOp::Or => None,
    }
}
