//! Abstract Syntax Tree node definitions
//!
//! Nodes form a single enum stored in the [`Arena`](crate::Arena) pool;
//! children are [`NodeRef`] indices into the same pool, never owned boxes.

use crate::arena::{NameId, NodeRef};
use core_types::Span;

/// Binary operators, in source notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `^`
    Pow,
    /// `..`
    Concat,
    /// `==`
    Eq,
    /// `~=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `and`
    And,
    /// `or`
    Or,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-`
    Neg,
    /// `not`
    Not,
    /// `#`
    Len,
}

/// AST node; statement and expression variants share one pool
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    // --- statements ---
    /// A statement sequence
    Block {
        /// Statements in source order
        statements: Vec<NodeRef>,
        /// Source location
        span: Span,
    },

    /// `local a, b = e1, e2`
    LocalDeclaration {
        /// Declared names
        names: Vec<NameId>,
        /// Initializer expressions, possibly fewer than names
        exprs: Vec<NodeRef>,
        /// Source location
        span: Span,
    },

    /// `a, t[k] = e1, e2`
    Assignment {
        /// Assignment targets (Name or Index nodes)
        targets: Vec<NodeRef>,
        /// Right-hand side expressions
        exprs: Vec<NodeRef>,
        /// Source location
        span: Span,
    },

    /// A call used as a statement
    CallStatement {
        /// The Call expression
        call: NodeRef,
        /// Source location
        span: Span,
    },

    /// `if c then ... elseif ... else ... end`
    If {
        /// Condition expression
        condition: NodeRef,
        /// Then block
        then_body: NodeRef,
        /// Else block or nested If for `elseif`
        else_body: Option<NodeRef>,
        /// Source location
        span: Span,
    },

    /// `while c do ... end`
    While {
        /// Condition expression
        condition: NodeRef,
        /// Loop body block
        body: NodeRef,
        /// Source location
        span: Span,
    },

    /// `repeat ... until c`
    Repeat {
        /// Loop body block
        body: NodeRef,
        /// Condition expression
        condition: NodeRef,
        /// Source location
        span: Span,
    },

    /// `for v = from, to[, step] do ... end`
    NumericFor {
        /// Loop variable
        variable: NameId,
        /// Start expression
        from: NodeRef,
        /// Limit expression
        to: NodeRef,
        /// Optional step expression
        step: Option<NodeRef>,
        /// Loop body block
        body: NodeRef,
        /// Source location
        span: Span,
    },

    /// `return e1, e2`
    Return {
        /// Returned expressions
        exprs: Vec<NodeRef>,
        /// Source location
        span: Span,
    },

    /// `break`
    Break {
        /// Source location
        span: Span,
    },

    /// `function name() ... end` or `local function name() ... end`
    FunctionDeclaration {
        /// Declared name
        name: NameId,
        /// The FunctionLiteral node
        function: NodeRef,
        /// True for `local function`
        local: bool,
        /// Source location
        span: Span,
    },

    // --- expressions ---
    /// `nil`
    Nil {
        /// Source location
        span: Span,
    },
    /// `true`
    True {
        /// Source location
        span: Span,
    },
    /// `false`
    False {
        /// Source location
        span: Span,
    },
    /// Number literal
    Number {
        /// Parsed value
        value: f64,
        /// Source location
        span: Span,
    },
    /// String literal
    Str {
        /// Unescaped contents
        value: String,
        /// Source location
        span: Span,
    },
    /// `...`
    Vararg {
        /// Source location
        span: Span,
    },
    /// Variable reference
    Name {
        /// Referenced name
        name: NameId,
        /// Source location
        span: Span,
    },
    /// `object[key]` or `object.field` (field as a Str key)
    Index {
        /// Indexed expression
        object: NodeRef,
        /// Key expression
        key: NodeRef,
        /// Source location
        span: Span,
    },
    /// `f(a, b)`
    Call {
        /// Callee expression
        function: NodeRef,
        /// Argument expressions
        args: Vec<NodeRef>,
        /// Source location
        span: Span,
    },
    /// Binary operation
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        lhs: NodeRef,
        /// Right operand
        rhs: NodeRef,
        /// Source location
        span: Span,
    },
    /// Unary operation
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: NodeRef,
        /// Source location
        span: Span,
    },
    /// `{ e1, e2 }` table constructor, array part only
    Table {
        /// Array-part item expressions
        items: Vec<NodeRef>,
        /// Source location
        span: Span,
    },
    /// `function(p1, p2) ... end`, possibly carrying a `@native` attribute
    FunctionLiteral {
        /// Name when the literal came from a function declaration
        name: Option<NameId>,
        /// Parameter names
        params: Vec<NameId>,
        /// True when the parameter list ends with `...`
        is_vararg: bool,
        /// Body block
        body: NodeRef,
        /// True when marked `@native`
        native: bool,
        /// Source location
        span: Span,
    },
    /// Placeholder produced by error recovery
    Error {
        /// Source location
        span: Span,
    },
}

impl AstNode {
    /// Source location of the node
    pub fn span(&self) -> Span {
        match self {
            AstNode::Block { span, .. }
            | AstNode::LocalDeclaration { span, .. }
            | AstNode::Assignment { span, .. }
            | AstNode::CallStatement { span, .. }
            | AstNode::If { span, .. }
            | AstNode::While { span, .. }
            | AstNode::Repeat { span, .. }
            | AstNode::NumericFor { span, .. }
            | AstNode::Return { span, .. }
            | AstNode::Break { span }
            | AstNode::FunctionDeclaration { span, .. }
            | AstNode::Nil { span }
            | AstNode::True { span }
            | AstNode::False { span }
            | AstNode::Number { span, .. }
            | AstNode::Str { span, .. }
            | AstNode::Vararg { span }
            | AstNode::Name { span, .. }
            | AstNode::Index { span, .. }
            | AstNode::Call { span, .. }
            | AstNode::Binary { span, .. }
            | AstNode::Unary { span, .. }
            | AstNode::Table { span, .. }
            | AstNode::FunctionLiteral { span, .. }
            | AstNode::Error { span } => *span,
        }
    }

    /// Append every child reference to `out`, in source order
    pub fn children_into(&self, out: &mut Vec<NodeRef>) {
        match self {
            AstNode::Block { statements, .. } => out.extend(statements.iter().copied()),
            AstNode::LocalDeclaration { exprs, .. } => out.extend(exprs.iter().copied()),
            AstNode::Assignment { targets, exprs, .. } => {
                out.extend(targets.iter().copied());
                out.extend(exprs.iter().copied());
            }
            AstNode::CallStatement { call, .. } => out.push(*call),
            AstNode::If {
                condition,
                then_body,
                else_body,
                ..
            } => {
                out.push(*condition);
                out.push(*then_body);
                if let Some(else_body) = else_body {
                    out.push(*else_body);
                }
            }
            AstNode::While {
                condition, body, ..
            } => {
                out.push(*condition);
                out.push(*body);
            }
            AstNode::Repeat {
                body, condition, ..
            } => {
                out.push(*body);
                out.push(*condition);
            }
            AstNode::NumericFor {
                from,
                to,
                step,
                body,
                ..
            } => {
                out.push(*from);
                out.push(*to);
                if let Some(step) = step {
                    out.push(*step);
                }
                out.push(*body);
            }
            AstNode::Return { exprs, .. } => out.extend(exprs.iter().copied()),
            AstNode::FunctionDeclaration { function, .. } => out.push(*function),
            AstNode::Index { object, key, .. } => {
                out.push(*object);
                out.push(*key);
            }
            AstNode::Call { function, args, .. } => {
                out.push(*function);
                out.extend(args.iter().copied());
            }
            AstNode::Binary { lhs, rhs, .. } => {
                out.push(*lhs);
                out.push(*rhs);
            }
            AstNode::Unary { operand, .. } => out.push(*operand),
            AstNode::Table { items, .. } => out.extend(items.iter().copied()),
            AstNode::FunctionLiteral { body, .. } => out.push(*body),
            AstNode::Break { .. }
            | AstNode::Nil { .. }
            | AstNode::True { .. }
            | AstNode::False { .. }
            | AstNode::Number { .. }
            | AstNode::Str { .. }
            | AstNode::Vararg { .. }
            | AstNode::Name { .. }
            | AstNode::Error { .. } => {}
        }
    }
}
