//! Read-only queries over a parsed tree.

use crate::arena::{Arena, NodeRef};
use crate::ast::AstNode;
use crate::parser::ParseResult;

enum Work {
    Visit(NodeRef),
    Record(NodeRef),
}

/// Collect every function literal in the tree, depth first, with inner
/// functions recorded before the functions that enclose them. A compiler
/// backend walking the result can assume every nested function it depends
/// on appears earlier in the list.
///
/// Uses an explicit work stack, so arbitrarily deep trees cannot overflow
/// the call stack.
pub fn collect_functions(arena: &Arena, result: &ParseResult) -> Vec<NodeRef> {
    core_types::runtime_assert!(result.arena_generation == arena.generation());

    let mut functions = Vec::new();
    let mut stack = vec![Work::Visit(result.root)];
    let mut children = Vec::new();

    while let Some(work) = stack.pop() {
        match work {
            Work::Record(node) => functions.push(node),
            Work::Visit(node) => {
                let ast = arena.get(node);
                if matches!(ast, AstNode::FunctionLiteral { .. }) {
                    // Record after the body has been fully visited.
                    stack.push(Work::Record(node));
                }
                children.clear();
                ast.children_into(&mut children);
                // Reversed so the first child is visited first.
                for &child in children.iter().rev() {
                    stack.push(Work::Visit(child));
                }
            }
        }
    }
    functions
}

/// True when any function literal in the tree carries the `@native`
/// attribute.
pub fn has_native_function(arena: &Arena, result: &ParseResult) -> bool {
    collect_functions(arena, result)
        .into_iter()
        .any(|node| matches!(arena.get(node), AstNode::FunctionLiteral { native: true, .. }))
}
