//! Depth-first traversal with cooperative visitor control.
//!
//! `enter` runs pre-order and decides how the walk continues; `leave` runs
//! post-order. The walk owns a [`WalkContext`] holding the ancestor stack, so
//! visitors never need shared state to know where they are.

use crate::ast::Node;
use crate::id::NodeId;

/// What the walker does after `enter` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitControl {
    #[default]
    Continue,
    /// Do not descend into this node. `leave` still runs.
    SkipChildren,
    /// Abandon this node and its remaining siblings; the walk resumes after
    /// the parent, whose `leave` still runs.
    BreakSiblings,
    /// Abort the whole walk. No further callbacks run.
    StopAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    Completed,
    Stopped,
}

impl WalkOutcome {
    pub fn is_stopped(self) -> bool {
        self == WalkOutcome::Stopped
    }
}

#[allow(unused_variables)]
pub trait Visitor<'a> {
    fn enter(&mut self, node: &'a Node, ctx: &WalkContext<'a>) -> VisitControl {
        VisitControl::Continue
    }

    fn leave(&mut self, node: &'a Node, ctx: &WalkContext<'a>) {}
}

/// Per-walk state: the ancestors of the node being visited.
#[derive(Debug, Default)]
pub struct WalkContext<'a> {
    ancestors: Vec<&'a Node>,
    skip: Option<NodeId>,
}

impl<'a> WalkContext<'a> {
    fn new(skip: Option<NodeId>) -> Self {
        Self {
            ancestors: Vec::new(),
            skip,
        }
    }

    /// Immediate parent of the node being visited; `None` for walk roots.
    pub fn parent(&self) -> Option<&'a Node> {
        self.ancestors.last().copied()
    }

    /// Ancestors, outermost first.
    pub fn ancestors(&self) -> &[&'a Node] {
        &self.ancestors
    }

    /// Ancestor `level` steps up: `0` is the parent, `1` the grandparent.
    pub fn ancestor(&self, level: usize) -> Option<&'a Node> {
        self.ancestors.iter().rev().nth(level).copied()
    }

    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Innermost FunctionDeclaration/FunctionExpression above the current node.
    pub fn enclosing_function(&self) -> Option<&'a Node> {
        self.ancestors.iter().rev().copied().find(|n| n.is_function())
    }
}

enum Flow {
    Continue,
    Break,
    Stop,
}

struct Walker<'a, 'v, V: Visitor<'a>> {
    ctx: WalkContext<'a>,
    visitor: &'v mut V,
}

impl<'a, 'v, V: Visitor<'a>> Walker<'a, 'v, V> {
    fn visit(&mut self, node: &'a Node) -> Flow {
        if self.ctx.skip == Some(node.id) {
            return Flow::Continue;
        }
        match self.visitor.enter(node, &self.ctx) {
            VisitControl::Continue => {}
            VisitControl::SkipChildren => {
                self.visitor.leave(node, &self.ctx);
                return Flow::Continue;
            }
            VisitControl::BreakSiblings => return Flow::Break,
            VisitControl::StopAll => return Flow::Stop,
        }

        self.ctx.ancestors.push(node);
        for child in node.children() {
            match self.visit(child) {
                Flow::Continue => {}
                Flow::Break => break,
                Flow::Stop => return Flow::Stop,
            }
        }
        self.ctx.ancestors.pop();

        self.visitor.leave(node, &self.ctx);
        Flow::Continue
    }

    fn visit_all(&mut self, nodes: &'a [Node]) -> WalkOutcome {
        for node in nodes {
            match self.visit(node) {
                Flow::Continue => {}
                Flow::Break => break,
                Flow::Stop => return WalkOutcome::Stopped,
            }
        }
        WalkOutcome::Completed
    }
}

/// Walk `root` and everything reachable from it.
pub fn walk<'a, V: Visitor<'a>>(root: &'a Node, visitor: &mut V) -> WalkOutcome {
    walk_nodes(std::slice::from_ref(root), None, visitor)
}

/// Walk a sequence of sibling roots, such as a scope body.
///
/// The node `skip` (and its subtree) is passed over without any callback.
pub fn walk_nodes<'a, V: Visitor<'a>>(
    nodes: &'a [Node],
    skip: Option<NodeId>,
    visitor: &mut V,
) -> WalkOutcome {
    let mut walker = Walker {
        ctx: WalkContext::new(skip),
        visitor,
    };
    walker.visit_all(nodes)
}

/// Closure adapter for walks that only need `enter`.
pub struct EnterFn<F>(pub F);

impl<'a, F> Visitor<'a> for EnterFn<F>
where
    F: FnMut(&'a Node, &WalkContext<'a>) -> VisitControl,
{
    fn enter(&mut self, node: &'a Node, ctx: &WalkContext<'a>) -> VisitControl {
        (self.0)(node, ctx)
    }
}
