use tmpl_core::{walk, Node, NodeId, VisitControl, Visitor, WalkContext};

/// The statements searched when resolving references: the body of the
/// nearest enclosing function, or the Program body at top level.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    /// The enclosing function; `None` for the Program scope.
    pub owner: Option<&'a Node>,
    pub body: &'a [Node],
}

struct ScopeFinder<'a> {
    target: NodeId,
    root: &'a Node,
    functions: Vec<&'a Node>,
    found: Option<Scope<'a>>,
}

impl<'a> Visitor<'a> for ScopeFinder<'a> {
    fn enter(&mut self, node: &'a Node, _ctx: &WalkContext<'a>) -> VisitControl {
        if node.id == self.target {
            self.found = Some(match self.functions.last().copied() {
                Some(owner) => Scope {
                    owner: Some(owner),
                    body: owner.function_body().unwrap_or_default(),
                },
                None => Scope {
                    owner: None,
                    body: self.root.statements().unwrap_or_default(),
                },
            });
            return VisitControl::StopAll;
        }
        if node.is_function() {
            self.functions.push(node);
        }
        VisitControl::Continue
    }

    fn leave(&mut self, node: &'a Node, _ctx: &WalkContext<'a>) {
        if node.is_function() {
            self.functions.pop();
        }
    }
}

/// Lexical scope of `target` within `root`. `None` means `target` is not in
/// the tree.
pub fn find_scope(root: &Node, target: NodeId) -> Option<Scope<'_>> {
    let mut finder = ScopeFinder {
        target,
        root,
        functions: Vec::new(),
        found: None,
    };
    walk(root, &mut finder);
    finder.found
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmpl_core::ast::AstBuilder;

    #[test]
    fn nearest_function_body_wins() {
        let b = AstBuilder::new();
        let target = b.ident("x");
        let target_id = target.id;
        let inner = b.func_expr(&[], vec![b.expr_stmt(target)]);
        let program = b.program(vec![b.func_decl(
            "render",
            &["locals"],
            vec![b.var("cb", Some(inner)), b.ret(None)],
        )]);

        let scope = find_scope(&program, target_id).unwrap();
        assert_eq!(scope.body.len(), 1);
        assert!(matches!(
            scope.owner.map(Node::kind_name),
            Some("FunctionExpression")
        ));
    }

    #[test]
    fn a_function_belongs_to_the_scope_around_it() {
        let b = AstBuilder::new();
        let func = b.func_decl("inner", &[], vec![b.ret(None)]);
        let func_id = func.id;
        let program = b.program(vec![b.func_decl("outer", &[], vec![func])]);

        let scope = find_scope(&program, func_id).unwrap();
        assert_eq!(scope.owner.and_then(Node::function_name), Some("outer"));
    }

    #[test]
    fn top_level_nodes_use_the_program_body() {
        let b = AstBuilder::new();
        let stmt = b.expr_stmt(b.ident("x"));
        let stmt_id = stmt.id;
        let program = b.program(vec![stmt, b.empty()]);

        let scope = find_scope(&program, stmt_id).unwrap();
        assert!(scope.owner.is_none());
        assert_eq!(scope.body.len(), 2);
        assert!(find_scope(&program, NodeId(999)).is_none());
    }
}
