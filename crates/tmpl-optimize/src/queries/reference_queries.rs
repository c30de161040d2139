use tmpl_core::ast::NodeKind;
use tmpl_core::{walk_nodes, Node, NodeId, VisitControl, Visitor, WalkContext};

/// `node` is the non-computed property of a member access (`obj.node`).
pub fn is_member_property(node: &Node, parent: Option<&Node>) -> bool {
    matches!(
        parent.map(|p| &p.kind),
        Some(NodeKind::MemberExpression {
            property,
            computed: false,
            ..
        }) if property.id == node.id
    )
}

/// `node` is the non-computed key of an object literal property.
pub fn is_property_key(node: &Node, parent: Option<&Node>) -> bool {
    matches!(
        parent.map(|p| &p.kind),
        Some(NodeKind::Property {
            key,
            computed: false,
            ..
        }) if key.id == node.id
    )
}

/// `node` is the name being declared by a VariableDeclarator.
pub fn is_declarator_target(node: &Node, parent: Option<&Node>) -> bool {
    matches!(
        parent.map(|p| &p.kind),
        Some(NodeKind::VariableDeclarator { id, .. }) if id.id == node.id
    )
}

struct ReferenceCollector<'a, 'n> {
    name: &'n str,
    first_only: bool,
    found: Vec<&'a Node>,
}

impl<'a> Visitor<'a> for ReferenceCollector<'a, '_> {
    fn enter(&mut self, node: &'a Node, ctx: &WalkContext<'a>) -> VisitControl {
        if node.is_identifier(self.name) && !is_member_property(node, ctx.parent()) {
            self.found.push(node);
            if self.first_only {
                return VisitControl::StopAll;
            }
        }
        VisitControl::Continue
    }
}

/// Every identifier named `name` inside `scope`, except the node `skip` (and
/// its subtree) and non-computed member properties.
pub fn find_references<'a>(scope: &'a [Node], name: &str, skip: Option<NodeId>) -> Vec<&'a Node> {
    let mut collector = ReferenceCollector {
        name,
        first_only: false,
        found: Vec::new(),
    };
    walk_nodes(scope, skip, &mut collector);
    collector.found
}

/// Whether [`find_references`] would return anything; stops at the first hit.
pub fn is_referenced(scope: &[Node], name: &str, skip: Option<NodeId>) -> bool {
    let mut collector = ReferenceCollector {
        name,
        first_only: true,
        found: Vec::new(),
    };
    walk_nodes(scope, skip, &mut collector).is_stopped()
}
