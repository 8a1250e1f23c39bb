use log::trace;

use super::node::{Node, NodeData, NodeId, NodeKind, Slot};
use super::operators::{ArithmeticOperator, LogicOperator, UnaryOperator};
use super::source_range::SourceRange;
use crate::errors::{ConstructionError, LangResult};

/// Owning handle of a syntax tree.
///
/// Nodes are stored in an arena and addressed by [`NodeId`]. Trees are built
/// bottom-up: create the leaves, then the nodes that own them, attaching each
/// child exactly once. A node with a parent never moves again.
#[derive(Debug, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Make `id` the root. The root must not be owned by another node.
    pub fn set_root(&mut self, id: NodeId) -> LangResult<()> {
        let node = self.get(id)?;
        if node.parent.is_some() {
            return Err(ConstructionError::AlreadyAttached { kind: node.kind() }.into());
        }
        self.root = Some(id);
        Ok(())
    }

    /// Number of nodes in the arena, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// `node` and the accessors below index the arena directly; use [`Ast::get`]
    /// for an id of unknown origin.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not created by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Result<&Node, ConstructionError> {
        self.nodes.get(id.0).ok_or(ConstructionError::ForeignNode(id))
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.node(id).data
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).children()
    }

    pub fn location(&self, id: NodeId) -> &SourceRange {
        &self.node(id).location
    }

    pub fn set_location(&mut self, id: NodeId, location: SourceRange) -> LangResult<()> {
        let node = self.nodes.get_mut(id.0).ok_or(ConstructionError::ForeignNode(id))?;
        node.location = location;
        Ok(())
    }

    /// Number of nodes reachable from the root.
    pub fn reachable_count(&self) -> usize {
        fn count(ast: &Ast, id: NodeId) -> usize {
            1 + ast.children(id).into_iter().map(|child| count(ast, child)).sum::<usize>()
        }
        self.root.map_or(0, |root| count(self, root))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        trace!("new {} node {}", data.kind().name(), id);
        self.nodes.push(Node::new(data));
        id
    }

    fn push_with(&mut self, data: NodeData, children: &[(Slot, Option<NodeId>)]) -> LangResult<NodeId> {
        let id = self.push(data);
        for &(slot, child) in children {
            if let Some(child) = child {
                self.attach(id, slot, child)?;
            }
        }
        Ok(id)
    }

    // Leaves

    pub fn literal(&mut self, value: i64) -> NodeId {
        self.push(NodeData::literal(value))
    }

    pub fn variable(&mut self, name: impl Into<String>) -> NodeId {
        self.push(NodeData::variable(name.into()))
    }

    // Expressions

    pub fn unary_op(&mut self, op: UnaryOperator, operand: Option<NodeId>) -> LangResult<NodeId> {
        self.push_with(NodeData::unary_op(op), &[(Slot::Operand, operand)])
    }

    pub fn arithmetic_op(
        &mut self,
        op: ArithmeticOperator,
        left: Option<NodeId>,
        right: Option<NodeId>,
    ) -> LangResult<NodeId> {
        self.push_with(NodeData::arithmetic_op(op), &[(Slot::Left, left), (Slot::Right, right)])
    }

    pub fn logic_op(&mut self, op: LogicOperator, left: Option<NodeId>, right: Option<NodeId>) -> LangResult<NodeId> {
        self.push_with(NodeData::logic_op(op), &[(Slot::Left, left), (Slot::Right, right)])
    }

    // Statements

    pub fn assign(&mut self, lhs: Option<NodeId>, rhs: Option<NodeId>) -> LangResult<NodeId> {
        self.push_with(NodeData::Assign(Default::default()), &[(Slot::Lhs, lhs), (Slot::Rhs, rhs)])
    }

    pub fn variable_declaration(&mut self, name: impl Into<String>, initializer: Option<NodeId>) -> LangResult<NodeId> {
        self.push_with(
            NodeData::variable_declaration(name.into()),
            &[(Slot::Initializer, initializer)],
        )
    }

    pub fn print(&mut self, expr: Option<NodeId>) -> LangResult<NodeId> {
        self.push_with(NodeData::Print(Default::default()), &[(Slot::Expr, expr)])
    }

    pub fn input(&mut self, target: Option<NodeId>) -> LangResult<NodeId> {
        self.push_with(NodeData::Input(Default::default()), &[(Slot::Target, target)])
    }

    pub fn expression_statement(&mut self, expr: Option<NodeId>) -> LangResult<NodeId> {
        self.push_with(NodeData::ExpressionStatement(Default::default()), &[(Slot::Expr, expr)])
    }

    pub fn if_node(
        &mut self,
        condition: Option<NodeId>,
        then_branch: Option<NodeId>,
        else_branch: Option<NodeId>,
    ) -> LangResult<NodeId> {
        self.push_with(
            NodeData::If(Default::default()),
            &[(Slot::Condition, condition), (Slot::Then, then_branch), (Slot::Else, else_branch)],
        )
    }

    pub fn while_loop(&mut self, condition: Option<NodeId>, body: Option<NodeId>) -> LangResult<NodeId> {
        self.push_with(
            NodeData::While(Default::default()),
            &[(Slot::Condition, condition), (Slot::Body, body)],
        )
    }

    pub fn for_loop(
        &mut self,
        init: Option<NodeId>,
        condition: Option<NodeId>,
        step: Option<NodeId>,
        body: Option<NodeId>,
    ) -> LangResult<NodeId> {
        self.push_with(
            NodeData::For(Default::default()),
            &[
                (Slot::Init, init),
                (Slot::Condition, condition),
                (Slot::Step, step),
                (Slot::Body, body),
            ],
        )
    }

    pub fn scope(&mut self, statements: impl IntoIterator<Item = NodeId>) -> LangResult<NodeId> {
        let id = self.push(NodeData::Scope(Default::default()));
        for statement in statements {
            self.add_statement(id, statement)?;
        }
        Ok(id)
    }

    // Per-role mutators

    pub fn set_operand(&mut self, node: NodeId, child: NodeId) -> LangResult<()> {
        self.attach(node, Slot::Operand, child)
    }

    pub fn set_left(&mut self, node: NodeId, child: NodeId) -> LangResult<()> {
        self.attach(node, Slot::Left, child)
    }

    pub fn set_right(&mut self, node: NodeId, child: NodeId) -> LangResult<()> {
        self.attach(node, Slot::Right, child)
    }

    pub fn set_lhs(&mut self, node: NodeId, child: NodeId) -> LangResult<()> {
        self.attach(node, Slot::Lhs, child)
    }

    pub fn set_rhs(&mut self, node: NodeId, child: NodeId) -> LangResult<()> {
        self.attach(node, Slot::Rhs, child)
    }

    pub fn set_initializer(&mut self, node: NodeId, child: NodeId) -> LangResult<()> {
        self.attach(node, Slot::Initializer, child)
    }

    pub fn set_expr(&mut self, node: NodeId, child: NodeId) -> LangResult<()> {
        self.attach(node, Slot::Expr, child)
    }

    pub fn set_target(&mut self, node: NodeId, child: NodeId) -> LangResult<()> {
        self.attach(node, Slot::Target, child)
    }

    pub fn set_condition(&mut self, node: NodeId, child: NodeId) -> LangResult<()> {
        self.attach(node, Slot::Condition, child)
    }

    pub fn set_then(&mut self, node: NodeId, child: NodeId) -> LangResult<()> {
        self.attach(node, Slot::Then, child)
    }

    pub fn set_else(&mut self, node: NodeId, child: NodeId) -> LangResult<()> {
        self.attach(node, Slot::Else, child)
    }

    pub fn set_body(&mut self, node: NodeId, child: NodeId) -> LangResult<()> {
        self.attach(node, Slot::Body, child)
    }

    pub fn set_init(&mut self, node: NodeId, child: NodeId) -> LangResult<()> {
        self.attach(node, Slot::Init, child)
    }

    pub fn set_step(&mut self, node: NodeId, child: NodeId) -> LangResult<()> {
        self.attach(node, Slot::Step, child)
    }

    pub fn add_statement(&mut self, scope: NodeId, child: NodeId) -> LangResult<()> {
        self.attach(scope, Slot::Statement, child)
    }

    /// Attach `child` to `parent` in `slot` and record the back-reference.
    /// Nothing is modified when an error is returned.
    pub fn attach(&mut self, parent: NodeId, slot: Slot, child: NodeId) -> LangResult<()> {
        let parent_kind = self.get(parent)?.kind();
        let child_node = self.get(child)?;
        let child_kind = child_node.kind();
        if child_node.parent.is_some() || self.root == Some(child) {
            return Err(ConstructionError::AlreadyAttached { kind: child_kind }.into());
        }
        // child has no parent, so a cycle exists exactly when child is the
        // topmost ancestor of parent
        let mut top = parent;
        while let Some(up) = self.nodes[top.0].parent {
            top = up;
        }
        if top == child {
            return Err(ConstructionError::CyclicAttachment { kind: child_kind }.into());
        }

        let data = &mut self.nodes[parent.0].data;
        if slot == Slot::Statement {
            let statements = data
                .statements_mut()
                .ok_or(ConstructionError::NoSuchSlot { kind: parent_kind, slot })?;
            statements.push(child);
        } else {
            let storage = data
                .slot_mut(slot)
                .ok_or(ConstructionError::NoSuchSlot { kind: parent_kind, slot })?;
            if storage.is_some() {
                return Err(ConstructionError::SlotAlreadySet { kind: parent_kind, slot }.into());
            }
            *storage = Some(child);
        }
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Deep-copy the subtree at `id` of `source` into this arena. The copy is
    /// parentless; locations are preserved.
    pub fn import_subtree(&mut self, source: &Ast, id: NodeId) -> LangResult<NodeId> {
        let node = source.get(id)?;
        let copy = self.push(node.data.detached());
        self.nodes[copy.0].location = node.location.clone();
        for (slot, child) in node.data.slots() {
            if let Some(child) = child {
                let child_copy = self.import_subtree(source, child)?;
                self.attach(copy, slot, child_copy)?;
            }
        }
        Ok(copy)
    }

    /// A new tree whose root is a deep copy of the subtree at `id`.
    pub fn copy_subtree(&self, id: NodeId) -> LangResult<Ast> {
        let mut copy = Ast::new();
        let root = copy.import_subtree(self, id)?;
        copy.root = Some(root);
        Ok(copy)
    }

    /// Deep copy of everything reachable from the root. Unattached nodes
    /// outside the root's subtree are not carried over.
    pub fn duplicate(&self) -> LangResult<Ast> {
        match self.root {
            Some(root) => self.copy_subtree(root),
            None => Ok(Ast::new()),
        }
    }

    /// Recursive value equality of two subtrees: same variants, operators,
    /// values and names, with children equal role by role.
    pub fn structurally_eq(&self, id: NodeId, other: &Ast, other_id: NodeId) -> bool {
        let (a, b) = (self.data(id), other.data(other_id));
        if !a.same_payload(b) {
            return false;
        }
        let (a_slots, b_slots) = (a.slots(), b.slots());
        a_slots.len() == b_slots.len()
            && a_slots.iter().zip(b_slots.iter()).all(|(&(sa, ca), &(sb, cb))| {
                sa == sb
                    && match (ca, cb) {
                        (Some(ca), Some(cb)) => self.structurally_eq(ca, other, cb),
                        (None, None) => true,
                        _ => false,
                    }
            })
    }
}

impl Clone for Ast {
    fn clone(&self) -> Self {
        let mut copy = Ast::new();
        // importing a well-formed tree into an empty arena does not fail
        if let Some(root) = self.root {
            if let Ok(root) = copy.import_subtree(self, root) {
                copy.root = Some(root);
            }
        }
        copy
    }
}

impl PartialEq for Ast {
    fn eq(&self, other: &Self) -> bool {
        match (self.root, other.root) {
            (Some(a), Some(b)) => self.structurally_eq(a, other, b),
            (None, None) => true,
            _ => false,
        }
    }
}
