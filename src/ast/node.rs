use std::fmt;

use super::operators::{ArithmeticOperator, LogicOperator, UnaryOperator};
use super::source_range::SourceRange;

/// Index of a node inside the arena of the `Ast` that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    ArithmeticBinaryOp,
    LogicBinaryOp,
    UnaryOp,
    Scope,
    Literal,
    Print,
    Assign,
    VariableReference,
    VariableDeclaration,
    ExpressionStatement,
    If,
    While,
    For,
    Input,
}

impl NodeKind {
    /// Short name used in graph output.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::ArithmeticBinaryOp => "bin_arith_op",
            NodeKind::LogicBinaryOp => "bin_logic_op",
            NodeKind::UnaryOp => "unop",
            NodeKind::Scope => "scope",
            NodeKind::Literal => "value",
            NodeKind::Print => "print",
            NodeKind::Assign => "assign",
            NodeKind::VariableReference => "var",
            NodeKind::VariableDeclaration => "var_decl",
            NodeKind::ExpressionStatement => "expr",
            NodeKind::If => "if",
            NodeKind::While => "while",
            NodeKind::For => "for",
            NodeKind::Input => "input",
        }
    }

    /// Whether a node of this kind produces a value and may stand where one
    /// is required (conditions, print arguments).
    pub fn is_evaluable(self) -> bool {
        matches!(
            self,
            NodeKind::ArithmeticBinaryOp
                | NodeKind::LogicBinaryOp
                | NodeKind::UnaryOp
                | NodeKind::Literal
                | NodeKind::VariableReference
                | NodeKind::ExpressionStatement
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            NodeKind::ArithmeticBinaryOp => "arithmetic operation",
            NodeKind::LogicBinaryOp => "logic operation",
            NodeKind::UnaryOp => "unary operation",
            NodeKind::Scope => "scope",
            NodeKind::Literal => "literal",
            NodeKind::Print => "print statement",
            NodeKind::Assign => "assignment",
            NodeKind::VariableReference => "variable reference",
            NodeKind::VariableDeclaration => "variable declaration",
            NodeKind::ExpressionStatement => "expression statement",
            NodeKind::If => "if statement",
            NodeKind::While => "while loop",
            NodeKind::For => "for loop",
            NodeKind::Input => "input statement",
        };
        f.write_str(text)
    }
}

/// A child role. Every role except `Statement` holds at most one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Operand,
    Left,
    Right,
    Lhs,
    Rhs,
    Initializer,
    Expr,
    Target,
    Condition,
    Then,
    Else,
    Body,
    Init,
    Step,
    Statement,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Slot::Operand => "operand",
            Slot::Left => "left operand",
            Slot::Right => "right operand",
            Slot::Lhs => "assignment target",
            Slot::Rhs => "assigned value",
            Slot::Initializer => "initializer",
            Slot::Expr => "expression",
            Slot::Target => "input target",
            Slot::Condition => "condition",
            Slot::Then => "then branch",
            Slot::Else => "else branch",
            Slot::Body => "body",
            Slot::Init => "init statement",
            Slot::Step => "step statement",
            Slot::Statement => "statement",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    value: i64,
}

impl Literal {
    pub fn value(&self) -> i64 {
        self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    name: String,
}

impl VariableReference {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone)]
pub struct UnaryOp {
    op: UnaryOperator,
    operand: Option<NodeId>,
}

impl UnaryOp {
    pub fn op(&self) -> UnaryOperator {
        self.op
    }

    pub fn operand(&self) -> Option<NodeId> {
        self.operand
    }
}

#[derive(Debug, Clone)]
pub struct ArithmeticBinaryOp {
    op: ArithmeticOperator,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl ArithmeticBinaryOp {
    pub fn op(&self) -> ArithmeticOperator {
        self.op
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }
}

#[derive(Debug, Clone)]
pub struct LogicBinaryOp {
    op: LogicOperator,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl LogicBinaryOp {
    pub fn op(&self) -> LogicOperator {
        self.op
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }
}

#[derive(Debug, Clone, Default)]
pub struct Assign {
    lhs: Option<NodeId>,
    rhs: Option<NodeId>,
}

impl Assign {
    pub fn lhs(&self) -> Option<NodeId> {
        self.lhs
    }

    pub fn rhs(&self) -> Option<NodeId> {
        self.rhs
    }
}

#[derive(Debug, Clone)]
pub struct VariableDeclaration {
    name: String,
    initializer: Option<NodeId>,
}

impl VariableDeclaration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initializer(&self) -> Option<NodeId> {
        self.initializer
    }
}

#[derive(Debug, Clone, Default)]
pub struct Print {
    expr: Option<NodeId>,
}

impl Print {
    pub fn expr(&self) -> Option<NodeId> {
        self.expr
    }
}

#[derive(Debug, Clone, Default)]
pub struct Input {
    target: Option<NodeId>,
}

impl Input {
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpressionStatement {
    expr: Option<NodeId>,
}

impl ExpressionStatement {
    pub fn expr(&self) -> Option<NodeId> {
        self.expr
    }
}

#[derive(Debug, Clone, Default)]
pub struct If {
    condition: Option<NodeId>,
    then_branch: Option<NodeId>,
    else_branch: Option<NodeId>,
}

impl If {
    pub fn condition(&self) -> Option<NodeId> {
        self.condition
    }

    pub fn then_branch(&self) -> Option<NodeId> {
        self.then_branch
    }

    pub fn else_branch(&self) -> Option<NodeId> {
        self.else_branch
    }
}

#[derive(Debug, Clone, Default)]
pub struct While {
    condition: Option<NodeId>,
    body: Option<NodeId>,
}

impl While {
    pub fn condition(&self) -> Option<NodeId> {
        self.condition
    }

    pub fn body(&self) -> Option<NodeId> {
        self.body
    }
}

#[derive(Debug, Clone, Default)]
pub struct For {
    init: Option<NodeId>,
    condition: Option<NodeId>,
    step: Option<NodeId>,
    body: Option<NodeId>,
}

impl For {
    pub fn init(&self) -> Option<NodeId> {
        self.init
    }

    pub fn condition(&self) -> Option<NodeId> {
        self.condition
    }

    pub fn step(&self) -> Option<NodeId> {
        self.step
    }

    pub fn body(&self) -> Option<NodeId> {
        self.body
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scope {
    statements: Vec<NodeId>,
}

impl Scope {
    pub fn statements(&self) -> &[NodeId] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// Payload of a node: the variant tag together with its scalar data and
/// child slots.
#[derive(Debug, Clone)]
pub enum NodeData {
    ArithmeticBinaryOp(ArithmeticBinaryOp),
    LogicBinaryOp(LogicBinaryOp),
    UnaryOp(UnaryOp),
    Scope(Scope),
    Literal(Literal),
    Print(Print),
    Assign(Assign),
    VariableReference(VariableReference),
    VariableDeclaration(VariableDeclaration),
    ExpressionStatement(ExpressionStatement),
    If(If),
    While(While),
    For(For),
    Input(Input),
}

impl NodeData {
    pub(crate) fn literal(value: i64) -> Self {
        NodeData::Literal(Literal { value })
    }

    pub(crate) fn variable(name: String) -> Self {
        NodeData::VariableReference(VariableReference { name })
    }

    pub(crate) fn variable_declaration(name: String) -> Self {
        NodeData::VariableDeclaration(VariableDeclaration { name, initializer: None })
    }

    pub(crate) fn unary_op(op: UnaryOperator) -> Self {
        NodeData::UnaryOp(UnaryOp { op, operand: None })
    }

    pub(crate) fn arithmetic_op(op: ArithmeticOperator) -> Self {
        NodeData::ArithmeticBinaryOp(ArithmeticBinaryOp { op, left: None, right: None })
    }

    pub(crate) fn logic_op(op: LogicOperator) -> Self {
        NodeData::LogicBinaryOp(LogicBinaryOp { op, left: None, right: None })
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::ArithmeticBinaryOp(_) => NodeKind::ArithmeticBinaryOp,
            NodeData::LogicBinaryOp(_) => NodeKind::LogicBinaryOp,
            NodeData::UnaryOp(_) => NodeKind::UnaryOp,
            NodeData::Scope(_) => NodeKind::Scope,
            NodeData::Literal(_) => NodeKind::Literal,
            NodeData::Print(_) => NodeKind::Print,
            NodeData::Assign(_) => NodeKind::Assign,
            NodeData::VariableReference(_) => NodeKind::VariableReference,
            NodeData::VariableDeclaration(_) => NodeKind::VariableDeclaration,
            NodeData::ExpressionStatement(_) => NodeKind::ExpressionStatement,
            NodeData::If(_) => NodeKind::If,
            NodeData::While(_) => NodeKind::While,
            NodeData::For(_) => NodeKind::For,
            NodeData::Input(_) => NodeKind::Input,
        }
    }

    /// Every role of this variant in declared order, present or not. A scope
    /// lists one `Statement` entry per child.
    pub fn slots(&self) -> Vec<(Slot, Option<NodeId>)> {
        match self {
            NodeData::ArithmeticBinaryOp(n) => vec![(Slot::Left, n.left), (Slot::Right, n.right)],
            NodeData::LogicBinaryOp(n) => vec![(Slot::Left, n.left), (Slot::Right, n.right)],
            NodeData::UnaryOp(n) => vec![(Slot::Operand, n.operand)],
            NodeData::Scope(n) => n.statements.iter().map(|&id| (Slot::Statement, Some(id))).collect(),
            NodeData::Literal(_) | NodeData::VariableReference(_) => Vec::new(),
            NodeData::Print(n) => vec![(Slot::Expr, n.expr)],
            NodeData::Assign(n) => vec![(Slot::Lhs, n.lhs), (Slot::Rhs, n.rhs)],
            NodeData::VariableDeclaration(n) => vec![(Slot::Initializer, n.initializer)],
            NodeData::ExpressionStatement(n) => vec![(Slot::Expr, n.expr)],
            NodeData::If(n) => vec![
                (Slot::Condition, n.condition),
                (Slot::Then, n.then_branch),
                (Slot::Else, n.else_branch),
            ],
            NodeData::While(n) => vec![(Slot::Condition, n.condition), (Slot::Body, n.body)],
            NodeData::For(n) => vec![
                (Slot::Init, n.init),
                (Slot::Condition, n.condition),
                (Slot::Step, n.step),
                (Slot::Body, n.body),
            ],
            NodeData::Input(n) => vec![(Slot::Target, n.target)],
        }
    }

    /// Present children in declared order.
    pub fn children(&self) -> Vec<NodeId> {
        self.slots().into_iter().filter_map(|(_, child)| child).collect()
    }

    /// Storage for a single-child role, or `None` if this variant has no such
    /// role. Scope statements are not single-child and never match here.
    pub(crate) fn slot_mut(&mut self, slot: Slot) -> Option<&mut Option<NodeId>> {
        match (self, slot) {
            (NodeData::ArithmeticBinaryOp(n), Slot::Left) => Some(&mut n.left),
            (NodeData::ArithmeticBinaryOp(n), Slot::Right) => Some(&mut n.right),
            (NodeData::LogicBinaryOp(n), Slot::Left) => Some(&mut n.left),
            (NodeData::LogicBinaryOp(n), Slot::Right) => Some(&mut n.right),
            (NodeData::UnaryOp(n), Slot::Operand) => Some(&mut n.operand),
            (NodeData::Print(n), Slot::Expr) => Some(&mut n.expr),
            (NodeData::Assign(n), Slot::Lhs) => Some(&mut n.lhs),
            (NodeData::Assign(n), Slot::Rhs) => Some(&mut n.rhs),
            (NodeData::VariableDeclaration(n), Slot::Initializer) => Some(&mut n.initializer),
            (NodeData::ExpressionStatement(n), Slot::Expr) => Some(&mut n.expr),
            (NodeData::If(n), Slot::Condition) => Some(&mut n.condition),
            (NodeData::If(n), Slot::Then) => Some(&mut n.then_branch),
            (NodeData::If(n), Slot::Else) => Some(&mut n.else_branch),
            (NodeData::While(n), Slot::Condition) => Some(&mut n.condition),
            (NodeData::While(n), Slot::Body) => Some(&mut n.body),
            (NodeData::For(n), Slot::Init) => Some(&mut n.init),
            (NodeData::For(n), Slot::Condition) => Some(&mut n.condition),
            (NodeData::For(n), Slot::Step) => Some(&mut n.step),
            (NodeData::For(n), Slot::Body) => Some(&mut n.body),
            (NodeData::Input(n), Slot::Target) => Some(&mut n.target),
            _ => None,
        }
    }

    pub(crate) fn statements_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            NodeData::Scope(n) => Some(&mut n.statements),
            _ => None,
        }
    }

    /// Same variant and scalar data, with every slot empty.
    pub(crate) fn detached(&self) -> NodeData {
        match self {
            NodeData::ArithmeticBinaryOp(n) => NodeData::arithmetic_op(n.op),
            NodeData::LogicBinaryOp(n) => NodeData::logic_op(n.op),
            NodeData::UnaryOp(n) => NodeData::unary_op(n.op),
            NodeData::Scope(_) => NodeData::Scope(Scope::default()),
            NodeData::Literal(n) => NodeData::literal(n.value),
            NodeData::Print(_) => NodeData::Print(Print::default()),
            NodeData::Assign(_) => NodeData::Assign(Assign::default()),
            NodeData::VariableReference(n) => NodeData::variable(n.name.clone()),
            NodeData::VariableDeclaration(n) => NodeData::variable_declaration(n.name.clone()),
            NodeData::ExpressionStatement(_) => NodeData::ExpressionStatement(ExpressionStatement::default()),
            NodeData::If(_) => NodeData::If(If::default()),
            NodeData::While(_) => NodeData::While(While::default()),
            NodeData::For(_) => NodeData::For(For::default()),
            NodeData::Input(_) => NodeData::Input(Input::default()),
        }
    }

    /// Variant, operator, value and name agree; children are not compared.
    pub fn same_payload(&self, other: &NodeData) -> bool {
        match (self, other) {
            (NodeData::ArithmeticBinaryOp(a), NodeData::ArithmeticBinaryOp(b)) => a.op == b.op,
            (NodeData::LogicBinaryOp(a), NodeData::LogicBinaryOp(b)) => a.op == b.op,
            (NodeData::UnaryOp(a), NodeData::UnaryOp(b)) => a.op == b.op,
            (NodeData::Literal(a), NodeData::Literal(b)) => a == b,
            (NodeData::VariableReference(a), NodeData::VariableReference(b)) => a == b,
            (NodeData::VariableDeclaration(a), NodeData::VariableDeclaration(b)) => a.name == b.name,
            (a, b) => a.kind() == b.kind(),
        }
    }
}

/// One arena entry.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) location: SourceRange,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            location: SourceRange::default(),
        }
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn location(&self) -> &SourceRange {
        &self.location
    }

    pub fn children(&self) -> Vec<NodeId> {
        self.data.children()
    }
}
