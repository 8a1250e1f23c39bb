use crate::ast::{
    ArithmeticBinaryOp, Assign, Ast, ExpressionStatement, For, If, Input, Literal, LogicBinaryOp, NodeData, NodeId,
    Print, Scope, UnaryOp, VariableDeclaration, VariableReference, While,
};
use crate::errors::LangResult;

/// One handler per node variant. There are no default bodies, so a new
/// variant does not compile until every visitor handles it.
pub trait AstVisitor {
    fn visit_arithmetic_op(&mut self, ast: &Ast, id: NodeId, node: &ArithmeticBinaryOp) -> LangResult<()>;
    fn visit_logic_op(&mut self, ast: &Ast, id: NodeId, node: &LogicBinaryOp) -> LangResult<()>;
    fn visit_unary_op(&mut self, ast: &Ast, id: NodeId, node: &UnaryOp) -> LangResult<()>;
    fn visit_scope(&mut self, ast: &Ast, id: NodeId, node: &Scope) -> LangResult<()>;
    fn visit_literal(&mut self, ast: &Ast, id: NodeId, node: &Literal) -> LangResult<()>;
    fn visit_print(&mut self, ast: &Ast, id: NodeId, node: &Print) -> LangResult<()>;
    fn visit_assign(&mut self, ast: &Ast, id: NodeId, node: &Assign) -> LangResult<()>;
    fn visit_variable(&mut self, ast: &Ast, id: NodeId, node: &VariableReference) -> LangResult<()>;
    fn visit_variable_declaration(&mut self, ast: &Ast, id: NodeId, node: &VariableDeclaration) -> LangResult<()>;
    fn visit_expression_statement(&mut self, ast: &Ast, id: NodeId, node: &ExpressionStatement) -> LangResult<()>;
    fn visit_if(&mut self, ast: &Ast, id: NodeId, node: &If) -> LangResult<()>;
    fn visit_while(&mut self, ast: &Ast, id: NodeId, node: &While) -> LangResult<()>;
    fn visit_for(&mut self, ast: &Ast, id: NodeId, node: &For) -> LangResult<()>;
    fn visit_input(&mut self, ast: &Ast, id: NodeId, node: &Input) -> LangResult<()>;
}

impl Ast {
    /// Invoke the handler for `id` only. Children are left to the visitor.
    /// An id from another tree is a `ForeignNode` error.
    pub fn accept(&self, id: NodeId, visitor: &mut dyn AstVisitor) -> LangResult<()> {
        match self.get(id)?.data() {
            NodeData::ArithmeticBinaryOp(node) => visitor.visit_arithmetic_op(self, id, node),
            NodeData::LogicBinaryOp(node) => visitor.visit_logic_op(self, id, node),
            NodeData::UnaryOp(node) => visitor.visit_unary_op(self, id, node),
            NodeData::Scope(node) => visitor.visit_scope(self, id, node),
            NodeData::Literal(node) => visitor.visit_literal(self, id, node),
            NodeData::Print(node) => visitor.visit_print(self, id, node),
            NodeData::Assign(node) => visitor.visit_assign(self, id, node),
            NodeData::VariableReference(node) => visitor.visit_variable(self, id, node),
            NodeData::VariableDeclaration(node) => visitor.visit_variable_declaration(self, id, node),
            NodeData::ExpressionStatement(node) => visitor.visit_expression_statement(self, id, node),
            NodeData::If(node) => visitor.visit_if(self, id, node),
            NodeData::While(node) => visitor.visit_while(self, id, node),
            NodeData::For(node) => visitor.visit_for(self, id, node),
            NodeData::Input(node) => visitor.visit_input(self, id, node),
        }
    }

    /// Pre-order walk: the node's handler, then every child in role order.
    pub fn walk(&self, id: NodeId, visitor: &mut dyn AstVisitor) -> LangResult<()> {
        self.accept(id, visitor)?;
        for child in self.children(id) {
            self.walk(child, visitor)?;
        }
        Ok(())
    }
}
