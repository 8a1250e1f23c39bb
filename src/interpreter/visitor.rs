use std::io::{BufRead, Write};

use super::{expression_handlers, statement_handlers, Interpreter};
use crate::ast::{
    ArithmeticBinaryOp, Assign, Ast, ExpressionStatement, For, If, Input, Literal, LogicBinaryOp, NodeId, Print,
    Scope, UnaryOp, VariableDeclaration, VariableReference, While,
};
use crate::errors::LangResult;
use crate::semantic::AstVisitor;

impl<R: BufRead, W: Write> AstVisitor for Interpreter<R, W> {
    // Expression handlers
    fn visit_arithmetic_op(&mut self, ast: &Ast, id: NodeId, node: &ArithmeticBinaryOp) -> LangResult<()> {
        expression_handlers::handle_arithmetic_op(self, ast, id, node)
    }

    fn visit_logic_op(&mut self, ast: &Ast, id: NodeId, node: &LogicBinaryOp) -> LangResult<()> {
        expression_handlers::handle_logic_op(self, ast, id, node)
    }

    fn visit_unary_op(&mut self, ast: &Ast, id: NodeId, node: &UnaryOp) -> LangResult<()> {
        expression_handlers::handle_unary_op(self, ast, id, node)
    }

    fn visit_literal(&mut self, _ast: &Ast, _id: NodeId, node: &Literal) -> LangResult<()> {
        expression_handlers::handle_literal(self, node)
    }

    fn visit_variable(&mut self, ast: &Ast, id: NodeId, node: &VariableReference) -> LangResult<()> {
        expression_handlers::handle_variable(self, ast, id, node)
    }

    fn visit_expression_statement(&mut self, ast: &Ast, id: NodeId, node: &ExpressionStatement) -> LangResult<()> {
        expression_handlers::handle_expression_statement(self, ast, id, node)
    }

    // Statement handlers
    fn visit_scope(&mut self, ast: &Ast, id: NodeId, node: &Scope) -> LangResult<()> {
        statement_handlers::handle_scope(self, ast, id, node)
    }

    fn visit_print(&mut self, ast: &Ast, id: NodeId, node: &Print) -> LangResult<()> {
        statement_handlers::handle_print(self, ast, id, node)
    }

    fn visit_assign(&mut self, ast: &Ast, id: NodeId, node: &Assign) -> LangResult<()> {
        statement_handlers::handle_assign(self, ast, id, node)
    }

    fn visit_variable_declaration(&mut self, ast: &Ast, id: NodeId, node: &VariableDeclaration) -> LangResult<()> {
        statement_handlers::handle_variable_declaration(self, ast, id, node)
    }

    fn visit_if(&mut self, ast: &Ast, id: NodeId, node: &If) -> LangResult<()> {
        statement_handlers::handle_if(self, ast, id, node)
    }

    fn visit_while(&mut self, ast: &Ast, id: NodeId, node: &While) -> LangResult<()> {
        statement_handlers::handle_while(self, ast, id, node)
    }

    fn visit_for(&mut self, ast: &Ast, id: NodeId, node: &For) -> LangResult<()> {
        statement_handlers::handle_for(self, ast, id, node)
    }

    fn visit_input(&mut self, ast: &Ast, id: NodeId, node: &Input) -> LangResult<()> {
        statement_handlers::handle_input(self, ast, id, node)
    }
}
