use std::io::{BufRead, Write};

use super::{fault_at, Interpreter};
use crate::ast::{
    Assign, Ast, For, If, Input, NodeData, NodeId, NodeKind, Print, Scope, VariableDeclaration, While,
};
use crate::errors::{Fault, LangResult};

fn variable_name(ast: &Ast, id: NodeId) -> Option<&str> {
    match ast.data(id) {
        NodeData::VariableReference(variable) => Some(variable.name()),
        _ => None,
    }
}

fn require(ast: &Ast, id: NodeId, child: Option<NodeId>, fault: Fault) -> LangResult<NodeId> {
    child.ok_or_else(|| fault_at(ast, id, fault))
}

fn require_evaluable_condition(ast: &Ast, condition: NodeId) -> LangResult<()> {
    let kind = ast.kind(condition);
    if !kind.is_evaluable() {
        return Err(fault_at(ast, condition, Fault::InvalidCondition(kind)));
    }
    Ok(())
}

fn require_scope_body(ast: &Ast, body: NodeId) -> LangResult<()> {
    let kind = ast.kind(body);
    if kind != NodeKind::Scope {
        return Err(fault_at(ast, body, Fault::InvalidBody(kind)));
    }
    Ok(())
}

/// The program scope (no parent) runs in the global scope; any nested one
/// gets its own, released on every exit path.
pub fn handle_scope<R: BufRead, W: Write>(
    interp: &mut Interpreter<R, W>,
    ast: &Ast,
    id: NodeId,
    scope: &Scope,
) -> LangResult<()> {
    if ast.parent(id).is_none() {
        return run_statements(interp, ast, scope);
    }
    let mut scoped = interp.scoped();
    run_statements(&mut *scoped, ast, scope)
}

fn run_statements<R: BufRead, W: Write>(interp: &mut Interpreter<R, W>, ast: &Ast, scope: &Scope) -> LangResult<()> {
    for &statement in scope.statements() {
        ast.accept(statement, interp)?;
    }
    Ok(())
}

pub fn handle_print<R: BufRead, W: Write>(
    interp: &mut Interpreter<R, W>,
    ast: &Ast,
    id: NodeId,
    print: &Print,
) -> LangResult<()> {
    let expr = require(ast, id, print.expr(), Fault::MissingExpression(NodeKind::Print))?;
    let kind = ast.kind(expr);
    if !kind.is_evaluable() {
        return Err(fault_at(ast, expr, Fault::InvalidExpressionContext(kind)));
    }
    let value = interp.evaluate(ast, expr)?;
    writeln!(interp.output, "{}", value)?;
    Ok(())
}

pub fn handle_assign<R: BufRead, W: Write>(
    interp: &mut Interpreter<R, W>,
    ast: &Ast,
    id: NodeId,
    assign: &Assign,
) -> LangResult<()> {
    let target = require(ast, id, assign.lhs(), Fault::InvalidAssignTarget(None))?;
    let name = variable_name(ast, target)
        .ok_or_else(|| fault_at(ast, target, Fault::InvalidAssignTarget(Some(ast.kind(target)))))?;
    let rhs = require(ast, id, assign.rhs(), Fault::MissingOperand(NodeKind::Assign))?;
    let value = interp.evaluate(ast, rhs)?;
    interp.table.assign_or_create(name, value);
    Ok(())
}

pub fn handle_variable_declaration<R: BufRead, W: Write>(
    interp: &mut Interpreter<R, W>,
    ast: &Ast,
    id: NodeId,
    decl: &VariableDeclaration,
) -> LangResult<()> {
    let value = match decl.initializer() {
        Some(initializer) => interp.evaluate(ast, initializer)?,
        None => 0,
    };
    interp.last_value = value;
    interp
        .table
        .declare(decl.name(), value)
        .map_err(|fault| fault_at(ast, id, fault))
}

pub fn handle_if<R: BufRead, W: Write>(
    interp: &mut Interpreter<R, W>,
    ast: &Ast,
    id: NodeId,
    stmt: &If,
) -> LangResult<()> {
    let condition = require(ast, id, stmt.condition(), Fault::MissingCondition(NodeKind::If))?;
    require_evaluable_condition(ast, condition)?;
    if interp.evaluate(ast, condition)? != 0 {
        let then_branch = require(ast, id, stmt.then_branch(), Fault::MissingThenBranch)?;
        ast.accept(then_branch, interp)?;
    } else if let Some(else_branch) = stmt.else_branch() {
        ast.accept(else_branch, interp)?;
    }
    Ok(())
}

pub fn handle_while<R: BufRead, W: Write>(
    interp: &mut Interpreter<R, W>,
    ast: &Ast,
    id: NodeId,
    stmt: &While,
) -> LangResult<()> {
    let condition = require(ast, id, stmt.condition(), Fault::MissingCondition(NodeKind::While))?;
    let body = require(ast, id, stmt.body(), Fault::MissingBody(NodeKind::While))?;
    require_evaluable_condition(ast, condition)?;
    require_scope_body(ast, body)?;

    while interp.evaluate(ast, condition)? != 0 {
        ast.accept(body, interp)?;
    }
    Ok(())
}

pub fn handle_for<R: BufRead, W: Write>(
    interp: &mut Interpreter<R, W>,
    ast: &Ast,
    id: NodeId,
    stmt: &For,
) -> LangResult<()> {
    let condition = require(ast, id, stmt.condition(), Fault::MissingCondition(NodeKind::For))?;
    let body = require(ast, id, stmt.body(), Fault::MissingBody(NodeKind::For))?;
    require_evaluable_condition(ast, condition)?;
    require_scope_body(ast, body)?;

    if let Some(init) = stmt.init() {
        ast.accept(init, interp)?;
    }
    while interp.evaluate(ast, condition)? != 0 {
        ast.accept(body, interp)?;
        if let Some(step) = stmt.step() {
            ast.accept(step, interp)?;
        }
    }
    Ok(())
}

pub fn handle_input<R: BufRead, W: Write>(
    interp: &mut Interpreter<R, W>,
    ast: &Ast,
    id: NodeId,
    input: &Input,
) -> LangResult<()> {
    let target = require(ast, id, input.target(), Fault::InvalidInputTarget(None))?;
    let name = variable_name(ast, target)
        .ok_or_else(|| fault_at(ast, target, Fault::InvalidInputTarget(Some(ast.kind(target)))))?;
    let value = interp
        .input
        .read_integer()?
        .ok_or_else(|| fault_at(ast, id, Fault::InputFormatError))?;
    interp.table.assign_or_create(name, value);
    Ok(())
}
