use std::io::{BufRead, Write};

use super::{fault_at, Interpreter};
use crate::ast::{
    ArithmeticBinaryOp, ArithmeticOperator, Ast, ExpressionStatement, Literal, LogicBinaryOp, LogicOperator, NodeId,
    NodeKind, UnaryOp, UnaryOperator, VariableReference,
};
use crate::errors::{Fault, LangResult};

pub fn handle_literal<R: BufRead, W: Write>(interp: &mut Interpreter<R, W>, literal: &Literal) -> LangResult<()> {
    interp.last_value = literal.value();
    Ok(())
}

pub fn handle_variable<R: BufRead, W: Write>(
    interp: &mut Interpreter<R, W>,
    ast: &Ast,
    id: NodeId,
    variable: &VariableReference,
) -> LangResult<()> {
    interp.last_value = interp
        .table
        .lookup(variable.name())
        .map_err(|fault| fault_at(ast, id, fault))?;
    Ok(())
}

pub fn handle_unary_op<R: BufRead, W: Write>(
    interp: &mut Interpreter<R, W>,
    ast: &Ast,
    id: NodeId,
    unop: &UnaryOp,
) -> LangResult<()> {
    let operand = unop
        .operand()
        .ok_or_else(|| fault_at(ast, id, Fault::MissingOperand(NodeKind::UnaryOp)))?;
    let value = interp.evaluate(ast, operand)?;
    interp.last_value = apply_unary(unop.op(), value);
    Ok(())
}

pub fn handle_arithmetic_op<R: BufRead, W: Write>(
    interp: &mut Interpreter<R, W>,
    ast: &Ast,
    id: NodeId,
    binop: &ArithmeticBinaryOp,
) -> LangResult<()> {
    let (Some(left), Some(right)) = (binop.left(), binop.right()) else {
        return Err(fault_at(ast, id, Fault::MissingOperand(NodeKind::ArithmeticBinaryOp)));
    };
    let lhs = interp.evaluate(ast, left)?;
    let rhs = interp.evaluate(ast, right)?;
    interp.last_value =
        apply_arithmetic(binop.op(), lhs, rhs).ok_or_else(|| fault_at(ast, id, Fault::DivisionByZero))?;
    Ok(())
}

/// `&&` and `||` skip the right operand when the left one decides the
/// result. Both always yield 0 or 1.
pub fn handle_logic_op<R: BufRead, W: Write>(
    interp: &mut Interpreter<R, W>,
    ast: &Ast,
    id: NodeId,
    binop: &LogicBinaryOp,
) -> LangResult<()> {
    let missing = || fault_at(ast, id, Fault::MissingOperand(NodeKind::LogicBinaryOp));
    let left = binop.left().ok_or_else(missing)?;
    let lhs = interp.evaluate(ast, left)?;
    match binop.op() {
        LogicOperator::And if lhs == 0 => {
            interp.last_value = 0;
            return Ok(());
        }
        LogicOperator::Or if lhs != 0 => {
            interp.last_value = 1;
            return Ok(());
        }
        _ => {}
    }
    let right = binop.right().ok_or_else(missing)?;
    let rhs = interp.evaluate(ast, right)?;
    interp.last_value = apply_logic(binop.op(), lhs, rhs);
    Ok(())
}

pub fn handle_expression_statement<R: BufRead, W: Write>(
    interp: &mut Interpreter<R, W>,
    ast: &Ast,
    id: NodeId,
    stmt: &ExpressionStatement,
) -> LangResult<()> {
    let expr = stmt
        .expr()
        .ok_or_else(|| fault_at(ast, id, Fault::MissingExpression(NodeKind::ExpressionStatement)))?;
    interp.evaluate(ast, expr)?;
    Ok(())
}

fn apply_unary(op: UnaryOperator, value: i64) -> i64 {
    match op {
        UnaryOperator::Negate => value.wrapping_neg(),
        UnaryOperator::Identity => value,
        UnaryOperator::Not => (value == 0) as i64,
    }
}

// None on division by zero. Overflow wraps.
fn apply_arithmetic(op: ArithmeticOperator, lhs: i64, rhs: i64) -> Option<i64> {
    match op {
        ArithmeticOperator::Add => Some(lhs.wrapping_add(rhs)),
        ArithmeticOperator::Sub => Some(lhs.wrapping_sub(rhs)),
        ArithmeticOperator::Mul => Some(lhs.wrapping_mul(rhs)),
        ArithmeticOperator::Div => (rhs != 0).then(|| lhs.wrapping_div(rhs)),
        ArithmeticOperator::Mod => (rhs != 0).then(|| lhs.wrapping_rem(rhs)),
    }
}

fn apply_logic(op: LogicOperator, lhs: i64, rhs: i64) -> i64 {
    match op {
        LogicOperator::Greater => (lhs > rhs) as i64,
        LogicOperator::Less => (lhs < rhs) as i64,
        LogicOperator::GreaterEqual => (lhs >= rhs) as i64,
        LogicOperator::LessEqual => (lhs <= rhs) as i64,
        LogicOperator::Equal => (lhs == rhs) as i64,
        LogicOperator::NotEqual => (lhs != rhs) as i64,
        LogicOperator::And => (lhs != 0 && rhs != 0) as i64,
        LogicOperator::Or => (lhs != 0 || rhs != 0) as i64,
        LogicOperator::Xor => lhs ^ rhs,
    }
}
