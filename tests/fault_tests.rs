use std::io;

use minilang::ast::{ArithmeticOperator, Ast, LogicOperator, NodeId, NodeKind, SourceRange};
use minilang::errors::{Fault, LangError, LangResult};
use minilang::interpreter::Interpreter;
use pretty_assertions::assert_eq;

fn run_fault(ast: &Ast) -> Fault {
    let mut interp = Interpreter::new(io::empty(), io::sink());
    match interp.run(ast) {
        Err(LangError::Runtime(err)) => err.fault,
        other => panic!("Expected a runtime fault, but got: {:?}", other),
    }
}

fn with_root(mut ast: Ast, statement: NodeId) -> LangResult<Ast> {
    let root = ast.scope([statement])?;
    ast.set_root(root)?;
    Ok(ast)
}

/// One node of every kind that cannot stand where a value is expected.
fn non_evaluable(ast: &mut Ast, kind: NodeKind) -> LangResult<NodeId> {
    Ok(match kind {
        NodeKind::Scope => ast.scope([])?,
        NodeKind::Assign => {
            let x = ast.variable("x");
            let one = ast.literal(1);
            ast.assign(Some(x), Some(one))?
        }
        NodeKind::While => {
            let cond = ast.literal(0);
            let body = ast.scope([])?;
            ast.while_loop(Some(cond), Some(body))?
        }
        NodeKind::Input => {
            let x = ast.variable("x");
            ast.input(Some(x))?
        }
        NodeKind::VariableDeclaration => ast.variable_declaration("x", None)?,
        NodeKind::Print => {
            let one = ast.literal(1);
            ast.print(Some(one))?
        }
        NodeKind::If => {
            let cond = ast.literal(0);
            let then_branch = ast.scope([])?;
            ast.if_node(Some(cond), Some(then_branch), None)?
        }
        NodeKind::For => {
            let cond = ast.literal(0);
            let body = ast.scope([])?;
            ast.for_loop(None, Some(cond), None, Some(body))?
        }
        other => panic!("{} produces a value", other),
    })
}

const NON_EVALUABLE: [NodeKind; 8] = [
    NodeKind::Scope,
    NodeKind::Assign,
    NodeKind::While,
    NodeKind::Input,
    NodeKind::VariableDeclaration,
    NodeKind::Print,
    NodeKind::If,
    NodeKind::For,
];

#[test]
fn test_print_rejects_statements() -> LangResult<()> {
    for kind in NON_EVALUABLE {
        let mut ast = Ast::new();
        let expr = non_evaluable(&mut ast, kind)?;
        let print = ast.print(Some(expr))?;
        let ast = with_root(ast, print)?;
        assert_eq!(run_fault(&ast), Fault::InvalidExpressionContext(kind));
    }
    Ok(())
}

#[test]
fn test_conditions_reject_statements() -> LangResult<()> {
    for kind in NON_EVALUABLE {
        let mut ast = Ast::new();
        let cond = non_evaluable(&mut ast, kind)?;
        let body = ast.scope([])?;
        let while_loop = ast.while_loop(Some(cond), Some(body))?;
        let ast = with_root(ast, while_loop)?;
        assert_eq!(run_fault(&ast), Fault::InvalidCondition(kind));

        let mut ast = Ast::new();
        let cond = non_evaluable(&mut ast, kind)?;
        let then_branch = ast.scope([])?;
        let if_node = ast.if_node(Some(cond), Some(then_branch), None)?;
        let ast = with_root(ast, if_node)?;
        assert_eq!(run_fault(&ast), Fault::InvalidCondition(kind));
    }
    Ok(())
}

#[test]
fn test_undefined_variable() -> LangResult<()> {
    let mut ast = Ast::new();
    let y = ast.variable("y");
    let print = ast.print(Some(y))?;
    let ast = with_root(ast, print)?;
    assert_eq!(run_fault(&ast), Fault::UndefinedVariable("y".to_string()));
    Ok(())
}

#[test]
fn test_missing_operands() -> LangResult<()> {
    let mut ast = Ast::new();
    let one = ast.literal(1);
    let sum = ast.arithmetic_op(ArithmeticOperator::Add, Some(one), None)?;
    let print = ast.print(Some(sum))?;
    let ast = with_root(ast, print)?;
    assert_eq!(run_fault(&ast), Fault::MissingOperand(NodeKind::ArithmeticBinaryOp));

    let mut ast = Ast::new();
    let zero = ast.literal(0);
    let or = ast.logic_op(LogicOperator::Or, Some(zero), None)?;
    let print = ast.print(Some(or))?;
    let ast = with_root(ast, print)?;
    assert_eq!(run_fault(&ast), Fault::MissingOperand(NodeKind::LogicBinaryOp));

    // decided by the left operand, so the gap is never reached
    let mut ast = Ast::new();
    let one = ast.literal(1);
    let or = ast.logic_op(LogicOperator::Or, Some(one), None)?;
    let print = ast.print(Some(or))?;
    let ast = with_root(ast, print)?;
    let mut interp = Interpreter::new(io::empty(), Vec::new());
    interp.run(&ast)?;
    assert_eq!(interp.into_output(), b"1\n");
    Ok(())
}

#[test]
fn test_assign_target_must_be_variable() -> LangResult<()> {
    let mut ast = Ast::new();
    let five = ast.literal(5);
    let one = ast.literal(1);
    let assign = ast.assign(Some(five), Some(one))?;
    let ast = with_root(ast, assign)?;
    assert_eq!(run_fault(&ast), Fault::InvalidAssignTarget(Some(NodeKind::Literal)));

    let mut ast = Ast::new();
    let one = ast.literal(1);
    let assign = ast.assign(None, Some(one))?;
    let ast = with_root(ast, assign)?;
    assert_eq!(run_fault(&ast), Fault::InvalidAssignTarget(None));
    Ok(())
}

#[test]
fn test_input_target_must_be_variable() -> LangResult<()> {
    let mut ast = Ast::new();
    let five = ast.literal(5);
    let input = ast.input(Some(five))?;
    let ast = with_root(ast, input)?;
    assert_eq!(run_fault(&ast), Fault::InvalidInputTarget(Some(NodeKind::Literal)));

    let mut ast = Ast::new();
    let input = ast.input(None)?;
    let ast = with_root(ast, input)?;
    assert_eq!(run_fault(&ast), Fault::InvalidInputTarget(None));
    Ok(())
}

#[test]
fn test_missing_loop_parts() -> LangResult<()> {
    let mut ast = Ast::new();
    let body = ast.scope([])?;
    let while_loop = ast.while_loop(None, Some(body))?;
    let ast = with_root(ast, while_loop)?;
    assert_eq!(run_fault(&ast), Fault::MissingCondition(NodeKind::While));

    let mut ast = Ast::new();
    let cond = ast.literal(1);
    let while_loop = ast.while_loop(Some(cond), None)?;
    let ast = with_root(ast, while_loop)?;
    assert_eq!(run_fault(&ast), Fault::MissingBody(NodeKind::While));

    let mut ast = Ast::new();
    let body = ast.scope([])?;
    let for_loop = ast.for_loop(None, None, None, Some(body))?;
    let ast = with_root(ast, for_loop)?;
    assert_eq!(run_fault(&ast), Fault::MissingCondition(NodeKind::For));

    let mut ast = Ast::new();
    let cond = ast.literal(0);
    let for_loop = ast.for_loop(None, Some(cond), None, None)?;
    let ast = with_root(ast, for_loop)?;
    assert_eq!(run_fault(&ast), Fault::MissingBody(NodeKind::For));
    Ok(())
}

#[test]
fn test_loop_body_must_be_scope() -> LangResult<()> {
    let mut ast = Ast::new();
    let cond = ast.literal(0);
    let one = ast.literal(1);
    let body = ast.print(Some(one))?;
    let while_loop = ast.while_loop(Some(cond), Some(body))?;
    let ast = with_root(ast, while_loop)?;
    assert_eq!(run_fault(&ast), Fault::InvalidBody(NodeKind::Print));

    let mut ast = Ast::new();
    let cond = ast.literal(0);
    let body = ast.literal(1);
    let for_loop = ast.for_loop(None, Some(cond), None, Some(body))?;
    let ast = with_root(ast, for_loop)?;
    assert_eq!(run_fault(&ast), Fault::InvalidBody(NodeKind::Literal));
    Ok(())
}

#[test]
fn test_if_branches() -> LangResult<()> {
    let mut ast = Ast::new();
    let cond = ast.literal(1);
    let if_node = ast.if_node(Some(cond), None, None)?;
    let ast = with_root(ast, if_node)?;
    assert_eq!(run_fault(&ast), Fault::MissingThenBranch);

    let mut ast = Ast::new();
    let if_node = ast.if_node(None, None, None)?;
    let ast = with_root(ast, if_node)?;
    assert_eq!(run_fault(&ast), Fault::MissingCondition(NodeKind::If));

    // a false condition never looks at the then branch
    let mut ast = Ast::new();
    let cond = ast.literal(0);
    let if_node = ast.if_node(Some(cond), None, None)?;
    let ast = with_root(ast, if_node)?;
    Interpreter::new(io::empty(), io::sink()).run(&ast)?;
    Ok(())
}

#[test]
fn test_missing_expressions() -> LangResult<()> {
    let mut ast = Ast::new();
    let print = ast.print(None)?;
    let ast = with_root(ast, print)?;
    assert_eq!(run_fault(&ast), Fault::MissingExpression(NodeKind::Print));

    let mut ast = Ast::new();
    let stmt = ast.expression_statement(None)?;
    let ast = with_root(ast, stmt)?;
    assert_eq!(run_fault(&ast), Fault::MissingExpression(NodeKind::ExpressionStatement));
    Ok(())
}

#[test]
fn test_fault_unwinds_all_scopes() -> LangResult<()> {
    // { var a = 1; { var b = 2; { print y; } } }
    let mut ast = Ast::new();
    let y = ast.variable("y");
    let print = ast.print(Some(y))?;
    let innermost = ast.scope([print])?;
    let two = ast.literal(2);
    let b = ast.variable_declaration("b", Some(two))?;
    let middle = ast.scope([b, innermost])?;
    let one = ast.literal(1);
    let a = ast.variable_declaration("a", Some(one))?;
    let outer = ast.scope([a, middle])?;
    let ast = with_root(ast, outer)?;

    let mut interp = Interpreter::new(io::empty(), io::sink());
    let err = interp.run(&ast).unwrap_err();
    assert_eq!(err.fault(), Some(&Fault::UndefinedVariable("y".to_string())));
    assert_eq!(interp.variables().get_scopes_len(), 1);
    assert_eq!(interp.variables().get("a"), None);
    assert_eq!(interp.variables().get("b"), None);
    Ok(())
}

#[test]
fn test_fault_inside_loop_unwinds_body_scope() -> LangResult<()> {
    // i = 3; while (1) { i = i - 1; print 6 / i; }
    let mut ast = Ast::new();
    let i = ast.variable("i");
    let three = ast.literal(3);
    let init = ast.assign(Some(i), Some(three))?;

    let i1 = ast.variable("i");
    let i2 = ast.variable("i");
    let one = ast.literal(1);
    let dec = ast.arithmetic_op(ArithmeticOperator::Sub, Some(i2), Some(one))?;
    let update = ast.assign(Some(i1), Some(dec))?;
    let six = ast.literal(6);
    let i3 = ast.variable("i");
    let div = ast.arithmetic_op(ArithmeticOperator::Div, Some(six), Some(i3))?;
    let print = ast.print(Some(div))?;
    let body = ast.scope([update, print])?;
    let cond = ast.literal(1);
    let while_loop = ast.while_loop(Some(cond), Some(body))?;

    let root = ast.scope([init, while_loop])?;
    ast.set_root(root)?;

    let mut interp = Interpreter::new(io::empty(), Vec::new());
    let err = interp.run(&ast).unwrap_err();
    assert_eq!(err.fault(), Some(&Fault::DivisionByZero));
    assert_eq!(interp.variables().get_scopes_len(), 1);
    assert_eq!(interp.variables().get("i"), Some(0));
    assert_eq!(interp.into_output(), b"3\n6\n");
    Ok(())
}

#[test]
fn test_diagnostic_with_location() -> LangResult<()> {
    let mut ast = Ast::new();
    let y = ast.variable("y");
    ast.set_location(y, SourceRange::new(Some("prog.ml"), 4, 11, 4, 11))?;
    let print = ast.print(Some(y))?;
    let ast = with_root(ast, print)?;

    let err = Interpreter::new(io::empty(), io::sink()).run(&ast).unwrap_err();
    assert_eq!(err.to_string(), "prog.ml:4:11: error: Undefined variable: y");
    Ok(())
}

#[test]
fn test_diagnostic_without_location() -> LangResult<()> {
    let mut ast = Ast::new();
    let eight = ast.literal(8);
    let zero = ast.literal(0);
    let div = ast.arithmetic_op(ArithmeticOperator::Mod, Some(eight), Some(zero))?;
    let print = ast.print(Some(div))?;
    let ast = with_root(ast, print)?;

    let err = Interpreter::new(io::empty(), io::sink()).run(&ast).unwrap_err();
    assert_eq!(err.to_string(), "error: Division by zero");
    Ok(())
}

#[test]
fn test_input_that_is_not_utf8() -> LangResult<()> {
    let mut ast = Ast::new();
    let x = ast.variable("x");
    let read = ast.input(Some(x))?;
    let ast = with_root(ast, read)?;

    let mut interp = Interpreter::new(&b"\xff\n7\n"[..], io::sink());
    let err = interp.run(&ast).unwrap_err();
    assert_eq!(err.fault(), Some(&Fault::InputFormatError));
    assert_eq!(err.to_string(), "error: Input error: expected integer");

    interp.run(&ast)?;
    assert_eq!(interp.variables().get("x"), Some(7));
    Ok(())
}
