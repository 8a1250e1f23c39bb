use minilang::ast::{ArithmeticOperator, Ast, LogicOperator, NodeData, NodeKind, Slot, UnaryOperator};
use minilang::errors::{ConstructionError, LangError, LangResult};

fn construction_error(result: LangResult<impl std::fmt::Debug>) -> ConstructionError {
    match result {
        Err(LangError::Construction(err)) => err,
        other => panic!("Expected a construction error, but got: {:?}", other),
    }
}

#[test]
fn test_leaf_nodes() {
    let mut ast = Ast::new();
    let five = ast.literal(5);
    let x = ast.variable("x");

    assert_eq!(ast.kind(five), NodeKind::Literal);
    assert_eq!(ast.kind(x), NodeKind::VariableReference);
    assert!(ast.children(five).is_empty());
    assert_eq!(ast.parent(x), None);
    match ast.data(x) {
        NodeData::VariableReference(var) => assert_eq!(var.name(), "x"),
        other => panic!("unexpected payload {:?}", other),
    }
}

#[test]
fn test_parent_linkage() -> LangResult<()> {
    let mut ast = Ast::new();
    let statements: Vec<_> = (0..5).map(|value| ast.literal(value)).collect();
    let scope = ast.scope(statements.clone())?;

    assert_eq!(ast.children(scope), statements);
    for child in statements {
        assert_eq!(ast.parent(child), Some(scope));
    }
    Ok(())
}

#[test]
fn test_role_accessors() -> LangResult<()> {
    let mut ast = Ast::new();
    let left = ast.literal(8);
    let right = ast.literal(3);
    let sum = ast.arithmetic_op(ArithmeticOperator::Add, Some(left), None)?;
    ast.set_right(sum, right)?;

    match ast.data(sum) {
        NodeData::ArithmeticBinaryOp(op) => {
            assert_eq!(op.op(), ArithmeticOperator::Add);
            assert_eq!(op.left(), Some(left));
            assert_eq!(op.right(), Some(right));
        }
        other => panic!("unexpected payload {:?}", other),
    }
    assert_eq!(ast.parent(right), Some(sum));
    Ok(())
}

#[test]
fn test_setting_slot_twice_fails() -> LangResult<()> {
    let mut ast = Ast::new();
    let op = ast.logic_op(LogicOperator::Less, None, None)?;
    let a = ast.literal(1);
    let b = ast.literal(2);
    ast.set_left(op, a)?;

    for _ in 0..3 {
        let err = construction_error(ast.set_left(op, b));
        assert_eq!(
            err,
            ConstructionError::SlotAlreadySet {
                kind: NodeKind::LogicBinaryOp,
                slot: Slot::Left
            }
        );
    }
    assert_eq!(ast.parent(b), None);
    Ok(())
}

#[test]
fn test_every_single_slot_is_exactly_once() -> LangResult<()> {
    let mut ast = Ast::new();
    let node = ast.for_loop(None, None, None, None)?;
    for slot in [Slot::Init, Slot::Condition, Slot::Step, Slot::Body] {
        let first = ast.literal(1);
        let second = ast.literal(2);
        ast.attach(node, slot, first)?;
        let err = construction_error(ast.attach(node, slot, second));
        assert_eq!(err, ConstructionError::SlotAlreadySet { kind: NodeKind::For, slot });
    }
    Ok(())
}

#[test]
fn test_wrong_slot_for_kind() -> LangResult<()> {
    let mut ast = Ast::new();
    let print = ast.print(None)?;
    let value = ast.literal(1);

    let err = construction_error(ast.set_condition(print, value));
    assert_eq!(
        err,
        ConstructionError::NoSuchSlot {
            kind: NodeKind::Print,
            slot: Slot::Condition
        }
    );

    let literal = ast.literal(2);
    let err = construction_error(ast.add_statement(literal, value));
    assert_eq!(
        err,
        ConstructionError::NoSuchSlot {
            kind: NodeKind::Literal,
            slot: Slot::Statement
        }
    );
    Ok(())
}

#[test]
fn test_child_cannot_have_two_parents() -> LangResult<()> {
    let mut ast = Ast::new();
    let shared = ast.variable("x");
    let first = ast.print(Some(shared))?;
    let second = ast.print(None)?;

    let err = construction_error(ast.set_expr(second, shared));
    assert_eq!(err, ConstructionError::AlreadyAttached { kind: NodeKind::VariableReference });
    assert_eq!(ast.parent(shared), Some(first));
    Ok(())
}

#[test]
fn test_cycle_is_rejected() -> LangResult<()> {
    let mut ast = Ast::new();
    let outer = ast.scope([])?;
    let inner = ast.scope([])?;
    ast.add_statement(outer, inner)?;

    let err = construction_error(ast.add_statement(inner, outer));
    assert_eq!(err, ConstructionError::CyclicAttachment { kind: NodeKind::Scope });

    let lonely = ast.scope([])?;
    let err = construction_error(ast.add_statement(lonely, lonely));
    assert_eq!(err, ConstructionError::CyclicAttachment { kind: NodeKind::Scope });
    Ok(())
}

#[test]
fn test_foreign_node_id() -> LangResult<()> {
    let mut big = Ast::new();
    for value in 0..10 {
        big.literal(value);
    }
    let foreign = big.literal(99);

    let mut small = Ast::new();
    let print = small.print(None)?;
    let err = construction_error(small.set_expr(print, foreign));
    assert_eq!(err, ConstructionError::ForeignNode(foreign));
    assert!(!small.contains(foreign));
    Ok(())
}

#[test]
fn test_children_in_role_order() -> LangResult<()> {
    let mut ast = Ast::new();
    // built out of order on purpose
    let body = ast.scope([])?;
    let step = ast.literal(3);
    let condition = ast.literal(2);
    let init = ast.literal(1);
    let node = ast.for_loop(None, None, None, None)?;
    ast.set_body(node, body)?;
    ast.set_step(node, step)?;
    ast.set_condition(node, condition)?;
    ast.set_init(node, init)?;

    assert_eq!(ast.children(node), vec![init, condition, step, body]);

    let cond = ast.variable("c");
    let then_branch = ast.scope([])?;
    let if_node = ast.if_node(None, Some(then_branch), None)?;
    ast.set_condition(if_node, cond)?;
    assert_eq!(ast.children(if_node), vec![cond, then_branch]);
    Ok(())
}

#[test]
fn test_root_handle() -> LangResult<()> {
    let mut ast = Ast::new();
    assert_eq!(ast.root(), None);
    let value = ast.literal(1);
    let neg = ast.unary_op(UnaryOperator::Negate, Some(value))?;

    let err = construction_error(ast.set_root(value));
    assert_eq!(err, ConstructionError::AlreadyAttached { kind: NodeKind::Literal });

    ast.set_root(neg)?;
    assert_eq!(ast.root(), Some(neg));
    assert_eq!(ast.reachable_count(), 2);
    Ok(())
}

#[test]
fn test_evaluable_kinds() {
    let evaluable = [
        NodeKind::ArithmeticBinaryOp,
        NodeKind::LogicBinaryOp,
        NodeKind::UnaryOp,
        NodeKind::Literal,
        NodeKind::VariableReference,
        NodeKind::ExpressionStatement,
    ];
    let statements = [
        NodeKind::Scope,
        NodeKind::Assign,
        NodeKind::While,
        NodeKind::Input,
        NodeKind::VariableDeclaration,
        NodeKind::Print,
        NodeKind::If,
        NodeKind::For,
    ];
    assert!(evaluable.iter().all(|kind| kind.is_evaluable()));
    assert!(statements.iter().all(|kind| !kind.is_evaluable()));
}

#[test]
fn test_foreign_node_location() {
    let mut big = Ast::new();
    let foreign = (0..4).map(|value| big.literal(value)).last().unwrap();

    let mut small = Ast::new();
    small.literal(0);
    let err = construction_error(small.set_location(foreign, Default::default()));
    assert_eq!(err, ConstructionError::ForeignNode(foreign));
}
