// Abstract syntax tree for minilang.
// Nodes live in an arena owned by `Ast`; see `tree.rs` for the building rules.

mod node;
mod operators;
mod source_range;
mod tree;

pub use node::{
    ArithmeticBinaryOp, Assign, ExpressionStatement, For, If, Input, Literal, LogicBinaryOp, Node, NodeData, NodeId,
    NodeKind, Print, Scope, Slot, UnaryOp, VariableDeclaration, VariableReference, While,
};
pub use operators::{ArithmeticOperator, LogicOperator, UnaryOperator};
pub use source_range::SourceRange;
pub use tree::Ast;
