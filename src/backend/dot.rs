use std::collections::HashMap;
use std::io::Write;

use crate::ast::{
    ArithmeticBinaryOp, Assign, Ast, ExpressionStatement, For, If, Input, Literal, LogicBinaryOp, NodeId, Print,
    Scope, UnaryOp, VariableDeclaration, VariableReference, While,
};
use crate::config::dot::{GRAPH_NAME, NODE_PREFIX, NODE_SHAPE};
use crate::errors::LangResult;
use crate::semantic::AstVisitor;

/// Renders a tree as a Graphviz digraph.
///
/// Every node becomes a box labelled with its kind, its payload and its arena
/// index; every parent/child link becomes an edge. Graph ids are handed out
/// on first mention, so the root is always `n0`.
pub struct DotVisitor<W> {
    out: W,
    ids: HashMap<NodeId, usize>,
}

impl<W: Write> DotVisitor<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            ids: HashMap::new(),
        }
    }

    pub fn create_dot(&mut self, ast: &Ast) -> LangResult<()> {
        self.ids.clear();
        writeln!(self.out, "digraph {} {{", GRAPH_NAME)?;
        if let Some(root) = ast.root() {
            ast.walk(root, self)?;
        }
        writeln!(self.out, "}}")?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn graph_id(&mut self, id: NodeId) -> usize {
        let next = self.ids.len();
        *self.ids.entry(id).or_insert(next)
    }

    fn emit(&mut self, ast: &Ast, id: NodeId, payload: &str) -> LangResult<()> {
        let node = self.graph_id(id);
        writeln!(
            self.out,
            "  {prefix}{node} [shape={NODE_SHAPE},label=\"{kind}\\n{payload}\\n{id}\"]",
            prefix = NODE_PREFIX,
            kind = ast.kind(id).name(),
        )?;
        for child in ast.children(id) {
            let child = self.graph_id(child);
            writeln!(self.out, "  {prefix}{node} -> {prefix}{child}", prefix = NODE_PREFIX)?;
        }
        Ok(())
    }
}

/// Graph text for `ast`.
pub fn render(ast: &Ast) -> LangResult<String> {
    let mut visitor = DotVisitor::new(Vec::new());
    visitor.create_dot(ast)?;
    Ok(String::from_utf8_lossy(&visitor.into_inner()).into_owned())
}

impl<W: Write> AstVisitor for DotVisitor<W> {
    fn visit_arithmetic_op(&mut self, ast: &Ast, id: NodeId, node: &ArithmeticBinaryOp) -> LangResult<()> {
        self.emit(ast, id, node.op().symbol())
    }

    fn visit_logic_op(&mut self, ast: &Ast, id: NodeId, node: &LogicBinaryOp) -> LangResult<()> {
        self.emit(ast, id, node.op().symbol())
    }

    fn visit_unary_op(&mut self, ast: &Ast, id: NodeId, node: &UnaryOp) -> LangResult<()> {
        self.emit(ast, id, node.op().symbol())
    }

    fn visit_scope(&mut self, ast: &Ast, id: NodeId, _node: &Scope) -> LangResult<()> {
        self.emit(ast, id, "scope")
    }

    fn visit_literal(&mut self, ast: &Ast, id: NodeId, node: &Literal) -> LangResult<()> {
        self.emit(ast, id, &node.value().to_string())
    }

    fn visit_print(&mut self, ast: &Ast, id: NodeId, _node: &Print) -> LangResult<()> {
        self.emit(ast, id, "print")
    }

    fn visit_assign(&mut self, ast: &Ast, id: NodeId, _node: &Assign) -> LangResult<()> {
        self.emit(ast, id, "=")
    }

    fn visit_variable(&mut self, ast: &Ast, id: NodeId, node: &VariableReference) -> LangResult<()> {
        self.emit(ast, id, node.name())
    }

    fn visit_variable_declaration(&mut self, ast: &Ast, id: NodeId, node: &VariableDeclaration) -> LangResult<()> {
        self.emit(ast, id, &format!("var_decl {}", node.name()))
    }

    fn visit_expression_statement(&mut self, ast: &Ast, id: NodeId, _node: &ExpressionStatement) -> LangResult<()> {
        self.emit(ast, id, "expr")
    }

    fn visit_if(&mut self, ast: &Ast, id: NodeId, _node: &If) -> LangResult<()> {
        self.emit(ast, id, "if")
    }

    fn visit_while(&mut self, ast: &Ast, id: NodeId, _node: &While) -> LangResult<()> {
        self.emit(ast, id, "while")
    }

    fn visit_for(&mut self, ast: &Ast, id: NodeId, _node: &For) -> LangResult<()> {
        self.emit(ast, id, "for")
    }

    fn visit_input(&mut self, ast: &Ast, id: NodeId, _node: &Input) -> LangResult<()> {
        self.emit(ast, id, "input ?")
    }
}
