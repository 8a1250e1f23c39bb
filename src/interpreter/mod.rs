//! Tree-walking evaluator.
//!
//! The interpreter is an [`AstVisitor`](crate::semantic::AstVisitor) that
//! recurses on its own: every handler decides which children to evaluate
//! and in which order. Expression handlers leave their result in a single
//! register that the caller reads right after the child returns.

mod expression_handlers;
mod input;
mod scope_guard;
mod statement_handlers;
mod visitor;

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use log::{debug, trace};

use crate::ast::{Ast, NodeId};
use crate::errors::{Fault, LangError, LangResult};
use crate::semantic::VariableTable;

pub use input::InputReader;
pub use scope_guard::ScopedInterpreter;

pub struct Interpreter<R, W> {
    pub(crate) table: VariableTable,
    pub(crate) last_value: i64,
    pub(crate) input: InputReader<R>,
    pub(crate) output: W,
}

impl Interpreter<StdinLock<'static>, Stdout> {
    /// An interpreter reading the process stdin and printing to stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            table: VariableTable::new(),
            last_value: 0,
            input: InputReader::new(input),
            output,
        }
    }

    /// Run the program rooted at the tree's root. An empty tree does nothing.
    pub fn run(&mut self, ast: &Ast) -> LangResult<()> {
        let Some(root) = ast.root() else {
            debug!("nothing to interpret");
            return Ok(());
        };
        debug!("interpreting {} nodes", ast.reachable_count());
        let result = ast.accept(root, self);
        self.output.flush()?;
        result
    }

    /// Evaluate one node and return the value it left in the register.
    pub fn evaluate(&mut self, ast: &Ast, id: NodeId) -> LangResult<i64> {
        ast.accept(id, self)?;
        trace!("{} {} evaluated to {}", ast.kind(id).name(), id, self.last_value);
        Ok(self.last_value)
    }

    pub fn last_value(&self) -> i64 {
        self.last_value
    }

    pub fn variables(&self) -> &VariableTable {
        &self.table
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Give back both streams. Input already buffered by the reader for the
    /// current line is lost.
    pub fn into_io(self) -> (R, W) {
        (self.input.into_inner(), self.output)
    }
}

/// A fault located at `id`.
pub(crate) fn fault_at(ast: &Ast, id: NodeId, fault: Fault) -> LangError {
    LangError::runtime(fault, ast.location(id))
}
