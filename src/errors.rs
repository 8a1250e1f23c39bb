use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::ast::{NodeId, NodeKind, Slot, SourceRange};

/// Renders `file:line:column: error: message`, dropping the location prefix
/// when the position is unknown.
pub fn render_diagnostic(location: Option<&SourceRange>, message: impl std::fmt::Display) -> String {
    match location {
        Some(location) if location.is_known() => format!("{}: error: {}", location, message),
        _ => format!("error: {}", message),
    }
}

fn found_kind(kind: &Option<NodeKind>) -> String {
    match kind {
        Some(kind) => kind.to_string(),
        None => "nothing".to_string(),
    }
}

/// Violations of the tree-building rules. These point at a bug in whatever
/// builds the tree, not at the program being run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("{slot} of {kind} is already set")]
    SlotAlreadySet { kind: NodeKind, slot: Slot },
    #[error("{kind} has no {slot}")]
    NoSuchSlot { kind: NodeKind, slot: Slot },
    #[error("{kind} already has a place in the tree")]
    AlreadyAttached { kind: NodeKind },
    #[error("attaching {kind} would create a cycle")]
    CyclicAttachment { kind: NodeKind },
    #[error("node {0} does not belong to this tree")]
    ForeignNode(NodeId),
}

/// Conditions that abort evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),
    #[error("Missing operand in {0}")]
    MissingOperand(NodeKind),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Invalid assignment target: expected variable reference, found {}", found_kind(.0))]
    InvalidAssignTarget(Option<NodeKind>),
    #[error("Variable {0} already declared")]
    DuplicateDeclaration(String),
    #[error("Missing condition in {0}")]
    MissingCondition(NodeKind),
    #[error("Invalid condition: {0} does not produce a value")]
    InvalidCondition(NodeKind),
    #[error("Missing then branch in if statement")]
    MissingThenBranch,
    #[error("Missing body in {0}")]
    MissingBody(NodeKind),
    #[error("Invalid loop body: expected scope, found {0}")]
    InvalidBody(NodeKind),
    #[error("Invalid input target: expected variable reference, found {}", found_kind(.0))]
    InvalidInputTarget(Option<NodeKind>),
    #[error("Input error: expected integer")]
    InputFormatError,
    #[error("Missing expression in {0}")]
    MissingExpression(NodeKind),
    #[error("Invalid expression: {0} does not produce a value")]
    InvalidExpressionContext(NodeKind),
    #[error("Trying to leave from global scope")]
    LeavingGlobalScope,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_diagnostic(.location.as_ref(), .fault))]
pub struct RuntimeError {
    pub fault: Fault,
    pub location: Option<SourceRange>,
}

impl RuntimeError {
    pub fn new(fault: Fault, location: &SourceRange) -> Self {
        Self {
            fault,
            location: location.is_known().then(|| location.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("Unknown character '{0}'")]
    UnknownCharacter(char),
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
    #[error("Expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_diagnostic(Some(.location), .kind))]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub location: SourceRange,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, location: SourceRange) -> Self {
        Self { kind, location }
    }

    pub fn unexpected(expected: impl Into<String>, found: impl Into<String>, location: SourceRange) -> Self {
        Self::new(
            SyntaxErrorKind::UnexpectedToken {
                expected: expected.into(),
                found: found.into(),
            },
            location,
        )
    }
}

#[derive(Debug, Error)]
pub enum LangError {
    // File and I/O errors
    #[error("error: failed to read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error: {0}")]
    Io(#[from] io::Error),

    // Lexical and parsing errors
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    // Tree construction errors
    #[error("error: {0}")]
    Construction(#[from] ConstructionError),

    // Evaluation faults
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl LangError {
    /// Create a runtime fault located at `location`
    pub fn runtime(fault: Fault, location: &SourceRange) -> Self {
        LangError::Runtime(RuntimeError::new(fault, location))
    }

    pub fn fault(&self) -> Option<&Fault> {
        match self {
            LangError::Runtime(err) => Some(&err.fault),
            _ => None,
        }
    }

    pub fn construction(&self) -> Option<&ConstructionError> {
        match self {
            LangError::Construction(err) => Some(err),
            _ => None,
        }
    }

    pub fn syntax(&self) -> Option<&SyntaxErrorKind> {
        match self {
            LangError::Syntax(err) => Some(&err.kind),
            _ => None,
        }
    }
}

pub type LangResult<T> = Result<T, LangError>;
