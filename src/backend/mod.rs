// Output formats produced from a finished tree.
pub mod dot;

pub use dot::DotVisitor;
