pub mod variable_table;
pub mod visiters;

pub use variable_table::VariableTable;
pub use visiters::AstVisitor;
