pub mod lexer;
pub mod parser;
pub mod token;

pub use lexer::Lexer;
pub use parser::Parser;
pub use token::Token;

use crate::ast::Ast;
use crate::errors::LangResult;

/// Lex and parse `source` in one go.
pub fn parse_source(source: &str, file: Option<&str>) -> LangResult<Ast> {
    let tokens = lexer::scan(source, file)?;
    Parser::new(&tokens).parse()
}
