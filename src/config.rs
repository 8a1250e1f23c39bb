// Lexer constants
pub mod lexer {
    pub const FIRST_LINE: u32 = 1;
    pub const FIRST_COLUMN: u32 = 1;
}

// Interpreter constants
pub mod interpreter {
    use lazy_static::lazy_static;
    use regex::Regex;

    lazy_static! {
        /// An integer as accepted from the input stream: optional sign, digits.
        pub static ref INTEGER_TOKEN: Regex = Regex::new(r"^[+-]?[0-9]+$").unwrap();
    }
}

// Graphviz output
pub mod dot {
    pub const GRAPH_NAME: &str = "AST";
    pub const NODE_SHAPE: &str = "box";
    pub const NODE_PREFIX: &str = "n";
}

// Command-line driver
pub mod driver {
    pub const LOG_ENV: &str = "MINILANG_LOG";
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
    pub const VERBOSE_LOG_LEVEL: &str = "debug";
}
