use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Ident(String),
    Number(i64),
    If,
    Else,
    While,
    For,
    Print,
    Var,
    Assign,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    Equal,
    NotEqual,
    And,
    Or,
    Not,
    Xor,
    Question,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Eof,
}

impl Token {
    pub fn keyword(word: &str) -> Option<Token> {
        let token = match word {
            "if" => Token::If,
            "else" => Token::Else,
            "while" => Token::While,
            "for" => Token::For,
            "print" => Token::Print,
            "var" => Token::Var,
            _ => return None,
        };
        Some(token)
    }

    /// Source spelling of fixed tokens.
    pub fn lexeme(&self) -> Option<&'static str> {
        let text = match self {
            Token::Ident(_) | Token::Number(_) | Token::Eof => return None,
            Token::If => "if",
            Token::Else => "else",
            Token::While => "while",
            Token::For => "for",
            Token::Print => "print",
            Token::Var => "var",
            Token::Assign => "=",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Multiply => "*",
            Token::Divide => "/",
            Token::Modulo => "%",
            Token::LessThan => "<",
            Token::GreaterThan => ">",
            Token::LessThanEqual => "<=",
            Token::GreaterThanEqual => ">=",
            Token::Equal => "==",
            Token::NotEqual => "!=",
            Token::And => "&&",
            Token::Or => "||",
            Token::Not => "!",
            Token::Xor => "^",
            Token::Question => "?",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::Comma => ",",
            Token::Semicolon => ";",
        };
        Some(text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "identifier '{}'", name),
            Token::Number(value) => write!(f, "number {}", value),
            Token::Eof => f.write_str("end of input"),
            other => write!(f, "'{}'", other.lexeme().unwrap_or_default()),
        }
    }
}
