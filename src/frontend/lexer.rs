use std::{iter::Peekable, str::Chars};

use crate::ast::SourceRange;
use crate::config::lexer::{FIRST_COLUMN, FIRST_LINE};
use crate::errors::{LangResult, SyntaxError, SyntaxErrorKind};
use crate::frontend::token::Token;

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    file: Option<&'a str>,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(file_content: &'a str, file: Option<&'a str>) -> Self {
        Self {
            chars: file_content.chars().peekable(),
            file,
            line: FIRST_LINE,
            column: FIRST_COLUMN,
        }
    }

    pub fn scan(mut self) -> LangResult<Vec<(Token, SourceRange)>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            let Some(&ch) = self.chars.peek() else {
                break;
            };
            let (line, column) = (self.line, self.column);
            let token = self.scan_token(ch)?;
            // tokens never span lines
            let range = SourceRange::new(self.file, line, column, self.line, self.column - 1);
            tokens.push((token, range));
        }
        Ok(tokens)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = FIRST_COLUMN;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn peek_second(&self) -> Option<char> {
        self.chars.clone().nth(1)
    }

    fn here(&self) -> SourceRange {
        SourceRange::point(self.file, self.line, self.column)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.chars.peek().copied() {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_second() == Some('/') => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn scan_token(&mut self, ch: char) -> LangResult<Token> {
        match ch {
            ch if ch.is_ascii_alphabetic() || ch == '_' => Ok(self.scan_identifier()),
            ch if ch.is_ascii_digit() => self.scan_number(),
            '=' => Ok(self.scan_with_equals(Token::Assign, Token::Equal)),
            '!' => Ok(self.scan_with_equals(Token::Not, Token::NotEqual)),
            '<' => Ok(self.scan_with_equals(Token::LessThan, Token::LessThanEqual)),
            '>' => Ok(self.scan_with_equals(Token::GreaterThan, Token::GreaterThanEqual)),
            '&' => self.scan_doubled('&', Token::And),
            '|' => self.scan_doubled('|', Token::Or),
            _ => self.scan_single_char_token(ch),
        }
    }

    fn scan_identifier(&mut self) -> Token {
        let mut identifier = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        Token::keyword(&identifier).unwrap_or(Token::Ident(identifier))
    }

    fn scan_number(&mut self) -> LangResult<Token> {
        let start = self.here();
        let mut number_str = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() {
                number_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        match number_str.parse::<i64>() {
            Ok(value) => Ok(Token::Number(value)),
            Err(_) => Err(SyntaxError::new(SyntaxErrorKind::InvalidNumber(number_str), start).into()),
        }
    }

    // `single` alone, or `double` when followed by '='
    fn scan_with_equals(&mut self, single: Token, double: Token) -> Token {
        self.advance();
        if self.chars.peek() == Some(&'=') {
            self.advance();
            double
        } else {
            single
        }
    }

    fn scan_doubled(&mut self, ch: char, token: Token) -> LangResult<Token> {
        let start = self.here();
        self.advance();
        if self.chars.peek() == Some(&ch) {
            self.advance();
            Ok(token)
        } else {
            Err(SyntaxError::new(SyntaxErrorKind::UnknownCharacter(ch), start).into())
        }
    }

    fn scan_single_char_token(&mut self, ch: char) -> LangResult<Token> {
        let start = self.here();
        let token = match ch {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Multiply,
            '/' => Token::Divide,
            '%' => Token::Modulo,
            '^' => Token::Xor,
            '?' => Token::Question,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            _ => return Err(SyntaxError::new(SyntaxErrorKind::UnknownCharacter(ch), start).into()),
        };
        self.advance();
        Ok(token)
    }
}

// Convenience function mirroring `Lexer::new(..).scan()`
pub fn scan(file_content: &str, file: Option<&str>) -> LangResult<Vec<(Token, SourceRange)>> {
    Lexer::new(file_content, file).scan()
}
