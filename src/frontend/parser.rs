/*
*                    minilang -- recursive-descent parser.
*
* program    = { statement } ;
* statement  = "{" { statement } "}"
*            | "if" "(" expression ")" statement [ "else" statement ]
*            | "while" "(" expression ")" statement
*            | "for" "(" [ simple ] ";" expression ";" [ simple ] ")" statement
*            | "print" expression ";"
*            | "var" ident [ "=" expression ] ";"
*            | simple ";" ;
* simple     = ident "=" "?" | ident "=" expression | expression ;
* expression = or ;
* or         = and { "||" and } ;
* and        = xor { "&&" xor } ;
* xor        = equality { "^" equality } ;
* equality   = relational { ( "==" | "!=" ) relational } ;
* relational = additive { ( "<" | ">" | "<=" | ">=" ) additive } ;
* additive   = term { ( "+" | "-" ) term } ;
* term       = unary { ( "*" | "/" | "%" ) unary } ;
* unary      = ( "-" | "+" | "!" ) unary | primary ;
* primary    = number | ident | "(" expression ")" ;
*/

use std::slice::Iter;

use log::debug;

use crate::ast::{ArithmeticOperator, Ast, LogicOperator, NodeId, NodeKind, SourceRange, UnaryOperator};
use crate::errors::{LangError, LangResult, SyntaxError};
use crate::frontend::token::Token;

#[derive(Clone, Copy)]
enum BinaryOperator {
    Arithmetic(ArithmeticOperator),
    Logic(LogicOperator),
}

pub struct Parser<'a> {
    current_token: Token,
    location: SourceRange,
    // range of the last consumed token
    previous: SourceRange,
    iter: Iter<'a, (Token, SourceRange)>,
    ast: Ast,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [(Token, SourceRange)]) -> Self {
        let mut parser = Self {
            current_token: Token::Eof,
            location: SourceRange::default(),
            previous: SourceRange::default(),
            iter: tokens.iter(),
            ast: Ast::new(),
        };
        parser.next();
        parser
    }

    fn next(&mut self) {
        self.previous = self.location.clone();
        match self.iter.next() {
            Some((token, location)) => {
                self.current_token = token.clone();
                self.location = location.clone();
            }
            None => self.current_token = Token::Eof,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.iter.as_slice().first().map(|(token, _)| token)
    }

    fn expect(&mut self, expected: Token) -> LangResult<()> {
        if std::mem::discriminant(&expected) != std::mem::discriminant(&self.current_token) {
            return Err(self.unexpected(expected.to_string()));
        }
        self.next();
        Ok(())
    }

    fn expect_ident(&mut self) -> LangResult<String> {
        match &self.current_token {
            Token::Ident(name) => {
                let name = name.clone();
                self.next();
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn unexpected(&self, expected: impl Into<String>) -> LangError {
        SyntaxError::unexpected(expected, self.current_token.to_string(), self.location.clone()).into()
    }

    // Give `id` the range from `start` to the last consumed token.
    fn finish(&mut self, id: NodeId, start: &SourceRange) -> LangResult<NodeId> {
        self.ast.set_location(id, start.to(&self.previous))?;
        Ok(id)
    }

    /**
     * Parse a whole program into a parentless root scope.
     * program = { statement } .
     */
    pub fn parse(mut self) -> LangResult<Ast> {
        let start = self.location.clone();
        let mut statements = Vec::new();
        while self.current_token != Token::Eof {
            statements.push(self.statement()?);
        }
        let count = statements.len();
        let root = self.ast.scope(statements)?;
        self.finish(root, &start)?;
        self.ast.set_root(root)?;
        debug!("parsed {} top-level statements into {} nodes", count, self.ast.len());
        Ok(self.ast)
    }

    fn statement(&mut self) -> LangResult<NodeId> {
        match self.current_token {
            Token::LBrace => self.block(),
            Token::If => self.if_statement(),
            Token::While => self.while_statement(),
            Token::For => self.for_statement(),
            Token::Print => self.print_statement(),
            Token::Var => self.var_declaration(),
            _ => {
                let start = self.location.clone();
                let expr = self.simple()?;
                self.expect(Token::Semicolon)?;
                let stmt = self.ast.expression_statement(Some(expr))?;
                self.finish(stmt, &start)
            }
        }
    }

    /**
     * block = "{" { statement } "}" .
     */
    fn block(&mut self) -> LangResult<NodeId> {
        let start = self.location.clone();
        self.expect(Token::LBrace)?;
        let mut statements = Vec::new();
        while !matches!(self.current_token, Token::RBrace | Token::Eof) {
            statements.push(self.statement()?);
        }
        self.expect(Token::RBrace)?;
        let scope = self.ast.scope(statements)?;
        self.finish(scope, &start)
    }

    /**
     * "if" "(" expression ")" statement [ "else" statement ] .
     */
    fn if_statement(&mut self) -> LangResult<NodeId> {
        let start = self.location.clone();
        self.expect(Token::If)?;
        let condition = self.parenthesized()?;
        let then_branch = self.statement()?;
        let else_branch = if self.current_token == Token::Else {
            self.next();
            Some(self.statement()?)
        } else {
            None
        };
        let stmt = self.ast.if_node(Some(condition), Some(then_branch), else_branch)?;
        self.finish(stmt, &start)
    }

    /**
     * "while" "(" expression ")" statement .
     */
    fn while_statement(&mut self) -> LangResult<NodeId> {
        let start = self.location.clone();
        self.expect(Token::While)?;
        let condition = self.parenthesized()?;
        let body = self.loop_body()?;
        let stmt = self.ast.while_loop(Some(condition), Some(body))?;
        self.finish(stmt, &start)
    }

    /**
     * "for" "(" [ simple ] ";" expression ";" [ simple ] ")" statement .
     * The condition is mandatory.
     */
    fn for_statement(&mut self) -> LangResult<NodeId> {
        let start = self.location.clone();
        self.expect(Token::For)?;
        self.expect(Token::LParen)?;
        let init = if self.current_token != Token::Semicolon {
            Some(self.simple()?)
        } else {
            None
        };
        self.expect(Token::Semicolon)?;
        if self.current_token == Token::Semicolon {
            return Err(self.unexpected("loop condition"));
        }
        let condition = self.expression()?;
        self.expect(Token::Semicolon)?;
        let step = if self.current_token != Token::RParen {
            Some(self.simple()?)
        } else {
            None
        };
        self.expect(Token::RParen)?;
        let body = self.loop_body()?;
        let stmt = self.ast.for_loop(init, Some(condition), step, Some(body))?;
        self.finish(stmt, &start)
    }

    /**
     * "print" expression ";" .
     */
    fn print_statement(&mut self) -> LangResult<NodeId> {
        let start = self.location.clone();
        self.expect(Token::Print)?;
        let expr = self.expression()?;
        self.expect(Token::Semicolon)?;
        let stmt = self.ast.print(Some(expr))?;
        self.finish(stmt, &start)
    }

    /**
     * "var" ident [ "=" expression ] ";" .
     */
    fn var_declaration(&mut self) -> LangResult<NodeId> {
        let start = self.location.clone();
        self.expect(Token::Var)?;
        let name = self.expect_ident()?;
        let initializer = if self.current_token == Token::Assign {
            self.next();
            Some(self.expression()?)
        } else {
            None
        };
        self.expect(Token::Semicolon)?;
        let decl = self.ast.variable_declaration(name, initializer)?;
        self.finish(decl, &start)
    }

    // Loop bodies are always scopes; a single statement gets wrapped.
    fn loop_body(&mut self) -> LangResult<NodeId> {
        let start = self.location.clone();
        let body = self.statement()?;
        if self.ast.kind(body) == NodeKind::Scope {
            return Ok(body);
        }
        let scope = self.ast.scope([body])?;
        self.finish(scope, &start)
    }

    fn parenthesized(&mut self) -> LangResult<NodeId> {
        self.expect(Token::LParen)?;
        let expr = self.expression()?;
        self.expect(Token::RParen)?;
        Ok(expr)
    }

    /**
     * simple = ident "=" "?" | ident "=" expression | expression .
     */
    fn simple(&mut self) -> LangResult<NodeId> {
        let is_assignment = matches!(self.current_token, Token::Ident(_)) && self.peek() == Some(&Token::Assign);
        if !is_assignment {
            return self.expression();
        }
        let start = self.location.clone();
        let name = self.expect_ident()?;
        let target = self.ast.variable(name);
        self.finish(target, &start)?;
        self.expect(Token::Assign)?;
        let stmt = if self.current_token == Token::Question {
            self.next();
            self.ast.input(Some(target))?
        } else {
            let value = self.expression()?;
            self.ast.assign(Some(target), Some(value))?
        };
        self.finish(stmt, &start)
    }

    fn expression(&mut self) -> LangResult<NodeId> {
        self.or()
    }

    fn binary(
        &mut self,
        operand: fn(&mut Self) -> LangResult<NodeId>,
        operator: fn(&Token) -> Option<BinaryOperator>,
    ) -> LangResult<NodeId> {
        let start = self.location.clone();
        let mut lhs = operand(self)?;
        while let Some(op) = operator(&self.current_token) {
            self.next();
            let rhs = operand(self)?;
            lhs = match op {
                BinaryOperator::Arithmetic(op) => self.ast.arithmetic_op(op, Some(lhs), Some(rhs))?,
                BinaryOperator::Logic(op) => self.ast.logic_op(op, Some(lhs), Some(rhs))?,
            };
            self.finish(lhs, &start)?;
        }
        Ok(lhs)
    }

    fn or(&mut self) -> LangResult<NodeId> {
        self.binary(Self::and, |token| match token {
            Token::Or => Some(BinaryOperator::Logic(LogicOperator::Or)),
            _ => None,
        })
    }

    fn and(&mut self) -> LangResult<NodeId> {
        self.binary(Self::xor, |token| match token {
            Token::And => Some(BinaryOperator::Logic(LogicOperator::And)),
            _ => None,
        })
    }

    fn xor(&mut self) -> LangResult<NodeId> {
        self.binary(Self::equality, |token| match token {
            Token::Xor => Some(BinaryOperator::Logic(LogicOperator::Xor)),
            _ => None,
        })
    }

    fn equality(&mut self) -> LangResult<NodeId> {
        self.binary(Self::relational, |token| match token {
            Token::Equal => Some(BinaryOperator::Logic(LogicOperator::Equal)),
            Token::NotEqual => Some(BinaryOperator::Logic(LogicOperator::NotEqual)),
            _ => None,
        })
    }

    fn relational(&mut self) -> LangResult<NodeId> {
        self.binary(Self::additive, |token| match token {
            Token::LessThan => Some(BinaryOperator::Logic(LogicOperator::Less)),
            Token::GreaterThan => Some(BinaryOperator::Logic(LogicOperator::Greater)),
            Token::LessThanEqual => Some(BinaryOperator::Logic(LogicOperator::LessEqual)),
            Token::GreaterThanEqual => Some(BinaryOperator::Logic(LogicOperator::GreaterEqual)),
            _ => None,
        })
    }

    fn additive(&mut self) -> LangResult<NodeId> {
        self.binary(Self::term, |token| match token {
            Token::Plus => Some(BinaryOperator::Arithmetic(ArithmeticOperator::Add)),
            Token::Minus => Some(BinaryOperator::Arithmetic(ArithmeticOperator::Sub)),
            _ => None,
        })
    }

    fn term(&mut self) -> LangResult<NodeId> {
        self.binary(Self::unary, |token| match token {
            Token::Multiply => Some(BinaryOperator::Arithmetic(ArithmeticOperator::Mul)),
            Token::Divide => Some(BinaryOperator::Arithmetic(ArithmeticOperator::Div)),
            Token::Modulo => Some(BinaryOperator::Arithmetic(ArithmeticOperator::Mod)),
            _ => None,
        })
    }

    /**
     * unary = ( "-" | "+" | "!" ) unary | primary .
     */
    fn unary(&mut self) -> LangResult<NodeId> {
        let op = match self.current_token {
            Token::Minus => UnaryOperator::Negate,
            Token::Plus => UnaryOperator::Identity,
            Token::Not => UnaryOperator::Not,
            _ => return self.primary(),
        };
        let start = self.location.clone();
        self.next();
        let operand = self.unary()?;
        let node = self.ast.unary_op(op, Some(operand))?;
        self.finish(node, &start)
    }

    /**
     * primary = number | ident | "(" expression ")" .
     */
    fn primary(&mut self) -> LangResult<NodeId> {
        let start = self.location.clone();
        let node = match &self.current_token {
            Token::Number(value) => {
                let value = *value;
                self.next();
                self.ast.literal(value)
            }
            Token::Ident(name) => {
                let name = name.clone();
                self.next();
                self.ast.variable(name)
            }
            Token::LParen => return self.parenthesized(),
            _ => return Err(self.unexpected("expression")),
        };
        self.finish(node, &start)
    }
}
