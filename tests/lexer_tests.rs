use minilang::ast::SourceRange;
use minilang::errors::{LangError, LangResult, SyntaxErrorKind};
use minilang::frontend::lexer::scan;
use minilang::frontend::token::Token;
use pretty_assertions::assert_eq;

fn tokens(source: &str) -> LangResult<Vec<Token>> {
    Ok(scan(source, None)?.into_iter().map(|(token, _)| token).collect())
}

#[test]
fn test_number_literals() -> LangResult<()> {
    assert_eq!(
        tokens("123 456 0 9223372036854775807")?,
        vec![
            Token::Number(123),
            Token::Number(456),
            Token::Number(0),
            Token::Number(i64::MAX),
        ]
    );
    Ok(())
}

#[test]
fn test_keywords_and_identifiers() -> LangResult<()> {
    assert_eq!(
        tokens("if else while for print var iffy _tmp x1")?,
        vec![
            Token::If,
            Token::Else,
            Token::While,
            Token::For,
            Token::Print,
            Token::Var,
            Token::Ident("iffy".to_string()),
            Token::Ident("_tmp".to_string()),
            Token::Ident("x1".to_string()),
        ]
    );
    Ok(())
}

#[test]
fn test_operators() -> LangResult<()> {
    assert_eq!(
        tokens("= == ! != < <= > >= && || ^ + - * / % ?")?,
        vec![
            Token::Assign,
            Token::Equal,
            Token::Not,
            Token::NotEqual,
            Token::LessThan,
            Token::LessThanEqual,
            Token::GreaterThan,
            Token::GreaterThanEqual,
            Token::And,
            Token::Or,
            Token::Xor,
            Token::Plus,
            Token::Minus,
            Token::Multiply,
            Token::Divide,
            Token::Modulo,
            Token::Question,
        ]
    );
    Ok(())
}

#[test]
fn test_punctuation_without_spaces() -> LangResult<()> {
    assert_eq!(
        tokens("x=?;{print(x);}")?,
        vec![
            Token::Ident("x".to_string()),
            Token::Assign,
            Token::Question,
            Token::Semicolon,
            Token::LBrace,
            Token::Print,
            Token::LParen,
            Token::Ident("x".to_string()),
            Token::RParen,
            Token::Semicolon,
            Token::RBrace,
        ]
    );
    Ok(())
}

#[test]
fn test_comments() -> LangResult<()> {
    let source = "// leading comment\nx = 1; // trailing\n// x = 2;\nprint x;";
    assert_eq!(
        tokens(source)?,
        vec![
            Token::Ident("x".to_string()),
            Token::Assign,
            Token::Number(1),
            Token::Semicolon,
            Token::Print,
            Token::Ident("x".to_string()),
            Token::Semicolon,
        ]
    );
    // a single slash is still division
    assert_eq!(tokens("8 / 2")?, vec![Token::Number(8), Token::Divide, Token::Number(2)]);
    Ok(())
}

#[test]
fn test_locations() -> LangResult<()> {
    let scanned = scan("var total;\n  print total;", Some("sum.ml"))?;
    let ranges: Vec<SourceRange> = scanned.into_iter().map(|(_, range)| range).collect();
    assert_eq!(
        ranges,
        vec![
            SourceRange::new(Some("sum.ml"), 1, 1, 1, 3),
            SourceRange::new(Some("sum.ml"), 1, 5, 1, 9),
            SourceRange::new(Some("sum.ml"), 1, 10, 1, 10),
            SourceRange::new(Some("sum.ml"), 2, 3, 2, 7),
            SourceRange::new(Some("sum.ml"), 2, 9, 2, 13),
            SourceRange::new(Some("sum.ml"), 2, 14, 2, 14),
        ]
    );
    Ok(())
}

#[test]
fn test_empty_source() -> LangResult<()> {
    assert!(tokens("")?.is_empty());
    assert!(tokens("  \n\t // only a comment")?.is_empty());
    Ok(())
}

#[test]
fn test_unknown_character() {
    let result = scan("x = 1 @ 2;", Some("bad.ml"));
    match result {
        Err(LangError::Syntax(err)) => {
            assert_eq!(err.kind, SyntaxErrorKind::UnknownCharacter('@'));
            assert_eq!(err.to_string(), "bad.ml:1:7: error: Unknown character '@'");
        }
        other => panic!("Expected a syntax error for '@', but got: {:?}", other),
    }
}

#[test]
fn test_single_ampersand_and_pipe() {
    for (source, ch) in [("a & b", '&'), ("a | b", '|')] {
        let err = scan(source, None).unwrap_err();
        assert_eq!(err.syntax(), Some(&SyntaxErrorKind::UnknownCharacter(ch)));
    }
}

#[test]
fn test_number_too_large() {
    let err = scan("print 9223372036854775808;", None).unwrap_err();
    assert_eq!(
        err.syntax(),
        Some(&SyntaxErrorKind::InvalidNumber("9223372036854775808".to_string()))
    );
    assert_eq!(err.to_string(), "1:7: error: Invalid number '9223372036854775808'");
}
