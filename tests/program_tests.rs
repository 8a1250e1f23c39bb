use minilang::errors::{Fault, LangResult};
use minilang::interpret;
use pretty_assertions::assert_eq;

fn run(source: &str, input: &str) -> LangResult<String> {
    let output = interpret(source, Some("test.ml"), input.as_bytes(), Vec::new())?;
    Ok(String::from_utf8(output).unwrap())
}

#[test]
fn test_counting_loop() -> LangResult<()> {
    assert_eq!(run("x = 0; while (x < 3) { x = x + 1; } print x;", "")?, "3\n");
    Ok(())
}

#[test]
fn test_for_loop() -> LangResult<()> {
    let source = "sum = 0;\n\
                  for (i = 1; i <= 5; i = i + 1) sum = sum + i;\n\
                  print sum;\n\
                  print i;";
    assert_eq!(run(source, "")?, "15\n6\n");
    Ok(())
}

#[test]
fn test_scoping() -> LangResult<()> {
    let source = "var x = 1; { var x = 2; print x; } print x;";
    assert_eq!(run(source, "")?, "2\n1\n");
    Ok(())
}

#[test]
fn test_loop_body_locals_are_fresh() -> LangResult<()> {
    let source = "for (i = 0; i < 3; i = i + 1) { var t = i * 10; print t; }";
    assert_eq!(run(source, "")?, "0\n10\n20\n");
    Ok(())
}

#[test]
fn test_if_else() -> LangResult<()> {
    let source = "n = ?;\n\
                  if (n % 2 == 0) print 0; else print 1;\n\
                  if (n > 100) print 100;";
    assert_eq!(run(source, "7")?, "1\n");
    assert_eq!(run(source, "128")?, "0\n100\n");
    Ok(())
}

#[test]
fn test_reads_all_input() -> LangResult<()> {
    let source = "count = ?; total = 0;\n\
                  while (count > 0) { v = ?; total = total + v; count = count - 1; }\n\
                  print total;";
    assert_eq!(run(source, "4\n10 20\n-5\n   7\n")?, "32\n");
    Ok(())
}

#[test]
fn test_factorial() -> LangResult<()> {
    let source = "n = ?; f = 1;\n\
                  while (n > 1) { f = f * n; n = n - 1; }\n\
                  print f;";
    assert_eq!(run(source, "10")?, "3628800\n");
    Ok(())
}

#[test]
fn test_operators_end_to_end() -> LangResult<()> {
    let source = "print 8 / 3; print 8 % 3; print -8 / 3; print 6 ^ 3;\n\
                  print 5 && 3; print 0 || 0; print !5; print !0;";
    assert_eq!(run(source, "")?, "2\n2\n-2\n5\n1\n0\n0\n1\n");
    Ok(())
}

#[test]
fn test_short_circuit_skips_right_operand() -> LangResult<()> {
    // `missing` is never declared; reaching it would fault
    assert_eq!(run("print 0 && missing; print 1 || missing;", "")?, "0\n1\n");
    assert!(run("print 1 && missing;", "").is_err());
    Ok(())
}

#[test]
fn test_runtime_errors() {
    let cases = [
        ("print y;", "", Fault::UndefinedVariable("y".to_string())),
        ("print 8 / 0;", "", Fault::DivisionByZero),
        ("var a; var a;", "", Fault::DuplicateDeclaration("a".to_string())),
        ("x = ?;", "seven", Fault::InputFormatError),
        ("x = ?;", "", Fault::InputFormatError),
    ];
    for (source, input, fault) in cases {
        let err = run(source, input).unwrap_err();
        assert_eq!(err.fault(), Some(&fault), "running {:?}", source);
    }
}

#[test]
fn test_runtime_error_location() {
    let err = run("var a = 1;\nprint a + b;", "").unwrap_err();
    assert_eq!(err.to_string(), "test.ml:2:11: error: Undefined variable: b");
}
