use monkey_lang::evaluate;
use monkey_lang::object::{Environment, Object};

fn run(source: &str) -> Object {
    let (result, errors) = evaluate(source, &Environment::new());
    assert_eq!(Vec::<String>::new(), errors);
    result.expect("evaluation should produce a value")
}

fn run_error(expected: &str, source: &str) {
    assert_eq!(Object::Error(expected.into()), run(source), "source: {source}");
}

#[test]
fn parser_errors_refuse_evaluation() {
    let (result, errors) = evaluate("let x 5;", &Environment::new());

    assert_eq!(None, result);
    assert_eq!(
        vec!["expected next token to be =, received INT".to_string()],
        errors
    );
}

#[test]
fn unterminated_strings_surface_as_parser_errors() {
    let (result, errors) = evaluate("\"never closed", &Environment::new());

    assert_eq!(None, result);
    assert_eq!(
        vec!["no prefix parse function for ILLEGAL".to_string()],
        errors
    );
}

#[test]
fn runtime_error_taxonomy() {
    run_error("identifier not found: unknown", "unknown");
    run_error("type mismatch: INTEGER + BOOLEAN", "5 + true");
    run_error("unknown operator: BOOLEAN + BOOLEAN", "true + false");
    run_error("unknown operator: -BOOLEAN", "-true");
    run_error("illegal operation: divide by zero", "10 / 0");
    run_error("not a function: INTEGER", "let x = 5; x(1)");
    run_error(
        "function was called with an incorrect number of arguments: expected 1",
        "fn(x) { x }()",
    );
    run_error(
        "unusable as hash key: FUNCTION",
        "{\"name\": \"Monkey\"}[fn(x){x}]",
    );
    run_error(
        "unhashable object used as a hash key: ARRAY",
        "{[1, 2]: \"value\"}",
    );
    run_error("index operator not supported: INTEGER", "5[0]");
    run_error("maximum stack depth exceeded", "let f = fn(x) { f(x + 1); }; f(1);");
    run_error("maximum iteration count exceeded", "while (true) { 1; };");
}

#[test]
fn builtin_argument_errors() {
    run_error("wrong number of arguments. Expected 1. Got 2.", "len(\"a\", \"b\")");
    run_error("argument to 'len' not supported, got INTEGER", "len(5)");
    run_error("wrong number of arguments. Expected 2. Got 1.", "push([1])");
}

#[test]
fn errors_poison_enclosing_expressions() {
    run_error("identifier not found: boom", "[1, boom, 3]");
    run_error("identifier not found: boom", "1 + boom * 3");
    run_error("identifier not found: boom", "{\"k\": boom}");
    run_error("identifier not found: boom", "len(boom)");
}

#[test]
fn errors_stop_statement_sequences() {
    run_error("type mismatch: INTEGER + BOOLEAN", "let a = 1; a + true; 99");
}
