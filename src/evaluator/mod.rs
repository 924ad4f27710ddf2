//! Tree-walking evaluator for Monkey.
//!
//! A single recursive dispatch reduces AST nodes to [`Object`] values.
//! Runtime failures are returned, not thrown: every error produces an
//! `Object::Error` that poisons further evaluation within the statement
//! until the program boundary returns it. `ReturnValue` wrappers bubble
//! through blocks untouched and are unwrapped exactly once, at the
//! enclosing function call (or the program boundary).

mod builtins;

use std::rc::Rc;

use crate::ast::{
    BinaryOp, Block, Expression, FnCall, HashLiteral, Ident, If, Indexing, PrefixOp, Program,
    Statement, WhileLoop,
};
use crate::object::{Env, Environment, Function, HashPair, Object};

/// Canonical singleton values. Scalar comparisons collapse to plain value
/// equality because every occurrence is this exact value.
pub(crate) const TRUE: Object = Object::Boolean(true);
pub(crate) const FALSE: Object = Object::Boolean(false);
pub(crate) const NULL: Object = Object::Null;

/// Hard cap on nested function invocations.
const MAX_STACK_DEPTH: usize = 150;

/// Hard cap on the iterations of a single `while` loop.
const MAX_LOOP_ITERATIONS: usize = 100_000;

/// Walks a program and reduces it to a single value. Carries the call-depth
/// counter that backs the stack-depth cap.
#[derive(Debug, Default)]
pub struct Evaluator {
    depth: usize,
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator::default()
    }

    /// Evaluate all statements in order. A `ReturnValue` is unwrapped here,
    /// so a bare top-level `return` yields the returned value.
    pub fn eval_program(&mut self, program: &Program, env: &Env) -> Object {
        let mut result = NULL;

        for statement in &program.statements {
            match self.eval_statement(statement, env) {
                Object::ReturnValue(value) => return *value,
                error @ Object::Error(_) => return error,
                value => {
                    // A let statement has no result value; the program's
                    // result stays whatever the previous statement produced.
                    if !matches!(statement, Statement::Let(_)) {
                        result = value;
                    }
                }
            }
        }

        result
    }

    /// Same sequential evaluation as a program, but `ReturnValue` is NOT
    /// unwrapped: it bubbles out so the enclosing call unwraps it once.
    fn eval_block(&mut self, block: &Block, env: &Env) -> Object {
        let mut result = NULL;

        for statement in &block.statements {
            match self.eval_statement(statement, env) {
                value @ (Object::ReturnValue(_) | Object::Error(_)) => return value,
                value => {
                    if !matches!(statement, Statement::Let(_)) {
                        result = value;
                    }
                }
            }
        }

        result
    }

    fn eval_statement(&mut self, statement: &Statement, env: &Env) -> Object {
        match statement {
            Statement::Let(declaration) => {
                let value = self.eval_expression(&declaration.value, env);
                if value.is_error() {
                    return value;
                }
                env.borrow_mut().set(declaration.name.value.clone(), value);
                NULL
            }
            Statement::Return(statement) => {
                let value = match &statement.value {
                    Some(expression) => {
                        let value = self.eval_expression(expression, env);
                        if value.is_error() {
                            return value;
                        }
                        value
                    }
                    None => NULL,
                };
                Object::ReturnValue(Box::new(value))
            }
            Statement::Expression(expression) => self.eval_expression(expression, env),
        }
    }

    fn eval_expression(&mut self, expression: &Expression, env: &Env) -> Object {
        match expression {
            Expression::Ident(ident) => eval_identifier(ident, env),
            Expression::Integer(integer) => Object::Integer(integer.value),
            Expression::Boolean(boolean) => bool_object(boolean.value),
            Expression::Str(string) => Object::Str(string.value.clone()),
            Expression::Array(array) => match self.eval_expressions(&array.elements, env) {
                Ok(elements) => Object::Array(elements),
                Err(error) => error,
            },
            Expression::Hash(hash) => self.eval_hash_literal(hash, env),
            Expression::Prefix(prefix) => {
                let right = self.eval_expression(&prefix.right, env);
                if right.is_error() {
                    return right;
                }
                eval_prefix_expression(prefix.operator, right)
            }
            Expression::Infix(infix) => {
                let left = self.eval_expression(&infix.left, env);
                if left.is_error() {
                    return left;
                }
                let right = self.eval_expression(&infix.right, env);
                if right.is_error() {
                    return right;
                }
                eval_infix_expression(infix.operator, left, right)
            }
            Expression::If(if_expression) => self.eval_if_expression(if_expression, env),
            Expression::While(while_loop) => self.eval_while_loop(while_loop, env),
            Expression::FnDef(fn_def) => Object::Function(Rc::new(Function {
                parameters: fn_def.parameters.clone(),
                body: fn_def.body.clone(),
                env: Rc::clone(env),
            })),
            Expression::Call(call) => self.eval_call_expression(call, env),
            Expression::Index(indexing) => self.eval_index_expression(indexing, env),
        }
    }

    /// Evaluate expressions left to right, aborting on the first error.
    fn eval_expressions(
        &mut self,
        expressions: &[Expression],
        env: &Env,
    ) -> Result<Vec<Object>, Object> {
        let mut results = vec![];

        for expression in expressions {
            let value = self.eval_expression(expression, env);
            if value.is_error() {
                return Err(value);
            }
            results.push(value);
        }

        Ok(results)
    }

    fn eval_if_expression(&mut self, if_expression: &If, env: &Env) -> Object {
        let condition = self.eval_expression(&if_expression.condition, env);
        if condition.is_error() {
            return condition;
        }

        if is_truthy(&condition) {
            self.eval_block(&if_expression.consequence, env)
        } else if let Some(alternative) = &if_expression.alternative {
            self.eval_block(alternative, env)
        } else {
            NULL
        }
    }

    fn eval_while_loop(&mut self, while_loop: &WhileLoop, env: &Env) -> Object {
        let mut iterations = 0;

        loop {
            let condition = self.eval_expression(&while_loop.condition, env);
            if condition.is_error() {
                return condition;
            }
            if !is_truthy(&condition) {
                return NULL;
            }

            if iterations >= MAX_LOOP_ITERATIONS {
                return Object::Error("maximum iteration count exceeded".into());
            }
            iterations += 1;

            // Body results are discarded, but a return must bubble out of
            // the loop and an error poisons it.
            match self.eval_block(&while_loop.body, env) {
                value @ (Object::ReturnValue(_) | Object::Error(_)) => return value,
                _ => {}
            }
        }
    }

    fn eval_call_expression(&mut self, call: &FnCall, env: &Env) -> Object {
        let function = self.eval_expression(&call.function, env);
        if function.is_error() {
            return function;
        }

        let arguments = match self.eval_expressions(&call.arguments, env) {
            Ok(arguments) => arguments,
            Err(error) => return error,
        };

        self.apply_function(function, arguments)
    }

    fn apply_function(&mut self, function: Object, arguments: Vec<Object>) -> Object {
        match function {
            Object::Function(function) => {
                if arguments.len() != function.parameters.len() {
                    return Object::Error(format!(
                        "function was called with an incorrect number of arguments: expected {}",
                        function.parameters.len()
                    ));
                }

                if self.depth >= MAX_STACK_DEPTH {
                    return Object::Error("maximum stack depth exceeded".into());
                }

                let env = Environment::new_enclosed(Rc::clone(&function.env));
                for (parameter, argument) in function.parameters.iter().zip(arguments) {
                    env.borrow_mut().set(parameter.value.clone(), argument);
                }

                self.depth += 1;
                let result = self.eval_block(&function.body, &env);
                self.depth -= 1;

                match result {
                    Object::ReturnValue(value) => *value,
                    other => other,
                }
            }
            Object::Builtin(builtin) => (builtin.func)(arguments),
            other => Object::Error(format!("not a function: {}", other.type_name())),
        }
    }

    fn eval_index_expression(&mut self, indexing: &Indexing, env: &Env) -> Object {
        let left = self.eval_expression(&indexing.left, env);
        if left.is_error() {
            return left;
        }
        let index = self.eval_expression(&indexing.index, env);
        if index.is_error() {
            return index;
        }

        match (left, index) {
            (Object::Array(elements), Object::Integer(index)) => {
                if index < 0 || index as usize >= elements.len() {
                    NULL
                } else {
                    elements[index as usize].clone()
                }
            }
            (Object::Hash(pairs), key) => match key.hash_key() {
                Some(hash_key) => pairs
                    .get(&hash_key)
                    .map(|pair| pair.value.clone())
                    .unwrap_or(NULL),
                None => Object::Error(format!("unusable as hash key: {}", key.type_name())),
            },
            (other, _) => Object::Error(format!(
                "index operator not supported: {}",
                other.type_name()
            )),
        }
    }

    fn eval_hash_literal(&mut self, hash: &HashLiteral, env: &Env) -> Object {
        let mut pairs = std::collections::HashMap::new();

        for (key_expression, value_expression) in &hash.pairs {
            let key = self.eval_expression(key_expression, env);
            if key.is_error() {
                return key;
            }

            let Some(hash_key) = key.hash_key() else {
                return Object::Error(format!(
                    "unhashable object used as a hash key: {}",
                    key.type_name()
                ));
            };

            let value = self.eval_expression(value_expression, env);
            if value.is_error() {
                return value;
            }

            // Later pairs win on duplicate keys.
            pairs.insert(hash_key, HashPair { key, value });
        }

        Object::Hash(pairs)
    }
}

fn eval_identifier(ident: &Ident, env: &Env) -> Object {
    if let Some(value) = env.borrow().get(&ident.value) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(&ident.value) {
        return Object::Builtin(builtin);
    }
    Object::Error(format!("identifier not found: {}", ident.value))
}

fn eval_prefix_expression(operator: PrefixOp, right: Object) -> Object {
    match operator {
        PrefixOp::Bang => match right {
            Object::Boolean(true) => FALSE,
            Object::Boolean(false) => TRUE,
            Object::Null => TRUE,
            // Everything else is truthy, including integer 0.
            _ => FALSE,
        },
        PrefixOp::Minus => match right {
            Object::Integer(value) => Object::Integer(value.wrapping_neg()),
            Object::Str(value) => Object::Str(value.chars().rev().collect()),
            other => Object::Error(format!("unknown operator: -{}", other.type_name())),
        },
    }
}

fn eval_infix_expression(operator: BinaryOp, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Object::Str(l), Object::Str(r)) => eval_string_infix(operator, l, r),
        _ => match operator {
            BinaryOp::Eq => bool_object(left == right),
            BinaryOp::NotEq => bool_object(left != right),
            _ => {
                if left.type_name() != right.type_name() {
                    Object::Error(format!(
                        "type mismatch: {} {} {}",
                        left.type_name(),
                        operator,
                        right.type_name()
                    ))
                } else {
                    Object::Error(format!(
                        "unknown operator: {} {} {}",
                        left.type_name(),
                        operator,
                        right.type_name()
                    ))
                }
            }
        },
    }
}

fn eval_integer_infix(operator: BinaryOp, left: i64, right: i64) -> Object {
    match operator {
        BinaryOp::Plus => Object::Integer(left.wrapping_add(right)),
        BinaryOp::Minus => Object::Integer(left.wrapping_sub(right)),
        BinaryOp::Asterisk => Object::Integer(left.wrapping_mul(right)),
        BinaryOp::Slash => {
            if right == 0 {
                Object::Error("illegal operation: divide by zero".into())
            } else {
                Object::Integer(left.wrapping_div(right))
            }
        }
        BinaryOp::Lt => bool_object(left < right),
        BinaryOp::Gt => bool_object(left > right),
        BinaryOp::Eq => bool_object(left == right),
        BinaryOp::NotEq => bool_object(left != right),
    }
}

fn eval_string_infix(operator: BinaryOp, left: &str, right: &str) -> Object {
    match operator {
        BinaryOp::Plus => Object::Str(format!("{left}{right}")),
        BinaryOp::Lt => bool_object(left < right),
        BinaryOp::Gt => bool_object(left > right),
        BinaryOp::Eq => bool_object(left == right),
        BinaryOp::NotEq => bool_object(left != right),
        _ => Object::Error(format!("unknown operator: STRING {operator} STRING")),
    }
}

/// Anything other than the canonical `FALSE` and `NULL` is truthy, so
/// integer 0 and the empty string are truthy.
fn is_truthy(object: &Object) -> bool {
    !matches!(object, Object::Boolean(false) | Object::Null)
}

fn bool_object(value: bool) -> Object {
    if value {
        TRUE
    } else {
        FALSE
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    use super::*;

    fn eval(input: &str) -> Object {
        let mut parser = Parser::new(Lexer::new(input));
        let program = parser.parse_program();
        assert_eq!(Vec::<String>::new(), parser.errors(), "input: {input}");

        Evaluator::new().eval_program(&program, &Environment::new())
    }

    fn assert_integer(expected: i64, input: &str) {
        assert_eq!(Object::Integer(expected), eval(input), "input: {input}");
    }

    fn assert_error(expected: &str, input: &str) {
        assert_eq!(
            Object::Error(expected.into()),
            eval(input),
            "input: {input}"
        );
    }

    #[test]
    fn test_eval_integer_expressions() {
        for (input, expected) in [
            ("5", 5),
            ("10", 10),
            ("-5", -5),
            ("-10", -10),
            ("5 + 5 + 5 + 5 - 10", 10),
            ("2 * 2 * 2 * 2 * 2", 32),
            ("-50 + 100 + -50", 0),
            ("5 * 2 + 10", 20),
            ("5 + 2 * 10", 25),
            ("5 + 5 * 2", 15),
            ("20 + 2 * -10", 0),
            ("50 / 2 * 2 + 10", 60),
            ("2 * (5 + 10)", 30),
            ("3 * 3 * 3 + 10", 37),
            ("3 * (3 * 3) + 10", 37),
            ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
        ] {
            assert_integer(expected, input);
        }
    }

    #[test]
    fn test_integer_overflow_wraps() {
        assert_integer(i64::MIN, "9223372036854775807 + 1");
        assert_integer(i64::MIN, "-9223372036854775807 - 1");
    }

    #[test]
    fn test_eval_boolean_expressions() {
        for (input, expected) in [
            ("true", true),
            ("false", false),
            ("1 < 2", true),
            ("1 > 2", false),
            ("1 < 1", false),
            ("1 == 1", true),
            ("1 != 1", false),
            ("1 == 2", false),
            ("1 != 2", true),
            ("true == true", true),
            ("false == false", true),
            ("true == false", false),
            ("true != false", true),
            ("(1 < 2) == true", true),
            ("(1 < 2) == false", false),
        ] {
            assert_eq!(bool_object(expected), eval(input), "input: {input}");
        }
    }

    #[test]
    fn test_bang_operator() {
        for (input, expected) in [
            ("!true", false),
            ("!false", true),
            ("!5", false),
            ("!!true", true),
            ("!!5", true),
            // 0 is truthy.
            ("!0", false),
        ] {
            assert_eq!(bool_object(expected), eval(input), "input: {input}");
        }
    }

    #[test]
    fn test_if_else_expressions() {
        for (input, expected) in [
            ("if (true) { 10 }", Object::Integer(10)),
            ("if (false) { 10 }", NULL),
            ("if (1) { 10 }", Object::Integer(10)),
            ("if (0) { 10 }", Object::Integer(10)),
            ("if (1 < 2) { 10 }", Object::Integer(10)),
            ("if (1 > 2) { 10 }", NULL),
            ("if (1 > 2) { 10 } else { 20 }", Object::Integer(20)),
            ("if (1 < 2) { 10 } else { 20 }", Object::Integer(10)),
            ("if (\"\") { 10 }", Object::Integer(10)),
        ] {
            assert_eq!(expected, eval(input), "input: {input}");
        }
    }

    #[test]
    fn test_return_statements() {
        for (input, expected) in [
            ("return 10;", 10),
            ("return 10; 9;", 10),
            ("return 2 * 5; 9;", 10),
            ("9; return 2 * 5; 9;", 10),
            ("if (10 > 1) { if (10 > 1) { return 10; } return 1; }", 10),
        ] {
            assert_integer(expected, input);
        }
    }

    #[test]
    fn test_bare_return() {
        assert_eq!(NULL, eval("return;"));
        assert_eq!(NULL, eval("fn() { return; }()"));
    }

    #[test]
    fn test_error_handling() {
        for (input, expected) in [
            ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
            ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
            ("-true", "unknown operator: -BOOLEAN"),
            ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
            ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
            (
                "if (10 > 1) { true + false; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            (
                "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            ("foobar", "identifier not found: foobar"),
            ("5 / 0", "illegal operation: divide by zero"),
            ("\"Hello\" - \"World\"", "unknown operator: STRING - STRING"),
            (
                "{\"name\": \"Monkey\"}[fn(x) { x }];",
                "unusable as hash key: FUNCTION",
            ),
            (
                "{fn(x) { x }: \"Monkey\"}",
                "unhashable object used as a hash key: FUNCTION",
            ),
            ("5[0]", "index operator not supported: INTEGER"),
            ("\"str\"[0]", "index operator not supported: STRING"),
            ("5(1)", "not a function: INTEGER"),
            (
                "let add = fn(x, y) { x + y }; add(1)",
                "function was called with an incorrect number of arguments: expected 2",
            ),
        ] {
            assert_error(expected, input);
        }
    }

    #[test]
    fn test_equality_across_types() {
        assert_eq!(FALSE, eval("1 == true"));
        assert_eq!(TRUE, eval("1 != true"));
        assert_eq!(FALSE, eval("\"1\" == 1"));
    }

    #[test]
    fn test_let_statements() {
        for (input, expected) in [
            ("let a = 5; a;", 5),
            ("let a = 5 * 5; a;", 25),
            ("let a = 5; let b = a; b;", 5),
            ("let a = 5; let b = a; let c = a + b + 5; c;", 15),
        ] {
            assert_integer(expected, input);
        }
    }

    #[test]
    fn test_let_has_no_result_value() {
        assert_eq!(NULL, eval("let a = 5;"));
        // The block's result stays the previous statement's value.
        assert_integer(7, "7; let a = 5;");
    }

    #[test]
    fn test_let_rebinds_in_local_frame() {
        assert_integer(2, "let i = 1; let i = i + 1; i");
    }

    #[test]
    fn test_function_object() {
        let result = eval("fn(x) { x + 2; };");
        let Object::Function(function) = result else {
            panic!("expected a function object, got {result:?}");
        };
        assert_eq!(1, function.parameters.len());
        assert_eq!("x", function.parameters[0].value);
        assert_eq!("(x + 2)", function.body.to_string());
    }

    #[test]
    fn test_function_application() {
        for (input, expected) in [
            ("let identity = fn(x) { x; }; identity(5);", 5),
            ("let identity = fn(x) { return x; }; identity(5);", 5),
            ("let double = fn(x) { x * 2; }; double(5);", 10),
            ("let add = fn(x, y) { x + y; }; add(5, 5);", 10),
            ("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20),
            ("fn(x) { x; }(5)", 5),
        ] {
            assert_integer(expected, input);
        }
    }

    #[test]
    fn test_closures() {
        assert_integer(
            4,
            "let newAdder = fn(x) { fn(y) { x + y }; }; let addTwo = newAdder(2); addTwo(2);",
        );
    }

    #[test]
    fn test_recursion() {
        assert_integer(
            120,
            "let factorial = fn(n) { if (n < 2) { 1 } else { n * factorial(n - 1) } }; factorial(5)",
        );
    }

    #[test]
    fn test_stack_depth_cap() {
        assert_error(
            "maximum stack depth exceeded",
            "let f = fn(x) { f(x + 1); }; f(1);",
        );
    }

    #[test]
    fn test_while_loops() {
        assert_integer(
            10,
            "let i = 0; while (i < 10) { let i = i + 1; }; i",
        );
        assert_eq!(NULL, eval("while (false) { 1; }"));
    }

    #[test]
    fn test_while_loop_iteration_cap() {
        assert_error("maximum iteration count exceeded", "while (true) { 1; };");
    }

    #[test]
    fn test_return_bubbles_out_of_while() {
        assert_integer(
            3,
            "let f = fn() { let i = 0; while (true) { let i = i + 1; if (i > 2) { return i; } } }; f()",
        );
    }

    #[test]
    fn test_string_operations() {
        assert_eq!(
            Object::Str("Hello World!".into()),
            eval("\"Hello\" + \" \" + \"World!\"")
        );
        assert_eq!(TRUE, eval("\"abc\" == \"abc\""));
        assert_eq!(TRUE, eval("\"abc\" < \"abd\""));
        assert_eq!(FALSE, eval("\"b\" < \"a\""));
        assert_eq!(TRUE, eval("\"a\" != \"b\""));
    }

    #[test]
    fn test_minus_reverses_strings() {
        assert_eq!(Object::Str("cba".into()), eval("-\"abc\""));
        assert_eq!(Object::Str("".into()), eval("-\"\""));
    }

    #[test]
    fn test_array_literals() {
        assert_eq!(
            Object::Array(vec![
                Object::Integer(1),
                Object::Integer(4),
                Object::Integer(6),
            ]),
            eval("[1, 2 * 2, 3 + 3]")
        );
    }

    #[test]
    fn test_array_index_expressions() {
        for (input, expected) in [
            ("[1, 2, 3][0]", Object::Integer(1)),
            ("[1, 2, 3][1]", Object::Integer(2)),
            ("[1, 2, 3][2]", Object::Integer(3)),
            ("let i = 0; [1][i];", Object::Integer(1)),
            ("[1, 2, 3][1 + 1];", Object::Integer(3)),
            ("let myArray = [1, 2, 3]; myArray[2];", Object::Integer(3)),
            ("[1, 2, 3][3]", NULL),
            ("[1, 2, 3][-1]", NULL),
        ] {
            assert_eq!(expected, eval(input), "input: {input}");
        }
    }

    #[test]
    fn test_hash_literals() {
        let result = eval(
            "let two = \"two\";
            {
                \"one\": 10 - 9,
                two: 1 + 1,
                \"thr\" + \"ee\": 6 / 2,
                4: 4,
                true: 5,
                false: 6
            }",
        );

        let Object::Hash(pairs) = result else {
            panic!("expected a hash, got {result:?}");
        };
        assert_eq!(6, pairs.len());

        for (key, expected) in [
            (Object::Str("one".into()), 1),
            (Object::Str("two".into()), 2),
            (Object::Str("three".into()), 3),
            (Object::Integer(4), 4),
            (TRUE, 5),
            (FALSE, 6),
        ] {
            let hash_key = key.hash_key().expect("key should be hashable");
            assert_eq!(
                Object::Integer(expected),
                pairs.get(&hash_key).expect("pair should exist").value
            );
        }
    }

    #[test]
    fn test_hash_duplicate_keys_later_wins() {
        assert_integer(2, "{\"a\": 1, \"a\": 2}[\"a\"]");
    }

    #[test]
    fn test_hash_index_expressions() {
        for (input, expected) in [
            ("{\"foo\": 5}[\"foo\"]", Object::Integer(5)),
            ("{\"foo\": 5}[\"bar\"]", NULL),
            ("let key = \"foo\"; {\"foo\": 5}[key]", Object::Integer(5)),
            ("{}[\"foo\"]", NULL),
            ("{5: 5}[5]", Object::Integer(5)),
            ("{true: 5}[true]", Object::Integer(5)),
            ("{false: 5}[false]", Object::Integer(5)),
        ] {
            assert_eq!(expected, eval(input), "input: {input}");
        }
    }

    #[test]
    fn test_left_associative_equality() {
        // ((len("") == 0) == true)
        assert_eq!(TRUE, eval("len(\"\") == 0 == true"));
    }

    #[test]
    fn test_error_short_circuits_arguments() {
        assert_error(
            "identifier not found: missing",
            "let f = fn(x, y) { x }; f(missing, 1)",
        );
    }
}
