//! The host-provided builtin library.
//!
//! Builtins are resolved during identifier lookup, after the environment
//! chain misses. They validate their own arguments and report problems as
//! `Object::Error` values, never by panicking.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::NULL;
use crate::object::{Builtin, Object};

static BUILTINS: Lazy<HashMap<&'static str, Builtin>> = Lazy::new(|| {
    HashMap::from([
        ("len", Builtin { name: "len", func: len }),
        ("first", Builtin { name: "first", func: first }),
        ("rest", Builtin { name: "rest", func: rest }),
        ("last", Builtin { name: "last", func: last }),
        ("push", Builtin { name: "push", func: push }),
        ("join", Builtin { name: "join", func: join }),
        ("toUpperCase", Builtin { name: "toUpperCase", func: to_upper_case }),
        ("toLowerCase", Builtin { name: "toLowerCase", func: to_lower_case }),
        ("split", Builtin { name: "split", func: split }),
        ("print", Builtin { name: "print", func: print }),
    ])
});

pub(crate) fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.get(name).copied()
}

fn wrong_argument_count(expected: usize, got: usize) -> Object {
    Object::Error(format!(
        "wrong number of arguments. Expected {expected}. Got {got}."
    ))
}

fn len(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_argument_count(1, args.len());
    }
    match &args[0] {
        Object::Str(value) => Object::Integer(value.len() as i64),
        Object::Array(elements) => Object::Integer(elements.len() as i64),
        other => Object::Error(format!(
            "argument to 'len' not supported, got {}",
            other.type_name()
        )),
    }
}

fn first(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_argument_count(1, args.len());
    }
    let Object::Array(elements) = &args[0] else {
        return Object::Error(format!(
            "'first' can only be called on an array. received first({})",
            args[0].type_name()
        ));
    };
    elements.first().cloned().unwrap_or(NULL)
}

fn rest(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_argument_count(1, args.len());
    }
    let Object::Array(elements) = &args[0] else {
        return Object::Error(format!(
            "'rest' can only be called on an array. received rest({})",
            args[0].type_name()
        ));
    };
    if elements.len() < 2 {
        return NULL;
    }
    Object::Array(elements[1..].to_vec())
}

fn last(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_argument_count(1, args.len());
    }
    let Object::Array(elements) = &args[0] else {
        return Object::Error(format!(
            "'last' can only be called on an array. received last({})",
            args[0].type_name()
        ));
    };
    elements.last().cloned().unwrap_or(NULL)
}

/// Returns a new array with the element appended; the source is unchanged.
fn push(args: Vec<Object>) -> Object {
    if args.len() != 2 {
        return wrong_argument_count(2, args.len());
    }
    let Object::Array(elements) = &args[0] else {
        return Object::Error(format!(
            "first argument to 'push' should be an array. received push({})",
            args[0].type_name()
        ));
    };
    let mut elements = elements.clone();
    elements.push(args[1].clone());
    Object::Array(elements)
}

fn join(args: Vec<Object>) -> Object {
    if args.len() != 2 {
        return wrong_argument_count(2, args.len());
    }
    let (Object::Array(elements), Object::Str(separator)) = (&args[0], &args[1]) else {
        return Object::Error(format!(
            "'join' expected arguments of type join(array, string). received join({}, {})",
            args[0].type_name(),
            args[1].type_name()
        ));
    };

    let mut parts = vec![];
    for element in elements {
        let Object::Str(part) = element else {
            return Object::Error("can only join an array that is all strings".into());
        };
        parts.push(part.as_str());
    }
    Object::Str(parts.join(separator))
}

fn to_upper_case(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_argument_count(1, args.len());
    }
    let Object::Str(value) = &args[0] else {
        return Object::Error(format!(
            "'toUpperCase' can only be called on a string. received toUpperCase({})",
            args[0].type_name()
        ));
    };
    Object::Str(value.to_uppercase())
}

fn to_lower_case(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_argument_count(1, args.len());
    }
    let Object::Str(value) = &args[0] else {
        return Object::Error(format!(
            "'toLowerCase' can only be called on a string. received toLowerCase({})",
            args[0].type_name()
        ));
    };
    Object::Str(value.to_lowercase())
}

fn split(args: Vec<Object>) -> Object {
    if args.len() != 2 {
        return wrong_argument_count(2, args.len());
    }
    let (Object::Str(value), Object::Str(separator)) = (&args[0], &args[1]) else {
        return Object::Error(format!(
            "'split' expects arguments of type split(string, string). received split({}, {})",
            args[0].type_name(),
            args[1].type_name()
        ));
    };

    // An empty separator splits into single characters.
    let parts: Vec<Object> = if separator.is_empty() {
        value
            .chars()
            .map(|ch| Object::Str(ch.to_string()))
            .collect()
    } else {
        value
            .split(separator.as_str())
            .map(|part| Object::Str(part.to_string()))
            .collect()
    };
    Object::Array(parts)
}

/// Writes each argument's inspect form on its own line.
fn print(args: Vec<Object>) -> Object {
    for arg in &args {
        println!("{}", arg.inspect());
    }
    NULL
}
