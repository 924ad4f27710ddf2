//! Runtime values of the Monkey interpreter.
//!
//! Values form a closed set of variants. Two of them never surface to
//! embedders: `ReturnValue` wraps a value travelling upwards out of a
//! `return` statement, and `Error` is a poison value that short-circuits
//! every further evaluation step within a statement.

mod environment;

pub use environment::*;

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::ast::{Block, Ident};

#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Str(String),
    Null,
    Array(Vec<Object>),
    Hash(HashMap<HashKey, HashPair>),
    Function(Rc<Function>),
    Builtin(Builtin),
    ReturnValue(Box<Object>),
    Error(String),
}

impl Object {
    /// Type tag used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Str(_) => "STRING",
            Object::Null => "NULL",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Canonical textual form of the value.
    pub fn inspect(&self) -> String {
        self.to_string()
    }

    /// Hash key for this value, or `None` when the type is not hashable.
    /// Only integers, booleans and strings are hashable.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(value) => Some(HashKey {
                kind: self.type_name(),
                value: *value as u64,
            }),
            Object::Boolean(value) => Some(HashKey {
                kind: self.type_name(),
                value: u64::from(*value),
            }),
            Object::Str(value) => {
                let mut hasher = DefaultHasher::new();
                value.hash(&mut hasher);
                Some(HashKey {
                    kind: self.type_name(),
                    value: hasher.finish(),
                })
            }
            _ => None,
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(left), Object::Integer(right)) => left == right,
            (Object::Boolean(left), Object::Boolean(right)) => left == right,
            (Object::Str(left), Object::Str(right)) => left == right,
            (Object::Null, Object::Null) => true,
            (Object::Array(left), Object::Array(right)) => left == right,
            (Object::Hash(left), Object::Hash(right)) => left == right,
            (Object::Function(left), Object::Function(right)) => Rc::ptr_eq(left, right),
            (Object::Builtin(left), Object::Builtin(right)) => left.name == right.name,
            (Object::ReturnValue(left), Object::ReturnValue(right)) => left == right,
            (Object::Error(left), Object::Error(right)) => left == right,
            _ => false,
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{value}"),
            Object::Boolean(value) => write!(f, "{value}"),
            Object::Str(value) => f.write_str(value),
            Object::Null => f.write_str("null"),
            Object::Array(elements) => {
                let elements = elements
                    .iter()
                    .map(|element| element.to_string())
                    .collect::<Vec<_>>();
                write!(f, "[{}]", elements.join(", "))
            }
            Object::Hash(pairs) => {
                let pairs = pairs
                    .values()
                    .map(|pair| format!("{}: {}", pair.key, pair.value))
                    .collect::<Vec<_>>();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Object::Function(function) => {
                let parameters = function
                    .parameters
                    .iter()
                    .map(|parameter| parameter.value.clone())
                    .collect::<Vec<_>>();
                write!(f, "fn({}) {{\n{}\n}}", parameters.join(", "), function.body)
            }
            Object::Builtin(builtin) => write!(f, "builtin function {}", builtin.name),
            Object::ReturnValue(value) => write!(f, "{value}"),
            Object::Error(message) => write!(f, "ERROR: {message}"),
        }
    }
}

/// Key of a hash entry: the value's type tag plus a 64-bit content digest.
/// Structurally equal hashable values always produce equal keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    kind: &'static str,
    value: u64,
}

/// Stored hash entry. The original key value is kept alongside the payload
/// so hashes can render and compare structurally.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

/// A user-defined function: parameters, body, and the environment captured
/// at the point of definition (realizing lexical closure).
#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<Ident>,
    pub body: Block,
    pub env: Env,
}

// Closures can hold their own defining environment through `env`, so the
// derived Debug would recurse. Print the shape only.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

pub type BuiltinFn = fn(Vec<Object>) -> Object;

/// A host-provided function, addressable by name from user code.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_hash_keys() {
        let hello1 = Object::Str("Hello World".into());
        let hello2 = Object::Str("Hello World".into());
        let diff1 = Object::Str("My name is johnny".into());
        let diff2 = Object::Str("My name is johnny".into());

        assert_eq!(hello1.hash_key(), hello2.hash_key());
        assert_eq!(diff1.hash_key(), diff2.hash_key());
        assert_ne!(hello1.hash_key(), diff1.hash_key());
    }

    #[test]
    fn test_scalar_hash_keys() {
        assert_eq!(Object::Integer(1).hash_key(), Object::Integer(1).hash_key());
        assert_ne!(Object::Integer(1).hash_key(), Object::Integer(2).hash_key());
        assert_eq!(
            Object::Boolean(true).hash_key(),
            Object::Boolean(true).hash_key()
        );
        // Same digest, different type tag.
        assert_ne!(
            Object::Integer(1).hash_key(),
            Object::Boolean(true).hash_key()
        );
    }

    #[test]
    fn test_unhashable_objects() {
        assert_eq!(None, Object::Null.hash_key());
        assert_eq!(None, Object::Array(vec![]).hash_key());
    }

    #[test]
    fn test_inspect_forms() {
        assert_eq!("5", Object::Integer(5).inspect());
        assert_eq!("true", Object::Boolean(true).inspect());
        assert_eq!("raw text", Object::Str("raw text".into()).inspect());
        assert_eq!("null", Object::Null.inspect());
        assert_eq!(
            "[1, two, [3]]",
            Object::Array(vec![
                Object::Integer(1),
                Object::Str("two".into()),
                Object::Array(vec![Object::Integer(3)]),
            ])
            .inspect()
        );
        assert_eq!(
            "ERROR: something went wrong",
            Object::Error("something went wrong".into()).inspect()
        );
    }
}
