//! # Dependency descriptors and the existence predicate.
//!
//! A [`Descriptor`] names something whose presence can be tested. The predicate
//! [`exists`] is deliberately permissive: hosts wait on symbols of unknown shape,
//! so any non-null object counts as present.
//!
//! | Descriptor                        | exists                                   |
//! |-----------------------------------|------------------------------------------|
//! | `Absent`                          | false                                    |
//! | `Flag(b)` / `Value(Bool(b))`      | `b`                                      |
//! | `Path(p)` / `Value(String(p))`    | resolve `p`, then `exists` on the result |
//! | `Callable`                        | true                                     |
//! | `Value(Number(_))`                | false                                    |
//! | `Value(Null)`                     | false                                    |
//! | `Value(Object(_))`, `Value(Array(_))` | true                                 |
//!
//! Unresolvable paths, and resolution chains deeper than [`MAX_RESOLVE_DEPTH`],
//! count as absent.

use std::fmt;

use serde_json::Value;

use super::resolver::Resolve;

/// Longest chain of path → path resolutions followed before giving up.
pub const MAX_RESOLVE_DEPTH: usize = 16;

/// Something whose availability can be checked.
#[derive(Clone, Debug, PartialEq)]
pub enum Descriptor {
    /// Nothing there (an uninitialized symbol).
    Absent,
    /// Literal readiness flag; only `true` counts.
    Flag(bool),
    /// Dotted path looked up through a [`Resolve`] at check time.
    Path(String),
    /// A host function; its presence is the signal.
    Callable,
    /// Any other value.
    Value(Value),
}

impl From<bool> for Descriptor {
    fn from(b: bool) -> Self {
        Descriptor::Flag(b)
    }
}

impl From<&str> for Descriptor {
    fn from(path: &str) -> Self {
        Descriptor::Path(path.to_string())
    }
}

impl From<String> for Descriptor {
    fn from(path: String) -> Self {
        Descriptor::Path(path)
    }
}

impl From<Value> for Descriptor {
    fn from(v: Value) -> Self {
        Descriptor::Value(v)
    }
}

impl<T: Into<Descriptor>> From<Option<T>> for Descriptor {
    fn from(v: Option<T>) -> Self {
        v.map_or(Descriptor::Absent, Into::into)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Absent => f.write_str("undefined"),
            Descriptor::Flag(b) => write!(f, "{b}"),
            Descriptor::Path(p) => f.write_str(p),
            Descriptor::Callable => f.write_str("function"),
            Descriptor::Value(Value::String(s)) => f.write_str(s),
            Descriptor::Value(v) => write!(f, "{v}"),
        }
    }
}

/// One descriptor, or a list that must all exist.
#[derive(Clone, Debug, PartialEq)]
pub enum Dependencies {
    One(Descriptor),
    All(Vec<Descriptor>),
}

impl From<Descriptor> for Dependencies {
    fn from(d: Descriptor) -> Self {
        Dependencies::One(d)
    }
}

impl From<&str> for Dependencies {
    fn from(path: &str) -> Self {
        Dependencies::One(path.into())
    }
}

impl From<String> for Dependencies {
    fn from(path: String) -> Self {
        Dependencies::One(path.into())
    }
}

impl From<bool> for Dependencies {
    fn from(b: bool) -> Self {
        Dependencies::One(b.into())
    }
}

impl From<Value> for Dependencies {
    fn from(v: Value) -> Self {
        Dependencies::One(v.into())
    }
}

impl From<Vec<Descriptor>> for Dependencies {
    fn from(list: Vec<Descriptor>) -> Self {
        Dependencies::All(list)
    }
}

impl<const N: usize> From<[Descriptor; N]> for Dependencies {
    fn from(list: [Descriptor; N]) -> Self {
        Dependencies::All(list.into())
    }
}

impl From<Vec<&str>> for Dependencies {
    fn from(paths: Vec<&str>) -> Self {
        Dependencies::All(paths.into_iter().map(Descriptor::from).collect())
    }
}

impl fmt::Display for Dependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependencies::One(d) => write!(f, "{d}"),
            Dependencies::All(list) => {
                for (i, d) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{d}")?;
                }
                Ok(())
            }
        }
    }
}

/// Returns `true` if `descriptor` denotes something present.
pub fn exists(descriptor: &Descriptor, resolver: &dyn Resolve) -> bool {
    exists_at(descriptor, resolver, 0)
}

/// Returns `true` if every descriptor in `deps` exists (an empty list is satisfied).
pub fn has_dependencies(deps: &Dependencies, resolver: &dyn Resolve) -> bool {
    match deps {
        Dependencies::One(d) => exists(d, resolver),
        Dependencies::All(list) => list.iter().all(|d| exists(d, resolver)),
    }
}

fn exists_at(descriptor: &Descriptor, resolver: &dyn Resolve, depth: usize) -> bool {
    match descriptor {
        Descriptor::Absent => false,
        Descriptor::Flag(b) => *b,
        Descriptor::Callable => true,
        Descriptor::Path(path) => resolves(path, resolver, depth),
        Descriptor::Value(v) => match v {
            Value::Null | Value::Number(_) => false,
            Value::Bool(b) => *b,
            Value::String(path) => resolves(path, resolver, depth),
            Value::Array(_) | Value::Object(_) => true,
        },
    }
}

fn resolves(path: &str, resolver: &dyn Resolve, depth: usize) -> bool {
    if depth >= MAX_RESOLVE_DEPTH {
        return false;
    }
    resolver
        .resolve(path)
        .is_some_and(|found| exists_at(&found, resolver, depth + 1))
}
