//! # Name resolution for path descriptors.
//!
//! [`Resolve`] is the lookup service used by [`exists`](super::exists) for
//! [`Descriptor::Path`] values. Any `Fn(&str) -> Option<Descriptor>` closure is a
//! resolver; [`Environment`] is a ready-made in-memory one.
//!
//! ## Environment paths
//! ```text
//! "app"              → root["app"]
//! "app.plugins.0"    → root["app"]["plugins"][0]
//! "app.init"         → Callable (if defined via define_callable)
//! ```

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use serde_json::{Map, Value};

use super::descriptor::Descriptor;

/// Looks up a dotted path at check time.
///
/// Returning `None` means "not defined"; it is never treated as an error.
pub trait Resolve: Send + Sync + 'static {
    fn resolve(&self, path: &str) -> Option<Descriptor>;
}

impl<F> Resolve for F
where
    F: Fn(&str) -> Option<Descriptor> + Send + Sync + 'static,
{
    fn resolve(&self, path: &str) -> Option<Descriptor> {
        self(path)
    }
}

/// In-memory symbol table backed by a JSON tree.
///
/// Values are stored under dotted paths; callables are tracked separately since
/// they have no JSON representation.
#[derive(Debug, Default)]
pub struct Environment {
    root: RwLock<Map<String, Value>>,
    callables: RwLock<HashSet<String>>,
}

impl Environment {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` at `path`, creating intermediate objects as needed.
    ///
    /// Intermediate segments that hold a non-object value are replaced.
    pub fn set(&self, path: &str, value: impl Into<Value>) {
        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        let mut segments = path.split('.').peekable();
        let mut node = &mut *root;
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                node.insert(seg.to_string(), value.into());
                return;
            }
            let slot = node
                .entry(seg.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Value::Object(map) = slot else {
                return;
            };
            node = map;
        }
    }

    /// Marks `path` as a defined function.
    pub fn define_callable(&self, path: &str) {
        self.callables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string());
    }

    /// Removes whatever is stored at `path` (value or callable).
    pub fn remove(&self, path: &str) {
        self.callables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path);

        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        let (parent, leaf) = match path.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, path),
        };
        let container = match parent {
            None => Some(&mut *root),
            Some(parent) => parent
                .split('.')
                .try_fold(&mut *root, |map, seg| match map.get_mut(seg) {
                    Some(Value::Object(next)) => Some(next),
                    _ => None,
                }),
        };
        if let Some(map) = container {
            map.remove(leaf);
        }
    }

    /// Returns a copy of the value stored at `path`.
    pub fn get(&self, path: &str) -> Option<Value> {
        let root = self.root.read().unwrap_or_else(PoisonError::into_inner);
        let mut segments = path.split('.');
        let first = root.get(segments.next()?)?;
        segments
            .try_fold(first, |node, seg| match node {
                Value::Object(map) => map.get(seg),
                Value::Array(items) => seg.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
            .cloned()
    }
}

impl Resolve for Environment {
    fn resolve(&self, path: &str) -> Option<Descriptor> {
        let is_callable = self
            .callables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(path);
        if is_callable {
            return Some(Descriptor::Callable);
        }
        self.get(path).map(Descriptor::Value)
    }
}
