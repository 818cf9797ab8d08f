use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Raised when two fragments claim the same non-object key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fragments conflict at key path {path}")]
pub struct MergeConflict {
    pub path: String,
}

/// An isolated piece of the output document owned by one handler
///
/// Handlers never share output state. Each one builds its own fragment and
/// the assembler merges them key by key afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment(Map<String, Value>);

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nest `value` below the given key path, e.g. `["document", "notes"]`
    pub fn at(path: &[&str], value: Value) -> Self {
        let mut nested = value;
        for key in path.iter().rev() {
            let mut map = Map::new();
            map.insert((*key).to_string(), nested);
            nested = Value::Object(map);
        }
        match nested {
            Value::Object(map) => Self(map),
            // An empty path with a non-object value has no key to live under
            _ => Self::default(),
        }
    }

    /// Serialize a record and nest it below the given key path
    pub fn serialized<T: Serialize>(path: &[&str], record: &T) -> serde_json::Result<Self> {
        Ok(Self::at(path, serde_json::to_value(record)?))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a value below a key path
    pub fn pointer(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.0.get(*first)?, |value, key| value.get(*key))
    }

    /// Merge `other` into `self` key by key
    ///
    /// Objects under the same key merge recursively. Any other collision is a
    /// conflict; the existing value is kept and every conflicting path is
    /// reported.
    pub fn merge(&mut self, other: Fragment) -> Result<(), Vec<MergeConflict>> {
        let mut conflicts = Vec::new();
        merge_maps(&mut self.0, other.0, "", &mut conflicts);
        if conflicts.is_empty() {
            Ok(())
        } else {
            Err(conflicts)
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn merge_maps(
    target: &mut Map<String, Value>,
    source: Map<String, Value>,
    prefix: &str,
    conflicts: &mut Vec<MergeConflict>,
) {
    for (key, incoming) in source {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match target.get_mut(&key) {
            None => {
                target.insert(key, incoming);
            }
            Some(Value::Object(existing)) => match incoming {
                Value::Object(incoming) => merge_maps(existing, incoming, &path, conflicts),
                _ => conflicts.push(MergeConflict { path }),
            },
            Some(_) => conflicts.push(MergeConflict { path }),
        }
    }
}
