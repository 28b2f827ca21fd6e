//! JSON patch application onto flat DTOs.
//!
//! A patch document is an ordered list of operations (`add`, `replace`,
//! `remove`, `copy`, `move`, `test`) addressed by single-segment JSON
//! pointers such as `/title`. Field names match case-insensitively so
//! `/Title` and `/title` address the same property.
//!
//! The target is round-tripped through `serde_json::Value`: it is serialized,
//! patched in place, then deserialized back, so the target type's own serde
//! rules decide which values are acceptable. Removing a property resets it to
//! the value it has in `T::default()`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One operation of a patch document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Copy { from: String, path: String },
    Move { from: String, path: String },
    Test { path: String, value: Value },
}

/// An ordered list of operations, applied first to last.
pub type PatchDocument = Vec<PatchOperation>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatchError {
    #[error("The target location specified by path '{0}' was not found")]
    PathNotFound(String),

    #[error("The current value at path '{0}' is not equal to the test value")]
    TestFailed(String),

    #[error("The value at path '{path}' is invalid: {reason}")]
    InvalidValue { path: String, reason: String },

    #[error("Patch target must serialize to a JSON object")]
    NotAnObject,
}

impl PatchOperation {
    /// The pointer this operation writes to (or checks, for `test`).
    pub fn path(&self) -> &str {
        match self {
            Self::Add { path, .. }
            | Self::Remove { path }
            | Self::Replace { path, .. }
            | Self::Copy { path, .. }
            | Self::Move { path, .. }
            | Self::Test { path, .. } => path,
        }
    }
}

/// Apply `operations` to a copy of `target` and return the patched copy.
///
/// `target` itself is never modified; on error nothing is returned, so a
/// failed patch cannot leave a half-applied value behind.
pub fn apply_patch<T>(target: &T, operations: &[PatchOperation]) -> Result<T, PatchError>
where
    T: Serialize + DeserializeOwned + Default,
{
    let mut doc = to_object(target)?;
    let defaults = to_object(&T::default())?;

    for op in operations {
        apply_one(&mut doc, &defaults, op)?;

        // Reject a bad value at the operation that introduced it.
        serde_json::from_value::<T>(Value::Object(doc.clone())).map_err(|e| {
            PatchError::InvalidValue {
                path: op.path().to_string(),
                reason: e.to_string(),
            }
        })?;
    }

    serde_json::from_value(Value::Object(doc)).map_err(|e| PatchError::InvalidValue {
        path: String::new(),
        reason: e.to_string(),
    })
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, PatchError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(PatchError::NotAnObject),
    }
}

fn apply_one(
    doc: &mut Map<String, Value>,
    defaults: &Map<String, Value>,
    op: &PatchOperation,
) -> Result<(), PatchError> {
    match op {
        PatchOperation::Add { path, value } | PatchOperation::Replace { path, value } => {
            let key = resolve(doc, path)?;
            doc.insert(key, value.clone());
        }
        PatchOperation::Remove { path } => {
            let key = resolve(doc, path)?;
            reset(doc, defaults, key);
        }
        PatchOperation::Copy { from, path } => {
            let source = resolve(doc, from)?;
            let key = resolve(doc, path)?;
            let value = doc.get(&source).cloned().unwrap_or(Value::Null);
            doc.insert(key, value);
        }
        PatchOperation::Move { from, path } => {
            let source = resolve(doc, from)?;
            let key = resolve(doc, path)?;
            let value = doc.get(&source).cloned().unwrap_or(Value::Null);
            reset(doc, defaults, source);
            doc.insert(key, value);
        }
        PatchOperation::Test { path, value } => {
            let key = resolve(doc, path)?;
            if doc.get(&key) != Some(value) {
                return Err(PatchError::TestFailed(path.clone()));
            }
        }
    }
    Ok(())
}

fn reset(doc: &mut Map<String, Value>, defaults: &Map<String, Value>, key: String) {
    let value = defaults.get(&key).cloned().unwrap_or(Value::Null);
    doc.insert(key, value);
}

/// Map a pointer like `/Title` onto the canonical property name.
fn resolve(doc: &Map<String, Value>, pointer: &str) -> Result<String, PatchError> {
    let not_found = || PatchError::PathNotFound(pointer.to_string());

    let segment = pointer.strip_prefix('/').ok_or_else(not_found)?;
    if segment.is_empty() || segment.contains('/') {
        return Err(not_found());
    }
    let segment = segment.replace("~1", "/").replace("~0", "~");

    doc.keys()
        .find(|key| key.eq_ignore_ascii_case(&segment))
        .cloned()
        .ok_or_else(not_found)
}
