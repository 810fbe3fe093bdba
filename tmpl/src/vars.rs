//! Caller-supplied template variables

use std::collections::HashMap;

use serde_json::Value as Json;
use tracing::debug;

use crate::error::{Result, TemplateError};
use crate::value::Value;

/// Mutable mapping from variable name to value
///
/// Writes are unconditional upserts: the last write for a key wins and a
/// collision is never an error. Callers layering several sources (vars file,
/// then string flags, then numeric flags) get precedence by apply order.
#[derive(Debug, Clone, Default)]
pub struct VarStore {
    vars: HashMap<String, Value>,
}

impl VarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value for the key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        debug!(%key, kind = value.kind(), "VarStore::set: called");
        if let Some(previous) = self.vars.insert(key, value) {
            debug!(kind = previous.kind(), "VarStore::set: replaced previous value");
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Look up a variable, failing with `UnsetVariable` when absent
    pub fn get(&self, key: &str) -> Result<&Value> {
        self.vars.get(key).ok_or_else(|| {
            debug!(%key, "VarStore::get: variable is unset");
            TemplateError::UnsetVariable { key: key.to_string() }
        })
    }

    /// Look up a variable, falling back to `default` when absent
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.vars.get(key).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// The whole store as a JSON object, used as render context data
    pub(crate) fn to_json(&self) -> Json {
        Json::Object(self.vars.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
    }
}
