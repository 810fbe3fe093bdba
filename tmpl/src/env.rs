//! Process environment snapshot

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, TemplateError};

/// Immutable copy of the process environment taken once at template
/// construction. Rendering never reads the live environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment
    pub fn capture() -> Self {
        let entries = std::env::vars_os().map(|(key, value)| {
            format!("{}={}", key.to_string_lossy(), value.to_string_lossy())
        });
        let snapshot = Self::from_entries(entries);
        debug!(count = snapshot.vars.len(), "EnvSnapshot::capture: captured environment");
        snapshot
    }

    /// Build a snapshot from raw `KEY=VALUE` entries
    ///
    /// Only the first `=` separates key from value; entries without one are
    /// ignored.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vars = HashMap::new();
        for entry in entries {
            let entry = entry.as_ref();
            match entry.split_once('=') {
                Some((key, value)) => {
                    vars.insert(key.to_string(), value.to_string());
                }
                None => debug!(%entry, "EnvSnapshot::from_entries: skipping entry without '='"),
            }
        }
        Self { vars }
    }

    /// Look up a key, failing with `UnsetEnvironment` when absent
    pub fn get(&self, key: &str) -> Result<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| TemplateError::UnsetEnvironment { key: key.to_string() })
    }

    /// Look up a key, falling back to `default` when absent
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.vars.get(key).map(String::as_str).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
