//! YAML vars file loading

use std::path::Path;

use eyre::{Context, Result, bail};
use tracing::debug;

use crate::value::{Value, yaml_key};

/// Decode a YAML mapping into `(key, value)` pairs in file order
pub fn parse(content: &str) -> Result<Vec<(String, Value)>> {
    let doc: serde_yaml::Value = serde_yaml::from_str(content).context("Failed to parse vars file")?;
    match doc {
        serde_yaml::Value::Null => Ok(Vec::new()),
        serde_yaml::Value::Mapping(mapping) => {
            let entries: Vec<_> = mapping
                .into_iter()
                .map(|(key, value)| (yaml_key(key), Value::from_yaml(value)))
                .collect();
            debug!(count = entries.len(), "varsfile::parse: decoded entries");
            Ok(entries)
        }
        other => bail!("Vars file must be a mapping, found {}", Value::from_yaml(other).kind()),
    }
}

/// Read and decode a vars file
pub fn load(path: &Path) -> Result<Vec<(String, Value)>> {
    debug!(path = %path.display(), "varsfile::load: called");
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read vars file {}", path.display()))?;
    parse(&content).with_context(|| format!("Invalid vars file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_file_order() {
        let entries = parse("zeta: 1\nalpha: two\nmid: true\n").unwrap();
        let keys: Vec<_> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert_eq!(entries[0].1, Value::Number(1.0));
        assert_eq!(entries[1].1, Value::from("two"));
        assert_eq!(entries[2].1, Value::Bool(true));
    }

    #[test]
    fn test_nested_values() {
        let entries = parse("ports:\n  - 80\n  - 443\nlabels:\n  app: web\n").unwrap();
        assert!(matches!(entries[0].1, Value::List(ref items) if items.len() == 2));
        assert!(matches!(entries[1].1, Value::Map(ref map) if map.contains_key("app")));
    }

    #[test]
    fn test_empty_file() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_non_mapping_rejected() {
        assert!(parse("- a\n- b\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/no/such/vars.yml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read vars file"));
    }
}
