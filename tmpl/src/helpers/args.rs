//! Typed access to helper call arguments

use chrono::{DateTime, FixedOffset};
use serde_json::Value as Json;
use url::Url;

use crate::error::{Result, TemplateError};

/// Evaluated arguments of a single helper invocation
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    helper: &'a str,
    values: &'a [Json],
}

impl<'a> Args<'a> {
    pub fn new(helper: &'a str, values: &'a [Json]) -> Self {
        Self { helper, values }
    }

    pub fn helper(&self) -> &'a str {
        self.helper
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Argument at `index`, if supplied
    pub fn opt(&self, index: usize) -> Option<&'a Json> {
        self.values.get(index)
    }

    /// Argument at `index`, failing with `MissingArgument` when absent
    pub fn get(&self, index: usize) -> Result<&'a Json> {
        self.values.get(index).ok_or_else(|| TemplateError::MissingArgument {
            helper: self.helper.to_string(),
            position: index + 1,
        })
    }

    pub fn str(&self, index: usize) -> Result<&'a str> {
        let value = self.get(index)?;
        value.as_str().ok_or_else(|| self.mismatch("string", value))
    }

    pub fn f64(&self, index: usize) -> Result<f64> {
        let value = self.get(index)?;
        value.as_f64().ok_or_else(|| self.mismatch("number", value))
    }

    /// Non-negative integral number; `64` and `64.0` are both accepted
    pub fn usize(&self, index: usize) -> Result<usize> {
        let value = self.get(index)?;
        match value.as_f64() {
            Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= usize::MAX as f64 => Ok(n as usize),
            _ => Err(self.mismatch("non-negative integer", value)),
        }
    }

    /// A timestamp: an RFC3339 string or a number of epoch seconds
    pub fn time(&self, index: usize) -> Result<DateTime<FixedOffset>> {
        let value = self.get(index)?;
        let parsed = match value {
            Json::String(s) => DateTime::parse_from_rfc3339(s).ok(),
            Json::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(secs), _) => DateTime::from_timestamp(secs, 0),
                (None, Some(secs)) => {
                    // nanos count forward from the floored second
                    let whole = secs.floor();
                    let nanos = (((secs - whole) * 1e9) as u32).min(999_999_999);
                    DateTime::from_timestamp(whole as i64, nanos)
                }
                _ => None,
            }
            .map(|t| t.fixed_offset()),
            _ => None,
        };
        parsed.ok_or_else(|| self.mismatch("time", value))
    }

    /// A URL: the object produced by the `url` helper or a URL string
    pub fn url(&self, index: usize) -> Result<Url> {
        let value = self.get(index)?;
        let raw = match value {
            Json::String(s) => s.as_str(),
            Json::Object(map) => match map.get("href").and_then(Json::as_str) {
                Some(href) => href,
                None => return Err(self.mismatch("url", value)),
            },
            _ => return Err(self.mismatch("url", value)),
        };
        parse_url(raw)
    }

    pub fn mismatch(&self, expected: &'static str, found: &Json) -> TemplateError {
        TemplateError::TypeMismatch {
            helper: self.helper.to_string(),
            expected,
            found: json_kind(found),
        }
    }
}

pub(crate) fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| TemplateError::UrlParse {
        input: raw.to_string(),
        message: e.to_string(),
    })
}

/// Name of a JSON value's kind, matching `Value::kind`
pub fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "list",
        Json::Object(_) => "map",
    }
}
