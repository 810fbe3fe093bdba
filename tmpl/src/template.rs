//! Template configuration and the `process` entry point

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::engine::RenderEngine;
use crate::env::EnvSnapshot;
use crate::error::Result;
use crate::files;
use crate::helpers::Helpers;
use crate::value::Value;
use crate::vars::VarStore;

/// Name used in diagnostics when none was given
pub const DEFAULT_NAME: &str = "template";

/// A template body plus everything needed to render it
///
/// Builder methods consume and return `self`:
///
/// ```
/// use tmpl::Template;
///
/// let t = Template::new("Hello {{var \"who\"}}!").with_var("who", "world");
/// let mut out = Vec::new();
/// t.process(&mut out).unwrap();
/// assert_eq!(out, b"Hello world!");
/// ```
#[derive(Debug, Clone)]
pub struct Template {
    name: Option<String>,
    body: String,
    includes: Vec<String>,
    vars: VarStore,
    env: EnvSnapshot,
    helpers: Helpers,
    strict: bool,
}

impl Default for Template {
    fn default() -> Self {
        Self::new("")
    }
}

impl Template {
    /// Create a template from a body, capturing the process environment
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            name: None,
            body: body.into(),
            includes: Vec::new(),
            vars: VarStore::new(),
            env: EnvSnapshot::capture(),
            helpers: Helpers,
            strict: true,
        }
    }

    /// Read the body from disk eagerly; the path becomes the name
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Template::from_file: called");
        let body = files::read_file(path)?;
        Ok(Self::new(body).with_name(path.display().to_string()))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The configured name, or `"template"`
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_NAME)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Append a source unit whose named definitions become available to
    /// the body. Later includes override earlier ones; the body overrides all.
    pub fn with_include(mut self, source: impl Into<String>) -> Self {
        self.includes.push(source.into());
        self
    }

    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.set(key, value);
        self
    }

    /// Set a variable in place; last write wins
    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.vars.set(key, value);
    }

    pub fn has_var(&self, key: &str) -> bool {
        self.vars.contains(key)
    }

    pub fn var(&self, key: &str) -> Result<&Value> {
        self.vars.get(key)
    }

    pub fn var_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.vars.get_or(key, default)
    }

    pub fn vars(&self) -> &VarStore {
        &self.vars
    }

    /// Replace the captured environment
    pub fn with_env_snapshot(mut self, env: EnvSnapshot) -> Self {
        self.env = env;
        self
    }

    pub fn env(&self, key: &str) -> Result<&str> {
        self.env.get(key)
    }

    pub fn env_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.env.get_or(key, default)
    }

    pub fn env_snapshot(&self) -> &EnvSnapshot {
        &self.env
    }

    /// Read a file relative to the working directory
    pub fn read_file(&self, path: &str) -> Result<String> {
        files::read_file(path)
    }

    pub fn helpers(&self) -> &Helpers {
        &self.helpers
    }

    /// Whether a bare `{{name}}` reference to a missing variable fails
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Compile then execute, streaming output into `dst`
    ///
    /// Parse errors and unknown function names are reported before anything
    /// is written. Errors during execution leave already-written output in
    /// place.
    pub fn process<W: Write>(&self, dst: W) -> Result<()> {
        info!("Processing template '{}'", self.name());
        let mut engine = RenderEngine::new(self);
        engine.compile()?;
        engine.execute(dst)
    }

    /// Render into a `String`
    pub fn render(&self) -> Result<String> {
        let mut out = Vec::new();
        self.process(&mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
