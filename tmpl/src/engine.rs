//! Render engine
//!
//! Compiles a [`Template`] against the Handlebars grammar, binds the helper
//! catalog and the per-template accessors (`var`, `has_var`, `env`, `file`),
//! and executes the result straight into a writer.
//!
//! State machine: `Uncompiled -> Compiled -> Executing -> Done | Failed`.
//! Any compile failure moves straight to `Failed`.

use std::collections::HashSet;
use std::io::{self, Write};

use handlebars::template::{DecoratorTemplate, HelperTemplate, Parameter, Template as Compiled, TemplateElement};
use handlebars::{Context, Handlebars, Helper, HelperDef, RenderContext, RenderError, RenderErrorReason, ScopedJson};
use serde_json::Value as Json;
use tracing::{debug, info, warn};

use crate::error::{Result, TemplateError};
use crate::helpers::{self, Args};
use crate::template::Template;
use crate::value::Value;

/// Handlebars built-ins that may be called with arguments
const BUILTINS: &[&str] = &[
    "if", "unless", "each", "with", "lookup", "raw", "log", "eq", "ne", "gt", "gte", "lt", "lte", "and", "or", "not",
    "len",
];

/// Accessors bound to the template being rendered
pub const ACCESSORS: &[&str] = &["var", "has_var", "env", "file"];

/// Lifecycle of a single render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Uncompiled,
    Compiled,
    Executing,
    Done,
    Failed,
}

/// Adapter exposing a Rust function as a value-returning Handlebars helper,
/// so it works both as `{{name args}}` and inside sub-expressions
struct FnHelper<F> {
    name: &'static str,
    func: F,
}

fn helper<F>(name: &'static str, func: F) -> Box<FnHelper<F>>
where
    F: Fn(&Args<'_>) -> Result<Json> + Send + Sync,
{
    Box::new(FnHelper { name, func })
}

impl<F> HelperDef for FnHelper<F>
where
    F: Fn(&Args<'_>) -> Result<Json> + Send + Sync,
{
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> std::result::Result<ScopedJson<'rc>, RenderError> {
        let values: Vec<Json> = h.params().iter().map(|p| p.value().clone()).collect();
        (self.func)(&Args::new(self.name, &values))
            .map(ScopedJson::Derived)
            .map_err(|e| RenderErrorReason::NestedError(Box::new(e)).into())
    }
}

/// Writer wrapper remembering the first I/O failure of the destination
struct TrackingWriter<W> {
    inner: W,
    failure: Option<String>,
}

impl<W: Write> Write for TrackingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).inspect_err(|e| {
            self.failure.get_or_insert_with(|| e.to_string());
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().inspect_err(|e| {
            self.failure.get_or_insert_with(|| e.to_string());
        })
    }
}

/// Compiles and executes one template
pub struct RenderEngine<'t> {
    template: &'t Template,
    registry: Handlebars<'t>,
    state: RenderState,
}

impl<'t> RenderEngine<'t> {
    pub fn new(template: &'t Template) -> Self {
        debug!(name = %template.name(), "RenderEngine::new: called");
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(template.strict());

        for &(name, func) in helpers::catalog() {
            registry.register_helper(name, helper(name, func));
        }
        register_accessors(&mut registry, template);

        Self {
            template,
            registry,
            state: RenderState::Uncompiled,
        }
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Parse every source unit, reject calls to unknown functions, then
    /// register the merged unit (includes in order, body last)
    pub fn compile(&mut self) -> Result<()> {
        debug!(state = ?self.state, "RenderEngine::compile: called");
        if self.state != RenderState::Uncompiled {
            return Err(self.out_of_order("compile"));
        }

        match self.try_compile() {
            Ok(()) => {
                self.state = RenderState::Compiled;
                Ok(())
            }
            Err(e) => {
                debug!(error = %e, "RenderEngine::compile: failed");
                self.state = RenderState::Failed;
                Err(e)
            }
        }
    }

    fn try_compile(&mut self) -> Result<()> {
        let template = self.template;
        let name = template.name();
        let known = known_names();

        for (i, include) in template.includes().iter().enumerate() {
            validate_unit(&format!("{}#include[{}]", name, i), include, &known)?;
        }
        validate_unit(name, template.body(), &known)?;

        let merged = merge_sources(template.includes(), template.body());
        self.registry
            .register_template_string(name, merged)
            .map_err(|e| parse_error(name, &e))?;

        debug!(%name, includes = template.includes().len(), "RenderEngine::try_compile: compiled");
        Ok(())
    }

    /// Walk the compiled template once, writing output as it is produced
    ///
    /// Output written before a failure stays written.
    pub fn execute<W: Write>(&mut self, dst: W) -> Result<()> {
        debug!(state = ?self.state, "RenderEngine::execute: called");
        if self.state != RenderState::Compiled {
            return Err(self.out_of_order("execute"));
        }

        let template = self.template;
        let name = template.name();
        let data = template.vars().to_json();
        let mut writer = TrackingWriter {
            inner: dst,
            failure: None,
        };

        self.state = RenderState::Executing;
        info!("Rendering template '{}'", name);
        let result = self
            .registry
            .render_to_write(name, &data, &mut writer)
            .map_err(|e| classify(name, e))
            .and_then(|()| {
                writer.flush().map_err(|e| TemplateError::Output { message: e.to_string() })
            });

        match result {
            Ok(()) => {
                self.state = RenderState::Done;
                debug!(%name, "RenderEngine::execute: done");
                Ok(())
            }
            Err(e) => {
                self.state = RenderState::Failed;
                let err = match writer.failure.take() {
                    Some(message) => TemplateError::Output { message },
                    None => e,
                };
                warn!(%name, kind = err.kind(), "Render failed: {}", err);
                Err(err)
            }
        }
    }

    fn out_of_order(&self, step: &str) -> TemplateError {
        TemplateError::Render {
            template: self.template.name().to_string(),
            message: format!("cannot {} from state {:?}", step, self.state),
        }
    }
}

fn register_accessors<'t>(registry: &mut Handlebars<'t>, template: &'t Template) {
    registry.register_helper(
        "var",
        helper("var", move |args: &Args<'_>| {
            let key = args.str(0)?;
            match args.opt(1) {
                Some(default) => Ok(template.vars().get(key).map(Value::to_json).unwrap_or_else(|_| default.clone())),
                None => template.var(key).map(Value::to_json),
            }
        }),
    );

    registry.register_helper(
        "has_var",
        helper("has_var", move |args: &Args<'_>| Ok(Json::Bool(template.has_var(args.str(0)?)))),
    );

    registry.register_helper(
        "env",
        helper("env", move |args: &Args<'_>| {
            let key = args.str(0)?;
            let value = match args.opt(1) {
                Some(Json::String(default)) => template.env_or(key, default),
                Some(other) => return Err(args.mismatch("string", other)),
                None => template.env(key)?,
            };
            Ok(Json::String(value.to_string()))
        }),
    );

    registry.register_helper(
        "file",
        helper("file", move |args: &Args<'_>| Ok(Json::String(template.read_file(args.str(0)?)?))),
    );
}

fn known_names() -> HashSet<&'static str> {
    BUILTINS
        .iter()
        .chain(ACCESSORS)
        .copied()
        .chain(helpers::catalog().iter().map(|(name, _)| *name))
        .collect()
}

/// Includes in insertion order followed by the body. Inline partials are
/// registered as execution reaches them, so a later definition of a name
/// replaces an earlier one and the body can override any include.
fn merge_sources(includes: &[String], body: &str) -> String {
    let mut merged = String::with_capacity(includes.iter().map(String::len).sum::<usize>() + body.len());
    for include in includes {
        merged.push_str(include);
    }
    merged.push_str(body);
    merged
}

fn validate_unit(unit: &str, source: &str, known: &HashSet<&str>) -> Result<()> {
    debug!(%unit, len = source.len(), "validate_unit: called");
    let compiled = Compiled::compile(source).map_err(|e| parse_error(unit, &e))?;
    check_elements(unit, &compiled.elements, known)
}

fn parse_error(unit: &str, err: &handlebars::TemplateError) -> TemplateError {
    let (line, column) = match err.pos() {
        Some((line, column)) => (Some(line), Some(column)),
        None => (None, None),
    };
    TemplateError::Parse {
        template: unit.to_string(),
        line,
        column,
        message: err.reason().to_string(),
    }
}

fn check_elements(unit: &str, elements: &[TemplateElement], known: &HashSet<&str>) -> Result<()> {
    for element in elements {
        match element {
            TemplateElement::Expression(h) | TemplateElement::HtmlExpression(h) | TemplateElement::HelperBlock(h) => {
                check_helper(unit, h, known, false)?
            }
            TemplateElement::DecoratorExpression(d)
            | TemplateElement::DecoratorBlock(d)
            | TemplateElement::PartialExpression(d)
            | TemplateElement::PartialBlock(d) => check_decorator(unit, d, known)?,
            _ => {}
        }
    }
    Ok(())
}

/// A bare `{{name}}` may be a variable, so only expressions with arguments
/// and sub-expressions are treated as calls
fn check_helper(unit: &str, h: &HelperTemplate, known: &HashSet<&str>, subexpression: bool) -> Result<()> {
    let is_call = subexpression || !h.params.is_empty() || !h.hash.is_empty();
    if is_call {
        if let Some(name) = h.name.as_name() {
            if !known.contains(name) {
                return Err(TemplateError::UnknownHelper {
                    template: unit.to_string(),
                    name: name.to_string(),
                });
            }
        }
    }

    check_params(unit, h.params.iter().chain(h.hash.values()), known)?;
    if let Some(inner) = &h.template {
        check_elements(unit, &inner.elements, known)?;
    }
    if let Some(inverse) = &h.inverse {
        check_elements(unit, &inverse.elements, known)?;
    }
    Ok(())
}

fn check_decorator(unit: &str, d: &DecoratorTemplate, known: &HashSet<&str>) -> Result<()> {
    check_params(unit, d.params.iter().chain(d.hash.values()), known)?;
    if let Some(inner) = &d.template {
        check_elements(unit, &inner.elements, known)?;
    }
    Ok(())
}

fn check_params<'a>(unit: &str, params: impl Iterator<Item = &'a Parameter>, known: &HashSet<&str>) -> Result<()> {
    for param in params {
        if let Parameter::Subexpression(sub) = param {
            match sub.element.as_ref() {
                TemplateElement::Expression(h) | TemplateElement::HtmlExpression(h) => {
                    check_helper(unit, h, known, true)?
                }
                other => check_elements(unit, std::slice::from_ref(other), known)?,
            }
        }
    }
    Ok(())
}

/// Recover the typed error a helper raised, or describe the engine failure
fn classify(template: &str, err: RenderError) -> TemplateError {
    match err.reason() {
        RenderErrorReason::NestedError(inner) => {
            if let Some(e) = inner.downcast_ref::<TemplateError>() {
                return e.clone();
            }
        }
        RenderErrorReason::MissingVariable(path) => {
            return TemplateError::UnsetVariable {
                key: path.clone().unwrap_or_default(),
            };
        }
        _ => {}
    }
    TemplateError::Render {
        template: template.to_string(),
        message: err.to_string(),
    }
}
