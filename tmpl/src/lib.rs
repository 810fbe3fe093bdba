//! tmpl - render parameterized documents from variables, environment and files
//!
//! A [`Template`] owns a body, optional include sources, a variable store and
//! an environment snapshot captured at construction. [`Template::process`]
//! compiles the body with the Handlebars grammar, binds the helper catalog,
//! and streams the result into any `io::Write`.
//!
//! # Example
//!
//! ```
//! use tmpl::Template;
//!
//! let t = Template::new("port: {{var \"port\" 80}}\nhost: {{host (var \"endpoint\")}}\n")
//!     .with_var("endpoint", "https://api.example.com:8443/v1");
//!
//! let mut out = Vec::new();
//! t.process(&mut out)?;
//! assert_eq!(String::from_utf8_lossy(&out), "port: 80\nhost: api.example.com:8443\n");
//! # Ok::<(), tmpl::TemplateError>(())
//! ```
//!
//! Template-side accessors: `var KEY [DEFAULT]`, `has_var KEY`,
//! `env KEY [DEFAULT]`, `file PATH`. See [`helpers`] for the function catalog.

pub mod cli;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod files;
pub mod helpers;
pub mod template;
pub mod value;
pub mod vars;
pub mod varsfile;

pub use engine::{RenderEngine, RenderState};
pub use env::EnvSnapshot;
pub use error::{Result, TemplateError};
pub use helpers::Helpers;
pub use template::Template;
pub use value::Value;
pub use vars::VarStore;
