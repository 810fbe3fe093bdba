//! Helper function library
//!
//! A fixed catalog of stateless functions callable by name from templates.
//! Every entry takes its evaluated arguments and returns a JSON value, so
//! calls nest: `{{unix (in "UTC" (var "now"))}}`.
//!
//! | Category   | Functions |
//! |------------|-----------|
//! | time       | `unix`, `rfc3339`, `short`, `short_date`, `medium`, `kitchen`, `month_day`, `in`, `time`, `time_unix`, `year`..`millisecond` |
//! | numeric    | `float64`, `money` |
//! | encoding   | `base64`, `base64decode` |
//! | string     | `upper`, `lower`, `title`, `trim`, `has_prefix`, `has_suffix`, `contains` |
//! | url        | `url`, `proto`, `host`, `port`, `path`, `rawquery`, `query` |
//! | digest     | `sha1`, `sha256`, `sha512` |
//! | identifier | `utc_now`, `uuidv4`, `create_key` |

pub mod args;
mod digest;
mod encoding;
mod identifier;
mod numeric;
mod strings;
mod time;
mod urls;

use serde_json::Value as Json;

use crate::error::Result;

pub use args::Args;
pub use identifier::Helpers;
pub use urls::{default_port, port_of};

/// A catalog entry
pub type HelperFn = fn(&Args<'_>) -> Result<Json>;

const CATALOG: &[(&str, HelperFn)] = &[
    // time
    ("unix", time::unix),
    ("rfc3339", time::rfc3339),
    ("short", time::short),
    ("short_date", time::short_date),
    ("medium", time::medium),
    ("kitchen", time::kitchen),
    ("month_day", time::month_day),
    ("in", time::in_zone),
    ("time", time::time),
    ("time_unix", time::time_unix),
    ("year", time::year),
    ("month", time::month),
    ("day", time::day),
    ("hour", time::hour),
    ("minute", time::minute),
    ("second", time::second),
    ("millisecond", time::millisecond),
    // numeric
    ("float64", numeric::float64),
    ("money", numeric::money),
    // encoding
    ("base64", encoding::base64),
    ("base64decode", encoding::base64decode),
    // string
    ("upper", strings::upper),
    ("lower", strings::lower),
    ("title", strings::title),
    ("trim", strings::trim),
    ("has_prefix", strings::has_prefix),
    ("has_suffix", strings::has_suffix),
    ("contains", strings::contains),
    // url
    ("url", urls::url),
    ("proto", urls::proto),
    ("host", urls::host),
    ("port", urls::port),
    ("path", urls::path),
    ("rawquery", urls::rawquery),
    ("query", urls::query),
    // digest
    ("sha1", digest::sha1),
    ("sha256", digest::sha256),
    ("sha512", digest::sha512),
    // identifier
    ("utc_now", identifier::utc_now),
    ("uuidv4", identifier::uuidv4),
    ("create_key", identifier::create_key),
];

/// All catalog entries in registration order
pub fn catalog() -> &'static [(&'static str, HelperFn)] {
    CATALOG
}

/// Look up a catalog entry by name
pub fn lookup(name: &str) -> Option<HelperFn> {
    CATALOG.iter().find(|(n, _)| *n == name).map(|(_, f)| *f)
}

/// Invoke a catalog helper directly
pub fn call(name: &str, values: &[Json]) -> Option<Result<Json>> {
    lookup(name).map(|f| f(&Args::new(name, values)))
}
