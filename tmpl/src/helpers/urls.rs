//! URL parsing and component extraction

use serde_json::{Value as Json, json};
use url::Url;

use super::args::{Args, parse_url};
use crate::error::Result;

/// Port used when a URL carries none, by scheme
pub fn default_port(scheme: &str) -> Option<&'static str> {
    match scheme.to_ascii_lowercase().as_str() {
        "http" => Some("80"),
        "https" => Some("443"),
        "ssh" => Some("22"),
        "ftp" => Some("21"),
        "sftp" => Some("22"),
        _ => None,
    }
}

/// Explicit port if present, else the scheme default, else empty
pub fn port_of(u: &Url) -> String {
    match u.port() {
        Some(port) => port.to_string(),
        None => default_port(u.scheme()).unwrap_or_default().to_string(),
    }
}

/// Host including an explicit port, e.g. `example.com:8080`
fn host_of(u: &Url) -> String {
    let host = u.host_str().unwrap_or_default();
    match u.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

/// `url "https://..."` parses into a structured object
pub(super) fn url(args: &Args<'_>) -> Result<Json> {
    let u = parse_url(args.str(0)?)?;
    Ok(json!({
        "href": u.as_str(),
        "scheme": u.scheme(),
        "host": host_of(&u),
        "port": port_of(&u),
        "path": u.path(),
        "raw_query": u.query().unwrap_or_default(),
        "fragment": u.fragment().unwrap_or_default(),
    }))
}

pub(super) fn proto(args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(args.url(0)?.scheme().to_string()))
}

pub(super) fn host(args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(host_of(&args.url(0)?)))
}

pub(super) fn port(args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(port_of(&args.url(0)?)))
}

pub(super) fn path(args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(args.url(0)?.path().to_string()))
}

pub(super) fn rawquery(args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(args.url(0)?.query().unwrap_or_default().to_string()))
}

/// `query NAME URL` returns the first value of a query parameter, or empty
pub(super) fn query(args: &Args<'_>) -> Result<Json> {
    let name = args.str(0)?;
    let u = args.url(1)?;
    let value = u
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default();
    Ok(Json::String(value))
}
