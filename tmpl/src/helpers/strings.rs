//! String transforms and predicates

use serde_json::Value as Json;

use super::args::Args;
use crate::error::Result;

pub(super) fn upper(args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(args.str(0)?.to_uppercase()))
}

pub(super) fn lower(args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(args.str(0)?.to_lowercase()))
}

/// Upper-case the first letter of every whitespace-separated word, leaving
/// the remaining letters as given
pub(super) fn title(args: &Args<'_>) -> Result<Json> {
    let input = args.str(0)?;
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    Ok(Json::String(out))
}

pub(super) fn trim(args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(args.str(0)?.trim().to_string()))
}

/// `has_prefix PREFIX VALUE`
pub(super) fn has_prefix(args: &Args<'_>) -> Result<Json> {
    let prefix = args.str(0)?;
    Ok(Json::Bool(args.str(1)?.starts_with(prefix)))
}

/// `has_suffix SUFFIX VALUE`
pub(super) fn has_suffix(args: &Args<'_>) -> Result<Json> {
    let suffix = args.str(0)?;
    Ok(Json::Bool(args.str(1)?.ends_with(suffix)))
}

/// `contains VALUE SUBSTR`
pub(super) fn contains(args: &Args<'_>) -> Result<Json> {
    let value = args.str(0)?;
    Ok(Json::Bool(value.contains(args.str(1)?)))
}
