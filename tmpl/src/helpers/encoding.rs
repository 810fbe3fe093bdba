//! Base64 helpers

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde_json::Value as Json;

use super::args::Args;
use crate::error::{Result, TemplateError};

pub(super) fn base64(args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(BASE64_STANDARD.encode(args.str(0)?.as_bytes())))
}

pub(super) fn base64decode(args: &Args<'_>) -> Result<Json> {
    let input = args.str(0)?;
    let bytes = BASE64_STANDARD.decode(input.as_bytes()).map_err(|e| TemplateError::Encoding {
        helper: args.helper().to_string(),
        message: e.to_string(),
    })?;
    let decoded = String::from_utf8(bytes).map_err(|_| TemplateError::Encoding {
        helper: args.helper().to_string(),
        message: "decoded base64 is not valid UTF-8".to_string(),
    })?;
    Ok(Json::String(decoded))
}
