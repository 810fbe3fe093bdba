//! Clock, identifier and key generation
//!
//! These are the non-transform helpers exposed both to templates and to
//! Rust callers through [`Helpers`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde_json::Value as Json;
use tracing::debug;
use uuid::Uuid;

use super::args::Args;
use crate::error::{Result, TemplateError};
use crate::value::format_rfc3339;

/// Largest key length, in bytes, `create_key` will generate
pub const MAX_KEY_LEN: usize = 1024 * 1024;

/// Handle to the clock and randomness helpers
#[derive(Debug, Clone, Copy, Default)]
pub struct Helpers;

impl Helpers {
    /// Current time in UTC
    pub fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    /// Random (v4) UUID
    pub fn uuid_v4(&self) -> Uuid {
        Uuid::new_v4()
    }

    /// Base64 encoding of `len` bytes drawn from a cryptographically
    /// secure generator. The result is always longer than `len` when
    /// `len > 0`. Lengths above [`MAX_KEY_LEN`] are rejected.
    pub fn create_key(&self, len: usize) -> Result<String> {
        debug!(%len, "Helpers::create_key: called");
        if len > MAX_KEY_LEN {
            return Err(TemplateError::TypeMismatch {
                helper: "create_key".to_string(),
                expected: "integer <= 1048576",
                found: "number",
            });
        }
        let mut key = vec![0u8; len];
        rand::rng().fill_bytes(&mut key);
        Ok(BASE64_STANDARD.encode(&key))
    }
}

pub(super) fn utc_now(_args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(format_rfc3339(&Helpers.utc_now())))
}

pub(super) fn uuidv4(_args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(Helpers.uuid_v4().to_string()))
}

/// `create_key N`
pub(super) fn create_key(args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(Helpers.create_key(args.usize(0)?)?))
}
