//! Hex-encoded digests

use serde_json::Value as Json;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use super::args::Args;
use crate::error::Result;

fn hash_hex<D: Digest>(input: &str) -> String {
    let mut hasher = D::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

pub(super) fn sha1(args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(hash_hex::<Sha1>(args.str(0)?)))
}

pub(super) fn sha256(args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(hash_hex::<Sha256>(args.str(0)?)))
}

pub(super) fn sha512(args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(hash_hex::<Sha512>(args.str(0)?)))
}
