//! JOSE header construction
//!
//! Standard identifiers without key id or extra fields resolve to a
//! pre-encoded literal; everything else is serialized per call.

use serde_json::Value;

use crate::algorithms::Algorithm;
use crate::claims::ClaimSet;
use crate::codec;
use crate::error::TokenResult;

/// Resolved header, ready to be laid out in the token buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    /// Pre-encoded header, separator included.
    Fixed(&'static str),
    /// Header JSON, encoded when the buffer is laid out.
    Json(Vec<u8>),
}

impl Header {
    /// Length of the encoded header plus the `.` separator.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        match self {
            Header::Fixed(literal) => literal.len(),
            Header::Json(json) => codec::encoded_len(json.len()) + 1,
        }
    }

    /// Whether the fast path was taken.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Header::Fixed(_))
    }
}

/// Resolve the header for `alg`.
///
/// # Errors
/// Returns a serialization error when `extra_headers` cannot be serialized.
pub fn build(alg: &str, key_id: &str, extra_headers: Option<&ClaimSet>) -> TokenResult<Header> {
    if extra_headers.is_none() && key_id.is_empty() {
        if let Ok(known) = alg.parse::<Algorithm>() {
            return Ok(Header::Fixed(known.fixed_header()));
        }
    }
    json(alg, key_id, extra_headers).map(Header::Json)
}

/// Header JSON for `alg`, without the fixed-literal shortcut.
///
/// With `extra_headers` the result is a copy of the map with `alg` (and `kid`
/// when `key_id` is non-empty) set, keys in lexicographic order. Otherwise the
/// object is written by hand as `{"kid":..,"alg":..}` or `{"alg":..}`.
///
/// # Errors
/// Returns a serialization error when `extra_headers` cannot be serialized.
pub fn json(alg: &str, key_id: &str, extra_headers: Option<&ClaimSet>) -> TokenResult<Vec<u8>> {
    if let Some(extra) = extra_headers {
        let mut header = extra.clone();
        header.insert("alg".to_string(), Value::String(alg.to_string()));
        if !key_id.is_empty() {
            header.insert("kid".to_string(), Value::String(key_id.to_string()));
        }
        return Ok(serde_json::to_vec(&Value::Object(header))?);
    }

    let mut out = Vec::with_capacity(19 + key_id.len() + alg.len());
    if key_id.is_empty() {
        out.extend_from_slice(br#"{"alg":"#);
    } else {
        out.extend_from_slice(br#"{"kid":"#);
        serde_json::to_writer(&mut out, key_id)?;
        out.extend_from_slice(br#","alg":"#);
    }
    serde_json::to_writer(&mut out, alg)?;
    out.push(b'}');
    Ok(out)
}
