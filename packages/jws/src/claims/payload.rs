//! Payload serialization with registered-claim merging

use serde_json::Value;

use super::registered::Registered;
use super::{ClaimSet, Claims};
use crate::error::TokenResult;

/// Copy `set` and write every non-empty registered claim over it.
///
/// Without a `set` the result holds only the registered claims.
pub(crate) fn merge(registered: &Registered, set: Option<&ClaimSet>) -> TokenResult<ClaimSet> {
    let mut merged = set.cloned().unwrap_or_default();
    for (name, value) in registered.entries()? {
        merged.insert(name.to_string(), value);
    }
    Ok(merged)
}

/// Serialize the payload of `claims` and store it as `claims.raw`.
///
/// `raw` is only replaced after serialization succeeds.
pub(crate) fn build(claims: &mut Claims) -> TokenResult<()> {
    let bytes = match &claims.set {
        None => serde_json::to_vec(&claims.registered)?,
        Some(set) => {
            let merged = merge(&claims.registered, Some(set))?;
            serde_json::to_vec(&Value::Object(merged))?
        }
    };

    tracing::trace!(payload_len = bytes.len(), merged = claims.set.is_some(), "payload built");
    claims.raw = bytes;
    Ok(())
}
