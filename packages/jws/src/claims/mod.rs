//! Token claims: registered fields, custom claims and header extensions

pub mod builder;
pub(crate) mod payload;
pub mod registered;

use serde_json::{Map, Value};

pub use builder::ClaimsBuilder;
pub use registered::{NumericDate, Registered};

/// Generic JSON object, serialized with keys in lexicographic order.
pub type ClaimSet = Map<String, Value>;

/// The unit of work for token construction.
///
/// `set` takes precedence as the payload source when present; the non-empty
/// `registered` fields are merged into a copy of it. Neither `set` nor
/// `extra_headers` is modified by a build.
///
/// A build rewrites `raw`, so one `Claims` value must not be signed from two
/// threads at once without external synchronization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Claims {
    /// Registered claims.
    pub registered: Registered,

    /// Custom claims. When present this is the payload, with registered
    /// claims written over its reserved names.
    pub set: Option<ClaimSet>,

    /// Additional header fields. `alg` (and `kid` when `key_id` is set) are
    /// written over the corresponding entries of a copy.
    pub extra_headers: Option<ClaimSet>,

    /// Key identifier (`kid` header); empty means absent.
    pub key_id: String,

    /// Payload JSON of the last build.
    ///
    /// Rewritten by every token-building call before signing starts, so it
    /// reflects the new payload even when signing later fails.
    pub raw: Vec<u8>,
}

impl Claims {
    /// Claims holding only registered fields.
    #[must_use]
    pub fn new(registered: Registered) -> Self {
        Self {
            registered,
            ..Self::default()
        }
    }

    /// Start a [`ClaimsBuilder`].
    #[must_use]
    pub fn builder() -> ClaimsBuilder {
        ClaimsBuilder::new()
    }

    /// Payload JSON of the last build, empty before the first one.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The claims as they are encoded into the payload.
    ///
    /// This is `set` with the registered fields merged in, or the registered
    /// fields alone when `set` is absent.
    ///
    /// # Errors
    /// Returns an error when a numeric date is not finite.
    pub fn effective_claims(&self) -> crate::TokenResult<ClaimSet> {
        payload::merge(&self.registered, self.set.as_ref())
    }
}
