//! Fluent construction of [`Claims`]

use chrono::{Duration, Utc};
use serde_json::Value;

use super::registered::{NumericDate, Registered};
use super::{ClaimSet, Claims};

/// Claims builder for creating token claims
///
/// Registered fields go into [`Registered`]; custom claims and header fields
/// are collected into their own maps, which only exist once something has
/// been added to them.
#[derive(Debug, Clone, Default)]
pub struct ClaimsBuilder {
    registered: Registered,
    set: Option<ClaimSet>,
    extra_headers: Option<ClaimSet>,
    key_id: String,
}

impl ClaimsBuilder {
    /// Create new claims builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set issuer claim
    #[inline]
    #[must_use]
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.registered.issuer = issuer.into();
        self
    }

    /// Set subject claim
    #[inline]
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.registered.subject = subject.into();
        self
    }

    /// Append one audience
    #[inline]
    #[must_use]
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.registered.audiences.push(audience.into());
        self
    }

    /// Replace the audiences, keeping their order
    #[inline]
    #[must_use]
    pub fn audiences<I, A>(mut self, audiences: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.registered.audiences = audiences.into_iter().map(Into::into).collect();
        self
    }

    /// Set expiration time
    #[inline]
    #[must_use]
    pub fn expires(mut self, exp: impl Into<NumericDate>) -> Self {
        self.registered.expires = Some(exp.into());
        self
    }

    /// Set expiration time using duration from now
    #[inline]
    #[must_use]
    pub fn expires_in(self, duration: Duration) -> Self {
        self.expires(Utc::now() + duration)
    }

    /// Set not before time
    #[inline]
    #[must_use]
    pub fn not_before(mut self, nbf: impl Into<NumericDate>) -> Self {
        self.registered.not_before = Some(nbf.into());
        self
    }

    /// Set issued at time
    #[inline]
    #[must_use]
    pub fn issued_at(mut self, iat: impl Into<NumericDate>) -> Self {
        self.registered.issued = Some(iat.into());
        self
    }

    /// Set issued at time to now
    #[inline]
    #[must_use]
    pub fn issued_now(self) -> Self {
        self.issued_at(Utc::now())
    }

    /// Set token ID
    #[inline]
    #[must_use]
    pub fn id(mut self, jti: impl Into<String>) -> Self {
        self.registered.id = jti.into();
        self
    }

    /// Set custom claim with any JSON value
    #[inline]
    #[must_use]
    pub fn custom(mut self, name: impl Into<String>, value: Value) -> Self {
        self.set
            .get_or_insert_with(ClaimSet::new)
            .insert(name.into(), value);
        self
    }

    /// Add a header field
    #[inline]
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra_headers
            .get_or_insert_with(ClaimSet::new)
            .insert(name.into(), value);
        self
    }

    /// Set the key identifier (`kid` header)
    #[inline]
    #[must_use]
    pub fn key_id(mut self, kid: impl Into<String>) -> Self {
        self.key_id = kid.into();
        self
    }

    /// Build the claims
    #[must_use]
    pub fn build(self) -> Claims {
        Claims {
            registered: self.registered,
            set: self.set,
            extra_headers: self.extra_headers,
            key_id: self.key_id,
            raw: Vec::new(),
        }
    }
}

impl From<ClaimsBuilder> for Claims {
    fn from(builder: ClaimsBuilder) -> Self {
        builder.build()
    }
}
