//! Token builder: claims in, compact token out

use rsa::RsaPrivateKey;
use serde_json::Value;

use crate::claims::{ClaimSet, Claims};
use crate::error::TokenResult;
use crate::signer::{EcdsaSigningKey, Signer};
use crate::token::Token;

/// Token builder holding the claims to encode.
///
/// Every finishing method rebuilds the payload, so the builder can be reused
/// to mint several tokens from the same claims.
#[derive(Debug, Clone, Default)]
pub struct TokenBuilder {
    claims: Claims,
}

impl TokenBuilder {
    /// Create new token builder with empty claims
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the claims
    #[inline]
    #[must_use]
    pub fn with_claims(mut self, claims: impl Into<Claims>) -> Self {
        self.claims = claims.into();
        self
    }

    /// Set the key identifier (`kid` header)
    #[inline]
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.claims.key_id = kid.into();
        self
    }

    /// Add a header field
    #[inline]
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: Value) -> Self {
        self.claims
            .extra_headers
            .get_or_insert_with(ClaimSet::new)
            .insert(name.into(), value);
        self
    }

    /// Add a custom claim
    #[inline]
    #[must_use]
    pub fn with_claim(mut self, name: impl Into<String>, value: Value) -> Self {
        self.claims
            .set
            .get_or_insert_with(ClaimSet::new)
            .insert(name.into(), value);
        self
    }

    /// Claims as of the last build; `raw` holds the last payload.
    #[must_use]
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Take the claims back out.
    #[must_use]
    pub fn into_claims(self) -> Claims {
        self.claims
    }

    /// Sign with HMAC; see [`Claims::hmac_sign`].
    ///
    /// # Errors
    /// As [`Claims::hmac_sign`].
    pub fn hmac(&mut self, alg: &str, secret: &[u8]) -> TokenResult<Token> {
        self.claims.hmac_sign(alg, secret)
    }

    /// Sign with RSA; see [`Claims::rsa_sign`].
    ///
    /// # Errors
    /// As [`Claims::rsa_sign`].
    pub fn rsa(&mut self, alg: &str, key: &RsaPrivateKey) -> TokenResult<Token> {
        self.claims.rsa_sign(alg, key)
    }

    /// Sign with ECDSA; see [`Claims::ecdsa_sign`].
    ///
    /// # Errors
    /// As [`Claims::ecdsa_sign`].
    pub fn ecdsa(&mut self, alg: &str, key: &EcdsaSigningKey) -> TokenResult<Token> {
        self.claims.ecdsa_sign(alg, key)
    }

    /// Sign with Ed25519; see [`Claims::eddsa_sign`].
    ///
    /// # Errors
    /// As [`Claims::eddsa_sign`].
    pub fn eddsa(&mut self, key: &ed25519_dalek::SigningKey) -> TokenResult<Token> {
        self.claims.eddsa_sign(key)
    }

    /// Sign with a caller-supplied strategy.
    ///
    /// # Errors
    /// As [`Claims::sign_with`].
    pub fn sign_with<S: Signer + ?Sized>(&mut self, signer: &S) -> TokenResult<Token> {
        self.claims.sign_with(signer)
    }

    /// Encode without a signature; see [`Claims::format_without_sign`].
    ///
    /// # Errors
    /// As [`Claims::format_without_sign`].
    pub fn unsigned(&mut self, alg: &str) -> TokenResult<Token> {
        self.claims.format_without_sign(alg)
    }
}

impl From<Claims> for TokenBuilder {
    fn from(claims: Claims) -> Self {
        Self { claims }
    }
}
