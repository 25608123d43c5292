//! Token assembly: payload, header, one buffer, signature

use std::fmt;

use rsa::RsaPrivateKey;

use crate::buffer::TokenBuffer;
use crate::claims::{Claims, payload};
use crate::codec;
use crate::error::{TokenError, TokenResult};
use crate::header;
use crate::signer::{EcdsaSigner, EcdsaSigningKey, EdDsaSigner, HmacSigner, RsaSigner, Signer};

/// Compact serialization of a token.
///
/// Three base64url segments joined by `.`, or `header.payload.` when the
/// token is unsigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    fn from_buffer(bytes: Vec<u8>) -> TokenResult<Self> {
        String::from_utf8(bytes)
            .map(Token)
            .map_err(TokenError::primitive)
    }

    /// Token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Token bytes (ASCII).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Take the token bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0.into_bytes()
    }

    /// Take the token text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// The dot-separated segments. An unsigned token yields an empty third one.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Encoded header segment.
    #[must_use]
    pub fn header(&self) -> &str {
        self.segments().next().unwrap_or_default()
    }

    /// Encoded payload segment.
    #[must_use]
    pub fn payload(&self) -> &str {
        self.segments().nth(1).unwrap_or_default()
    }

    /// Encoded signature segment, `None` for unsigned tokens.
    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.segments().nth(2).filter(|sig| !sig.is_empty())
    }

    /// Whether the token carries a signature.
    #[must_use]
    pub fn is_signed(&self) -> bool {
        self.signature().is_some()
    }

    /// Length of the token in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a built token.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<[u8]> for Token {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl From<Token> for Vec<u8> {
    fn from(token: Token) -> Self {
        token.into_bytes()
    }
}

impl Claims {
    /// Build the payload and lay out `header.payload` for `alg`.
    fn layout(&mut self, alg: &str, signature_len: usize) -> TokenResult<TokenBuffer> {
        payload::build(self)?;
        let header = header::build(alg, &self.key_id, self.extra_headers.as_ref())?;
        tracing::debug!(
            alg,
            fast_path = header.is_fixed(),
            payload_len = self.raw.len(),
            "token layout"
        );
        TokenBuffer::allocate(&header, &self.raw, signature_len)
    }

    /// Encode the claims as `header.payload.` without a signature.
    ///
    /// Any identifier is accepted; ones outside the standard set are written
    /// into a serialized header.
    ///
    /// # Errors
    /// Returns a serialization error when the claims or headers cannot be
    /// serialized.
    pub fn format_without_sign(&mut self, alg: &str) -> TokenResult<Token> {
        let buffer = self.layout(alg, 0)?;
        Token::from_buffer(buffer.finish_unsigned())
    }

    /// Sign the claims with any [`Signer`].
    ///
    /// The payload is rebuilt into `raw` first, so `raw` holds the new
    /// payload even when signing fails.
    ///
    /// # Errors
    /// Serialization errors and failures of the signing primitive.
    pub fn sign_with<S: Signer + ?Sized>(&mut self, signer: &S) -> TokenResult<Token> {
        let raw_len = signer.signature_len();
        let buffer = self.layout(signer.algorithm(), codec::encoded_len(raw_len))?;
        let bytes = buffer.seal(raw_len, |input, out| signer.sign_into(input, out))?;
        Token::from_buffer(bytes)
    }

    /// Sign with HMAC (HS256, HS384, HS512).
    ///
    /// # Errors
    /// [`TokenError::MissingSecret`] for an empty secret, before any other
    /// check; [`TokenError::UnsupportedAlgorithm`] for non-HMAC identifiers.
    pub fn hmac_sign(&mut self, alg: &str, secret: &[u8]) -> TokenResult<Token> {
        let signer = HmacSigner::new(alg, secret)?;
        self.sign_with(&signer)
    }

    /// Sign with RSA. `PS*` identifiers use PSS padding, `RS*` PKCS#1 v1.5.
    ///
    /// # Errors
    /// [`TokenError::UnsupportedAlgorithm`] for non-RSA identifiers;
    /// [`TokenError::PrimitiveFailure`] when signing fails.
    pub fn rsa_sign(&mut self, alg: &str, key: &RsaPrivateKey) -> TokenResult<Token> {
        let signer = RsaSigner::new(alg, key)?;
        self.sign_with(&signer)
    }

    /// Sign with ECDSA (ES256 on P-256, ES384 on P-384, ES512 on P-521).
    ///
    /// # Errors
    /// [`TokenError::UnsupportedAlgorithm`] for non-ECDSA identifiers;
    /// [`TokenError::CurveMismatch`] when the key is on another curve.
    pub fn ecdsa_sign(&mut self, alg: &str, key: &EcdsaSigningKey) -> TokenResult<Token> {
        let signer = EcdsaSigner::new(alg, key)?;
        self.sign_with(&signer)
    }

    /// Sign with Ed25519 under the `EdDSA` identifier.
    ///
    /// # Errors
    /// [`TokenError::PrimitiveFailure`] when signing fails.
    pub fn eddsa_sign(&mut self, key: &ed25519_dalek::SigningKey) -> TokenResult<Token> {
        self.sign_with(&EdDsaSigner::new(key))
    }
}
