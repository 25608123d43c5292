//! EdDSA signing with Ed25519
//!
//! The whole signing input is the message; Ed25519 hashes internally.

use ed25519_dalek::{SIGNATURE_LENGTH, Signer as _, SigningKey};

use super::Signer;
use crate::algorithms::Algorithm;
use crate::error::{TokenError, TokenResult};

/// Ed25519 strategy over a borrowed signing key.
pub struct EdDsaSigner<'a> {
    key: &'a SigningKey,
}

impl<'a> EdDsaSigner<'a> {
    /// EdDSA has a single identifier, so construction cannot fail.
    #[must_use]
    pub fn new(key: &'a SigningKey) -> Self {
        Self { key }
    }
}

impl std::fmt::Debug for EdDsaSigner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdDsaSigner").finish_non_exhaustive()
    }
}

impl Signer for EdDsaSigner<'_> {
    fn algorithm(&self) -> &str {
        Algorithm::EdDSA.as_str()
    }

    fn signature_len(&self) -> usize {
        SIGNATURE_LENGTH
    }

    fn sign_into(&self, input: &[u8], out: &mut [u8]) -> TokenResult<()> {
        let signature = self.key.try_sign(input).map_err(TokenError::primitive)?;
        out.copy_from_slice(&signature.to_bytes());
        Ok(())
    }
}
