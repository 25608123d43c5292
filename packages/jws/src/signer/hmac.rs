//! HMAC-SHA signing (HS256, HS384, HS512)

use hmac::{Hmac, Mac, digest::KeyInit};
use sha2::{Sha256, Sha384, Sha512};

use super::{PrimitiveError, Signer};
use crate::algorithms::{self, Algorithm, Family, HashAlgorithm};
use crate::error::{TokenError, TokenResult};

/// HMAC strategy over a borrowed secret.
pub struct HmacSigner<'a> {
    alg: Algorithm,
    hash: HashAlgorithm,
    secret: &'a [u8],
}

impl<'a> HmacSigner<'a> {
    /// Resolve `alg` in the HMAC family.
    ///
    /// # Errors
    /// [`TokenError::MissingSecret`] for an empty secret, checked before the
    /// identifier; [`TokenError::UnsupportedAlgorithm`] for non-HMAC identifiers.
    pub fn new(alg: &str, secret: &'a [u8]) -> TokenResult<Self> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        let (alg, hash) = algorithms::hash_lookup(alg, Family::Hmac)?;
        Ok(Self { alg, hash, secret })
    }
}

impl std::fmt::Debug for HmacSigner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner")
            .field("alg", &self.alg)
            .finish_non_exhaustive()
    }
}

impl Signer for HmacSigner<'_> {
    fn algorithm(&self) -> &str {
        self.alg.as_str()
    }

    fn signature_len(&self) -> usize {
        self.hash.size()
    }

    fn sign_into(&self, input: &[u8], out: &mut [u8]) -> TokenResult<()> {
        match self.hash {
            HashAlgorithm::Sha256 => mac_into::<Hmac<Sha256>>(self.secret, input, out),
            HashAlgorithm::Sha384 => mac_into::<Hmac<Sha384>>(self.secret, input, out),
            HashAlgorithm::Sha512 => mac_into::<Hmac<Sha512>>(self.secret, input, out),
        }
    }
}

fn mac_into<M: Mac + KeyInit>(secret: &[u8], input: &[u8], out: &mut [u8]) -> TokenResult<()> {
    let mut mac = <M as KeyInit>::new_from_slice(secret)
        .map_err(|_| TokenError::primitive(PrimitiveError("HMAC key rejected")))?;
    mac.update(input);
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(())
}
