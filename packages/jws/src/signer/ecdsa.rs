//! ECDSA signing over P-256, P-384 and P-521 (ES256, ES384, ES512)
//!
//! The signature is the pair (r, s), each as a big-endian integer of exactly
//! `ceil(curve_bits / 8)` bytes, concatenated as r‖s (RFC 7518, section 3.4).

use p256::ecdsa::signature::hazmat::RandomizedPrehashSigner;
use rand_core::OsRng;
use zeroize::Zeroizing;

use super::{Signer, write_be_fixed};
use crate::algorithms::{self, Algorithm, Family, HashAlgorithm};
use crate::error::{TokenError, TokenResult};

/// ECDSA private key on one of the supported curves.
pub enum EcdsaSigningKey {
    /// NIST P-256 (secp256r1)
    P256(p256::ecdsa::SigningKey),
    /// NIST P-384 (secp384r1)
    P384(p384::ecdsa::SigningKey),
    /// NIST P-521 (secp521r1)
    P521(p521::ecdsa::SigningKey),
}

impl EcdsaSigningKey {
    /// Curve name as used by JWK `crv`.
    #[must_use]
    pub const fn curve(&self) -> &'static str {
        match self {
            EcdsaSigningKey::P256(_) => "P-256",
            EcdsaSigningKey::P384(_) => "P-384",
            EcdsaSigningKey::P521(_) => "P-521",
        }
    }

    /// Curve order size in bits.
    #[must_use]
    pub const fn bit_size(&self) -> usize {
        match self {
            EcdsaSigningKey::P256(_) => 256,
            EcdsaSigningKey::P384(_) => 384,
            EcdsaSigningKey::P521(_) => 521,
        }
    }

    /// Byte width of each of r and s.
    #[must_use]
    pub const fn param_len(&self) -> usize {
        self.bit_size().div_ceil(8)
    }
}

impl std::fmt::Debug for EcdsaSigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EcdsaSigningKey").field(&self.curve()).finish()
    }
}

impl From<p256::ecdsa::SigningKey> for EcdsaSigningKey {
    fn from(key: p256::ecdsa::SigningKey) -> Self {
        EcdsaSigningKey::P256(key)
    }
}

impl From<p384::ecdsa::SigningKey> for EcdsaSigningKey {
    fn from(key: p384::ecdsa::SigningKey) -> Self {
        EcdsaSigningKey::P384(key)
    }
}

impl From<p521::ecdsa::SigningKey> for EcdsaSigningKey {
    fn from(key: p521::ecdsa::SigningKey) -> Self {
        EcdsaSigningKey::P521(key)
    }
}

/// Curve each ES identifier is paired with.
const fn expected_curve(alg: Algorithm) -> Option<&'static str> {
    match alg {
        Algorithm::ES256 => Some("P-256"),
        Algorithm::ES384 => Some("P-384"),
        Algorithm::ES512 => Some("P-521"),
        _ => None,
    }
}

/// ECDSA strategy over a borrowed private key.
#[derive(Debug)]
pub struct EcdsaSigner<'a> {
    alg: Algorithm,
    hash: HashAlgorithm,
    key: &'a EcdsaSigningKey,
}

impl<'a> EcdsaSigner<'a> {
    /// Resolve `alg` in the ECDSA family and check the key's curve.
    ///
    /// # Errors
    /// [`TokenError::UnsupportedAlgorithm`] for non-ECDSA identifiers;
    /// [`TokenError::CurveMismatch`] when the key is not on the curve the
    /// identifier names.
    pub fn new(alg: &str, key: &'a EcdsaSigningKey) -> TokenResult<Self> {
        let (alg, hash) = algorithms::hash_lookup(alg, Family::Ecdsa)?;
        let Some(expected) = expected_curve(alg) else {
            return Err(TokenError::unsupported_algorithm(alg.as_str(), Family::Ecdsa));
        };
        if key.curve() != expected {
            return Err(TokenError::CurveMismatch {
                alg: alg.to_string(),
                expected,
                actual: key.curve(),
            });
        }
        Ok(Self { alg, hash, key })
    }
}

impl Signer for EcdsaSigner<'_> {
    fn algorithm(&self) -> &str {
        self.alg.as_str()
    }

    fn signature_len(&self) -> usize {
        2 * self.key.param_len()
    }

    fn sign_into(&self, input: &[u8], out: &mut [u8]) -> TokenResult<()> {
        let mut digest = Zeroizing::new(vec![0u8; self.hash.size()]);
        self.hash.digest_into(input, &mut digest);

        let param_len = self.key.param_len();
        let (r_out, s_out) = out.split_at_mut(param_len);
        match self.key {
            EcdsaSigningKey::P256(key) => {
                let sig: p256::ecdsa::Signature = key
                    .sign_prehash_with_rng(&mut OsRng, &digest)
                    .map_err(TokenError::primitive)?;
                let (r, s) = sig.split_bytes();
                write_be_fixed(r_out, &r);
                write_be_fixed(s_out, &s);
            }
            EcdsaSigningKey::P384(key) => {
                let sig: p384::ecdsa::Signature = key
                    .sign_prehash_with_rng(&mut OsRng, &digest)
                    .map_err(TokenError::primitive)?;
                let (r, s) = sig.split_bytes();
                write_be_fixed(r_out, &r);
                write_be_fixed(s_out, &s);
            }
            EcdsaSigningKey::P521(key) => {
                let sig: p521::ecdsa::Signature = key
                    .sign_prehash_with_rng(&mut OsRng, &digest)
                    .map_err(TokenError::primitive)?;
                let (r, s) = sig.split_bytes();
                write_be_fixed(r_out, &r);
                write_be_fixed(s_out, &s);
            }
        }
        Ok(())
    }
}
