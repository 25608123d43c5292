//! RSA signing: PKCS#1 v1.5 (RS*) and PSS (PS*)

use rand_core::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, Pss, RsaPrivateKey};
use sha2::{Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use super::{Signer, write_be_fixed};
use crate::algorithms::{self, Algorithm, Family, HashAlgorithm};
use crate::error::{TokenError, TokenResult};

/// RSA strategy over a borrowed private key.
pub struct RsaSigner<'a> {
    alg: Algorithm,
    hash: HashAlgorithm,
    key: &'a RsaPrivateKey,
}

impl<'a> RsaSigner<'a> {
    /// Resolve `alg` in the RSA family.
    ///
    /// # Errors
    /// [`TokenError::UnsupportedAlgorithm`] for non-RSA identifiers.
    pub fn new(alg: &str, key: &'a RsaPrivateKey) -> TokenResult<Self> {
        let (alg, hash) = algorithms::hash_lookup(alg, Family::Rsa)?;
        Ok(Self { alg, hash, key })
    }
}

impl std::fmt::Debug for RsaSigner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaSigner")
            .field("alg", &self.alg)
            .field("modulus_len", &self.key.size())
            .finish_non_exhaustive()
    }
}

impl Signer for RsaSigner<'_> {
    fn algorithm(&self) -> &str {
        self.alg.as_str()
    }

    /// Modulus size in bytes.
    fn signature_len(&self) -> usize {
        self.key.size()
    }

    fn sign_into(&self, input: &[u8], out: &mut [u8]) -> TokenResult<()> {
        let mut digest = Zeroizing::new(vec![0u8; self.hash.size()]);
        self.hash.digest_into(input, &mut digest);

        let key = self.key;
        let signature = match (self.alg.is_pss(), self.hash) {
            (true, HashAlgorithm::Sha256) => key.sign_with_rng(&mut OsRng, Pss::new::<Sha256>(), &digest),
            (true, HashAlgorithm::Sha384) => key.sign_with_rng(&mut OsRng, Pss::new::<Sha384>(), &digest),
            (true, HashAlgorithm::Sha512) => key.sign_with_rng(&mut OsRng, Pss::new::<Sha512>(), &digest),
            (false, HashAlgorithm::Sha256) => {
                key.sign_with_rng(&mut OsRng, Pkcs1v15Sign::new::<Sha256>(), &digest)
            }
            (false, HashAlgorithm::Sha384) => {
                key.sign_with_rng(&mut OsRng, Pkcs1v15Sign::new::<Sha384>(), &digest)
            }
            (false, HashAlgorithm::Sha512) => {
                key.sign_with_rng(&mut OsRng, Pkcs1v15Sign::new::<Sha512>(), &digest)
            }
        }
        .map_err(TokenError::primitive)?;

        if signature.len() > out.len() {
            return Err(TokenError::BufferLayout {
                reserved: out.len(),
                required: signature.len(),
            });
        }
        write_be_fixed(out, &signature);
        Ok(())
    }
}
