//! JWS algorithm registry
//!
//! Maps the closed vocabulary of JWA identifiers (RFC 7518) to their key
//! family and hash function. Lookups are pure functions of the identifier
//! string and never fall back to a default.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::error::{TokenError, TokenResult};

/// Key family of a signature algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Keyed hash (HS*).
    Hmac,
    /// RSA with PKCS#1 v1.5 (RS*) or PSS (PS*) padding.
    Rsa,
    /// Elliptic-curve DSA over the NIST prime curves (ES*).
    Ecdsa,
    /// Edwards-curve DSA (EdDSA with Ed25519).
    EdDsa,
    /// Unsecured token (`none`).
    None,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Hmac => write!(f, "HMAC"),
            Family::Rsa => write!(f, "RSA"),
            Family::Ecdsa => write!(f, "ECDSA"),
            Family::EdDsa => write!(f, "EdDSA"),
            Family::None => write!(f, "unsecured"),
        }
    }
}

/// Hash function paired with an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashAlgorithm {
    /// Digest size in bytes.
    #[inline]
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Hash `data` into `out`, which must be exactly [`Self::size`] bytes.
    pub(crate) fn digest_into(self, data: &[u8], out: &mut [u8]) {
        match self {
            HashAlgorithm::Sha256 => out.copy_from_slice(&Sha256::digest(data)),
            HashAlgorithm::Sha384 => out.copy_from_slice(&Sha384::digest(data)),
            HashAlgorithm::Sha512 => out.copy_from_slice(&Sha512::digest(data)),
        }
    }
}

/// JWS algorithm identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum Algorithm {
    /// HMAC using SHA-256
    HS256,
    /// HMAC using SHA-384
    HS384,
    /// HMAC using SHA-512
    HS512,
    /// RSASSA-PKCS1-v1_5 using SHA-256
    RS256,
    /// RSASSA-PKCS1-v1_5 using SHA-384
    RS384,
    /// RSASSA-PKCS1-v1_5 using SHA-512
    RS512,
    /// RSASSA-PSS using SHA-256 and MGF1 with SHA-256
    PS256,
    /// RSASSA-PSS using SHA-384 and MGF1 with SHA-384
    PS384,
    /// RSASSA-PSS using SHA-512 and MGF1 with SHA-512
    PS512,
    /// ECDSA using P-256 and SHA-256
    ES256,
    /// ECDSA using P-384 and SHA-384
    ES384,
    /// ECDSA using P-521 and SHA-512
    ES512,
    /// Edwards-curve signature with Ed25519
    EdDSA,
    /// No digital signature or MAC
    None,
}

impl Algorithm {
    /// Every identifier in the vocabulary.
    pub const ALL: [Algorithm; 14] = [
        Algorithm::HS256,
        Algorithm::HS384,
        Algorithm::HS512,
        Algorithm::RS256,
        Algorithm::RS384,
        Algorithm::RS512,
        Algorithm::PS256,
        Algorithm::PS384,
        Algorithm::PS512,
        Algorithm::ES256,
        Algorithm::ES384,
        Algorithm::ES512,
        Algorithm::EdDSA,
        Algorithm::None,
    ];

    /// The `alg` header value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Algorithm::HS256 => "HS256",
            Algorithm::HS384 => "HS384",
            Algorithm::HS512 => "HS512",
            Algorithm::RS256 => "RS256",
            Algorithm::RS384 => "RS384",
            Algorithm::RS512 => "RS512",
            Algorithm::PS256 => "PS256",
            Algorithm::PS384 => "PS384",
            Algorithm::PS512 => "PS512",
            Algorithm::ES256 => "ES256",
            Algorithm::ES384 => "ES384",
            Algorithm::ES512 => "ES512",
            Algorithm::EdDSA => "EdDSA",
            Algorithm::None => "none",
        }
    }

    /// Key family of the algorithm.
    #[must_use]
    pub const fn family(self) -> Family {
        match self {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Family::Hmac,
            Algorithm::RS256
            | Algorithm::RS384
            | Algorithm::RS512
            | Algorithm::PS256
            | Algorithm::PS384
            | Algorithm::PS512 => Family::Rsa,
            Algorithm::ES256 | Algorithm::ES384 | Algorithm::ES512 => Family::Ecdsa,
            Algorithm::EdDSA => Family::EdDsa,
            Algorithm::None => Family::None,
        }
    }

    /// Hash function, if the algorithm hashes before signing.
    ///
    /// EdDSA hashes internally and `none` does not sign, so both return `None`.
    #[must_use]
    pub const fn hash(self) -> Option<HashAlgorithm> {
        match self {
            Algorithm::HS256 | Algorithm::RS256 | Algorithm::PS256 | Algorithm::ES256 => {
                Some(HashAlgorithm::Sha256)
            }
            Algorithm::HS384 | Algorithm::RS384 | Algorithm::PS384 | Algorithm::ES384 => {
                Some(HashAlgorithm::Sha384)
            }
            Algorithm::HS512 | Algorithm::RS512 | Algorithm::PS512 | Algorithm::ES512 => {
                Some(HashAlgorithm::Sha512)
            }
            Algorithm::EdDSA | Algorithm::None => None,
        }
    }

    /// Whether an RSA identifier selects PSS padding.
    ///
    /// PSS identifiers carry the `P` prefix; every other RSA identifier uses
    /// PKCS#1 v1.5.
    #[must_use]
    pub fn is_pss(self) -> bool {
        self.family() == Family::Rsa && self.as_str().starts_with('P')
    }

    /// Encoded `{"alg":"<ALG>"}` followed by the `.` separator.
    ///
    /// Only valid when the header carries no key id and no extra fields.
    #[must_use]
    pub const fn fixed_header(self) -> &'static str {
        match self {
            Algorithm::HS256 => "eyJhbGciOiJIUzI1NiJ9.",
            Algorithm::HS384 => "eyJhbGciOiJIUzM4NCJ9.",
            Algorithm::HS512 => "eyJhbGciOiJIUzUxMiJ9.",
            Algorithm::RS256 => "eyJhbGciOiJSUzI1NiJ9.",
            Algorithm::RS384 => "eyJhbGciOiJSUzM4NCJ9.",
            Algorithm::RS512 => "eyJhbGciOiJSUzUxMiJ9.",
            Algorithm::PS256 => "eyJhbGciOiJQUzI1NiJ9.",
            Algorithm::PS384 => "eyJhbGciOiJQUzM4NCJ9.",
            Algorithm::PS512 => "eyJhbGciOiJQUzUxMiJ9.",
            Algorithm::ES256 => "eyJhbGciOiJFUzI1NiJ9.",
            Algorithm::ES384 => "eyJhbGciOiJFUzM4NCJ9.",
            Algorithm::ES512 => "eyJhbGciOiJFUzUxMiJ9.",
            Algorithm::EdDSA => "eyJhbGciOiJFZERTQSJ9.",
            Algorithm::None => "eyJhbGciOiJub25lIn0.",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for identifiers outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm identifier {0:?}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .iter()
            .copied()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Resolve `alg` within `family`.
///
/// # Errors
/// Returns [`TokenError::UnsupportedAlgorithm`] when the identifier is unknown
/// or belongs to another family. Matching is exact and case-sensitive.
pub fn lookup(alg: &str, family: Family) -> TokenResult<Algorithm> {
    match alg.parse::<Algorithm>() {
        Ok(found) if found.family() == family => Ok(found),
        _ => Err(TokenError::unsupported_algorithm(alg, family)),
    }
}

/// Resolve `alg` within `family` together with its hash function.
///
/// # Errors
/// Returns [`TokenError::UnsupportedAlgorithm`] when the identifier is not a
/// hashing member of `family`.
pub fn hash_lookup(alg: &str, family: Family) -> TokenResult<(Algorithm, HashAlgorithm)> {
    let found = lookup(alg, family)?;
    found
        .hash()
        .map(|hash| (found, hash))
        .ok_or_else(|| TokenError::unsupported_algorithm(alg, family))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_lookup_per_family() {
        let cases = [
            ("HS256", Family::Hmac, HashAlgorithm::Sha256),
            ("HS512", Family::Hmac, HashAlgorithm::Sha512),
            ("RS384", Family::Rsa, HashAlgorithm::Sha384),
            ("PS256", Family::Rsa, HashAlgorithm::Sha256),
            ("ES256", Family::Ecdsa, HashAlgorithm::Sha256),
            ("ES512", Family::Ecdsa, HashAlgorithm::Sha512),
        ];
        for (alg, family, hash) in cases {
            let (found, found_hash) = hash_lookup(alg, family).expect(alg);
            assert_eq!(found.as_str(), alg);
            assert_eq!(found_hash, hash, "{alg}");
        }
    }

    #[test]
    fn hash_lookup_rejects_other_families() {
        for (alg, family) in [
            ("HS256", Family::Rsa),
            ("RS256", Family::Ecdsa),
            ("ES256", Family::Hmac),
            ("PS512", Family::Hmac),
        ] {
            let err = hash_lookup(alg, family).expect_err(alg);
            assert!(
                matches!(err, TokenError::UnsupportedAlgorithm { family: f, .. } if f == family),
                "{alg}: {err}"
            );
        }
    }

    #[test]
    fn hash_lookup_rejects_unhashed_identifiers() {
        assert!(hash_lookup("EdDSA", Family::EdDsa).is_err());
        assert!(hash_lookup("none", Family::None).is_err());
        assert!(hash_lookup("none", Family::Hmac).is_err());
    }

    #[test]
    fn hash_lookup_is_case_sensitive() {
        for alg in ["hs256", "Hs256", "rs256", "es256", " HS256", "HS256 ", ""] {
            assert!(
                hash_lookup(alg, Family::Hmac).is_err()
                    && hash_lookup(alg, Family::Rsa).is_err()
                    && hash_lookup(alg, Family::Ecdsa).is_err(),
                "{alg:?}"
            );
        }
    }

    #[test]
    fn from_str_covers_vocabulary() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.as_str().parse::<Algorithm>(), Ok(alg));
        }
        assert_eq!(
            "EDDSA".parse::<Algorithm>(),
            Err(UnknownAlgorithm("EDDSA".to_string()))
        );
    }
}
