//! Token construction error types

use thiserror::Error;

use crate::algorithms::Family;

/// Token operation result type
pub type TokenResult<T> = Result<T, TokenError>;

/// Boxed cause of a failed signing primitive.
pub type PrimitiveCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Token construction and signing errors.
///
/// Every failure aborts the call that produced it; no partial token is ever
/// returned alongside an error.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Algorithm identifier is not a member of the family required by the signer.
    #[error("unsupported algorithm {alg:?} for {family} signing")]
    UnsupportedAlgorithm {
        /// The rejected identifier.
        alg: String,
        /// The family the caller asked for.
        family: Family,
    },

    /// Empty key material supplied for HMAC signing.
    #[error("HMAC signing requires a non-empty secret")]
    MissingSecret,

    /// Claims payload or header could not be serialized, including NaN or
    /// infinite numeric dates.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying signing or random-source operation failed.
    #[error("signing primitive failed: {0}")]
    PrimitiveFailure(#[source] PrimitiveCause),

    /// ECDSA key curve does not match the curve the identifier names.
    #[error("algorithm {alg} requires curve {expected}, got {actual}")]
    CurveMismatch {
        /// The requested identifier.
        alg: String,
        /// Curve paired with the identifier.
        expected: &'static str,
        /// Curve of the supplied key.
        actual: &'static str,
    },

    /// Signature did not fit the space reserved for it.
    #[error("signature needs {required} bytes, {reserved} reserved")]
    BufferLayout {
        /// Bytes reserved.
        reserved: usize,
        /// Bytes the signature actually needs.
        required: usize,
    },
}

impl TokenError {
    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str, family: Family) -> Self {
        TokenError::UnsupportedAlgorithm {
            alg: alg.to_string(),
            family,
        }
    }

    /// Wrap the error of a signing primitive
    #[inline]
    #[must_use]
    pub fn primitive<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        TokenError::PrimitiveFailure(Box::new(err))
    }

    /// Whether the error came from the algorithm lookup.
    #[must_use]
    pub fn is_unsupported_algorithm(&self) -> bool {
        matches!(self, TokenError::UnsupportedAlgorithm { .. })
    }
}
