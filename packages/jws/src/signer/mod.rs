//! Signature strategies, one per algorithm family
//!
//! A [`Signer`] is constructed per call from an identifier and a borrowed
//! key. Construction validates the identifier against the family, so a
//! failed lookup never touches the claims.

mod ecdsa;
mod eddsa;
mod hmac;
mod rsa;

pub use self::ecdsa::{EcdsaSigner, EcdsaSigningKey};
pub use self::eddsa::EdDsaSigner;
pub use self::hmac::HmacSigner;
pub use self::rsa::RsaSigner;

use crate::error::TokenResult;

/// Signing strategy for one algorithm family.
pub trait Signer {
    /// Identifier written to the `alg` header.
    fn algorithm(&self) -> &str;

    /// Exact length of the raw signature in bytes.
    fn signature_len(&self) -> usize;

    /// Sign `input`, filling all of `out` (`signature_len()` bytes).
    ///
    /// # Errors
    /// Returns [`crate::TokenError::PrimitiveFailure`] when the underlying
    /// primitive or its random source fails.
    fn sign_into(&self, input: &[u8], out: &mut [u8]) -> TokenResult<()>;
}

impl<S: Signer + ?Sized> Signer for &S {
    fn algorithm(&self) -> &str {
        (**self).algorithm()
    }

    fn signature_len(&self) -> usize {
        (**self).signature_len()
    }

    fn sign_into(&self, input: &[u8], out: &mut [u8]) -> TokenResult<()> {
        (**self).sign_into(input, out)
    }
}

/// Failure reported by a primitive without an error type of its own.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub(crate) struct PrimitiveError(pub(crate) &'static str);

/// Write the big-endian integer `value` into `out` at a fixed width.
///
/// Shorter values are left-padded with zeros. Longer values keep their
/// least-significant `out.len()` bytes.
pub(crate) fn write_be_fixed(out: &mut [u8], value: &[u8]) {
    if value.len() >= out.len() {
        out.copy_from_slice(&value[value.len() - out.len()..]);
    } else {
        let pad = out.len() - value.len();
        out[..pad].fill(0);
        out[pad..].copy_from_slice(value);
    }
}

#[cfg(test)]
mod tests {
    use super::write_be_fixed;

    #[test]
    fn pads_short_values_on_the_left() {
        let mut out = [0xFFu8; 4];
        write_be_fixed(&mut out, &[0x01, 0x02]);
        assert_eq!(out, [0x00, 0x00, 0x01, 0x02]);
    }

    #[test]
    fn keeps_least_significant_bytes_of_long_values() {
        let mut out = [0u8; 3];
        write_be_fixed(&mut out, &[0x00, 0x00, 0x0A, 0x0B, 0x0C]);
        assert_eq!(out, [0x0A, 0x0B, 0x0C]);
    }

    #[test]
    fn exact_width_is_copied() {
        let mut out = [0u8; 2];
        write_be_fixed(&mut out, &[0x7F, 0x80]);
        assert_eq!(out, [0x7F, 0x80]);
    }
}
