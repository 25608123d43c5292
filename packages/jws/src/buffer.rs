//! Single-allocation token layout
//!
//! The output buffer is allocated once with room for
//! `header . payload . signature`. Only `header.payload` is written up front;
//! the signature tail stays spare capacity until [`TokenBuffer::seal`]
//! encodes into it. Raw digest and signature bytes live in a separate
//! zeroizing scratch buffer so the signer reads the prefix while the encoder
//! writes the tail, and no slice is ever read and written at once.

use zeroize::Zeroizing;

use crate::codec;
use crate::error::{TokenError, TokenResult};
use crate::header::Header;

/// Output buffer of one token-building call.
#[derive(Debug)]
pub(crate) struct TokenBuffer {
    bytes: Vec<u8>,
    /// Encoded signature bytes reserved after the second separator.
    signature_len: usize,
}

impl TokenBuffer {
    /// Allocate the buffer and write `header.payload` into it.
    ///
    /// `signature_len` is the exact encoded length of the signature that
    /// [`Self::seal`] will append; zero for unsigned tokens.
    pub(crate) fn allocate(header: &Header, payload: &[u8], signature_len: usize) -> TokenResult<Self> {
        let header_len = header.encoded_len();
        let prefix_len = header_len + codec::encoded_len(payload.len());
        let mut bytes = Vec::with_capacity(prefix_len + 1 + signature_len);

        match header {
            Header::Fixed(literal) => bytes.extend_from_slice(literal.as_bytes()),
            Header::Json(json) => {
                bytes.resize(header_len - 1, 0);
                codec::encode(&mut bytes, json)?;
                bytes.push(b'.');
            }
        }
        bytes.resize(prefix_len, 0);
        codec::encode(&mut bytes[header_len..], payload)?;

        Ok(Self {
            bytes,
            signature_len,
        })
    }

    /// The encoded `header.payload` prefix, which is the signing input.
    #[inline]
    pub(crate) fn signing_input(&self) -> &[u8] {
        &self.bytes
    }

    /// Total token length once sealed.
    #[inline]
    pub(crate) fn planned_len(&self) -> usize {
        self.bytes.len() + 1 + self.signature_len
    }

    /// Append the bare `.` of an unsigned token.
    pub(crate) fn finish_unsigned(mut self) -> Vec<u8> {
        self.bytes.push(b'.');
        self.bytes
    }

    /// Sign the prefix and append `.` plus the encoded signature.
    ///
    /// `sign` receives the signing input and a zeroed scratch slice of
    /// `raw_len` bytes that it must fill completely. The scratch is encoded
    /// into the reserved tail afterwards and wiped on drop.
    pub(crate) fn seal<F>(mut self, raw_len: usize, sign: F) -> TokenResult<Vec<u8>>
    where
        F: FnOnce(&[u8], &mut [u8]) -> TokenResult<()>,
    {
        let required = codec::encoded_len(raw_len);
        if required != self.signature_len {
            return Err(TokenError::BufferLayout {
                reserved: self.signature_len,
                required,
            });
        }

        let mut scratch = Zeroizing::new(vec![0u8; raw_len]);
        sign(&self.bytes, scratch.as_mut_slice())?;

        self.bytes.push(b'.');
        let start = self.bytes.len();
        self.bytes.resize(start + required, 0);
        codec::encode(&mut self.bytes[start..], scratch.as_slice())?;
        Ok(self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::Algorithm;

    #[test]
    fn fixed_header_prefix() {
        let header = Header::Fixed(Algorithm::HS256.fixed_header());
        let buf = TokenBuffer::allocate(&header, b"{}", 43).expect("layout");
        assert_eq!(buf.signing_input(), b"eyJhbGciOiJIUzI1NiJ9.e30");
        assert_eq!(buf.planned_len(), 24 + 1 + 43);
    }

    #[test]
    fn json_header_prefix() {
        let header = Header::Json(br#"{"alg":"X1"}"#.to_vec());
        let buf = TokenBuffer::allocate(&header, b"{}", 0).expect("layout");
        assert_eq!(buf.finish_unsigned(), b"eyJhbGciOiJYMSJ9.e30.".to_vec());
    }

    #[test]
    fn seal_stays_in_one_allocation() {
        let header = Header::Fixed(Algorithm::HS256.fixed_header());
        let buf = TokenBuffer::allocate(&header, b"{\"sub\":\"a\"}", codec::encoded_len(32))
            .expect("layout");
        let planned = buf.planned_len();
        let prefix_ptr = buf.signing_input().as_ptr();

        let token = buf
            .seal(32, |input, scratch| {
                assert!(input.starts_with(b"eyJ"));
                scratch.fill(0xAB);
                Ok(())
            })
            .expect("seal");

        assert_eq!(token.len(), planned);
        assert_eq!(token.as_ptr(), prefix_ptr, "buffer must not reallocate");
        assert_eq!(token.iter().filter(|&&b| b == b'.').count(), 2);
    }

    #[test]
    fn seal_rejects_underreservation() {
        let header = Header::Fixed(Algorithm::ES256.fixed_header());
        let buf = TokenBuffer::allocate(&header, b"{}", 10).expect("layout");
        let err = buf.seal(64, |_, _| Ok(())).expect_err("reservation too small");
        assert!(matches!(err, TokenError::BufferLayout { reserved: 10, required: 86 }));
    }

    #[test]
    fn seal_propagates_signer_failure() {
        let header = Header::Fixed(Algorithm::EdDSA.fixed_header());
        let buf = TokenBuffer::allocate(&header, b"{}", codec::encoded_len(64)).expect("layout");
        let err = buf
            .seal(64, |_, _| Err(TokenError::MissingSecret))
            .expect_err("signer failed");
        assert!(matches!(err, TokenError::MissingSecret));
    }
}
