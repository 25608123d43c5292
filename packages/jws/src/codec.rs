//! Base64url (no padding) adapter used for every token segment

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::error::{TokenError, TokenResult};

/// Exact encoded length of `n` input bytes, without padding.
#[inline]
#[must_use]
pub const fn encoded_len(n: usize) -> usize {
    n / 3 * 4
        + match n % 3 {
            0 => 0,
            1 => 2,
            _ => 3,
        }
}

/// Encode `src` into `dst`, which must be exactly `encoded_len(src.len())` bytes.
///
/// `dst` is write-only; the encoder never reads from it.
pub(crate) fn encode(dst: &mut [u8], src: &[u8]) -> TokenResult<()> {
    let required = encoded_len(src.len());
    if dst.len() != required {
        return Err(TokenError::BufferLayout {
            reserved: dst.len(),
            required,
        });
    }

    let written = URL_SAFE_NO_PAD
        .encode_slice(src, dst)
        .map_err(TokenError::primitive)?;
    debug_assert_eq!(written, required);
    Ok(())
}

/// Decode a base64url segment.
#[cfg(test)]
pub(crate) fn decode(src: &[u8]) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_len_matches_engine() {
        for n in 0..200 {
            let expected = base64::encoded_len(n, false).expect("small lengths fit");
            assert_eq!(encoded_len(n), expected, "length {n}");
        }
    }

    #[test]
    fn encode_rejects_wrong_destination() {
        let mut dst = [0u8; 3];
        let err = encode(&mut dst, b"abcd").expect_err("destination too short");
        assert!(matches!(
            err,
            TokenError::BufferLayout {
                reserved: 3,
                required: 6
            }
        ));
    }

    #[test]
    fn encode_writes_url_alphabet() {
        let src = [0xfb, 0xff, 0xbf];
        let mut dst = vec![0u8; encoded_len(src.len())];
        encode(&mut dst, &src).expect("exact destination");
        assert_eq!(&dst, b"-_-_");
        assert_eq!(decode(&dst).expect("valid base64url"), src);
    }
}
