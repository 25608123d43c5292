//! Compact JWS token construction and signing
//!
//! Builds `header.payload.signature` tokens from [`Claims`] with:
//! - HMAC (HS256/384/512), RSA PKCS#1 v1.5 (RS*) and PSS (PS*),
//!   ECDSA (ES256/384/512) and Ed25519 (EdDSA)
//! - pre-encoded headers for the standard identifiers
//! - one output allocation per token
//!
//! ```
//! use cryypt_jws::{Jwt, TokenResult};
//!
//! fn main() -> TokenResult<()> {
//!     let mut builder = Jwt::builder().with_claims(
//!         Jwt::claims()
//!             .issuer("svc")
//!             .subject("u1")
//!             .audiences(["a", "b"]),
//!     );
//!     let token = builder.hmac("HS256", b"secret")?;
//!
//!     assert_eq!(token.header(), "eyJhbGciOiJIUzI1NiJ9");
//!     assert!(token.is_signed());
//!     assert_eq!(
//!         builder.claims().raw(),
//!         br#"{"iss":"svc","sub":"u1","aud":["a","b"]}"#
//!     );
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

pub mod algorithms;
pub mod api;
pub(crate) mod buffer;
pub mod claims;
pub mod codec;
mod error;
pub mod header;
pub mod signer;
pub mod token;

pub use algorithms::{Algorithm, Family, HashAlgorithm, UnknownAlgorithm};
pub use api::{Jwt, TokenBuilder};
pub use claims::{ClaimSet, Claims, ClaimsBuilder, NumericDate, Registered};
pub use error::*;
pub use signer::{EcdsaSigner, EcdsaSigningKey, EdDsaSigner, HmacSigner, RsaSigner, Signer};
pub use token::Token;
