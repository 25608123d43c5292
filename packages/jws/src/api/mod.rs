//! Builder entry points
//!
//! [`Jwt`] is the front door; [`TokenBuilder`] carries the claims and
//! finishes with one call per algorithm family.

pub mod builder;

pub use builder::TokenBuilder;

use crate::claims::ClaimsBuilder;

/// Direct builder entry point
#[derive(Debug, Clone, Copy, Default)]
pub struct Jwt;

impl Jwt {
    /// Create new token builder with empty claims
    #[must_use]
    pub fn builder() -> TokenBuilder {
        TokenBuilder::new()
    }

    /// Create new claims builder
    #[must_use]
    pub fn claims() -> ClaimsBuilder {
        ClaimsBuilder::new()
    }
}
