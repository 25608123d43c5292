//! Registered claim names (RFC 7519, section 4.1)

use chrono::{DateTime, TimeZone, Utc};
use serde::ser::{Error as _, SerializeStruct};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

use crate::error::{TokenError, TokenResult};

/// Claim name of the issuer.
pub const ISSUER: &str = "iss";
/// Claim name of the subject.
pub const SUBJECT: &str = "sub";
/// Claim name of the audience.
pub const AUDIENCE: &str = "aud";
/// Claim name of the expiration time.
pub const EXPIRES: &str = "exp";
/// Claim name of the not-before time.
pub const NOT_BEFORE: &str = "nbf";
/// Claim name of the issued-at time.
pub const ISSUED: &str = "iat";
/// Claim name of the token identifier.
pub const ID: &str = "jti";

/// Seconds since the Unix epoch, as carried by `exp`, `nbf` and `iat`.
///
/// Whole values serialize as JSON integers, fractional values as decimals.
/// NaN and infinities cannot be serialized.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct NumericDate(f64);

impl NumericDate {
    /// Wrap a seconds value.
    #[must_use]
    pub const fn new(secs: f64) -> Self {
        Self(secs)
    }

    /// Whole seconds since the epoch.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_secs(secs: i64) -> Self {
        Self(secs as f64)
    }

    /// The current time in whole seconds.
    #[must_use]
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// Seconds since the epoch.
    #[must_use]
    pub const fn as_secs_f64(self) -> f64 {
        self.0
    }

    /// Convert to a UTC timestamp, or `None` when out of chrono's range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        if !self.0.is_finite() {
            return None;
        }
        let secs = self.0.floor();
        let nanos = ((self.0 - secs) * 1e9).round() as u32;
        Utc.timestamp_opt(secs as i64, nanos.min(999_999_999)).single()
    }

    /// JSON number for this date.
    ///
    /// # Errors
    /// Returns [`TokenError::Serialization`] for NaN or infinite values.
    pub fn to_number(self) -> TokenResult<Number> {
        self.finite_number().map_err(NonFiniteDate::into_token_error)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn finite_number(self) -> Result<Number, NonFiniteDate> {
        if !self.0.is_finite() {
            return Err(NonFiniteDate(self.0));
        }
        // i64::MAX is not exactly representable; stay strictly inside the range.
        if self.0.fract() == 0.0 && self.0.abs() < 9.0e18 {
            return Ok(Number::from(self.0 as i64));
        }
        Number::from_f64(self.0).ok_or(NonFiniteDate(self.0))
    }
}

/// NaN or infinite date, which JSON cannot represent.
#[derive(Debug, thiserror::Error)]
#[error("numeric date {0} is not a finite number")]
struct NonFiniteDate(f64);

impl NonFiniteDate {
    fn into_token_error(self) -> TokenError {
        TokenError::Serialization(serde_json::Error::custom(self))
    }
}

/// Truncates to whole seconds; use [`NumericDate::new`] for fractional values.
impl From<DateTime<Utc>> for NumericDate {
    fn from(t: DateTime<Utc>) -> Self {
        Self::from_secs(t.timestamp())
    }
}

impl Serialize for NumericDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let number = self.finite_number().map_err(S::Error::custom)?;
        number.serialize(serializer)
    }
}

/// Registered claims with their JSON names.
///
/// Empty strings, an empty audience list and `None` dates are omitted from
/// the JSON form. A single audience serializes as a bare string, two or more
/// as an array in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registered {
    /// Principal that issued the token (`iss`).
    pub issuer: String,
    /// Principal that is the subject of the token (`sub`).
    pub subject: String,
    /// Recipients the token is intended for (`aud`).
    pub audiences: Vec<String>,
    /// Expiration time (`exp`).
    pub expires: Option<NumericDate>,
    /// Time before which the token must not be accepted (`nbf`).
    pub not_before: Option<NumericDate>,
    /// Time at which the token was issued (`iat`).
    pub issued: Option<NumericDate>,
    /// Unique token identifier (`jti`).
    pub id: String,
}

impl Registered {
    /// JSON value of the audience claim, or `None` when there is none.
    #[must_use]
    pub fn audience_value(&self) -> Option<Value> {
        match self.audiences.as_slice() {
            [] => None,
            [single] => Some(Value::String(single.clone())),
            many => Some(Value::Array(
                many.iter().cloned().map(Value::String).collect(),
            )),
        }
    }

    /// Set claims as `(name, value)` pairs, in serialization order.
    ///
    /// # Errors
    /// Returns [`TokenError::Serialization`] when a date is not finite.
    pub fn entries(&self) -> TokenResult<Vec<(&'static str, Value)>> {
        self.checked_entries().map_err(NonFiniteDate::into_token_error)
    }

    fn checked_entries(&self) -> Result<Vec<(&'static str, Value)>, NonFiniteDate> {
        let mut entries = Vec::with_capacity(7);
        if !self.issuer.is_empty() {
            entries.push((ISSUER, Value::String(self.issuer.clone())));
        }
        if !self.subject.is_empty() {
            entries.push((SUBJECT, Value::String(self.subject.clone())));
        }
        if let Some(aud) = self.audience_value() {
            entries.push((AUDIENCE, aud));
        }
        for (name, date) in [
            (EXPIRES, self.expires),
            (NOT_BEFORE, self.not_before),
            (ISSUED, self.issued),
        ] {
            if let Some(date) = date {
                entries.push((name, Value::Number(date.finite_number()?)));
            }
        }
        if !self.id.is_empty() {
            entries.push((ID, Value::String(self.id.clone())));
        }
        Ok(entries)
    }
}

impl Serialize for Registered {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.checked_entries().map_err(S::Error::custom)?;
        let mut state = serializer.serialize_struct("Registered", entries.len())?;
        for (name, value) in &entries {
            state.serialize_field(name, value)?;
        }
        state.end()
    }
}
