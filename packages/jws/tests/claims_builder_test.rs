//! Tests for the claims and token builders

use chrono::{Duration, TimeZone, Utc};
use cryypt_jws::claims::registered;
use cryypt_jws::{ClaimsBuilder, Jwt, NumericDate, TokenBuilder};
use serde_json::json;

#[test]
fn test_claims_builder_sets_registered_fields() {
    let claims = ClaimsBuilder::new()
        .issuer("test-issuer")
        .subject("test-user")
        .audience("api")
        .audience("web")
        .id("jti-1")
        .build();

    assert_eq!(claims.registered.issuer, "test-issuer");
    assert_eq!(claims.registered.subject, "test-user");
    assert_eq!(claims.registered.audiences, ["api", "web"]);
    assert_eq!(claims.registered.id, "jti-1");
    assert!(claims.set.is_none());
    assert!(claims.extra_headers.is_none());
    assert!(claims.key_id.is_empty());
    assert!(claims.raw().is_empty());
}

#[test]
fn test_claims_builder_relative_times() {
    let before = Utc::now().timestamp();
    let claims = ClaimsBuilder::new()
        .expires_in(Duration::hours(1))
        .issued_now()
        .build();
    let after = Utc::now().timestamp();

    let exp = claims.registered.expires.expect("exp set").as_secs_f64();
    let iat = claims.registered.issued.expect("iat set").as_secs_f64();
    assert!(exp >= (before + 3600) as f64 && exp <= (after + 3601) as f64);
    assert!(iat >= before as f64 && iat <= (after + 1) as f64);
    assert!(claims.registered.not_before.is_none());
}

#[test]
fn test_convenience_times_are_whole_seconds() {
    let mut claims = ClaimsBuilder::new()
        .issued_now()
        .expires_in(Duration::hours(1))
        .not_before(Utc::now())
        .build();
    claims.format_without_sign("none").expect("format");

    let payload: serde_json::Value = serde_json::from_slice(claims.raw()).expect("json");
    for name in ["iat", "exp", "nbf"] {
        assert!(payload[name].is_u64(), "{name} not an integer: {}", payload[name]);
    }
    assert_eq!(NumericDate::now().as_secs_f64().fract(), 0.0);
}

#[test]
fn test_explicit_fractional_time_is_kept() {
    let mut claims = ClaimsBuilder::new().issued_at(NumericDate::new(1.25)).build();
    claims.format_without_sign("none").expect("format");
    assert_eq!(claims.raw(), br#"{"iat":1.25}"#);
}

#[test]
fn test_claims_builder_absolute_times() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid date");
    let claims = ClaimsBuilder::new()
        .not_before(at)
        .expires(NumericDate::from_secs(1_704_070_800))
        .build();

    assert_eq!(claims.registered.not_before, Some(NumericDate::from_secs(1_704_067_200)));
    assert_eq!(
        claims.registered.expires.and_then(NumericDate::to_datetime),
        Some(at + Duration::hours(1))
    );
}

#[test]
fn test_claims_builder_audiences_replace() {
    let claims = ClaimsBuilder::new()
        .audience("dropped")
        .audiences(vec!["x", "y"])
        .build();
    assert_eq!(claims.registered.audiences, ["x", "y"]);
}

#[test]
fn test_claims_builder_custom_and_headers() {
    let claims = ClaimsBuilder::new()
        .custom("role", json!("admin"))
        .custom("scopes", json!(["read", "write"]))
        .header("typ", json!("JWT"))
        .key_id("k-7")
        .build();

    let set = claims.set.as_ref().expect("custom claims");
    assert_eq!(set["role"], json!("admin"));
    assert_eq!(set.len(), 2);
    assert_eq!(claims.extra_headers.as_ref().map(|h| h.len()), Some(1));
    assert_eq!(claims.key_id, "k-7");
}

#[test]
fn test_registered_claim_names() {
    let names = [
        registered::ISSUER,
        registered::SUBJECT,
        registered::AUDIENCE,
        registered::EXPIRES,
        registered::NOT_BEFORE,
        registered::ISSUED,
        registered::ID,
    ];
    assert_eq!(names, ["iss", "sub", "aud", "exp", "nbf", "iat", "jti"]);
}

#[test]
fn test_token_builder_reuses_claims() {
    let mut builder = Jwt::builder()
        .with_claims(Jwt::claims().subject("u1"))
        .with_claim("n", json!(1))
        .with_header("typ", json!("JWT"))
        .with_key_id("k1");

    let first = builder.hmac("HS256", b"secret").expect("sign");
    let second = builder.unsigned("none").expect("format");

    assert_eq!(first.payload(), second.payload());
    assert_eq!(builder.claims().raw(), br#"{"n":1,"sub":"u1"}"#);
    assert!(!second.is_signed());
}

#[test]
fn test_token_builder_from_claims() {
    let claims = ClaimsBuilder::new().issuer("svc").build();
    let mut builder = TokenBuilder::from(claims);
    let key = ed25519_dalek::SigningKey::from_bytes(&[7u8; 32]);
    let token = builder.eddsa(&key).expect("sign");

    assert!(token.is_signed());
    assert_eq!(builder.into_claims().raw(), br#"{"iss":"svc"}"#);
}
