//! Tests for pre-encoded headers against the serialized header path

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use cryypt_jws::header::{self, Header};
use cryypt_jws::{Algorithm, ClaimSet};
use serde_json::json;

fn encode_json_header(alg: &str, key_id: &str, extra: Option<&ClaimSet>) -> String {
    let json = header::json(alg, key_id, extra).expect("header serializes");
    URL_SAFE_NO_PAD.encode(json)
}

#[test]
fn test_every_literal_matches_serialized_header() {
    for alg in Algorithm::ALL {
        let literal = alg.fixed_header();
        let (encoded, separator) = literal.split_at(literal.len() - 1);
        assert_eq!(separator, ".", "{alg} literal must end in separator");
        assert_eq!(encoded, encode_json_header(alg.as_str(), "", None), "{alg}");
    }
}

#[test]
fn test_standard_identifiers_take_fast_path() {
    for alg in Algorithm::ALL {
        let header = header::build(alg.as_str(), "", None).expect("header");
        assert_eq!(header, Header::Fixed(alg.fixed_header()));
        assert_eq!(header.encoded_len(), alg.fixed_header().len());
    }
}

#[test]
fn test_key_id_disables_fast_path_and_precedes_alg() {
    let header = header::build("HS256", "k1", None).expect("header");
    assert!(!header.is_fixed());
    assert_eq!(header, Header::Json(br#"{"kid":"k1","alg":"HS256"}"#.to_vec()));
}

#[test]
fn test_extra_headers_disable_fast_path() {
    let mut extra = ClaimSet::new();
    extra.insert("typ".into(), json!("JWT"));
    let header = header::build("ES256", "", Some(&extra)).expect("header");
    assert_eq!(header, Header::Json(br#"{"alg":"ES256","typ":"JWT"}"#.to_vec()));
}

#[test]
fn test_extra_headers_cannot_override_alg_or_kid() {
    let mut extra = ClaimSet::new();
    extra.insert("alg".into(), json!("none"));
    extra.insert("kid".into(), json!("spoofed"));
    extra.insert("cty".into(), json!("JWT"));

    let json = header::json("RS256", "k2", Some(&extra)).expect("header");
    assert_eq!(json, br#"{"alg":"RS256","cty":"JWT","kid":"k2"}"#.to_vec());
    assert_eq!(extra["alg"], json!("none"), "caller map must not change");
}

#[test]
fn test_extra_headers_keep_kid_when_key_id_empty() {
    let mut extra = ClaimSet::new();
    extra.insert("kid".into(), json!("from-map"));
    let json = header::json("HS384", "", Some(&extra)).expect("header");
    assert_eq!(json, br#"{"alg":"HS384","kid":"from-map"}"#.to_vec());
}

#[test]
fn test_unknown_identifier_is_serialized() {
    let header = header::build("X-CUSTOM", "", None).expect("header");
    assert_eq!(header, Header::Json(br#"{"alg":"X-CUSTOM"}"#.to_vec()));
}

#[test]
fn test_identifier_is_json_escaped() {
    let json = header::json("a\"b", "k\\1", None).expect("header");
    assert_eq!(json, br#"{"kid":"k\\1","alg":"a\"b"}"#.to_vec());
}
