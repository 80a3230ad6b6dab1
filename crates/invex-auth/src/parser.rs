//! Structural decoding of the session credential.
//!
//! The credential is a three-segment dot-separated token whose middle
//! segment base64url-encodes a JSON claims object. Decoding is purely
//! structural: no network access, no side effects, and no signature
//! verification — the issuing backend owns verification.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use invex_core::{AppError, AppResult};

use crate::claims::SessionClaims;

/// Decode a credential string into its claims.
///
/// Fails with a decode-kind error on malformed input: wrong segment count,
/// a payload that is not base64url, or a payload that is not a JSON object.
/// Callers recover by treating the session as unauthenticated.
pub fn decode_claims(credential: &str) -> AppResult<SessionClaims> {
    let segments: Vec<&str> = credential.split('.').collect();
    if segments.len() != 3 {
        return Err(AppError::decode(format!(
            "Malformed credential: expected 3 segments, found {}",
            segments.len()
        )));
    }

    // Tolerate issuers that pad the payload segment.
    let payload = segments[1].trim_end_matches('=');
    let decoded = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| AppError::decode(format!("Credential payload is not base64url: {e}")))?;

    serde_json::from_slice(&decoded)
        .map_err(|e| AppError::decode(format!("Credential payload is not valid JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use invex_core::error::ErrorKind;
    use invex_entity::user::Role;

    fn mint(claims: &serde_json::Value) -> String {
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            claims,
            &jsonwebtoken::EncodingKey::from_secret(b"test-secret"),
        )
        .expect("minting a test credential cannot fail")
    }

    #[test]
    fn test_decodes_minted_credential() {
        let token = mint(&serde_json::json!({
            "sub": "ops@invex.test",
            "rol": ["ROLE_ADMIN"],
            "exp": 4_102_444_800i64,
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.role(), Some(Role::Admin));
        assert_eq!(claims.exp, Some(4_102_444_800));
    }

    #[test]
    fn test_wrong_segment_count() {
        for bad in ["", "only-one", "two.segments", "a.b.c.d"] {
            let err = decode_claims(bad).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Decode, "input: {bad:?}");
        }
    }

    #[test]
    fn test_payload_not_base64() {
        let err = decode_claims("header.!!not-base64!!.sig").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
    }

    #[test]
    fn test_payload_not_json() {
        let payload = URL_SAFE_NO_PAD.encode(b"not a json object");
        let err = decode_claims(&format!("h.{payload}.s")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
    }

    #[test]
    fn test_tolerates_padded_payload() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"rol":["CLIENT"]}"#);
        let padded = format!("h.{payload}==.s");
        let claims = decode_claims(&padded).unwrap();
        assert_eq!(claims.role(), Some(Role::Client));
    }
}
