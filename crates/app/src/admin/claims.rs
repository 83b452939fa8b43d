use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TokenClaims {
    exp: Option<i64>,
}

/// Reads the `exp` claim of a JWT without verifying the signature; the
/// backend stays the authority on validity.
pub fn expires_at(token: &str) -> Option<DateTime<Utc>> {
    let payload_b64 = token.split('.').nth(1).filter(|part| !part.is_empty())?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload_b64.trim_end_matches('=').as_bytes())
        .ok()?;
    let claims: TokenClaims = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.exp?, 0)
}

pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    expires_at(token).is_some_and(|exp| exp <= now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload.as_bytes())
        )
    }

    #[test]
    fn reads_exp_claim() {
        let token = token_with(r#"{"is_admin":true,"exp":1700000000}"#);
        assert_eq!(expires_at(&token).unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn expired_token_detected() {
        let token = token_with(r#"{"exp":1700000000}"#);
        let later = DateTime::from_timestamp(1_700_000_001, 0).unwrap();
        let earlier = DateTime::from_timestamp(1_699_999_000, 0).unwrap();
        assert!(is_expired(&token, later));
        assert!(!is_expired(&token, earlier));
    }

    #[test]
    fn opaque_token_is_never_expired_locally() {
        assert!(expires_at("opaque-session-token").is_none());
        assert!(!is_expired("a.!!!.c", Utc::now()));
        assert!(!is_expired(&token_with(r#"{"is_admin":true}"#), Utc::now()));
    }
}
