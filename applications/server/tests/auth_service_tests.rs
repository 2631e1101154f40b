/// Authentication service tests
/// Tests password hashing, JWT generation and token validation
mod common;

use chrono::TimeDelta;
use common::{MutableClock, TEST_BCRYPT_COST, TEST_SECRET};
use freight_core::{FreightError, Identity};
use freight_server::services::auth::{
    CredentialStore, TokenClaims, TokenIssuer, SESSION_TOKEN_TTL_SECS,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use mockable::Clock;
use std::sync::Arc;

fn create_test_issuer(clock: Arc<MutableClock>) -> TokenIssuer {
    TokenIssuer::new(TEST_SECRET, clock).unwrap()
}

fn stored_identity() -> Identity {
    let mut identity = Identity::new("Grace Hopper", "grace@example.com", "hash");
    identity.id = 7;
    identity
}

fn decode_wire(token: &str) -> TokenClaims {
    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(TEST_SECRET.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .unwrap()
    .claims
}

/// Test password hashing produces valid bcrypt hashes
#[test]
fn test_password_hashing() {
    let store = CredentialStore::new(TEST_BCRYPT_COST);

    let password = "MySecurePassword123!";
    let hash = store.hash(password).unwrap();

    // Verify hash format (bcrypt starts with $2b$ or $2a$)
    assert!(hash.starts_with("$2b$") || hash.starts_with("$2a$"));
    assert_eq!(hash.len(), 60);

    // Verify the hash is different each time (salt is random)
    let hash2 = store.hash(password).unwrap();
    assert_ne!(hash, hash2, "Hashes should differ due to random salt");
}

#[test]
fn test_password_verification() {
    let store = CredentialStore::new(TEST_BCRYPT_COST);
    let hash = store.hash("MySecurePassword123!").unwrap();

    assert!(store.verify("MySecurePassword123!", &hash).unwrap());
    assert!(!store.verify("mysecurepassword123!", &hash).unwrap());
    assert!(!store.verify("", &hash).unwrap());
}

/// A hash made at one cost verifies under a store configured with another
#[test]
fn test_verification_reads_cost_from_hash() {
    let cheap = CredentialStore::new(TEST_BCRYPT_COST);
    let dearer = CredentialStore::new(TEST_BCRYPT_COST + 1);

    let hash = cheap.hash("secret123").unwrap();

    assert!(dearer.verify("secret123", &hash).unwrap());
}

#[test]
fn test_token_expires_two_hours_after_issue() {
    let clock = Arc::new(MutableClock::fixture());
    let issuer = create_test_issuer(Arc::clone(&clock));

    let session = issuer.issue(&stored_identity()).unwrap();
    let wire = decode_wire(&session.token);

    assert_eq!(session.issued_at, clock.utc());
    assert_eq!(wire.exp, clock.utc().timestamp() + 7200);
    assert_eq!(session.expires_at - session.issued_at, TimeDelta::seconds(SESSION_TOKEN_TTL_SECS));
}

#[test]
fn test_token_carries_identity_claims() {
    let issuer = create_test_issuer(Arc::new(MutableClock::fixture()));

    let session = issuer.issue(&stored_identity()).unwrap();
    let wire = decode_wire(&session.token);

    assert_eq!(wire.sub, "7");
    assert_eq!(wire.email, "grace@example.com");
    assert_eq!(wire.name, "Grace Hopper");

    let claims = issuer.verify(&session.token).unwrap();
    assert_eq!(claims.subject_id, 7);
    assert_eq!(claims.email, "grace@example.com");
    assert_eq!(claims.display_name, "Grace Hopper");
}

#[test]
fn test_token_header_is_hs256() {
    let issuer = create_test_issuer(Arc::new(MutableClock::fixture()));
    let session = issuer.issue(&stored_identity()).unwrap();

    let header = jsonwebtoken::decode_header(&session.token).unwrap();

    assert_eq!(header.alg, Algorithm::HS256);
    assert_eq!(session.token.split('.').count(), 3);
}

#[test]
fn test_expired_token_rejected() {
    let clock = Arc::new(MutableClock::fixture());
    // Issue three hours in the past: expired an hour ago
    clock.advance_seconds(-3 * 3600);
    let issuer = create_test_issuer(Arc::clone(&clock));

    let session = issuer.issue(&stored_identity()).unwrap();
    clock.advance_seconds(3 * 3600);

    assert!(matches!(
        issuer.verify(&session.token),
        Err(FreightError::Unauthorized(_))
    ));
}

#[test]
fn test_token_rejected_seconds_after_expiry() {
    let clock = Arc::new(MutableClock::fixture());
    let issuer = create_test_issuer(Arc::clone(&clock));
    let session = issuer.issue(&stored_identity()).unwrap();

    clock.advance_seconds(SESSION_TOKEN_TTL_SECS + 5);

    assert!(matches!(
        issuer.verify(&session.token),
        Err(FreightError::Unauthorized(_))
    ));
}

#[test]
fn test_token_dies_exactly_at_exp() {
    let clock = Arc::new(MutableClock::fixture());
    let issuer = create_test_issuer(Arc::clone(&clock));
    let session = issuer.issue(&stored_identity()).unwrap();

    clock.advance_seconds(SESSION_TOKEN_TTL_SECS - 1);
    assert!(issuer.verify(&session.token).is_ok());

    clock.advance_seconds(1);
    assert!(issuer.verify(&session.token).is_err());
}

/// Expiry follows the issuer's clock, not the host's
#[test]
fn test_expiry_judged_by_injected_clock() {
    let clock = Arc::new(MutableClock::fixture());
    let issuer = create_test_issuer(Arc::clone(&clock));

    // Minted a day ago by wall time, but the issuer's clock stays there too
    clock.advance_seconds(-86_400);
    let session = issuer.issue(&stored_identity()).unwrap();

    assert!(issuer.verify(&session.token).is_ok());
}

#[test]
fn test_tampered_token_rejected() {
    let issuer = create_test_issuer(Arc::new(MutableClock::fixture()));
    let session = issuer.issue(&stored_identity()).unwrap();

    let mut parts: Vec<String> = session.token.split('.').map(str::to_string).collect();
    let forged = issuer
        .issue(&Identity {
            id: 8,
            ..stored_identity()
        })
        .unwrap();
    // Payload from one token, signature from another
    parts[1] = forged.token.split('.').nth(1).unwrap().to_string();
    let tampered = parts.join(".");

    assert!(issuer.verify(&tampered).is_err());
    assert!(issuer.verify("not.a.token").is_err());
    assert!(issuer.verify("").is_err());
}

#[test]
fn test_token_from_other_secret_rejected() {
    let clock: Arc<MutableClock> = Arc::new(MutableClock::fixture());
    let ours = create_test_issuer(Arc::clone(&clock));
    let theirs = TokenIssuer::new("some-other-secret", clock).unwrap();

    let session = theirs.issue(&stored_identity()).unwrap();

    assert!(ours.verify(&session.token).is_err());
}
