//! Property-based tests using proptest
//!
//! These tests verify the bearer-prefix normalization invariant: no
//! matter how the token was stored, the value handed to the transport
//! carries the prefix exactly once.

use proptest::prelude::*;

use lms_client::session::strip_bearer_prefix;

/// Generate plausible raw tokens: JWT-ish charset, no whitespace, and
/// not themselves starting with the word "bearer"
fn arb_token() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.~+/=-]{8,64}".prop_filter("token must not start with the prefix word", |t| {
        !t.to_ascii_lowercase().starts_with("bearer")
    })
}

/// Generate stored-token variants of a raw token: bare, or with a
/// case-mangled prefix and varying whitespace
fn arb_stored(token: String) -> impl Strategy<Value = String> {
    prop_oneof![
        Just(token.clone()),
        Just(format!("Bearer {}", token)),
        Just(format!("bearer {}", token)),
        Just(format!("BEARER {}", token)),
        Just(format!("Bearer   {}", token)),
        Just(format!("bEaReR\t{}", token)),
    ]
}

proptest! {
    /// Tokens without a prefix pass through unchanged
    #[test]
    fn bare_tokens_unchanged(token in arb_token()) {
        prop_assert_eq!(strip_bearer_prefix(&token), token.as_str());
    }

    /// Whatever was stored, the emitted header has exactly one prefix
    #[test]
    fn header_has_exactly_one_prefix(stored in arb_token().prop_flat_map(arb_stored)) {
        let header = format!("Bearer {}", strip_bearer_prefix(&stored));

        prop_assert!(header.starts_with("Bearer "));
        let rest = &header["Bearer ".len()..];
        prop_assert!(!rest.to_ascii_lowercase().starts_with("bearer"));
    }

    /// Stripping a prefixed token recovers the raw token
    #[test]
    fn strip_recovers_raw_token(token in arb_token()) {
        for stored in [
            token.clone(),
            format!("Bearer {}", token),
            format!("BEARER   {}", token),
        ] {
            prop_assert_eq!(strip_bearer_prefix(&stored), token.as_str());
        }
    }

    /// Stripping is idempotent once the prefix is gone
    #[test]
    fn strip_is_idempotent(stored in arb_token().prop_flat_map(arb_stored)) {
        let once = strip_bearer_prefix(&stored).to_string();
        let twice = strip_bearer_prefix(&once).to_string();
        prop_assert_eq!(once, twice);
    }

    /// Stripping never panics on arbitrary input, including non-ASCII
    #[test]
    fn strip_never_panics(raw in "\\PC{0,80}") {
        let _ = strip_bearer_prefix(&raw);
    }
}
