use vidhyarthi_seva::services::razorpay_service::{
    payment_signature, to_minor_units, verify_payment_signature,
};

const SECRET: &str = "integration_test_secret";

#[test]
fn accepts_signature_computed_with_shared_secret() {
    let sig = payment_signature(SECRET, "order_abc", "pay_123");
    assert!(verify_payment_signature(SECRET, "order_abc", "pay_123", &sig));
}

#[test]
fn rejects_signature_from_different_secret() {
    let sig = payment_signature("attacker_secret", "order_abc", "pay_123");
    assert!(!verify_payment_signature(SECRET, "order_abc", "pay_123", &sig));
}

#[test]
fn rejects_swapped_order_and_payment_ids() {
    // HMAC(order|payment) must not validate as HMAC(payment|order)
    let sig = payment_signature(SECRET, "pay_123", "order_abc");
    assert!(!verify_payment_signature(SECRET, "order_abc", "pay_123", &sig));
}

#[test]
fn rejects_single_flipped_character() {
    let sig = payment_signature(SECRET, "order_abc", "pay_123");
    let mut chars: Vec<char> = sig.chars().collect();
    chars[0] = if chars[0] == 'a' { 'b' } else { 'a' };
    let tampered: String = chars.into_iter().collect();
    assert_ne!(sig, tampered);
    assert!(!verify_payment_signature(SECRET, "order_abc", "pay_123", &tampered));
}

#[test]
fn rejects_arbitrary_forged_strings() {
    assert!(!verify_payment_signature(SECRET, "order_abc", "pay_123", "forged"));
    assert!(!verify_payment_signature(SECRET, "order_abc", "pay_123", ""));
    // valid hex of the wrong length is still a mismatch
    assert!(!verify_payment_signature(SECRET, "order_abc", "pay_123", "deadbeef"));
}

#[test]
fn signature_is_bound_to_both_identifiers() {
    let sig = payment_signature(SECRET, "order_abc", "pay_123");
    assert!(!verify_payment_signature(SECRET, "order_xyz", "pay_123", &sig));
    assert!(!verify_payment_signature(SECRET, "order_abc", "pay_456", &sig));
}

#[test]
fn rupee_amounts_convert_to_paise_for_the_gateway() {
    assert_eq!(to_minor_units(500).unwrap(), 50_000);
    assert_eq!(to_minor_units(999).unwrap(), 99_900);
}

#[test]
fn rupee_amounts_that_overflow_the_conversion_are_rejected() {
    assert!(to_minor_units(i64::MAX / 100 + 1).is_err());
    assert!(to_minor_units(i64::MAX).is_err());
}
