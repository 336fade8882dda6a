//! Ethereum address validation.

/// True iff `s` is `0x` followed by exactly 40 hex characters.
pub fn is_valid_address(s: &str) -> bool {
    s.strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::is_valid_address;

    #[test]
    fn accepts_checksummed_and_lowercase() {
        assert!(is_valid_address("0x1234567890123456789012345678901234567890"));
        assert!(is_valid_address("0xf1fc9580784335b2613c1392a530c1aa2a69ba3d"));
        assert!(is_valid_address("0x7a2309a8f1E037ae65C295b4f7dBD24C496ab8B3"));
    }

    #[test]
    fn rejects_malformed() {
        assert!(!is_valid_address("0x123"));
        assert!(!is_valid_address("1234567890123456789012345678901234567890"));
        assert!(!is_valid_address("0X1234567890123456789012345678901234567890"));
        assert!(!is_valid_address("0x12345678901234567890123456789012345678901"));
        assert!(!is_valid_address("0x123456789012345678901234567890123456789g"));
        assert!(!is_valid_address(""));
    }
}
