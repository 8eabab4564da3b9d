//! Random codes and tokens

use rand::Rng;
use rand::distr::Alphanumeric;

/// Numeric one-time code; leading zeros are kept
pub fn generate_otp(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length.max(1))
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Alphanumeric token for download links and generated passwords
pub fn generate_token(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_is_numeric() {
        let code = generate_otp(6);
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(generate_otp(0).len(), 1);
    }

    #[test]
    fn test_tokens_differ() {
        let a = generate_token(32);
        let b = generate_token(32);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
