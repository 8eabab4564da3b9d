use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// What an emailed one-time code unlocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub enum OtpPurpose {
    Register,
    Reset,
}

impl OtpPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            OtpPurpose::Register => "register",
            OtpPurpose::Reset => "reset",
        }
    }

    pub fn cache_key(self, email: &str) -> String {
        format!("otp:{}:{}", self.as_str(), email.to_lowercase())
    }

    /// Key that remembers when the last code was sent
    pub fn cooldown_key(self, email: &str) -> String {
        format!("otp_cooldown:{}:{}", self.as_str(), email.to_lowercase())
    }
}

/// Outstanding OTP challenge, stored in the object cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpChallenge {
    pub code: String,
    pub purpose: OtpPurpose,
    pub attempts: u32,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Outcome of checking a submitted code against a challenge
#[derive(Debug, Clone, PartialEq)]
pub enum OtpCheck {
    Valid,
    Expired,
    /// Wrong code; the challenge is kept with the bumped attempt counter
    Mismatch(OtpChallenge),
    /// Wrong code and no attempts left
    Exhausted,
}

impl OtpChallenge {
    pub fn new(code: String, purpose: OtpPurpose, now: i64, ttl: i64) -> Self {
        Self {
            code,
            purpose,
            attempts: 0,
            issued_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn check(mut self, code: &str, now: i64, max_attempts: u32) -> OtpCheck {
        if now >= self.expires_at {
            return OtpCheck::Expired;
        }
        if self.code == code.trim() {
            return OtpCheck::Valid;
        }
        self.attempts += 1;
        if self.attempts >= max_attempts {
            OtpCheck::Exhausted
        } else {
            OtpCheck::Mismatch(self)
        }
    }

    /// Seconds left before the challenge expires
    pub fn remaining_ttl(&self, now: i64) -> i64 {
        (self.expires_at - now).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_keys_are_case_insensitive() {
        assert_eq!(
            OtpPurpose::Register.cache_key("Abebe@Falcon.ET"),
            "otp:register:abebe@falcon.et"
        );
        assert_ne!(
            OtpPurpose::Reset.cache_key("a@b.et"),
            OtpPurpose::Register.cache_key("a@b.et")
        );
    }

    #[test]
    fn test_valid_code() {
        let challenge = OtpChallenge::new("123456".into(), OtpPurpose::Register, 100, 600);
        assert_eq!(challenge.check(" 123456 ", 200, 5), OtpCheck::Valid);
    }

    #[test]
    fn test_expired_code() {
        let challenge = OtpChallenge::new("123456".into(), OtpPurpose::Register, 100, 600);
        assert_eq!(challenge.check("123456", 700, 5), OtpCheck::Expired);
    }

    #[test]
    fn test_attempts_exhaust_challenge() {
        let mut challenge = OtpChallenge::new("123456".into(), OtpPurpose::Reset, 0, 600);
        for expected_attempts in 1..3 {
            match challenge.check("000000", 10, 3) {
                OtpCheck::Mismatch(next) => {
                    assert_eq!(next.attempts, expected_attempts);
                    challenge = next;
                }
                other => panic!("unexpected outcome: {other:?}"),
            }
        }
        assert_eq!(challenge.check("000000", 10, 3), OtpCheck::Exhausted);
    }
}
