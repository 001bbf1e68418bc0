//! HMAC tokens for anti-forgery and session binding.
//!
//! A token is the hex-encoded HMAC of a salt. Tokens are compared with
//! [`check_token`], whose running time does not depend on the position of
//! the first differing byte.

use crate::error::ToolboxError;
use rand::RngCore;
use rand::rngs::OsRng;
use ring::hmac;
use std::fmt;
use std::str::FromStr;
use subtle::ConstantTimeEq;
use tracing::trace;
use zeroize::Zeroizing;

/// Number of random bytes in a generated salt.
pub const SALT_BYTES: usize = 32;

/// Hash function underlying the HMAC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HmacAlgorithm {
    /// HMAC-SHA1, for tokens issued by legacy systems
    Sha1,
    /// HMAC-SHA256
    #[default]
    Sha256,
    /// HMAC-SHA384
    Sha384,
    /// HMAC-SHA512
    Sha512,
}

impl HmacAlgorithm {
    /// Get the algorithm name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Length of the hex-encoded token produced by this algorithm.
    #[must_use]
    pub const fn hex_len(&self) -> usize {
        match self {
            Self::Sha1 => 40,
            Self::Sha256 => 64,
            Self::Sha384 => 96,
            Self::Sha512 => 128,
        }
    }

    fn ring_algorithm(self) -> hmac::Algorithm {
        match self {
            Self::Sha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            Self::Sha256 => hmac::HMAC_SHA256,
            Self::Sha384 => hmac::HMAC_SHA384,
            Self::Sha512 => hmac::HMAC_SHA512,
        }
    }
}

impl FromStr for HmacAlgorithm {
    type Err = ToolboxError;

    /// Parse algorithm from string, ignoring case and dashes (`SHA-256`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(ToolboxError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for HmacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generate a hex-encoded salt from the operating system's secure RNG.
///
/// # Errors
///
/// Returns [`ToolboxError::RandomnessUnavailable`] if the RNG fails.
pub fn random_salt() -> Result<String, ToolboxError> {
    let mut bytes = Zeroizing::new([0u8; SALT_BYTES]);
    OsRng
        .try_fill_bytes(&mut bytes[..])
        .map_err(|e| ToolboxError::randomness(e.to_string()))?;
    trace!(bytes = SALT_BYTES, "random salt generated");
    Ok(hex::encode(&bytes[..]))
}

/// Compute the hex-encoded HMAC of `salt` under `key`.
#[must_use]
pub fn sign(salt: &str, key: &[u8], algorithm: HmacAlgorithm) -> String {
    let key = hmac::Key::new(algorithm.ring_algorithm(), key);
    let tag = hmac::sign(&key, salt.as_bytes());
    hex::encode(tag.as_ref())
}

/// Compare two tokens in constant time.
///
/// Tokens of different lengths are unequal; the length itself is not
/// treated as secret.
#[must_use]
pub fn check_token(known: &str, candidate: &str) -> bool {
    known.as_bytes().ct_eq(candidate.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_parsing() {
        assert_eq!("sha256".parse::<HmacAlgorithm>().unwrap(), HmacAlgorithm::Sha256);
        assert_eq!("SHA-512".parse::<HmacAlgorithm>().unwrap(), HmacAlgorithm::Sha512);
        assert_eq!("Sha384".parse::<HmacAlgorithm>().unwrap(), HmacAlgorithm::Sha384);
        assert_eq!("sha1".parse::<HmacAlgorithm>().unwrap(), HmacAlgorithm::Sha1);
        assert_eq!(
            "md5".parse::<HmacAlgorithm>(),
            Err(ToolboxError::UnsupportedAlgorithm("md5".to_string()))
        );
    }

    #[test]
    fn test_default_algorithm() {
        assert_eq!(HmacAlgorithm::default(), HmacAlgorithm::Sha256);
        assert_eq!(HmacAlgorithm::default().to_string(), "sha256");
    }

    #[test]
    fn test_random_salt() {
        let salt1 = random_salt().unwrap();
        let salt2 = random_salt().unwrap();
        assert_eq!(salt1.len(), SALT_BYTES * 2);
        assert!(salt1.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(salt1, salt2);
    }

    #[test]
    fn test_sign_known_vector() {
        // RFC 4231 test case 2
        let token = sign("what do ya want for nothing?", b"Jefe", HmacAlgorithm::Sha256);
        assert_eq!(
            token,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_sign_lengths() {
        for alg in [
            HmacAlgorithm::Sha1,
            HmacAlgorithm::Sha256,
            HmacAlgorithm::Sha384,
            HmacAlgorithm::Sha512,
        ] {
            assert_eq!(sign("salt", b"key", alg).len(), alg.hex_len());
        }
    }

    #[test]
    fn test_sign_depends_on_key_and_salt() {
        let base = sign("salt", b"key", HmacAlgorithm::Sha256);
        assert_ne!(base, sign("salt", b"other", HmacAlgorithm::Sha256));
        assert_ne!(base, sign("pepper", b"key", HmacAlgorithm::Sha256));
    }

    #[test]
    fn test_check_token() {
        let token = sign("salt", b"key", HmacAlgorithm::Sha256);
        assert!(check_token(&token, &token));
        assert!(!check_token(&token, &format!("{token}x")));
        assert!(!check_token(&token, &token[..63]));
        assert!(!check_token(&token, ""));
        assert!(check_token("", ""));
    }
}
