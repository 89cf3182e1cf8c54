//! Stored-name generation.
//!
//! Generated names are `{prefix}{token}{epoch_millis}` with no separators, e.g.
//! `FD-qWeRt1718000000000`. Uniqueness is best effort: two uploads only collide
//! when they land in the same millisecond and draw the same token.

use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// Default prefix for generated stored names.
pub const DEFAULT_STORED_NAME_PREFIX: &str = "FD-";

/// Default length of the random alphabetic token.
pub const DEFAULT_TOKEN_LENGTH: usize = 5;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Source of randomness and time for stored names.
pub trait NameEntropy: Send + Sync {
    /// Random token of `len` ASCII letters.
    fn random_token(&self, len: usize) -> String;

    /// Milliseconds since the Unix epoch.
    fn epoch_millis(&self) -> i64;
}

/// Thread-local RNG and the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEntropy;

impl NameEntropy for SystemEntropy {
    fn random_token(&self, len: usize) -> String {
        let mut rng = rand::rng();
        (0..len)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }

    fn epoch_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Pinned token and clock, for reproducible names in tests.
#[derive(Debug, Clone)]
pub struct FixedEntropy {
    pub token: String,
    pub millis: i64,
}

impl FixedEntropy {
    pub fn new(token: impl Into<String>, millis: i64) -> Self {
        Self {
            token: token.into(),
            millis,
        }
    }
}

impl NameEntropy for FixedEntropy {
    fn random_token(&self, len: usize) -> String {
        self.token.chars().take(len).collect()
    }

    fn epoch_millis(&self) -> i64 {
        self.millis
    }
}

/// Builds synthetic stored names.
#[derive(Clone)]
pub struct StoredNameGenerator {
    prefix: String,
    token_length: usize,
    entropy: Arc<dyn NameEntropy>,
}

impl StoredNameGenerator {
    pub fn new(
        prefix: impl Into<String>,
        token_length: usize,
        entropy: Arc<dyn NameEntropy>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            token_length,
            entropy,
        }
    }

    /// Generator with a pinned token and timestamp.
    pub fn fixed(token: &str, millis: i64) -> Self {
        Self::new(
            DEFAULT_STORED_NAME_PREFIX,
            token.len(),
            Arc::new(FixedEntropy::new(token, millis)),
        )
    }

    pub fn generate(&self) -> String {
        format!(
            "{}{}{}",
            self.prefix,
            self.entropy.random_token(self.token_length),
            self.entropy.epoch_millis()
        )
    }
}

impl Default for StoredNameGenerator {
    fn default() -> Self {
        Self::new(
            DEFAULT_STORED_NAME_PREFIX,
            DEFAULT_TOKEN_LENGTH,
            Arc::new(SystemEntropy),
        )
    }
}

impl fmt::Debug for StoredNameGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredNameGenerator")
            .field("prefix", &self.prefix)
            .field("token_length", &self.token_length)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_token_is_alphabetic() {
        let token = SystemEntropy.random_token(32);
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn test_generated_name_layout() {
        let generator = StoredNameGenerator::default();
        let name = generator.generate();
        let rest = name
            .strip_prefix(DEFAULT_STORED_NAME_PREFIX)
            .expect("prefix present");
        let (token, millis) = rest.split_at(DEFAULT_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphabetic()));
        assert!(millis.parse::<i64>().is_ok());
    }

    #[test]
    fn test_fixed_generator_is_reproducible() {
        let generator = StoredNameGenerator::fixed("abcde", 1_700_000_000_000);
        assert_eq!(generator.generate(), "FD-abcde1700000000000");
        assert_eq!(generator.generate(), generator.generate());
    }

    #[test]
    fn test_different_millis_never_collide() {
        let first = StoredNameGenerator::fixed("sameT", 1_700_000_000_000).generate();
        let second = StoredNameGenerator::fixed("sameT", 1_700_000_000_001).generate();
        assert_ne!(first, second);
    }

    #[test]
    fn test_custom_prefix() {
        let generator =
            StoredNameGenerator::new("CGI-", 3, Arc::new(FixedEntropy::new("xyzzy", 42)));
        assert_eq!(generator.generate(), "CGI-xyz42");
    }
}
