//! Prompt-derived cache keys.

use sha2::{Digest, Sha256};

/// Derives stable cache keys from prompt text.
///
/// Optional helper for callers; the gateway uses whatever key it is given.
#[derive(Debug, Clone, Default)]
pub struct CacheKeyGenerator {
    salt: Option<String>,
}

impl CacheKeyGenerator {
    pub fn new() -> Self {
        Self { salt: None }
    }

    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    /// SHA-256 hex digest over the salt, system instruction and prompt.
    pub fn generate(&self, prompt: &str, system: Option<&str>) -> String {
        let mut hasher = Sha256::new();
        // Length-prefix each part so ("ab", "c") and ("a", "bc") differ.
        for part in [self.salt.as_deref(), system, Some(prompt)] {
            match part {
                Some(s) => {
                    hasher.update((s.len() as u64).to_le_bytes());
                    hasher.update(s.as_bytes());
                }
                None => hasher.update([0xff]),
            }
        }
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_stable_and_distinct() {
        let gen = CacheKeyGenerator::new();
        let k1 = gen.generate("hello", None);
        assert_eq!(k1, gen.generate("hello", None));
        assert_eq!(k1.len(), 64);

        assert_ne!(k1, gen.generate("hello", Some("be brief")));
        assert_ne!(gen.generate("bc", Some("a")), gen.generate("c", Some("ab")));
        assert_ne!(k1, CacheKeyGenerator::new().with_salt("v2").generate("hello", None));
    }
}
