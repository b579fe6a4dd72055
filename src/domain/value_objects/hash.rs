//! Content Hash Value Object
//!
//! Short SHA-256 fingerprint of notebook content, stored in tracking files
//! to detect local edits made after a deploy.

use std::fmt;

use sha2::{Digest, Sha256};

/// Number of hex digits kept from the SHA-256 digest.
const SHORT_HEX_LEN: usize = 16;

/// `sha256:<16 hex digits>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    pub const PREFIX: &'static str = "sha256:";

    /// Fingerprint of notebook content.
    pub fn from_content(content: &str) -> Self {
        let digest = format!("{:x}", Sha256::digest(content.as_bytes()));
        Self(format!("{}{}", Self::PREFIX, &digest[..SHORT_HEX_LEN]))
    }

    /// A hash read back from a tracking file.
    ///
    /// Older files may omit the prefix; it is added so comparisons with
    /// freshly computed hashes still work.
    pub fn from_recorded(recorded: &str) -> Self {
        let recorded = recorded.trim();
        match recorded.strip_prefix(Self::PREFIX) {
            Some(_) => Self(recorded.to_string()),
            None => Self(format!("{}{}", Self::PREFIX, recorded)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn hex(&self) -> &str {
        &self.0[Self::PREFIX.len()..]
    }

    /// Whether `content` still hashes to this value.
    pub fn matches_content(&self, content: &str) -> bool {
        *self == Self::from_content(content)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_value() {
        // sha256("hello world") = b94d27b9934d3e08...
        assert_eq!(
            ContentHash::from_content("hello world").as_str(),
            "sha256:b94d27b9934d3e08"
        );
    }

    #[test]
    fn matches_only_same_content() {
        let hash = ContentHash::from_content("import marimo\n");
        assert!(hash.matches_content("import marimo\n"));
        assert!(!hash.matches_content("import marimo\n# edited\n"));
    }

    #[test]
    fn recorded_hash_without_prefix() {
        let hash = ContentHash::from_recorded("b94d27b9934d3e08");
        assert_eq!(hash, ContentHash::from_content("hello world"));
        assert_eq!(hash.hex(), "b94d27b9934d3e08");
    }

    #[test]
    fn recorded_hash_with_prefix() {
        let hash = ContentHash::from_recorded(" sha256:b94d27b9934d3e08\n");
        assert_eq!(hash.to_string(), "sha256:b94d27b9934d3e08");
    }
}
