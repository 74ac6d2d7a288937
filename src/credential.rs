//! Password-binding digests.
//!
//! A note's digest is `base64(sha256(password | content))` over the plaintext
//! content, so a digest stops matching as soon as either the password or the
//! content changes.

use base64::{engine::general_purpose::STANDARD, Engine};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

pub const SEPARATOR: u8 = b'|';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

pub fn derive_digest(password: &str, content: &str) -> PasswordDigest {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update([SEPARATOR]);
    hasher.update(content.as_bytes());
    PasswordDigest(STANDARD.encode(hasher.finalize()))
}

/// Recomputes the digest and compares it against the stored one.
pub fn verify(password: &str, content: &str, expected: &str) -> bool {
    let actual = derive_digest(password, content);
    actual.as_str().as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_digests() {
        assert_eq!(
            derive_digest("p", "C").as_str(),
            "1TK/dra68nTyvupvIQJNv4cQz9qaxyIWlDT7sjKi4P4="
        );
        assert_eq!(
            derive_digest("hunter2", "hello world").as_str(),
            "1wCVJef3Y4U9+qvM5TgcJ9bofxp2zZAv/Qcf4VJGMwc="
        );
        assert_eq!(
            derive_digest("pw", "héllo 世界").as_str(),
            "k2kJjjnS/Jq5NHidCAKYZft+bbSmQaDLEYZBnQ9BVRI="
        );
    }

    #[test]
    fn accepts_the_password_it_was_derived_from() {
        for (password, content) in [("p", "C"), ("", ""), ("pässwörd", "多字节 🚀"), ("a|b", "c")] {
            let digest = derive_digest(password, content);
            assert!(verify(password, content, digest.as_str()));
        }
    }

    #[test]
    fn rejects_wrong_password_or_tampered_content() {
        let digest = derive_digest("p", "original");

        assert!(!verify("q", "original", digest.as_str()));
        assert!(!verify("p", "tampered", digest.as_str()));
        assert!(!verify("p", "original ", digest.as_str()));
        assert!(!verify("p", "original", ""));
        assert!(!verify("p", "original", "not even base64"));
    }

    #[test]
    fn digest_is_fixed_length() {
        // 32 raw bytes, padded base64
        assert_eq!(derive_digest("p", "").as_str().len(), 44);
        assert_eq!(derive_digest("p", &"x".repeat(10_000)).as_str().len(), 44);
    }
}
