//! Salted cache keys for repository identities

use sha2::{Digest, Sha256};

/// Derives cache keys from repository identities.
///
/// The key is the hex SHA-256 of the identity followed by the salt, so a
/// new salt invalidates every existing entry.
#[derive(Debug, Clone, Default)]
pub struct Fingerprinter {
    salt: String,
}

impl Fingerprinter {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    pub fn fingerprint(&self, identity: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(identity.as_bytes());
        hasher.update(self.salt.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_deterministic() {
        let fp = Fingerprinter::new("pepper");
        assert_eq!(fp.fingerprint("octocat/hello"), fp.fingerprint("octocat/hello"));
        assert_eq!(fp.fingerprint("octocat/hello").len(), 64);
    }

    #[test]
    fn unsalted_matches_plain_sha256() {
        let fp = Fingerprinter::default();
        assert_eq!(
            fp.fingerprint("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn salt_changes_every_key() {
        let plain = Fingerprinter::new("");
        let salted = Fingerprinter::new("rotate-me");
        for identity in ["a/b", "octocat/hello", "org/repo-with-dash"] {
            assert_ne!(plain.fingerprint(identity), salted.fingerprint(identity));
        }
    }

    #[test]
    fn different_identities_differ() {
        let fp = Fingerprinter::new("s");
        assert_ne!(fp.fingerprint("a/b"), fp.fingerprint("a/c"));
    }
}
