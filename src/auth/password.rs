//! Password hashing.
//!
//! Stored form: `sha256$<iterations>$<salt-hex>$<hash-hex>`. The first
//! round hashes `salt || password`, every later round hashes
//! `previous || salt`. Verification reads the iteration count from the
//! stored string, so the default can be raised without breaking old hashes.

use sha2::{Digest, Sha256};

/// Rounds used for new hashes
pub const DEFAULT_ITERATIONS: u32 = 100_000;

const SCHEME: &str = "sha256";
const SALT_LEN: usize = 16;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    hash_password_with(password, DEFAULT_ITERATIONS)
}

/// Hash with an explicit round count.
pub fn hash_password_with(password: &str, iterations: u32) -> String {
    let salt: [u8; SALT_LEN] = rand::random();
    let iterations = iterations.max(1);
    let hash = derive(password.as_bytes(), &salt, iterations);

    format!(
        "{}${}${}${}",
        SCHEME,
        iterations,
        hex::encode(salt),
        hex::encode(hash)
    )
}

/// Check a password against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((iterations, salt, expected)) = parse(stored) else {
        tracing::debug!("Stored password hash is not in a recognised format");
        return false;
    };

    let actual = derive(password.as_bytes(), &salt, iterations);
    constant_time_eq(&actual, &expected)
}

fn parse(stored: &str) -> Option<(u32, Vec<u8>, Vec<u8>)> {
    let mut parts = stored.split('$');
    if parts.next()? != SCHEME {
        return None;
    }
    let iterations: u32 = parts.next()?.parse().ok().filter(|n| *n > 0)?;
    let salt = hex::decode(parts.next()?).ok()?;
    let hash = hex::decode(parts.next()?).ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((iterations, salt, hash))
}

fn derive(password: &[u8], salt: &[u8], iterations: u32) -> [u8; 32] {
    let mut hash: [u8; 32] = Sha256::new()
        .chain_update(salt)
        .chain_update(password)
        .finalize()
        .into();

    for _ in 1..iterations {
        hash = Sha256::new()
            .chain_update(hash)
            .chain_update(salt)
            .finalize()
            .into();
    }

    hash
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let stored = hash_password_with("hunter2", 10);
        assert!(verify_password("hunter2", &stored));
        assert!(!verify_password("hunter3", &stored));
    }

    #[test]
    fn test_hash_format() {
        let stored = hash_password_with("pw", 7);
        let parts: Vec<&str> = stored.split('$').collect();

        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "sha256");
        assert_eq!(parts[1], "7");
        assert_eq!(parts[2].len(), SALT_LEN * 2);
        assert_eq!(parts[3].len(), 64);
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(hash_password_with("pw", 1), hash_password_with("pw", 1));
    }

    #[test]
    fn test_default_iterations_verify() {
        let stored = hash_password("correct horse");
        assert!(stored.starts_with("sha256$100000$"));
        assert!(verify_password("correct horse", &stored));
    }

    #[test]
    fn test_malformed_hashes_never_match() {
        for stored in [
            "",
            "hashedpassword1",
            "md5$1$00$00",
            "sha256$0$00$00",
            "sha256$x$00$00",
            "sha256$1$zz$00",
            "sha256$1$00$00$extra",
        ] {
            assert!(!verify_password("anything", stored), "{stored}");
        }
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }
}
