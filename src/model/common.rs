use sha2::{Digest, Sha256};
use uuid::Uuid;

pub type Id = String;

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}

/// Generate an opaque bearer token for sessions and passkey challenges
pub fn generate_token() -> String {
    // Two UUIDs worth of entropy, hex-encoded without dashes
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// SHA-256 of the input, hex-encoded. Used for password and token hashing
/// so raw secrets never reach the store.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash a password with its per-account salt
pub fn hash_password(salt: &str, password: &str) -> String {
    sha256_hex(&format!("{}:{}", salt, password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_hex_is_stable() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn password_hash_depends_on_salt() {
        let a = hash_password("salt-a", "hunter2");
        let b = hash_password("salt-b", "hunter2");
        assert_ne!(a, b);
        assert_eq!(a, hash_password("salt-a", "hunter2"));
    }

    #[test]
    fn tokens_are_unique_and_long() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_ne!(t1, t2);
        assert_eq!(t1.len(), 64);
    }
}
