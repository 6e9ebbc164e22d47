//! Device identifier generation.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate a 16-hex-character device identifier.
///
/// With a seed the identifier is deterministic, so reconfiguring the same
/// account keeps presenting the same device upstream. Without one it is
/// random.
pub fn generate_device_id(seed: Option<&str>) -> String {
    match seed {
        Some(seed) => {
            let digest = Sha256::digest(seed.as_bytes());
            hex::encode(&digest[..8])
        }
        None => {
            let mut bytes = [0u8; 8];
            rand::rng().fill_bytes(&mut bytes);
            hex::encode(bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_device_id_is_stable() {
        let a = generate_device_id(Some("user@example.com"));
        let b = generate_device_id(Some("user@example.com"));
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_distinct_seeds_differ() {
        assert_ne!(
            generate_device_id(Some("a@example.com")),
            generate_device_id(Some("b@example.com"))
        );
    }

    #[test]
    fn test_random_device_id_shape() {
        let id = generate_device_id(None);
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
