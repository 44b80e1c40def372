//! Access key generation.

/// Random bytes behind each key.
const KEY_BYTES: usize = 32;

/// Generate a fresh access key: 32 random bytes as 64 lowercase hex
/// characters.
pub fn generate_access_key() -> String {
    let bytes: [u8; KEY_BYTES] = rand::random();
    hex::encode(bytes)
}
