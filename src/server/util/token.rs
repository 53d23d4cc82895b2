use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;

/// Number of random bytes behind each validation token
pub const TOKEN_BYTES: usize = 64;

/// Generates a URL-safe validation token from [`TOKEN_BYTES`] random bytes
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);

    URL_SAFE_NO_PAD.encode(bytes)
}
