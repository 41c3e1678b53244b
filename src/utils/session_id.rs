use rand::RngCore;

/// 128 random bits, hex encoded, for the `session_id` cookie.
pub fn random_session_id() -> String {
    let mut b = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut b);
    hex::encode(b)
}
