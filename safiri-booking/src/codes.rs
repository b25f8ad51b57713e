use rand::Rng;

/// Alphabet for confirmation codes: uppercase letters and digits.
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random confirmation code of `len` characters. Uniqueness
/// is the caller's concern; `BookingManager` retries on collision.
pub fn generate_confirmation_code(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
