use md5::{Digest, Md5};

/// djb2 hash over raw bytes (`hash * 33 + byte`, seeded with 5381).
///
/// Hashing stops at the first NUL byte. Empty input hashes to `0`.
pub fn calc_hash(bytes: &[u8]) -> u32 {
    if bytes.is_empty() {
        return 0;
    }
    bytes
        .iter()
        .take_while(|&&b| b != 0)
        .fold(5381u32, |hash, &b| {
            (hash << 5).wrapping_add(hash).wrapping_add(u32::from(b))
        })
}

/// Lowercase hex MD5 digest of the UTF-8 encoding of `s`.
pub fn calc_md5_sum(s: &str) -> String {
    format!("{:x}", Md5::digest(s.as_bytes()))
}

/// Builds a stable identifier for an item that carries none.
///
/// The fields are concatenated in a fixed order, so identical items always
/// get the same id and a change to any field changes it.
pub fn synthesize_id(title: &str, description: &str, link: &str, content: &str) -> String {
    let input = format!("{}{}{}{}", title, description, link, content);
    format!("hash:{}", calc_md5_sum(&input))
}
