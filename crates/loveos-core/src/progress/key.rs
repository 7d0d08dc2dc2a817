//! Storage key derivation.
//!
//! The progress record is keyed by a rolling checksum of the configured
//! passcode, so changing the passcode starts a fresh record. Not a security
//! boundary: distinct passcodes may collide.

pub const KEY_PREFIX: &str = "loveos_progress_v1_";

/// `h = h * 31 + c` over the UTF-16 code units of the trimmed passcode,
/// wrapping at 2^32.
pub fn passcode_hash(passcode: &str) -> u32 {
    passcode
        .trim()
        .encode_utf16()
        .fold(0u32, |h, c| h.wrapping_mul(31).wrapping_add(u32::from(c)))
}

pub fn progress_key(passcode: &str) -> String {
    format!("{KEY_PREFIX}{}", passcode_hash(passcode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_passcode_hashes_to_zero() {
        assert_eq!(passcode_hash(""), 0);
        assert_eq!(progress_key("   "), "loveos_progress_v1_0");
    }

    #[test]
    fn known_values() {
        // 'a' = 97, 'b' = 98 -> 97 * 31 + 98
        assert_eq!(passcode_hash("a"), 97);
        assert_eq!(passcode_hash("ab"), 3105);
        assert_eq!(passcode_hash("21122025"), 3_229_719_969);
    }

    #[test]
    fn trimmed_before_hashing() {
        assert_eq!(progress_key(" 21122025\n"), progress_key("21122025"));
    }

    #[test]
    fn order_dependent() {
        assert_ne!(passcode_hash("ab"), passcode_hash("ba"));
    }

    #[test]
    fn hashes_utf16_units() {
        // U+1F496 encodes as the surrogate pair D83D DC96.
        let expected = 0xD83Du32.wrapping_mul(31).wrapping_add(0xDC96);
        assert_eq!(passcode_hash("💖"), expected);
    }
}
