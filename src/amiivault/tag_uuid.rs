//! Tag UUID generation.
//!
//! A tag UUID is 9 bytes laid out like an NTAG UID: 7 identity bytes with
//! two XOR check bytes folded in at offsets 3 and 8. Records written by
//! other frontends carry UUIDs built with this exact formula, so the bit
//! layout here is load-bearing.

use rand::RngCore;

/// Number of bytes in a tag UUID.
pub const TAG_UUID_SIZE: usize = 9;

/// Cascade-tag constant folded into the first check byte.
const CHECK_BYTE_SEED: u8 = 0x88;

/// Generates a random tag UUID with both check bytes patched in.
///
/// The patch order matters: the second check byte folds in the already
/// patched `uuid[3]`, not the random byte it replaced, and `uuid[7]` stays
/// untouched random noise.
pub fn generate() -> [u8; TAG_UUID_SIZE] {
    let mut uuid = [0u8; TAG_UUID_SIZE];
    rand::thread_rng().fill_bytes(&mut uuid);

    uuid[3] = CHECK_BYTE_SEED ^ uuid[0] ^ uuid[1] ^ uuid[2];
    uuid[8] = uuid[3] ^ uuid[4] ^ uuid[5] ^ uuid[6];

    uuid
}

/// Whether `uuid` is exactly [`TAG_UUID_SIZE`] bytes with both check bytes
/// intact.
pub fn is_well_formed(uuid: &[u8]) -> bool {
    uuid.len() == TAG_UUID_SIZE
        && uuid[3] == (CHECK_BYTE_SEED ^ uuid[0] ^ uuid[1] ^ uuid[2])
        && uuid[8] == (uuid[3] ^ uuid[4] ^ uuid[5] ^ uuid[6])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_uuids_have_valid_check_bytes() {
        for _ in 0..200 {
            let uuid = generate();
            assert_eq!(uuid[3], 0x88 ^ uuid[0] ^ uuid[1] ^ uuid[2]);
            assert_eq!(uuid[8], uuid[3] ^ uuid[4] ^ uuid[5] ^ uuid[6]);
            assert!(is_well_formed(&uuid));
        }
    }

    #[test]
    fn second_check_byte_folds_the_patched_third_byte() {
        // uuid[8] must derive from the patched uuid[3]. If the generator
        // used the pre-patch random byte instead, this relation would only
        // hold by coincidence.
        for _ in 0..200 {
            let uuid = generate();
            let bcc0 = 0x88 ^ uuid[0] ^ uuid[1] ^ uuid[2];
            assert_eq!(uuid[8], bcc0 ^ uuid[4] ^ uuid[5] ^ uuid[6]);
        }
    }

    #[test]
    fn eighth_byte_is_not_part_of_any_checksum() {
        let mut uuid = generate();
        uuid[7] ^= 0xff;
        assert!(is_well_formed(&uuid));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!is_well_formed(&[]));
        assert!(!is_well_formed(&[0u8; 8]));
        assert!(!is_well_formed(&[0u8; 10]));
    }

    #[test]
    fn rejects_corrupted_check_bytes() {
        let mut uuid = generate();
        uuid[3] ^= 0x01;
        assert!(!is_well_formed(&uuid));

        let mut uuid = generate();
        uuid[8] ^= 0x01;
        assert!(!is_well_formed(&uuid));
    }

    #[test]
    fn successive_uuids_differ() {
        // 56 random identity bits make a collision across a handful of
        // draws effectively impossible.
        let a = generate();
        let b = generate();
        let c = generate();
        assert!(a != b || b != c);
    }
}
