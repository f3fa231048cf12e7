//! Value deobfuscation
//!
//! Bitcoin Core XORs every chainstate value with a short random key so a
//! casual scan of the database files shows no recognizable script bytes.
//! The key lives in its own record (prefix 0x0e) whose value is a length
//! byte followed by the key material; it sorts before every UTXO record,
//! so it is always seen first during an ordered scan.

/// The obfuscation key, cyclically applied to value bytes.
///
/// An empty key (the record was absent) leaves values untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObfuscateKey(Vec<u8>);

impl ObfuscateKey {
    /// Capture the key from the 0x0e record's value, skipping the leading
    /// length byte.
    pub fn from_record_value(value: &[u8]) -> Self {
        match value.split_first() {
            Some((_len, key)) => ObfuscateKey(key.to_vec()),
            None => ObfuscateKey::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// XOR `data` with the cyclic extension of the key. The extension is
    /// indexed on the fly; the key is never materialized at value length.
    pub fn apply(&self, data: &[u8]) -> Vec<u8> {
        if self.0.is_empty() {
            return data.to_vec();
        }
        data.iter()
            .enumerate()
            .map(|(i, byte)| byte ^ self.0[i % self.0.len()])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_strips_length_prefix() {
        let value = [0x08, 0xb1, 0x2d, 0xce, 0xfd, 0x8f, 0x87, 0x25, 0x36];
        let key = ObfuscateKey::from_record_value(&value);
        assert_eq!(
            key.as_bytes(),
            &[0xb1, 0x2d, 0xce, 0xfd, 0x8f, 0x87, 0x25, 0x36]
        );
    }

    #[test]
    fn test_xor_involution() {
        let key = ObfuscateKey::from_record_value(&[0x03, 0xaa, 0xbb, 0xcc]);
        let data: Vec<u8> = (0u8..40).collect();
        assert_eq!(key.apply(&key.apply(&data)), data);
    }

    #[test]
    fn test_empty_key_is_identity() {
        let key = ObfuscateKey::default();
        let data = vec![0xde, 0xad, 0xbe, 0xef];
        assert_eq!(key.apply(&data), data);

        let from_empty_value = ObfuscateKey::from_record_value(&[]);
        assert!(from_empty_value.is_empty());
        assert_eq!(from_empty_value.apply(&data), data);
    }

    #[test]
    fn test_cyclic_extension() {
        let key = ObfuscateKey::from_record_value(&[0x02, 0x0f, 0xf0]);
        let plain = key.apply(&[0x0f, 0xf0, 0x0f, 0xf0, 0x0f]);
        assert_eq!(plain, vec![0x00, 0x00, 0x00, 0x00, 0x00]);
    }
}
