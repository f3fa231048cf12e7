//! Script classification
//!
//! The chainstate does not store full output scripts for the common
//! templates; the nSize tag says which template (or, at 6 and above, the
//! raw script length plus 6). Classification therefore keys off the tag
//! first and inspects the bytes only for the raw-script case.

use std::fmt;

/// The seven output classes a chainstate entry can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptType {
    P2pk,
    P2pkh,
    P2sh,
    P2ms,
    P2wpkh,
    P2wsh,
    NonStandard,
}

impl ScriptType {
    pub const ALL: [ScriptType; 7] = [
        ScriptType::P2pk,
        ScriptType::P2pkh,
        ScriptType::P2sh,
        ScriptType::P2ms,
        ScriptType::P2wpkh,
        ScriptType::P2wsh,
        ScriptType::NonStandard,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScriptType::P2pk => "p2pk",
            ScriptType::P2pkh => "p2pkh",
            ScriptType::P2sh => "p2sh",
            ScriptType::P2ms => "p2ms",
            ScriptType::P2wpkh => "p2wpkh",
            ScriptType::P2wsh => "p2wsh",
            ScriptType::NonStandard => "non-standard",
        }
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const OP_CHECKMULTISIG: u8 = 0xae;

/// Classify an output from its nSize tag and script payload.
///
/// Tags 0..=5 decide directly. Raw scripts (tag >= 6) start non-standard
/// and are promoted by the first matching test, in precedence order:
/// bare multisig, then the two segwit v0 programs.
pub fn classify(nsize: u64, script: &[u8]) -> ScriptType {
    match nsize {
        0 => ScriptType::P2pkh,
        1 => ScriptType::P2sh,
        2..=5 => ScriptType::P2pk,
        _ => {
            if script.last() == Some(&OP_CHECKMULTISIG) {
                ScriptType::P2ms
            } else if nsize == 28 && script.len() == 22 && script[0] == 0x00 && script[1] == 0x14 {
                ScriptType::P2wpkh
            } else if nsize == 40 && script.len() == 34 && script[0] == 0x00 && script[1] == 0x20 {
                ScriptType::P2wsh
            } else {
                ScriptType::NonStandard
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_tags() {
        assert_eq!(classify(0, &[0x11; 20]), ScriptType::P2pkh);
        assert_eq!(classify(1, &[0x22; 20]), ScriptType::P2sh);
        for tag in 2..=5 {
            assert_eq!(classify(tag, &[0x33; 33]), ScriptType::P2pk);
        }
    }

    #[test]
    fn test_segwit_programs() {
        let mut p2wpkh = vec![0x00, 0x14];
        p2wpkh.extend_from_slice(&[0x44; 20]);
        assert_eq!(classify(28, &p2wpkh), ScriptType::P2wpkh);

        let mut p2wsh = vec![0x00, 0x20];
        p2wsh.extend_from_slice(&[0x55; 32]);
        assert_eq!(classify(40, &p2wsh), ScriptType::P2wsh);
    }

    #[test]
    fn test_multisig_takes_precedence() {
        // a 22-byte script with the segwit shape but ending in
        // OP_CHECKMULTISIG counts as multisig
        let mut script = vec![0x00, 0x14];
        script.extend_from_slice(&[0x66; 19]);
        script.push(OP_CHECKMULTISIG);
        assert_eq!(classify(28, &script), ScriptType::P2ms);
    }

    #[test]
    fn test_template_tags_never_overridden() {
        // a p2pkh hash160 that happens to end in 0xae stays p2pkh
        let mut hash = [0x77u8; 20];
        hash[19] = OP_CHECKMULTISIG;
        assert_eq!(classify(0, &hash), ScriptType::P2pkh);
    }

    #[test]
    fn test_raw_script_fallback() {
        assert_eq!(classify(6, &[]), ScriptType::NonStandard);
        assert_eq!(classify(31, &[0x6a; 25]), ScriptType::NonStandard);
        // wrong length for the claimed segwit tag
        assert_eq!(classify(28, &[0x00, 0x14, 0x01]), ScriptType::NonStandard);
    }

    #[test]
    fn test_every_input_gets_exactly_one_class() {
        for nsize in 0..64u64 {
            for len in [0usize, 1, 20, 22, 33, 34, 80] {
                let script = vec![0xab; len];
                let class = classify(nsize, &script);
                assert!(ScriptType::ALL.contains(&class));
            }
        }
    }
}
