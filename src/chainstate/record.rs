//! Chainstate record parsing
//!
//! UTXO records live under key prefix 0x43 ('C'). The key carries the
//! outpoint, the (deobfuscated) value carries three varints followed by
//! the script payload:
//!
//! ```text
//! key:   43 ∥ txid[32] (little-endian) ∥ vout varint
//! value: varint(height << 1 | coinbase) ∥ varint(amount, compressed)
//!        ∥ varint(nsize) ∥ script bytes
//! ```
//!
//! For nSize 2..=5 the nSize byte doubles as the first byte of the stored
//! public key, so the script slice starts one byte earlier.

use crate::chainstate::{amount, varint};
use crate::error::{Error, Result};

/// Decoded outpoint from a UTXO record key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtxoKey {
    /// Transaction id in display (big-endian) byte order.
    pub txid: [u8; 32],
    /// Output index within the transaction.
    pub vout: u64,
}

/// Decoded fields of a deobfuscated UTXO record value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtxoValue {
    pub height: u64,
    pub coinbase: bool,
    /// Amount in satoshis, already decompressed.
    pub amount: u64,
    /// Script-type/size tag; 0..=5 are template scripts, 6+ raw length.
    pub nsize: u64,
    /// Script payload as stored: a hash160, a compressed pubkey, or the
    /// raw script. May be empty.
    pub script: Vec<u8>,
}

/// Parse a UTXO record key. The caller has already dispatched on the 0x43
/// prefix byte.
pub fn parse_key(key: &[u8]) -> Result<UtxoKey> {
    if key.len() < 34 {
        return Err(Error::MalformedRecord(format!(
            "utxo key is {} bytes, expected at least 34",
            key.len()
        )));
    }

    // stored little-endian, displayed big-endian
    let mut txid = [0u8; 32];
    for (out, byte) in txid.iter_mut().zip(key[1..33].iter().rev()) {
        *out = *byte;
    }

    let (vout, _) = varint::decode(key, 33)?;
    Ok(UtxoKey { txid, vout })
}

/// Parse a deobfuscated UTXO record value.
pub fn parse_value(value: &[u8]) -> Result<UtxoValue> {
    let (code, n1) = varint::decode(value, 0)?;
    let height = code >> 1;
    let coinbase = code & 1 == 1;

    let (compressed, n2) = varint::decode(value, n1)?;
    let amount = amount::decompress(compressed)?;

    let (nsize, n3) = varint::decode(value, n1 + n2)?;
    let mut offset = n1 + n2 + n3;

    // the tag byte is part of the stored pubkey for these templates
    if (2..=5).contains(&nsize) {
        offset -= 1;
    }

    if offset > value.len() {
        return Err(Error::MalformedRecord(format!(
            "script offset {} past end of {}-byte value",
            offset,
            value.len()
        )));
    }

    Ok(UtxoValue {
        height,
        coinbase,
        amount,
        nsize,
        script: value[offset..].to_vec(),
    })
}
