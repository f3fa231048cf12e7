//! Address derivation
//!
//! Legacy outputs (p2pkh/p2sh) carry a 20-byte hash160 payload which maps
//! to a base58check address; segwit v0 outputs carry a witness program
//! which maps to a bech32 address. Everything else (p2pk, bare multisig,
//! non-standard) has no single canonical address and yields an empty
//! string.

use bech32::{hrp, segwit, Fe32, Hrp};
use sha2::{Digest, Sha256};

use crate::script::ScriptType;
use crate::Network;

fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// Base58check: version byte, payload, then the first four bytes of the
/// double-SHA256 checksum. Leading zero bytes become leading '1's.
pub fn base58check(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + 4);
    data.push(version);
    data.extend_from_slice(payload);
    let checksum = sha256d(&data);
    data.extend_from_slice(&checksum[..4]);
    bs58::encode(data).into_string()
}

/// BIP-173 segwit address for a witness version and program.
pub fn segwit_address(network: Network, version: u8, program: &[u8]) -> Option<String> {
    let hrp: Hrp = match network {
        Network::Mainnet => hrp::BC,
        Network::Testnet => hrp::TB,
    };
    let version = Fe32::try_from(version).ok()?;
    segwit::encode(hrp, version, program).ok()
}

/// Derive the textual address for a classified output, or an empty string
/// when the class has none.
pub fn from_script(network: Network, script_type: ScriptType, script: &[u8]) -> String {
    match script_type {
        ScriptType::P2pkh => base58check(network.p2pkh_version(), script),
        ScriptType::P2sh => base58check(network.p2sh_version(), script),
        ScriptType::P2wpkh | ScriptType::P2wsh if script.len() > 2 => {
            segwit_address(network, script[0], &script[2..]).unwrap_or_default()
        }
        _ => String::new(),
    }
}
