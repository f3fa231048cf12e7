//! Bitcoin chainstate UTXO dump library
//!
//! This library decodes a Bitcoin full-node's chainstate LevelDB into
//! structured UTXO records:
//! - chainstate access, XOR deobfuscation, varint and amount codecs
//! - script-type classification and address derivation
//! - a driver that turns the raw store into CSV rows plus aggregate stats

pub mod address;
pub mod chainstate;
pub mod dump;
pub mod error;
pub mod fields;
pub mod script;
pub mod stats;

pub use chainstate::{ObfuscateKey, Store};
pub use dump::Dumper;
pub use error::{Error, Result};
pub use fields::{Field, FieldSet};
pub use script::ScriptType;
pub use stats::Stats;

/// Key prefix of the obfuscation-key record.
pub const OBFUSCATE_KEY_PREFIX: u8 = 0x0e;

/// Key prefix of UTXO records ('C').
pub const UTXO_PREFIX: u8 = 0x43;

/// Which network's address encodings to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Base58check version byte for p2pkh addresses.
    pub fn p2pkh_version(&self) -> u8 {
        match self {
            Network::Mainnet => 0x00,
            Network::Testnet => 0x6f,
        }
    }

    /// Base58check version byte for p2sh addresses.
    pub fn p2sh_version(&self) -> u8 {
        match self {
            Network::Mainnet => 0x05,
            Network::Testnet => 0xc4,
        }
    }

    /// Resolve the network from the explicit flag, falling back to the
    /// "testnet" substring heuristic on the database path. The flag wins
    /// unconditionally when set.
    pub fn detect(testnet_flag: bool, db_path: &str) -> Self {
        if testnet_flag || db_path.contains("testnet") {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }
}
