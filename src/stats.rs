//! Aggregate statistics for a dump run

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::script::ScriptType;

/// Satoshis per bitcoin.
const COIN: u64 = 100_000_000;

/// Running totals collected while scanning the chainstate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    /// Number of UTXO records emitted.
    pub utxo_count: u64,
    /// Sum of all decompressed amounts, in satoshis. Only accumulated
    /// when the amount column is selected.
    pub total_amount: u64,
    pub p2pk: u64,
    pub p2pkh: u64,
    pub p2sh: u64,
    pub p2ms: u64,
    pub p2wpkh: u64,
    pub p2wsh: u64,
    pub non_standard: u64,
}

impl Stats {
    pub fn record_type(&mut self, script_type: ScriptType) {
        let counter = match script_type {
            ScriptType::P2pk => &mut self.p2pk,
            ScriptType::P2pkh => &mut self.p2pkh,
            ScriptType::P2sh => &mut self.p2sh,
            ScriptType::P2ms => &mut self.p2ms,
            ScriptType::P2wpkh => &mut self.p2wpkh,
            ScriptType::P2wsh => &mut self.p2wsh,
            ScriptType::NonStandard => &mut self.non_standard,
        };
        *counter += 1;
    }

    /// Per-class counts paired with their output labels.
    pub fn type_counts(&self) -> [(&'static str, u64); 7] {
        [
            ("p2pk", self.p2pk),
            ("p2pkh", self.p2pkh),
            ("p2sh", self.p2sh),
            ("p2ms", self.p2ms),
            ("p2wpkh", self.p2wpkh),
            ("p2wsh", self.p2wsh),
            ("non-standard", self.non_standard),
        ]
    }

    /// Total amount rendered as BTC with exactly eight decimal places,
    /// in integer arithmetic so large totals stay exact.
    pub fn total_btc(&self) -> String {
        format!(
            "{}.{:08}",
            self.total_amount / COIN,
            self.total_amount % COIN
        )
    }

    /// Write the stats as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_btc_formatting() {
        let mut stats = Stats::default();
        assert_eq!(stats.total_btc(), "0.00000000");

        stats.total_amount = 339_500;
        assert_eq!(stats.total_btc(), "0.00339500");

        stats.total_amount = 2_100_000_000_000_000;
        assert_eq!(stats.total_btc(), "21000000.00000000");

        stats.total_amount = 123_456_789_012;
        assert_eq!(stats.total_btc(), "1234.56789012");
    }

    #[test]
    fn test_record_type_counts() {
        let mut stats = Stats::default();
        stats.record_type(ScriptType::P2wpkh);
        stats.record_type(ScriptType::P2wpkh);
        stats.record_type(ScriptType::NonStandard);
        assert_eq!(stats.p2wpkh, 2);
        assert_eq!(stats.non_standard, 1);
        assert_eq!(stats.p2pkh, 0);
    }

    #[test]
    fn test_save_round_trips_as_json() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("stats.json");

        let mut stats = Stats::default();
        stats.utxo_count = 3;
        stats.total_amount = 42;
        stats.save(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["utxo_count"], 3);
        assert_eq!(value["total_amount"], 42);
    }
}
