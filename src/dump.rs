//! The dump driver
//!
//! Feeds on an ordered `(key, value)` stream, captures the obfuscation
//! key when its record goes by, and turns every UTXO record into one CSV
//! row. The obfuscation key is ordinary driver state rather than a
//! global, so the whole pipeline runs against an in-memory stream in
//! tests.

use crate::chainstate::{record, ObfuscateKey};
use crate::error::Result;
use crate::fields::{Field, FieldSet};
use crate::script;
use crate::stats::Stats;
use crate::{Network, OBFUSCATE_KEY_PREFIX, UTXO_PREFIX};

pub struct Dumper {
    fields: FieldSet,
    network: Network,
    obfuscate_key: ObfuscateKey,
    stats: Stats,
}

impl Dumper {
    pub fn new(fields: FieldSet, network: Network) -> Self {
        Dumper {
            fields,
            network,
            obfuscate_key: ObfuscateKey::default(),
            stats: Stats::default(),
        }
    }

    /// The CSV header row for the selected columns.
    pub fn header(&self) -> String {
        self.fields.header()
    }

    /// Consume one store entry. Returns the CSV row for UTXO records and
    /// `None` for everything else (the obfuscation-key record, block
    /// index entries, ...).
    ///
    /// The record's value is only deobfuscated and parsed when at least
    /// one selected column derives from it; a txid/vout-only dump never
    /// touches the value bytes.
    pub fn process(&mut self, key: &[u8], value: &[u8]) -> Result<Option<String>> {
        match key.first() {
            Some(&OBFUSCATE_KEY_PREFIX) => {
                self.obfuscate_key = ObfuscateKey::from_record_value(value);
                Ok(None)
            }
            Some(&UTXO_PREFIX) => {
                let row = self.utxo_row(key, value)?;
                self.stats.utxo_count += 1;
                Ok(Some(row))
            }
            _ => Ok(None),
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn into_stats(self) -> Stats {
        self.stats
    }

    fn utxo_row(&mut self, key: &[u8], value: &[u8]) -> Result<String> {
        let wants_key = self.fields.contains(Field::Txid) || self.fields.contains(Field::Vout);
        let outpoint = if wants_key {
            Some(record::parse_key(key)?)
        } else {
            None
        };

        let mut utxo = None;
        let mut script_type = None;
        let mut address = None;
        if self.fields.needs_value() {
            let plain = self.obfuscate_key.apply(value);
            let parsed = record::parse_value(&plain)?;

            if self.fields.contains(Field::Amount) {
                self.stats.total_amount += parsed.amount;
            }
            if self.fields.contains(Field::Type) || self.fields.contains(Field::Address) {
                let class = script::classify(parsed.nsize, &parsed.script);
                self.stats.record_type(class);
                if self.fields.contains(Field::Address) {
                    address = Some(crate::address::from_script(
                        self.network,
                        class,
                        &parsed.script,
                    ));
                }
                script_type = Some(class);
            }
            utxo = Some(parsed);
        }

        let mut columns = Vec::with_capacity(self.fields.len());
        for field in self.fields.iter() {
            columns.push(match field {
                Field::Count => self.stats.utxo_count.to_string(),
                Field::Txid => outpoint
                    .as_ref()
                    .map(|o| hex::encode(o.txid))
                    .unwrap_or_default(),
                Field::Vout => outpoint
                    .as_ref()
                    .map(|o| o.vout.to_string())
                    .unwrap_or_default(),
                Field::Height => utxo
                    .as_ref()
                    .map(|u| u.height.to_string())
                    .unwrap_or_default(),
                Field::Coinbase => utxo
                    .as_ref()
                    .map(|u| u8::from(u.coinbase).to_string())
                    .unwrap_or_default(),
                Field::Amount => utxo
                    .as_ref()
                    .map(|u| u.amount.to_string())
                    .unwrap_or_default(),
                Field::Nsize => utxo
                    .as_ref()
                    .map(|u| u.nsize.to_string())
                    .unwrap_or_default(),
                Field::Script => utxo
                    .as_ref()
                    .map(|u| hex::encode(&u.script))
                    .unwrap_or_default(),
                Field::Type => script_type
                    .map(|t| t.label().to_string())
                    .unwrap_or_default(),
                Field::Address => address.clone().unwrap_or_default(),
            });
        }

        Ok(columns.join(","))
    }
}
