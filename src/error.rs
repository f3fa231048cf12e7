//! Error types shared across the crate

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("a bitcoin node is currently using this chainstate; stop it with `bitcoin-cli stop` first")]
    HostNodeRunning,

    #[error("chainstate database not found at {0}")]
    StoreUnavailable(PathBuf),

    #[error("chainstate database: {0}")]
    Store(#[from] rusty_leveldb::Status),

    #[error("varint ends while its continuation bit is still set")]
    TruncatedVarint,

    #[error("varint does not fit in 64 bits")]
    VarintOverflow,

    #[error("decompressed amount overflows 64 bits")]
    AmountOverflow,

    #[error("malformed utxo record: {0}")]
    MalformedRecord(String),

    #[error("'{0}' is not a valid output column")]
    BadColumnName(String),

    #[error("failed to write output: {0}")]
    SinkWrite(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
