//! Chainstate LevelDB access
//!
//! Thin wrapper over `rusty_leveldb` that yields raw `(key, value)` pairs
//! in ascending key order. The database is opened with the none
//! compressor so existing on-disk blocks are never rewritten in a
//! different format when the handle closes, and with `create_if_missing`
//! off so a typo'd path cannot materialize an empty database.

use std::path::Path;

use rusty_leveldb::{LdbIterator, Options, DB};

use crate::error::{Error, Result};

/// Read-only view of a chainstate LevelDB directory.
pub struct Store {
    db: DB,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(Error::StoreUnavailable(path.to_path_buf()));
        }

        let mut opts = Options::default();
        opts.create_if_missing = false;
        opts.compressor = 0; // none; leave on-disk blocks untouched

        let db = DB::open(path, opts)?;
        Ok(Store { db })
    }

    /// Iterate every entry in ascending key order.
    pub fn entries(&mut self) -> Result<Entries> {
        let inner = self.db.new_iter()?;
        Ok(Entries { inner })
    }
}

/// Ordered `(key, value)` iterator over the whole store.
pub struct Entries {
    inner: rusty_leveldb::DBIterator,
}

impl Iterator for Entries {
    type Item = (Vec<u8>, Vec<u8>);

    fn next(&mut self) -> Option<Self::Item> {
        LdbIterator::next(&mut self.inner)
    }
}
