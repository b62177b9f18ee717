//! Artifact persistence.
//!
//! Every persisted model and corpus is a plain `serde` structure encoded
//! with CBOR. The on-disk layout therefore belongs to the codec, not to
//! this crate; artifacts are only ever read back by these helpers.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, TextSimError};

/// Serialize `value` to `path`, replacing any existing file.
pub fn save<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| TextSimError::resource(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_cbor::to_writer(&mut writer, value)?;
    writer.flush().map_err(|e| TextSimError::resource(path, e))?;
    Ok(())
}

/// Deserialize a value previously written by [`save`].
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| TextSimError::resource(path, e))?;
    let value = serde_cbor::from_reader(BufReader::new(file))?;
    Ok(value)
}
