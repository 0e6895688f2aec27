//! Flat-file persistence for database documents.
//!
//! A database is a single JSON document on disk. Reading parses the whole
//! document, writing serializes it back pretty-printed. All storage
//! operations go through these two functions, so a database file is always
//! a complete, human-readable snapshot.

use std::fs;
use std::path::Path;

use crate::error::{BreezeError, Result};
use crate::store::Document;

/// Read the database document at the given path.
pub fn read(db_path: &Path) -> Result<Document> {
    if !db_path.is_file() {
        return Err(BreezeError::Storage(format!(
            "no database at '{}'",
            db_path.display()
        )));
    }
    let text = fs::read_to_string(db_path)?;
    let document = serde_json::from_str(&text)?;
    Ok(document)
}

/// Write a database document to the given path, replacing what was there.
pub fn write(db_path: &Path, document: &Document) -> Result<()> {
    let text = serde_json::to_string_pretty(document)?;
    fs::write(db_path, text)?;
    Ok(())
}
