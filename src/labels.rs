//! Label and comment table keyed by program counter
//!
//! The table is kept as comma-separated text so it can be maintained in a
//! spreadsheet next to the listing:
//!
//! ```text
//! pc,label,comment
//! 0000,RESET,"Power-on entry, clears AUX"
//! 0x0010,IDLE,
//! $03FF,,Last word of the 1K part
//! ```
//!
//! The header names the `pc`, `label` and `comment` columns in any order
//! (extra columns are ignored). Addresses are hexadecimal with an optional
//! `0x` or `$` prefix. Empty cells mean "no label" or "no comment"; other
//! label and comment text is kept exactly as written.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use thiserror::Error;

/// Errors from reading or parsing a label table.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("failed to read label table: {0}")]
    Io(#[from] io::Error),

    #[error("malformed label table: {0}")]
    Csv(#[from] csv::Error),

    #[error("label table is empty; expected a header row naming pc, label and comment")]
    MissingHeader,

    #[error("label table header has no `{0}` column")]
    MissingColumn(&'static str),

    #[error("line {line}: `{value}` is not a hexadecimal address")]
    InvalidPc { line: u64, value: String },
}

/// A label and/or comment attached to one ROM address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEntry {
    /// Address the entry applies to
    pub pc: u16,

    /// Label name, if any
    pub label: Option<String>,

    /// Free-text comment, if any
    pub comment: Option<String>,
}

/// One row as it appears in the file, before the address is parsed.
#[derive(Debug, Deserialize)]
struct LabelRecord {
    #[serde(default)]
    pc: String,

    #[serde(default)]
    label: Option<String>,

    #[serde(default)]
    comment: Option<String>,
}

/// Label table for annotating a listing
///
/// Several entries may name the same address. Lookups always return the
/// first one; later entries are kept but never seen.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    entries: Vec<LabelEntry>,
}

impl LabelTable {
    /// Create a new empty label table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse a table from comma-separated text
    pub fn parse(text: &str) -> Result<Self, LabelError> {
        Self::from_reader(text.as_bytes())
    }

    /// Read and parse a table from any reader
    pub fn from_reader(reader: impl Read) -> Result<Self, LabelError> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

        // header names match case-insensitively
        let header: StringRecord = reader
            .headers()?
            .iter()
            .map(|name| name.trim().to_ascii_lowercase())
            .collect();
        if header.iter().all(str::is_empty) {
            return Err(LabelError::MissingHeader);
        }
        for name in ["pc", "label", "comment"] {
            if !header.iter().any(|column| column == name) {
                return Err(LabelError::MissingColumn(name));
            }
        }
        reader.set_headers(header.clone());

        let mut table = LabelTable::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |pos| pos.line());
            let row: LabelRecord = record.deserialize(Some(&header))?;

            let pc = parse_pc(&row.pc).ok_or_else(|| LabelError::InvalidPc {
                line,
                value: row.pc.clone(),
            })?;

            table.insert(LabelEntry {
                pc,
                label: row.label.filter(|label| !label.is_empty()),
                comment: row.comment.filter(|comment| !comment.is_empty()),
            });
        }

        let shadowed = table.shadowed_count();
        if shadowed > 0 {
            log::warn!("label table: {} duplicate address(es) ignored, first entry kept", shadowed);
        }
        log::debug!("label table: {} entries", table.len());

        Ok(table)
    }

    /// Read and parse a table from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LabelError> {
        Self::from_reader(File::open(path)?)
    }

    /// Append an entry. An earlier entry for the same address keeps priority.
    pub fn insert(&mut self, entry: LabelEntry) {
        self.entries.push(entry);
    }

    /// Look up the first entry for an address
    pub fn lookup(&self, pc: u16) -> Option<&LabelEntry> {
        self.entries.iter().find(|entry| entry.pc == pc)
    }

    /// Label of the first entry for an address
    pub fn label_for(&self, pc: u16) -> Option<&str> {
        self.lookup(pc).and_then(|entry| entry.label.as_deref())
    }

    /// Comment of the first entry for an address
    pub fn comment_for(&self, pc: u16) -> Option<&str> {
        self.lookup(pc).and_then(|entry| entry.comment.as_deref())
    }

    /// Get all entries, in insertion order
    pub fn entries(&self) -> &[LabelEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries hidden behind an earlier entry for the same address.
    fn shadowed_count(&self) -> usize {
        self.entries
            .iter()
            .enumerate()
            .filter(|(i, entry)| self.entries[..*i].iter().any(|e| e.pc == entry.pc))
            .count()
    }
}

impl FromStr for LabelTable {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse a hexadecimal address with an optional `0x` or `$` prefix.
fn parse_pc(value: &str) -> Option<u16> {
    let value = value.trim();
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .or_else(|| value.strip_prefix('$'))
        .unwrap_or(value);

    if digits.is_empty() {
        return None;
    }

    u16::from_str_radix(digits, 16).ok()
}
