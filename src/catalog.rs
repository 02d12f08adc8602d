use std::io::Read;

use rand::Rng;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;

/// A single catalog item: an identifier, a human-readable label, and the
/// leading terms of an integer sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    id: u64,
    label: String,
    sequence: Vec<i64>,
}

impl Entry {
    /// Construct an entry, rejecting it if the label or sequence is missing.
    pub fn new(id: u64, label: impl Into<String>, sequence: Vec<i64>) -> Result<Self, Error> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(Error::MalformedEntry {
                id: Some(id),
                reason: "empty label".into(),
            });
        }
        if sequence.is_empty() {
            return Err(Error::MalformedEntry {
                id: Some(id),
                reason: "empty sequence".into(),
            });
        }
        Ok(Self {
            id,
            label,
            sequence,
        })
    }

    /// Normalize one row of catalog data into an entry.
    ///
    /// Two shapes are accepted: `[id, label, term, term, ...]` and
    /// `{"number": id, "name": label, "seq": [term, ...]}`.
    pub fn from_row(row: &Value) -> Result<Self, Error> {
        let (id, label, terms) = match row {
            Value::Array(items) => match items.as_slice() {
                [id, label, terms @ ..] => (id, label, terms),
                _ => return Err(malformed(None, "row has fewer than two fields")),
            },
            Value::Object(fields) => {
                let id = fields
                    .get("number")
                    .ok_or_else(|| malformed(None, "missing \"number\""))?;
                let label = fields
                    .get("name")
                    .ok_or_else(|| malformed(None, "missing \"name\""))?;
                let terms = fields
                    .get("seq")
                    .and_then(Value::as_array)
                    .ok_or_else(|| malformed(None, "missing \"seq\" array"))?;
                (id, label, terms.as_slice())
            }
            _ => return Err(malformed(None, "row is neither an array nor an object")),
        };

        let id = id
            .as_u64()
            .ok_or_else(|| malformed(None, "id is not a non-negative integer"))?;
        let label = label
            .as_str()
            .ok_or_else(|| malformed(Some(id), "label is not a string"))?;
        let sequence = terms
            .iter()
            .map(|term| {
                term.as_i64()
                    .ok_or_else(|| malformed(Some(id), format!("term {term} is not an integer")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(id, label, sequence)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn sequence(&self) -> &[i64] {
        &self.sequence
    }

    /// `true` when this entry's sequence begins with `prefix`.
    ///
    /// A prefix longer than the sequence never matches, and the empty prefix always does.
    pub fn matches_prefix(&self, prefix: &[i64]) -> bool {
        self.sequence.starts_with(prefix)
    }
}

fn malformed(id: Option<u64>, reason: impl Into<String>) -> Error {
    Error::MalformedEntry {
        id,
        reason: reason.into(),
    }
}

/// The fixed, ordered collection of entries a game draws from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Build a catalog from raw rows. Any malformed row rejects the whole catalog.
    pub fn from_rows<Rows>(rows: Rows) -> Result<Self, Error>
    where
        Rows: IntoIterator<Item = Value>,
    {
        let entries = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                Entry::from_row(&row).map_err(|err| Error::Row {
                    index,
                    source: Box::new(err),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(entries = entries.len(), "catalog rows loaded");
        Ok(Self::new(entries))
    }

    /// Parse a JSON array of rows.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let rows: Vec<Value> = serde_json::from_str(json)?;
        Self::from_rows(rows)
    }

    /// Read a JSON array of rows.
    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        let rows: Vec<Value> = serde_json::from_reader(reader)?;
        Self::from_rows(rows)
    }

    /// Apply the configured term limit and digit filter, preserving order.
    ///
    /// Entries left with no terms are dropped.
    pub fn prepare(self, config: &Config) -> Self {
        let before = self.entries.len();
        let entries: Vec<_> = self
            .entries
            .into_iter()
            .filter_map(|mut entry| {
                if let Some(max_terms) = config.max_terms {
                    entry.sequence.truncate(max_terms);
                }
                if entry.sequence.is_empty() {
                    return None;
                }
                if config.single_digit_only
                    && !entry.sequence.iter().all(|term| (0..=9).contains(term))
                {
                    return None;
                }
                Some(entry)
            })
            .collect();
        if entries.len() < before {
            tracing::info!(
                kept = entries.len(),
                dropped = before - entries.len(),
                "catalog filtered"
            );
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// All entries whose sequence starts with `prefix`, in catalog order.
    pub fn match_prefix(&self, prefix: &[i64]) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|entry| entry.matches_prefix(prefix))
            .collect()
    }

    /// A uniformly chosen entry, or `None` when the catalog is empty.
    pub fn pick_random(&self, rng: &mut impl Rng) -> Option<&Entry> {
        if self.entries.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.entries.len());
        self.entries.get(index)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed entry{}: {reason}", entry_id(.id))]
    MalformedEntry { id: Option<u64>, reason: String },
    #[error("row {index}")]
    Row {
        index: usize,
        #[source]
        source: Box<Error>,
    },
    #[error("catalog is not valid json")]
    Json(#[from] serde_json::Error),
}

fn entry_id(id: &Option<u64>) -> String {
    id.map(|id| format!(" {id}")).unwrap_or_default()
}
