use std::collections::HashSet;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Stable record identifier, assigned by the host or by [`MemoryRecords::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

/// How a memory felt. Unknown tags from the host land in `Unrecognized`,
/// keep their original text for the round trip, and get the default
/// marker tint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Feeling {
    Happy,
    Sad,
    Special,
    Unrecognized(String),
    /// No tag at all.
    #[default]
    Unset,
}

impl Feeling {
    pub fn is_unset(&self) -> bool {
        matches!(self, Feeling::Unset)
    }
}

impl From<String> for Feeling {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "happy" => Feeling::Happy,
            "sad" => Feeling::Sad,
            "special" => Feeling::Special,
            _ => Feeling::Unrecognized(tag),
        }
    }
}

impl From<Feeling> for String {
    fn from(feeling: Feeling) -> Self {
        match feeling {
            Feeling::Happy => "happy".to_string(),
            Feeling::Sad => "sad".to_string(),
            Feeling::Special => "special".to_string(),
            Feeling::Unrecognized(tag) => tag,
            Feeling::Unset => String::new(),
        }
    }
}

/// One user memory. The engine only reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: RecordId,
    pub title: String,
    /// Calendar date, `YYYY-MM-DD` in practice. Only the year is used.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "type", skip_serializing_if = "Feeling::is_unset")]
    pub feeling: Feeling,
    /// URL or blob handle, passed through untouched.
    #[serde(default)]
    pub image: Option<String>,
}

/// A record before the collection has given it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryDraft {
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "type")]
    pub feeling: Feeling,
    #[serde(default)]
    pub image: Option<String>,
}

/// The current record snapshot.
///
/// Every mutation bumps `revision`; the lifecycle manager rebuilds the forest
/// whenever the revision it built from is stale.
#[derive(Resource, Debug, Default)]
pub struct MemoryRecords {
    records: Vec<MemoryRecord>,
    revision: u64,
}

impl MemoryRecords {
    pub fn records(&self) -> &[MemoryRecord] {
        &self.records
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&MemoryRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Swap in a whole new snapshot. Ids are the marker back-reference, so a
    /// snapshot repeating one is refused and the current one kept.
    pub fn replace(&mut self, records: Vec<MemoryRecord>) -> Result<(), DuplicateRecordId> {
        let mut seen = HashSet::with_capacity(records.len());
        if let Some(record) = records.iter().find(|record| !seen.insert(record.id)) {
            return Err(DuplicateRecordId(record.id));
        }

        self.records = records;
        self.revision += 1;
        Ok(())
    }

    /// Append a draft with the next free id. `None` once the id space above
    /// the current maximum is used up.
    pub fn add(&mut self, draft: MemoryDraft) -> Option<RecordId> {
        let id = self.next_id()?;
        self.records.push(MemoryRecord {
            id,
            title: draft.title,
            date: draft.date,
            feeling: draft.feeling,
            image: draft.image,
        });
        self.revision += 1;
        Some(id)
    }

    fn next_id(&self) -> Option<RecordId> {
        match self.records.iter().map(|record| record.id.0).max() {
            Some(max) => max.checked_add(1).map(RecordId),
            None => Some(RecordId(1)),
        }
    }
}

/// A snapshot used the same id for more than one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateRecordId(pub RecordId);

impl std::fmt::Display for DuplicateRecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "memory id {} appears more than once", self.0.0)
    }
}
