//! Persisted record collections with id assignment.
//!
//! A collection is stored as `{"next_id": N, "records": [...]}`. Bare JSON
//! arrays written by older versions are still accepted; their counter
//! resumes after the highest id present.

use crate::Record;
use serde::{Deserialize, Deserializer, Serialize};

/// How new record ids are chosen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Persisted counter, never reused after deletion
    #[default]
    Monotonic,
    /// `len + 1`, compatible with older data but may repeat ids after a delete
    Count,
}

/// An ordered collection of records plus its id counter
#[derive(Clone, Debug, Serialize)]
pub struct Collection<T> {
    next_id: u64,
    records: Vec<T>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredCollection<T> {
    Envelope { next_id: u64, records: Vec<T> },
    Legacy(Vec<T>),
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: Vec::new(),
        }
    }
}

impl<'de, T> Deserialize<'de> for Collection<T>
where
    T: Deserialize<'de> + Record,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let collection = match StoredCollection::<T>::deserialize(deserializer)? {
            StoredCollection::Envelope { next_id, records } => {
                let floor = max_id(&records) + 1;
                Self {
                    next_id: next_id.max(floor),
                    records,
                }
            }
            StoredCollection::Legacy(records) => Self {
                next_id: max_id(&records) + 1,
                records,
            },
        };
        Ok(collection)
    }
}

fn max_id<T: Record>(records: &[T]) -> u64 {
    records.iter().map(Record::id).max().unwrap_or(0)
}

impl<T: Record> Collection<T> {
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Reserve the id for the next record
    pub fn assign_id(&mut self, strategy: IdStrategy) -> u64 {
        let id = match strategy {
            IdStrategy::Monotonic => self.next_id,
            IdStrategy::Count => self.records.len() as u64 + 1,
        };
        self.next_id = self.next_id.max(id + 1);
        id
    }

    pub fn push(&mut self, record: T) {
        self.records.push(record);
    }

    /// First record with the given id
    pub fn find(&self, id: u64) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Remove every record with the given id, returning how many were removed
    pub fn remove(&mut self, id: u64) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        before - self.records.len()
    }
}
