//! Database initialization and tutorial persistence
//!
//! Tutorials live in a single redb table keyed by their id. Every public
//! operation on [`TutorialStore`] runs inside exactly one transaction, so a
//! read-modify-write such as a like increment can never interleave with
//! another writer.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{Difficulty, Tutorial};

/// Main table for storing tutorials
///
/// Key: tutorial id (hyphenated UUID) as string
/// Value: JSON-serialized Tutorial as string
///
/// Example:
/// - Key: "6f1c1b0e-3f0a-4c7e-9a43-0b9a1d2c8e11"
/// - Value: '{"id":"6f1c1b0e-...","title":"Getting Started with React 18",...}'
pub const TABLE_TUTORIALS: TableDefinition<&str, &str> = TableDefinition::new("tutorials_v1");

/// Creates or opens the database file and makes sure the tutorials table exists
///
/// # Example
///
/// ```no_run
/// # use tutorials::database::init_db;
/// let db = init_db("tutorials.db").expect("Failed to initialize database");
/// ```
pub fn init_db(db_path: impl AsRef<Path>) -> Result<Database, StoreError> {
    let db = Database::create(db_path)?;

    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_TUTORIALS)?;
    }
    write_txn.commit()?;

    Ok(db)
}

/// Optional constraints applied by [`TutorialStore::list`]
#[derive(Debug, Default, Clone)]
pub struct TutorialFilter {
    /// Case-sensitive substring of the title; empty matches everything
    pub title: Option<String>,
    pub published: Option<bool>,
    pub difficulty: Option<Difficulty>,
}

impl TutorialFilter {
    pub fn matches(&self, tutorial: &Tutorial) -> bool {
        let title_ok = match self.title.as_deref() {
            Some(needle) if !needle.is_empty() => tutorial.title.contains(needle),
            _ => true,
        };
        let published_ok = self.published.map_or(true, |p| tutorial.published == p);
        let difficulty_ok = self
            .difficulty
            .map_or(true, |d| tutorial.difficulty == Some(d));

        title_ok && published_ok && difficulty_ok
    }
}

/// Thread-safe handle to the tutorials table
#[derive(Clone)]
pub struct TutorialStore {
    db: Arc<Database>,
}

impl TutorialStore {
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }

    /// Opens (or creates) the database file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self::new(init_db(path)?))
    }

    pub fn insert(&self, tutorial: &Tutorial) -> Result<(), StoreError> {
        self.insert_many(std::slice::from_ref(tutorial)).map(|_| ())
    }

    /// Inserts every tutorial in one transaction
    pub fn insert_many(&self, tutorials: &[Tutorial]) -> Result<usize, StoreError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TABLE_TUTORIALS)?;
            for tutorial in tutorials {
                let key = tutorial.id.to_string();
                let value = serde_json::to_string(tutorial)?;
                table.insert(key.as_str(), value.as_str())?;
            }
        }
        write_txn.commit()?;

        Ok(tutorials.len())
    }

    pub fn get(&self, id: Uuid) -> Result<Option<Tutorial>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_TUTORIALS)?;

        let key = id.to_string();
        let tutorial = match table.get(key.as_str())? {
            Some(value) => Some(serde_json::from_str(value.value())?),
            None => None,
        };
        Ok(tutorial)
    }

    /// Every stored tutorial, in key order
    pub fn all(&self) -> Result<Vec<Tutorial>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_TUTORIALS)?;

        let mut tutorials = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            tutorials.push(serde_json::from_str(value.value())?);
        }
        Ok(tutorials)
    }

    /// Tutorials matching `filter`, most recently updated first
    pub fn list(&self, filter: &TutorialFilter) -> Result<Vec<Tutorial>, StoreError> {
        let mut tutorials: Vec<Tutorial> = self
            .all()?
            .into_iter()
            .filter(|tutorial| filter.matches(tutorial))
            .collect();
        tutorials.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(tutorials)
    }

    /// Distinct non-empty category values currently stored, sorted
    pub fn categories(&self) -> Result<Vec<String>, StoreError> {
        let categories: BTreeSet<String> = self
            .all()?
            .into_iter()
            .filter_map(|tutorial| tutorial.category)
            .filter(|category| !category.is_empty())
            .collect();
        Ok(categories.into_iter().collect())
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_TUTORIALS)?;
        Ok(table.len()? as usize)
    }

    /// Applies `f` to the tutorial with `id` and writes it back
    ///
    /// Returns the updated tutorial, or `None` when the id is unknown (in
    /// which case nothing is written).
    pub fn modify<F>(&self, id: Uuid, f: F) -> Result<Option<Tutorial>, StoreError>
    where
        F: FnOnce(&mut Tutorial),
    {
        let key = id.to_string();
        let write_txn = self.db.begin_write()?;
        let updated = {
            let mut table = write_txn.open_table(TABLE_TUTORIALS)?;

            let existing: Option<Tutorial> = match table.get(key.as_str())? {
                Some(value) => Some(serde_json::from_str(value.value())?),
                None => None,
            };
            let Some(mut tutorial) = existing else {
                return Ok(None);
            };

            f(&mut tutorial);
            let value = serde_json::to_string(&tutorial)?;
            table.insert(key.as_str(), value.as_str())?;
            tutorial
        };
        write_txn.commit()?;

        Ok(Some(updated))
    }

    /// Runs `f` over every row inside one write transaction
    ///
    /// Rows for which `f` returns `Some` are written back and the returned
    /// values are collected. When no row changes, nothing is committed.
    pub fn rewrite<R, F>(&self, mut f: F) -> Result<Vec<R>, StoreError>
    where
        F: FnMut(&mut Tutorial) -> Option<R>,
    {
        let write_txn = self.db.begin_write()?;
        let outcomes = {
            let mut table = write_txn.open_table(TABLE_TUTORIALS)?;

            let mut rows = Vec::new();
            for entry in table.iter()? {
                let (key, value) = entry?;
                let tutorial: Tutorial = serde_json::from_str(value.value())?;
                rows.push((key.value().to_string(), tutorial));
            }

            let mut outcomes = Vec::new();
            for (key, mut tutorial) in rows {
                if let Some(outcome) = f(&mut tutorial) {
                    let value = serde_json::to_string(&tutorial)?;
                    table.insert(key.as_str(), value.as_str())?;
                    outcomes.push(outcome);
                }
            }
            outcomes
        };

        if outcomes.is_empty() {
            write_txn.abort()?;
        } else {
            write_txn.commit()?;
        }
        Ok(outcomes)
    }

    /// Deletes one tutorial, returning whether it existed
    pub fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let key = id.to_string();
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(TABLE_TUTORIALS)?;
            let removed = table.remove(key.as_str())?;
            removed.is_some()
        };
        write_txn.commit()?;

        Ok(existed)
    }

    /// Deletes every tutorial, returning how many were removed
    pub fn clear(&self) -> Result<usize, StoreError> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(TABLE_TUTORIALS)?;

            let mut keys = Vec::new();
            for entry in table.iter()? {
                let (key, _) = entry?;
                keys.push(key.value().to_string());
            }
            for key in &keys {
                table.remove(key.as_str())?;
            }
            keys.len()
        };
        write_txn.commit()?;

        Ok(removed)
    }
}
