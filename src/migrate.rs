//! One-off rewrite of stored category names to category ids
//!
//! Safe to run repeatedly: rows already holding an id, or a value that is not
//! in the category table, are left alone.

use crate::category::category_id;
use crate::database::TutorialStore;
use crate::error::StoreError;

/// A single category rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChange {
    pub title: String,
    pub from: String,
    pub to: String,
}

/// Rewrites every name-form category to its id in one transaction
///
/// `updated_at` is not touched. Returns the rows that changed; an empty list
/// means nothing was written.
pub fn migrate_categories(store: &TutorialStore) -> Result<Vec<CategoryChange>, StoreError> {
    let changes = store.rewrite(|tutorial| {
        let current = tutorial.category.as_deref().filter(|c| !c.is_empty())?;
        let id = category_id(current)?;
        if id == current {
            return None;
        }

        let change = CategoryChange {
            title: tutorial.title.clone(),
            from: current.to_string(),
            to: id.to_string(),
        };
        tutorial.category = Some(id.to_string());
        Some(change)
    })?;

    tracing::info!(updated = changes.len(), "category migration finished");
    Ok(changes)
}
