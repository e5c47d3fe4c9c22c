//! Static category lookup table
//!
//! Tutorials store their category either as a human-readable name
//! ("Frontend Development") or, after `migrate-categories` has run, as the
//! numeric id string ("1"). This module is the single source of truth for how
//! the two forms relate.

use serde::Serialize;

/// Fixed `(id, name)` pairs. Ids and names are both unique.
const CATEGORIES: [(&str, &str); 11] = [
    ("1", "Frontend Development"),
    ("2", "Programming Languages"),
    ("3", "Mobile Development"),
    ("4", "Data Science"),
    ("5", "DevOps"),
    ("6", "Design"),
    ("7", "Career Development"),
    ("8", "Backend Development"),
    ("9", "Full Stack Development"),
    ("10", "Cloud Computing"),
    ("11", "Development Tools"),
];

/// One entry of the category table as exposed by `GET /api/categories`
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub category: &'static str,
}

/// Returns every category, sorted by name
pub fn all_categories() -> Vec<Category> {
    let mut categories: Vec<Category> = CATEGORIES
        .iter()
        .map(|&(id, category)| Category { id, category })
        .collect();
    categories.sort_by(|a, b| a.category.cmp(b.category));
    categories
}

/// Looks up the name for a category id
///
/// Returns `None` for an empty or unknown id.
pub fn category_name(id: &str) -> Option<&'static str> {
    if id.is_empty() {
        return None;
    }
    CATEGORIES
        .iter()
        .find(|(key, _)| *key == id)
        .map(|&(_, name)| name)
}

/// Looks up the id for a category name (exact match)
///
/// Returns `None` for an empty or unknown name.
pub fn category_id(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return None;
    }
    CATEGORIES
        .iter()
        .find(|(_, value)| *value == name)
        .map(|&(id, _)| id)
}
