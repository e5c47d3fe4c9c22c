//! Data models for the tutorials service
//!
//! This module defines the stored `Tutorial` row together with the request
//! shapes used to create, update and filter it. JSON field names are camelCase
//! to match what the single-page client sends and expects.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

pub const TITLE_MAX: usize = 200;
pub const DESCRIPTION_MAX: usize = 2000;
pub const AUTHOR_MAX: usize = 100;
pub const CATEGORY_MAX: usize = 50;
pub const TAGS_MAX: usize = 500;
pub const IMAGE_URL_MAX: usize = 500;

/// How demanding a tutorial is
///
/// Serialized as the variant name. Deserialization also accepts the name in
/// any case and the ordinals `0`, `1`, `2`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty level '{0}'")]
pub struct ParseDifficultyError(pub String);

/// Parses a difficulty from a path segment
///
/// Accepts the variant name in any case, or its ordinal (`0`, `1`, `2`).
impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" | "0" => Ok(Difficulty::Beginner),
            "intermediate" | "1" => Ok(Difficulty::Intermediate),
            "advanced" | "2" => Ok(Difficulty::Advanced),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

impl Difficulty {
    fn from_ordinal(ordinal: u64) -> Option<Self> {
        match ordinal {
            0 => Some(Difficulty::Beginner),
            1 => Some(Difficulty::Intermediate),
            2 => Some(Difficulty::Advanced),
            _ => None,
        }
    }
}

struct DifficultyVisitor;

impl Visitor<'_> for DifficultyVisitor {
    type Value = Difficulty;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a difficulty name or an ordinal between 0 and 2")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Difficulty, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Difficulty, E> {
        Difficulty::from_ordinal(value)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Difficulty, E> {
        u64::try_from(value)
            .ok()
            .and_then(Difficulty::from_ordinal)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(value), &self))
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DifficultyVisitor)
    }
}

/// A tutorial article as stored in the database and returned by the API
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    /// Generated at creation, never changes
    pub id: Uuid,

    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,

    /// Either a category name or, after migration, a category id string
    pub category: Option<String>,

    #[serde(default)]
    pub published: bool,

    /// Estimated reading time in minutes
    pub read_time: Option<i32>,

    pub difficulty: Option<Difficulty>,

    /// Comma-separated tag list
    pub tags: Option<String>,
    pub image_url: Option<String>,

    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub likes: u64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tutorial {
    /// Builds a fresh tutorial with a new id, zeroed counters and both
    /// timestamps set to `now`
    pub fn new(request: CreateTutorial, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: request.title,
            description: request.description,
            author: request.author,
            category: request.category,
            published: request.published,
            read_time: request.read_time,
            difficulty: request.difficulty,
            tags: request.tags,
            image_url: request.image_url,
            view_count: 0,
            likes: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

fn default_difficulty() -> Option<Difficulty> {
    Some(Difficulty::Beginner)
}

/// Request payload for `POST /api/tutorials`
///
/// # Example
/// ```json
/// {
///   "title": "Getting Started with React 18",
///   "author": "Sarah Johnson",
///   "category": "Frontend Development",
///   "readTime": 15,
///   "difficulty": "Beginner"
/// }
/// ```
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateTutorial {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub published: bool,
    pub read_time: Option<i32>,
    /// `Beginner` when the field is absent, `None` when it is explicitly null
    #[serde(default = "default_difficulty")]
    pub difficulty: Option<Difficulty>,
    pub tags: Option<String>,
    pub image_url: Option<String>,
}

impl CreateTutorial {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::new("title", "The Title field is required."));
        }
        check_length("title", Some(self.title.as_str()), TITLE_MAX)?;
        check_length("description", self.description.as_deref(), DESCRIPTION_MAX)?;
        check_length("author", self.author.as_deref(), AUTHOR_MAX)?;
        check_length("category", self.category.as_deref(), CATEGORY_MAX)?;
        check_length("tags", self.tags.as_deref(), TAGS_MAX)?;
        check_length("imageUrl", self.image_url.as_deref(), IMAGE_URL_MAX)?;
        check_read_time(self.read_time)
    }
}

/// Request payload for `PUT /api/tutorials/{id}`
///
/// Every field is optional and only supplied fields are written. An empty
/// title counts as not supplied.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTutorial {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub published: Option<bool>,
    pub read_time: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub tags: Option<String>,
    pub image_url: Option<String>,
}

impl UpdateTutorial {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_length("title", self.title.as_deref(), TITLE_MAX)?;
        check_length("description", self.description.as_deref(), DESCRIPTION_MAX)?;
        check_length("author", self.author.as_deref(), AUTHOR_MAX)?;
        check_length("category", self.category.as_deref(), CATEGORY_MAX)?;
        check_length("tags", self.tags.as_deref(), TAGS_MAX)?;
        check_length("imageUrl", self.image_url.as_deref(), IMAGE_URL_MAX)?;
        check_read_time(self.read_time)
    }

    /// Copies the supplied fields onto `tutorial` and refreshes `updated_at`
    pub fn apply(self, tutorial: &mut Tutorial, now: DateTime<Utc>) {
        if let Some(title) = self.title.filter(|title| !title.is_empty()) {
            tutorial.title = title;
        }
        if self.description.is_some() {
            tutorial.description = self.description;
        }
        if self.author.is_some() {
            tutorial.author = self.author;
        }
        if self.category.is_some() {
            tutorial.category = self.category;
        }
        if let Some(published) = self.published {
            tutorial.published = published;
        }
        if self.read_time.is_some() {
            tutorial.read_time = self.read_time;
        }
        if self.difficulty.is_some() {
            tutorial.difficulty = self.difficulty;
        }
        if self.tags.is_some() {
            tutorial.tags = self.tags;
        }
        if self.image_url.is_some() {
            tutorial.image_url = self.image_url;
        }
        tutorial.updated_at = now;
    }
}

/// Query parameters for `GET /api/tutorials`
///
/// # Example
/// Query string: `?title=react`
#[derive(Deserialize, Debug, Default)]
pub struct TutorialQuery {
    /// Case-sensitive substring of the title; empty means no filter
    pub title: Option<String>,
}

fn check_length(field: &'static str, value: Option<&str>, max: usize) -> Result<(), ValidationError> {
    match value {
        Some(value) if value.chars().count() > max => Err(ValidationError::new(
            field,
            format!("The field {field} must be a string with a maximum length of {max}."),
        )),
        _ => Ok(()),
    }
}

fn check_read_time(read_time: Option<i32>) -> Result<(), ValidationError> {
    match read_time {
        Some(minutes) if minutes < 0 => Err(ValidationError::new(
            "readTime",
            "The field readTime must not be negative.",
        )),
        _ => Ok(()),
    }
}
