use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of program in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "content_kind", rename_all = "lowercase")]
pub enum ContentKind {
    Movie,
    Series,
    Documentary,
    Youtube,
}

/// A catalog entry as stored in the `content` table
///
/// Read-only from the engine's perspective: the selector joins against it
/// and the ranker filters it, but nothing here ever mutates the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Content {
    pub id: Uuid,
    pub title: String,
    pub kind: ContentKind,
    /// A title can carry several genre tags (e.g., ["drama", "crime"])
    pub genres: Vec<String>,
    pub poster_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The slice of catalog data a continue-watching item carries, so the
/// caller can render the rail without a second round trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSummary {
    pub id: Uuid,
    pub title: String,
    pub kind: ContentKind,
    pub genres: Vec<String>,
    pub poster_url: Option<String>,
}

impl From<&Content> for ContentSummary {
    fn from(content: &Content) -> Self {
        Self {
            id: content.id,
            title: content.title.clone(),
            kind: content.kind.clone(),
            genres: content.genres.clone(),
            poster_url: content.poster_url.clone(),
        }
    }
}
