//! Entry Data Model
//!
//! Mirrors the backend's entry schema: the full record returned by the API
//! and the payload shape sent on create/update. Identifiers and `updated_at`
//! are always assigned server-side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Content category, matching the backend's closed enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryCategory {
    Doctrine,
    Creed,
    Ritual,
    Prayer,
    Event,
    Testimony,
    Other,
}

impl EntryCategory {
    /// All known categories, in backend declaration order.
    pub const ALL: [EntryCategory; 7] = [
        EntryCategory::Doctrine,
        EntryCategory::Creed,
        EntryCategory::Ritual,
        EntryCategory::Prayer,
        EntryCategory::Event,
        EntryCategory::Testimony,
        EntryCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryCategory::Doctrine => "doctrine",
            EntryCategory::Creed => "creed",
            EntryCategory::Ritual => "ritual",
            EntryCategory::Prayer => "prayer",
            EntryCategory::Event => "event",
            EntryCategory::Testimony => "testimony",
            EntryCategory::Other => "other",
        }
    }
}

impl fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "doctrine" => Ok(EntryCategory::Doctrine),
            "creed" => Ok(EntryCategory::Creed),
            "ritual" => Ok(EntryCategory::Ritual),
            "prayer" => Ok(EntryCategory::Prayer),
            "event" => Ok(EntryCategory::Event),
            "testimony" => Ok(EntryCategory::Testimony),
            "other" => Ok(EntryCategory::Other),
            other => Err(format!(
                "Unknown category '{}'. Expected one of: doctrine, creed, ritual, prayer, event, testimony, other",
                other
            )),
        }
    }
}

/// A content entry as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub slug: String,
    pub category: EntryCategory,
    #[serde(default)]
    pub summary: Option<String>,
    pub content_html: String,
    #[serde(default)]
    pub content_markdown: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    // The backend serializes this field under its camelCase alias.
    #[serde(default, alias = "authorId")]
    pub author_id: Option<Uuid>,
}

/// Request body for create (POST) and update (PUT) calls.
///
/// Absent optional fields serialize as `null`, which is what the backend's
/// update endpoint expects for "clear this field".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryPayload {
    pub title: String,
    pub subtitle: Option<String>,
    pub slug: String,
    pub category: EntryCategory,
    pub summary: Option<String>,
    pub content_html: String,
    pub content_markdown: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_str() {
        for category in EntryCategory::ALL {
            let parsed: EntryCategory = category.as_str().parse().expect("known category");
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn category_parse_rejects_unknown() {
        assert!("sermon".parse::<EntryCategory>().is_err());
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&EntryCategory::Testimony).unwrap();
        assert_eq!(json, "\"testimony\"");
    }

    #[test]
    fn entry_deserializes_with_optional_fields_missing() {
        let json = r#"{
            "id": "7f9c24e5-2f02-4c4e-8b8f-111111111111",
            "title": "On Beginnings",
            "slug": "on-beginnings",
            "category": "doctrine",
            "content_html": "<p>First light.</p>",
            "is_published": false,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z"
        }"#;

        let entry: Entry = serde_json::from_str(json).expect("valid entry");
        assert_eq!(entry.title, "On Beginnings");
        assert_eq!(entry.category, EntryCategory::Doctrine);
        assert!(entry.subtitle.is_none());
        assert!(entry.published_at.is_none());
        assert!(entry.author_id.is_none());
    }

    #[test]
    fn entry_accepts_author_id_under_backend_alias() {
        let json = r#"{
            "id": "7f9c24e5-2f02-4c4e-8b8f-111111111111",
            "title": "On Beginnings",
            "slug": "on-beginnings",
            "category": "doctrine",
            "content_html": "<p>First light.</p>",
            "is_published": false,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z",
            "authorId": "7f9c24e5-2f02-4c4e-8b8f-222222222222"
        }"#;

        let entry: Entry = serde_json::from_str(json).expect("valid entry");
        assert_eq!(
            entry.author_id.map(|id| id.to_string()).as_deref(),
            Some("7f9c24e5-2f02-4c4e-8b8f-222222222222")
        );
    }

    #[test]
    fn payload_serializes_absent_optionals_as_null() {
        let payload = EntryPayload {
            title: "On Beginnings".into(),
            subtitle: None,
            slug: "on-beginnings".into(),
            category: EntryCategory::Doctrine,
            summary: None,
            content_html: "<p>First light.</p>".into(),
            content_markdown: None,
            is_published: false,
            published_at: None,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert!(value["subtitle"].is_null());
        assert!(value["summary"].is_null());
        assert!(value["content_markdown"].is_null());
        assert!(value["published_at"].is_null());
    }
}
