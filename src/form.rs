//! Entry Editor Form State
//!
//! One reusable form serves both create and update. The mode is an explicit
//! tagged variant rather than an "id field is blank" convention, so the
//! create/update decision can never drift out of sync with the populated id.
//!
//! Field values are held as the raw text a form control would carry; the
//! conversion to a wire payload (blank optionals to null, minute-precision
//! timestamp to UTC) happens in one place, [`EntryForm::payload`].

use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::model::{Entry, EntryCategory, EntryPayload};

/// Input format used by the `published_at` form field: date and minute,
/// no seconds, no zone. Values are interpreted as UTC.
const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Whether the form is creating a new entry or editing an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    New,
    Editing(Uuid),
}

/// Transient state of the entry editor.
#[derive(Debug, Clone)]
pub struct EntryForm {
    pub mode: Mode,
    pub title: String,
    pub subtitle: String,
    pub slug: String,
    pub category: EntryCategory,
    pub summary: String,
    pub content_html: String,
    pub content_markdown: String,
    pub is_published: bool,
    /// Minute-precision UTC text, e.g. `2024-05-01T12:34`. Blank means unset.
    pub published_at: String,
    /// Status line shown alongside the form ("Editing ...", "Saved.").
    pub status: String,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self {
            mode: Mode::New,
            title: String::new(),
            subtitle: String::new(),
            slug: String::new(),
            category: EntryCategory::Doctrine,
            summary: String::new(),
            content_html: String::new(),
            content_markdown: String::new(),
            is_published: false,
            published_at: String::new(),
            status: String::new(),
        }
    }
}

impl EntryForm {
    /// Fill every field from an existing entry and switch to editing mode.
    ///
    /// Absent optionals become blank strings; `published_at` is truncated to
    /// the minute precision the field holds, discarding seconds and zone.
    pub fn populate(&mut self, entry: &Entry) {
        self.mode = Mode::Editing(entry.id);
        self.title = entry.title.clone();
        self.subtitle = entry.subtitle.clone().unwrap_or_default();
        self.slug = entry.slug.clone();
        self.category = entry.category;
        self.summary = entry.summary.clone().unwrap_or_default();
        self.content_html = entry.content_html.clone();
        self.content_markdown = entry.content_markdown.clone().unwrap_or_default();
        self.is_published = entry.is_published;
        self.published_at = entry
            .published_at
            .map(|dt| dt.format(PUBLISHED_AT_FORMAT).to_string())
            .unwrap_or_default();
        self.status = format!("Editing \u{201c}{}\u{201d}", entry.title);
    }

    /// Clear all fields, including the editing discriminant and status line.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build the wire payload, applying the blank-to-null and timestamp
    /// normalizations.
    pub fn payload(&self) -> EntryPayload {
        EntryPayload {
            title: self.title.clone(),
            subtitle: empty_to_none(&self.subtitle),
            slug: self.slug.clone(),
            category: self.category,
            summary: empty_to_none(&self.summary),
            content_html: self.content_html.clone(),
            content_markdown: empty_to_none(&self.content_markdown),
            is_published: self.is_published,
            published_at: parse_published_at(&self.published_at),
        }
    }
}

/// Blank or whitespace-only values become absent; anything else passes
/// through unchanged.
pub fn empty_to_none(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse a `published_at` form value into a canonical UTC timestamp.
///
/// Accepts the minute-precision form format, the same with seconds, or a
/// full RFC 3339 stamp. Blank or unparseable input yields `None`.
pub fn parse_published_at(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, PUBLISHED_AT_FORMAT) {
        return Some(naive.and_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_entry() -> Entry {
        Entry {
            id: Uuid::new_v4(),
            title: "On Beginnings".into(),
            subtitle: Some("A first doctrine".into()),
            slug: "on-beginnings".into(),
            category: EntryCategory::Doctrine,
            summary: None,
            content_html: "<p>First light.</p>".into(),
            content_markdown: Some("First light.".into()),
            is_published: true,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap(),
            published_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 34, 0).unwrap()),
            author_id: None,
        }
    }

    #[test]
    fn empty_to_none_drops_blank_and_whitespace() {
        assert_eq!(empty_to_none(""), None);
        assert_eq!(empty_to_none("   "), None);
        assert_eq!(empty_to_none("\t\n"), None);
    }

    #[test]
    fn empty_to_none_passes_text_through_unchanged() {
        assert_eq!(empty_to_none("hello"), Some("hello".to_string()));
        assert_eq!(empty_to_none("  padded  "), Some("  padded  ".to_string()));
    }

    #[test]
    fn parse_published_at_accepts_minute_precision() {
        let parsed = parse_published_at("2024-05-01T12:34").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 12, 34, 0).unwrap());
    }

    #[test]
    fn parse_published_at_accepts_rfc3339() {
        let parsed = parse_published_at("2024-05-01T12:34:56+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 10, 34, 56).unwrap());
    }

    #[test]
    fn parse_published_at_rejects_blank_and_garbage() {
        assert_eq!(parse_published_at(""), None);
        assert_eq!(parse_published_at("   "), None);
        assert_eq!(parse_published_at("next tuesday"), None);
        assert_eq!(parse_published_at("2024-13-40T99:99"), None);
    }

    #[test]
    fn populate_fills_fields_and_switches_mode() {
        let entry = sample_entry();
        let mut form = EntryForm::default();
        form.populate(&entry);

        assert_eq!(form.mode, Mode::Editing(entry.id));
        assert_eq!(form.title, "On Beginnings");
        assert_eq!(form.subtitle, "A first doctrine");
        assert_eq!(form.summary, "", "absent optional becomes blank");
        assert_eq!(form.published_at, "2024-05-01T12:34");
        assert!(form.status.contains("On Beginnings"));
    }

    #[test]
    fn populate_then_payload_round_trips_entry_fields() {
        let entry = sample_entry();
        let mut form = EntryForm::default();
        form.populate(&entry);

        let payload = form.payload();
        assert_eq!(payload.title, entry.title);
        assert_eq!(payload.subtitle, entry.subtitle);
        assert_eq!(payload.slug, entry.slug);
        assert_eq!(payload.category, entry.category);
        assert_eq!(payload.summary, entry.summary);
        assert_eq!(payload.content_html, entry.content_html);
        assert_eq!(payload.content_markdown, entry.content_markdown);
        assert_eq!(payload.is_published, entry.is_published);
        assert_eq!(payload.published_at, entry.published_at);
    }

    #[test]
    fn reset_returns_to_new_mode_and_clears_status() {
        let mut form = EntryForm::default();
        form.populate(&sample_entry());
        form.reset();

        assert_eq!(form.mode, Mode::New);
        assert!(form.title.is_empty());
        assert!(form.published_at.is_empty());
        assert!(form.status.is_empty());
        assert_eq!(form.category, EntryCategory::Doctrine);
    }
}
