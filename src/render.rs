//! Entry List Rendering
//!
//! The transform from entries to displayable rows is pure so it can be
//! tested without any output device; the renderers turn rows into a plain
//! text table or an HTML fragment. Entry-derived text is escaped before it
//! is placed into markup, since titles and categories come from stored
//! content.

use crate::model::Entry;

/// Placeholder shown when the backend returns no entries.
pub const EMPTY_PLACEHOLDER: &str = "No entries yet.";

/// One row of the entry table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub id: String,
    pub title: String,
    pub category: String,
    pub published: &'static str,
    pub updated: String,
}

/// Transform entries into display rows, in list order.
pub fn to_rows(entries: &[Entry]) -> Vec<EntryRow> {
    entries
        .iter()
        .map(|entry| EntryRow {
            id: entry.id.to_string(),
            title: entry.title.clone(),
            category: entry.category.to_string(),
            published: if entry.is_published { "Yes" } else { "No" },
            updated: entry.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect()
}

/// Render rows as a fixed-width text table.
pub fn render_table(rows: &[EntryRow]) -> String {
    if rows.is_empty() {
        return format!("{}\n", EMPTY_PLACEHOLDER);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<32} {:<12} {:<10} {:<17} {}\n",
        "Title", "Category", "Published", "Updated", "ID"
    ));
    out.push_str(&"-".repeat(110));
    out.push('\n');

    for row in rows {
        out.push_str(&format!(
            "{:<32} {:<12} {:<10} {:<17} {}\n",
            truncate(&row.title, 32),
            row.category,
            row.published,
            row.updated,
            row.id
        ));
    }

    out
}

/// Render rows as an HTML table fragment with all cell text escaped.
pub fn render_html(rows: &[EntryRow]) -> String {
    if rows.is_empty() {
        return format!("<p>{}</p>\n", EMPTY_PLACEHOLDER);
    }

    let mut out = String::from(
        "<table>\n<thead><tr><th>Title</th><th>Category</th><th>Published</th><th>Updated</th><th>ID</th></tr></thead>\n<tbody>\n",
    );

    for row in rows {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&row.title),
            escape_html(&row.category),
            row.published,
            escape_html(&row.updated),
            escape_html(&row.id)
        ));
    }

    out.push_str("</tbody>\n</table>\n");
    out
}

/// Escape text for placement inside HTML element content or attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let head: String = value.chars().take(max.saturating_sub(1)).collect();
        format!("{}\u{2026}", head)
    }
}
