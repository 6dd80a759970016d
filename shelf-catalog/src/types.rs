//! Data model types for the resource catalog.
//!
//! These types mirror the two persisted documents: `resources.json` holds a
//! flat list of [`Resource`]s and `playlists.json` holds [`Playlist`]s, each
//! of which carries full resource snapshots rather than references.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Resource types offered as hints when adding a resource. Not enforced.
pub const KNOWN_TYPES: &[&str] = &["book", "video", "podcast", "website", "course"];

/// Conventional status values. Not enforced.
pub const KNOWN_STATUSES: &[&str] = &["unread", "viewed", "in-progress", "not-started"];

/// Status given to every ingested candidate.
pub const DEFAULT_STATUS: &str = "unread";

// ── Resource ────────────────────────────────────────────────────────────────

/// A single catalogued learning item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub link: String,
    /// Insertion order is the order the user typed them.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
}

impl Resource {
    /// Case-insensitive id comparison, the rule every lookup uses.
    pub fn has_id(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id.trim())
    }

    /// Case-insensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.trim().to_lowercase();
        self.tags.iter().any(|t| t.trim().to_lowercase() == wanted)
    }

    pub fn title_key(&self) -> String {
        title_key(&self.title)
    }
}

/// Normalized duplicate-detection key: trimmed, case-folded title.
pub fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Split a comma-separated tag string, trimming entries and dropping empties.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Field values for a resource that has not been assigned an id yet.
///
/// Produced by the `add` command and by ingestion adapters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewResource {
    pub title: String,
    pub kind: String,
    pub genre: String,
    pub status: String,
    pub link: String,
    pub tags: Vec<String>,
    pub author: Option<String>,
}

impl NewResource {
    /// Check that every required field is non-blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("title", &self.title),
            ("type", &self.kind),
            ("genre", &self.genre),
            ("status", &self.status),
            ("link", &self.link),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(name));
            }
        }
        Ok(())
    }

    pub fn is_book(&self) -> bool {
        self.kind.trim().eq_ignore_ascii_case("book")
    }

    /// Build the persisted record under the given id.
    pub fn into_resource(self, id: String) -> Resource {
        Resource {
            id,
            title: self.title.trim().to_string(),
            kind: self.kind.trim().to_string(),
            genre: self.genre.trim().to_string(),
            status: self.status.trim().to_string(),
            link: self.link.trim().to_string(),
            tags: self.tags,
            author: self
                .author
                .map(|a| a.trim().to_string())
                .unwrap_or_default(),
        }
    }
}

// ── Playlist ────────────────────────────────────────────────────────────────

/// A named, ordered sequence of resource snapshots.
///
/// Later edits to a catalog resource never reach the copy held here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    // Older files were written with the key "ID".
    #[serde(default, alias = "ID")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub resources: Vec<Resource>,
}

impl Playlist {
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id.trim())
    }
}

// ── Documents ───────────────────────────────────────────────────────────────

/// Top-level shape of `resources.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFile {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub resources: Vec<Resource>,
}

impl ResourceFile {
    pub fn find(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.has_id(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Resource> {
        self.resources.iter_mut().find(|r| r.has_id(id))
    }

    /// Remove the first resource matching `id`.
    pub fn remove(&mut self, id: &str) -> Option<Resource> {
        let pos = self.resources.iter().position(|r| r.has_id(id))?;
        Some(self.resources.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Top-level shape of `playlists.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistFile {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub playlists: Vec<Playlist>,
}

impl PlaylistFile {
    /// First playlist whose name matches, case-insensitively.
    pub fn find_by_name(&self, name: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.has_name(name))
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Playlist> {
        self.playlists.iter_mut().find(|p| p.has_name(name))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.has_id(id))
    }
}

/// Treat an explicit JSON `null` the same as a missing list.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_tags_trims_and_drops_empty() {
        assert_eq!(split_tags(" AI, ML ,, deep learning,"), vec!["AI", "ML", "deep learning"]);
        assert!(split_tags("").is_empty());
        assert!(split_tags(" , ").is_empty());
    }

    #[test]
    fn title_key_is_trimmed_and_case_folded() {
        assert_eq!(title_key("  Deep Work "), "deep work");
        assert_eq!(title_key("DEEP WORK"), title_key("deep work"));
    }

    #[test]
    fn validate_reports_first_missing_field() {
        let new = NewResource {
            title: "Deep Work".into(),
            kind: "book".into(),
            genre: "  ".into(),
            status: "unread".into(),
            link: "https://example.com".into(),
            ..Default::default()
        };
        match new.validate() {
            Err(ValidationError::MissingField(field)) => assert_eq!(field, "genre"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn has_tag_ignores_case() {
        let r = NewResource {
            tags: vec!["AI".into(), "ML".into()],
            ..Default::default()
        }
        .into_resource("x1".into());
        assert!(r.has_tag("ai"));
        assert!(r.has_tag(" Ml "));
        assert!(!r.has_tag("history"));
    }
}
