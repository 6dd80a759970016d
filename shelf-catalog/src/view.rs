//! Read-only views over the catalog: filtering, grouping and field projection.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::{Playlist, Resource};

// ── Filtering ───────────────────────────────────────────────────────────────

/// What a filter compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCriterion {
    Genre,
    Tag,
    Status,
}

impl FilterCriterion {
    pub const ALL: &'static [FilterCriterion] = &[Self::Genre, Self::Tag, Self::Status];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Genre => "genre",
            Self::Tag => "tag",
            Self::Status => "status",
        }
    }

    /// Whether `resource` satisfies this criterion for `value`.
    pub fn matches(&self, resource: &Resource, value: &str) -> bool {
        let value = value.trim();
        match self {
            Self::Genre => resource.genre.trim().eq_ignore_ascii_case(value),
            Self::Status => resource.status.trim().eq_ignore_ascii_case(value),
            Self::Tag => resource.has_tag(value),
        }
    }
}

impl FromStr for FilterCriterion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "genre" => Ok(Self::Genre),
            "tag" | "tags" => Ok(Self::Tag),
            "status" => Ok(Self::Status),
            _ => Err(ValidationError::UnknownCriterion(s.trim().to_string())),
        }
    }
}

impl fmt::Display for FilterCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resources matching `criterion == value`, in their original order.
///
/// Genre and status compare case-insensitively; tag tests case-insensitive
/// membership in the tag list.
pub fn filter<'a>(
    resources: &'a [Resource],
    criterion: FilterCriterion,
    value: &str,
) -> Vec<&'a Resource> {
    resources
        .iter()
        .filter(|r| criterion.matches(r, value))
        .collect()
}

/// Group resources by case-insensitive genre, groups in first-seen order.
///
/// The group label is the genre as spelled on the first resource seen.
pub fn group_by_genre(resources: &[Resource]) -> Vec<(String, Vec<&Resource>)> {
    let mut groups: Vec<(String, Vec<&Resource>)> = Vec::new();
    for r in resources {
        let key = r.genre.trim().to_lowercase();
        match groups
            .iter_mut()
            .find(|(label, _)| label.trim().to_lowercase() == key)
        {
            Some((_, members)) => members.push(r),
            None => groups.push((r.genre.trim().to_string(), vec![r])),
        }
    }
    groups
}

// ── Field visibility ────────────────────────────────────────────────────────

/// A closed set of displayable columns with a fixed canonical order.
pub trait FieldSet: Copy + Ord + 'static {
    /// Every field, in display order.
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn parse(name: &str) -> Result<Self, ValidationError> {
        let wanted = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownField(wanted.to_string()))
    }
}

/// Columns of a resource listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResourceField {
    Id,
    Title,
    Genre,
    Type,
    Status,
    Tags,
}

impl FieldSet for ResourceField {
    const ALL: &'static [Self] = &[
        Self::Id,
        Self::Title,
        Self::Genre,
        Self::Type,
        Self::Status,
        Self::Tags,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Title => "Title",
            Self::Genre => "Genre",
            Self::Type => "Type",
            Self::Status => "Status",
            Self::Tags => "Tags",
        }
    }
}

impl ResourceField {
    /// The raw value of this field on `resource`. Tags are comma-joined.
    pub fn value_of(&self, resource: &Resource) -> String {
        match self {
            Self::Id => resource.id.clone(),
            Self::Title => resource.title.clone(),
            Self::Genre => resource.genre.clone(),
            Self::Type => resource.kind.clone(),
            Self::Status => resource.status.clone(),
            Self::Tags => resource.tags.join(", "),
        }
    }
}

/// Columns of a playlist listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PlaylistField {
    Id,
    Name,
    Resources,
}

impl FieldSet for PlaylistField {
    const ALL: &'static [Self] = &[Self::Id, Self::Name, Self::Resources];

    fn label(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::Resources => "Resources",
        }
    }
}

impl PlaylistField {
    /// The value of this field on `playlist`; resources render as a count.
    pub fn value_of(&self, playlist: &Playlist) -> String {
        match self {
            Self::Id => playlist.id.clone(),
            Self::Name => playlist.name.clone(),
            Self::Resources => playlist.resources.len().to_string(),
        }
    }
}

/// Which fields of `F` are currently shown.
///
/// Toggling is a plain set-membership flip; the output order is always the
/// canonical order of `F::ALL`, regardless of toggle history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldVisibility<F: FieldSet> {
    visible: BTreeSet<F>,
}

impl<F: FieldSet> FieldVisibility<F> {
    pub fn new(visible: impl IntoIterator<Item = F>) -> Self {
        Self {
            visible: visible.into_iter().collect(),
        }
    }

    pub fn all() -> Self {
        Self::new(F::ALL.iter().copied())
    }

    /// Parse a comma-separated list of field labels.
    pub fn parse_list(list: &str) -> Result<Self, ValidationError> {
        let fields = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(F::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(fields))
    }

    pub fn is_visible(&self, field: F) -> bool {
        self.visible.contains(&field)
    }

    /// Flip a field on or off. Returns the new state.
    pub fn toggle(&mut self, field: F) -> bool {
        if self.visible.remove(&field) {
            false
        } else {
            self.visible.insert(field);
            true
        }
    }

    /// Visible fields in canonical order.
    pub fn fields(&self) -> Vec<F> {
        F::ALL
            .iter()
            .copied()
            .filter(|f| self.visible.contains(f))
            .collect()
    }

    /// Every field with its visibility, in canonical order.
    pub fn states(&self) -> Vec<(F, bool)> {
        F::ALL
            .iter()
            .map(|f| (*f, self.visible.contains(f)))
            .collect()
    }
}

impl Default for FieldVisibility<ResourceField> {
    fn default() -> Self {
        Self::new([ResourceField::Id, ResourceField::Title, ResourceField::Genre])
    }
}

impl Default for FieldVisibility<PlaylistField> {
    fn default() -> Self {
        Self::all()
    }
}

/// Project a resource onto the visible fields, in canonical order.
pub fn project(
    resource: &Resource,
    visibility: &FieldVisibility<ResourceField>,
) -> Vec<(ResourceField, String)> {
    visibility
        .fields()
        .into_iter()
        .map(|f| (f, f.value_of(resource)))
        .collect()
}

/// Project a playlist onto the visible fields, in canonical order.
pub fn project_playlist(
    playlist: &Playlist,
    visibility: &FieldVisibility<PlaylistField>,
) -> Vec<(PlaylistField, String)> {
    visibility
        .fields()
        .into_iter()
        .map(|f| (f, f.value_of(playlist)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criterion_parses_case_insensitively() {
        assert_eq!("Genre".parse::<FilterCriterion>(), Ok(FilterCriterion::Genre));
        assert_eq!(" TAG ".parse::<FilterCriterion>(), Ok(FilterCriterion::Tag));
        assert_eq!(
            "author".parse::<FilterCriterion>(),
            Err(ValidationError::UnknownCriterion("author".into()))
        );
    }

    #[test]
    fn toggling_never_reorders() {
        let mut vis = FieldVisibility::<ResourceField>::default();
        vis.toggle(ResourceField::Title);
        vis.toggle(ResourceField::Tags);
        vis.toggle(ResourceField::Title);
        assert_eq!(
            vis.fields(),
            vec![
                ResourceField::Id,
                ResourceField::Title,
                ResourceField::Genre,
                ResourceField::Tags
            ]
        );
    }

    #[test]
    fn toggle_reports_new_state() {
        let mut vis = FieldVisibility::<PlaylistField>::default();
        assert!(!vis.toggle(PlaylistField::Resources));
        assert!(!vis.is_visible(PlaylistField::Resources));
        assert!(vis.toggle(PlaylistField::Resources));
    }

    #[test]
    fn parse_list_rejects_unknown_field() {
        let err = FieldVisibility::<ResourceField>::parse_list("id,colour").unwrap_err();
        assert_eq!(err, ValidationError::UnknownField("colour".into()));
        let ok = FieldVisibility::<ResourceField>::parse_list("status, ID").unwrap();
        assert_eq!(ok.fields(), vec![ResourceField::Id, ResourceField::Status]);
    }
}
