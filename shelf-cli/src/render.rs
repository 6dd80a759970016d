//! Terminal tables for resources and playlists.

use std::collections::HashMap;

use owo_colors::Stream::Stdout;
use owo_colors::{AnsiColors, OwoColorize};

use shelf_catalog::{
    FieldSet, FieldVisibility, Page, Playlist, PlaylistField, Resource, ResourceField, project,
    project_playlist,
};

use crate::settings::ColorSettings;

/// Widest a column may grow before its values are truncated.
const MAX_COLUMN_WIDTH: usize = 48;

/// Per-category color lookup. Built once from settings, never mutated.
#[derive(Debug, Clone, Default)]
pub(crate) struct Palette {
    genre: HashMap<String, AnsiColors>,
    status: HashMap<String, AnsiColors>,
    tag: HashMap<String, AnsiColors>,
}

impl Palette {
    /// Built-in tables overlaid with any colors from settings.
    pub(crate) fn from_settings(colors: &ColorSettings) -> Self {
        use AnsiColors::*;

        let mut palette = Self::default();
        for (genre, color) in [
            ("self-improvement", Green),
            ("ai ml", Cyan),
            ("history", Yellow),
            ("finance", Blue),
            ("tech", Red),
        ] {
            palette.genre.insert(genre.to_string(), color);
            palette.tag.insert(genre.to_string(), color);
        }
        for (status, color) in [
            ("unread", White),
            ("viewed", Magenta),
            ("in-progress", Yellow),
            ("not-started", Red),
        ] {
            palette.status.insert(status.to_string(), color);
        }

        overlay(&mut palette.genre, &colors.genre);
        overlay(&mut palette.status, &colors.status);
        overlay(&mut palette.tag, &colors.tag);
        palette
    }

    fn lookup(table: &HashMap<String, AnsiColors>, value: &str) -> Option<AnsiColors> {
        table.get(&value.trim().to_lowercase()).copied()
    }

    pub(crate) fn genre(&self, genre: &str) -> Option<AnsiColors> {
        Self::lookup(&self.genre, genre)
    }

    pub(crate) fn status(&self, status: &str) -> Option<AnsiColors> {
        Self::lookup(&self.status, status)
    }

    pub(crate) fn tag(&self, tag: &str) -> Option<AnsiColors> {
        Self::lookup(&self.tag, tag)
    }
}

fn overlay(table: &mut HashMap<String, AnsiColors>, overrides: &std::collections::BTreeMap<String, String>) {
    for (key, name) in overrides {
        match parse_color(name) {
            Some(color) => {
                table.insert(key.trim().to_lowercase(), color);
            }
            None => log::warn!("Unknown color '{}' for '{}' in settings", name, key),
        }
    }
}

/// Parse a color name as written in the settings file.
pub(crate) fn parse_color(name: &str) -> Option<AnsiColors> {
    use AnsiColors::*;
    let color = match name.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
        "black" => Black,
        "red" => Red,
        "green" => Green,
        "yellow" => Yellow,
        "blue" => Blue,
        "magenta" | "pink" => Magenta,
        "cyan" => Cyan,
        "white" => White,
        "default" => Default,
        "brightblack" | "gray" | "grey" => BrightBlack,
        "brightred" => BrightRed,
        "brightgreen" => BrightGreen,
        "brightyellow" => BrightYellow,
        "brightblue" => BrightBlue,
        "brightmagenta" => BrightMagenta,
        "brightcyan" => BrightCyan,
        "brightwhite" => BrightWhite,
        _ => return None,
    };
    Some(color)
}

/// Truncate to `max` characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max).collect()
    }
}

fn paint(text: &str, color: Option<AnsiColors>) -> String {
    match color {
        Some(c) => text.if_supports_color(Stdout, |t| t.color(c)).to_string(),
        None => text.to_string(),
    }
}

/// A computed table: header labels, cell text and per-cell color.
struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<(String, Option<AnsiColors>)>>,
    /// Pre-rendered final column (e.g. individually colored tags).
    tails: Option<Vec<String>>,
}

impl Table {
    fn print(&self) {
        let cols = self.headers.len();
        let plain_cols = if self.tails.is_some() { cols - 1 } else { cols };

        let widths: Vec<usize> = (0..plain_cols)
            .map(|c| {
                self.rows
                    .iter()
                    .map(|r| r[c].0.chars().count())
                    .chain(std::iter::once(self.headers[c].len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = self
            .headers
            .iter()
            .enumerate()
            .map(|(c, h)| match widths.get(c) {
                Some(w) if c + 1 < cols => format!("{h:<w$}"),
                _ => h.to_string(),
            })
            .collect();
        log::info!(
            "  {}",
            header.join("  ").if_supports_color(Stdout, |t| t.dimmed())
        );

        for (i, row) in self.rows.iter().enumerate() {
            let mut cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(c, (text, color))| {
                    let padded = if c + 1 < cols {
                        format!("{text:<w$}", w = widths[c])
                    } else {
                        text.clone()
                    };
                    paint(&padded, *color)
                })
                .collect();
            if let Some(tails) = &self.tails {
                cells.push(tails[i].clone());
            }
            log::info!("  {}", cells.join("  "));
        }
    }
}

fn resource_cell(
    resource: &Resource,
    field: ResourceField,
    value: &str,
    palette: &Palette,
) -> (String, Option<AnsiColors>) {
    let color = match field {
        ResourceField::Genre => palette.genre(&resource.genre),
        ResourceField::Status => palette.status(&resource.status),
        _ => None,
    };
    (truncate_str(value, MAX_COLUMN_WIDTH), color)
}

fn colored_tags(resource: &Resource, palette: &Palette) -> String {
    resource
        .tags
        .iter()
        .map(|t| paint(t, palette.tag(t)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Lay out resources from their field projections. A trailing Tags column
/// becomes a tail so each tag can carry its own color.
fn resource_table(
    resources: &[&Resource],
    fields: &FieldVisibility<ResourceField>,
    palette: &Palette,
) -> Table {
    let visible = fields.fields();
    let tags_tail = visible.last() == Some(&ResourceField::Tags);

    let rows = resources
        .iter()
        .map(|r| {
            project(r, fields)
                .into_iter()
                .filter(|(f, _)| !(tags_tail && *f == ResourceField::Tags))
                .map(|(f, value)| resource_cell(r, f, &value, palette))
                .collect()
        })
        .collect();

    Table {
        headers: visible.iter().map(|f| f.label()).collect(),
        rows,
        tails: tags_tail.then(|| resources.iter().map(|r| colored_tags(r, palette)).collect()),
    }
}

fn playlist_table(playlists: &[Playlist], fields: &FieldVisibility<PlaylistField>) -> Table {
    Table {
        headers: fields.fields().iter().map(|f| f.label()).collect(),
        rows: playlists
            .iter()
            .map(|p| {
                project_playlist(p, fields)
                    .into_iter()
                    .map(|(_, value)| (truncate_str(&value, MAX_COLUMN_WIDTH), None))
                    .collect()
            })
            .collect(),
        tails: None,
    }
}

/// Print resources as a table of the visible fields.
pub(crate) fn print_resource_table(
    resources: &[&Resource],
    fields: &FieldVisibility<ResourceField>,
    palette: &Palette,
) {
    if fields.fields().is_empty() {
        log::warn!("All resource fields are hidden. Use filter-fields to show some.");
        return;
    }
    resource_table(resources, fields, palette).print();
}

/// Print one page of a resource listing with its footer.
pub(crate) fn print_resource_page(
    page: &Page<'_, Resource>,
    fields: &FieldVisibility<ResourceField>,
    palette: &Palette,
) {
    let rows: Vec<&Resource> = page.items.iter().collect();
    print_resource_table(&rows, fields, palette);
    print_page_footer(page.number(), page.total_pages);
}

/// Print playlists as a table of the visible fields.
pub(crate) fn print_playlist_table(playlists: &[Playlist], fields: &FieldVisibility<PlaylistField>) {
    if fields.fields().is_empty() {
        log::warn!("All playlist fields are hidden. Use filter-playlist-fields to show some.");
        return;
    }
    playlist_table(playlists, fields).print();
}

pub(crate) fn print_page_footer(number: usize, total: usize) {
    log::info!(
        "{}",
        format!("Page {} of {}", number, total).if_supports_color(Stdout, |t| t.dimmed())
    );
}

/// Print the on/off state of each field in canonical order.
pub(crate) fn print_field_states<F: FieldSet>(fields: &FieldVisibility<F>) {
    log::info!("{}", "Field Options:".if_supports_color(Stdout, |t| t.bold()));
    for (field, visible) in fields.states() {
        if visible {
            log::info!(
                "  {} {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                field.label()
            );
        } else {
            log::info!(
                "  {} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                field.label()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_catalog::NewResource;

    fn sample() -> Resource {
        NewResource {
            title: "Deep Work".into(),
            kind: "book".into(),
            genre: "self-improvement".into(),
            status: "unread".into(),
            link: "https://example.com/deep".into(),
            tags: vec!["focus".into(), "tech".into()],
            author: None,
        }
        .into_resource("self-improvement001".into())
    }

    fn texts(table: &Table) -> Vec<Vec<String>> {
        table
            .rows
            .iter()
            .map(|row| row.iter().map(|(text, _)| text.clone()).collect())
            .collect()
    }

    #[test]
    fn resource_rows_follow_projection_order() {
        let r = sample();
        let mut fields = FieldVisibility::new([ResourceField::Status, ResourceField::Id]);
        fields.toggle(ResourceField::Title);

        let table = resource_table(&[&r], &fields, &Palette::default());
        assert_eq!(table.headers, vec!["ID", "Title", "Status"]);
        let expected: Vec<String> = project(&r, &fields).into_iter().map(|(_, v)| v).collect();
        assert_eq!(texts(&table), vec![expected]);
        assert!(table.tails.is_none());
    }

    #[test]
    fn trailing_tags_become_a_tail_column() {
        let r = sample();
        let fields = FieldVisibility::new([ResourceField::Genre, ResourceField::Tags]);
        let palette = Palette::from_settings(&ColorSettings::default());

        let table = resource_table(&[&r], &fields, &palette);
        assert_eq!(texts(&table), vec![vec!["self-improvement".to_string()]]);
        assert!(matches!(table.rows[0][0].1, Some(AnsiColors::Green)));
        let tails = table.tails.unwrap();
        assert_eq!(strip_ansi_escapes::strip_str(&tails[0]), "focus, tech");
    }

    #[test]
    fn playlist_rows_use_projected_values() {
        let playlist = Playlist {
            id: "0b7c6a52-9a4e-4f7e-8d3e-1f2a3b4c5d6e".into(),
            name: "Focus".into(),
            resources: vec![sample(), sample()],
        };
        let fields = FieldVisibility::<PlaylistField>::default();
        let table = playlist_table(std::slice::from_ref(&playlist), &fields);
        let expected: Vec<String> = project_playlist(&playlist, &fields)
            .into_iter()
            .map(|(_, v)| v)
            .collect();
        assert_eq!(texts(&table), vec![expected]);
        assert_eq!(table.rows[0][2].0, "2");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("Überlänge des Titels", 8), "Überl...");
        assert_eq!(truncate_str("abcdef", 3), "abc");
    }

    #[test]
    fn palette_defaults_and_overrides() {
        let mut colors = ColorSettings::default();
        colors.genre.insert("Tech".into(), "bright-green".into());
        colors.status.insert("unread".into(), "not-a-color".into());

        let palette = Palette::from_settings(&colors);
        assert!(matches!(palette.genre("TECH"), Some(AnsiColors::BrightGreen)));
        assert!(matches!(palette.genre("AI ML"), Some(AnsiColors::Cyan)));
        assert!(matches!(palette.status("unread"), Some(AnsiColors::White)));
        assert!(palette.genre("poetry").is_none());
    }

    #[test]
    fn parses_color_names_loosely() {
        assert!(matches!(parse_color("Bright_Blue"), Some(AnsiColors::BrightBlue)));
        assert!(matches!(parse_color("grey"), Some(AnsiColors::BrightBlack)));
        assert!(parse_color("mauve").is_none());
    }
}
