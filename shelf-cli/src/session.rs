use std::path::PathBuf;

use shelf_catalog::{FieldVisibility, PlaylistField, ResourceField};
use shelf_store::CatalogStore;

use crate::render::Palette;
use crate::settings::{DataDirSource, Settings};

/// Everything a command needs: the store, settings and the current view state.
///
/// Field visibility lives here rather than in globals so that toggles made in
/// the shell carry over to later listings in the same session.
pub(crate) struct Session {
    pub store: CatalogStore,
    pub data_dir: PathBuf,
    pub data_dir_source: DataDirSource,
    pub settings: Settings,
    pub palette: Palette,
    pub page_size: usize,
    pub resource_fields: FieldVisibility<ResourceField>,
    pub playlist_fields: FieldVisibility<PlaylistField>,
    pub quiet: bool,
    /// Report progress as log lines instead of a spinner (logfile set or stdout piped).
    pub plain_progress: bool,
}

impl Session {
    pub(crate) fn new(
        data_dir: PathBuf,
        data_dir_source: DataDirSource,
        settings: Settings,
        quiet: bool,
    ) -> Self {
        Self {
            store: CatalogStore::in_dir(&data_dir),
            data_dir,
            data_dir_source,
            palette: Palette::from_settings(&settings.colors),
            page_size: settings.page_size(),
            settings,
            resource_fields: FieldVisibility::default(),
            playlist_fields: FieldVisibility::default(),
            quiet,
            plain_progress: false,
        }
    }
}
