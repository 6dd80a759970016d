//! Catalog operations. Each one loads the affected document, mutates it in
//! memory and writes it back before returning.

use rand::Rng;
use rand::seq::SliceRandom;
use shelf_catalog::types::*;
use shelf_catalog::{IdChange, ValidationError, next_id, renumber_all};
use thiserror::Error;

use crate::store::{CatalogStore, StoreError};

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{entity_type} not found: '{id}'")]
    NotFound { entity_type: &'static str, id: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl OperationError {
    fn resource_not_found(id: &str) -> Self {
        Self::NotFound {
            entity_type: "Resource",
            id: id.trim().to_string(),
        }
    }

    fn playlist_not_found(name: &str) -> Self {
        Self::NotFound {
            entity_type: "Playlist",
            id: name.trim().to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ── Resource Operations ─────────────────────────────────────────────────────

/// Build a resource from user-entered fields and append it under a fresh id.
///
/// The author is only kept for books. There is no duplicate-title check
/// here; that rule belongs to ingestion.
pub fn insert_resource(catalog: &mut ResourceFile, mut new: NewResource) -> Result<Resource, ValidationError> {
    new.validate()?;
    if !new.is_book() {
        new.author = None;
    }
    let id = next_id(&new.genre, &catalog.resources)?;
    let resource = new.into_resource(id);
    catalog.resources.push(resource.clone());
    Ok(resource)
}

/// Add a resource and persist the catalog.
pub fn add_resource(store: &CatalogStore, new: NewResource) -> Result<Resource, OperationError> {
    let mut catalog = store.load_resources()?;
    let resource = insert_resource(&mut catalog, new)?;
    store.save_resources(&catalog)?;
    log::debug!("Added resource {} ({})", resource.id, resource.title);
    Ok(resource)
}

/// Remove the resource with `id` (case-insensitive) and return it.
///
/// Ids of the remaining resources are left untouched. Playlist snapshots of
/// the removed resource are not affected.
pub fn delete_resource(store: &CatalogStore, id: &str) -> Result<Resource, OperationError> {
    let mut catalog = store.load_resources()?;
    let removed = catalog
        .remove(id)
        .ok_or_else(|| OperationError::resource_not_found(id))?;
    store.save_resources(&catalog)?;
    Ok(removed)
}

/// Overwrite the status of the resource with `id`. The status is free text.
pub fn update_status(store: &CatalogStore, id: &str, status: &str) -> Result<Resource, OperationError> {
    let mut catalog = store.load_resources()?;
    let resource = catalog
        .find_mut(id)
        .ok_or_else(|| OperationError::resource_not_found(id))?;
    resource.status = status.to_string();
    let updated = resource.clone();
    store.save_resources(&catalog)?;
    Ok(updated)
}

pub fn find_resource(store: &CatalogStore, id: &str) -> Result<Resource, OperationError> {
    store
        .load_resources()?
        .find(id)
        .cloned()
        .ok_or_else(|| OperationError::resource_not_found(id))
}

/// Pick a resource uniformly at random.
pub fn pick_random<'a, R: Rng + ?Sized>(resources: &'a [Resource], rng: &mut R) -> Option<&'a Resource> {
    resources.choose(rng)
}

pub fn random_resource(store: &CatalogStore) -> Result<Option<Resource>, OperationError> {
    let catalog = store.load_resources()?;
    Ok(pick_random(&catalog.resources, &mut rand::thread_rng()).cloned())
}

/// Rebuild every id in list order.
///
/// When `dry_run` is set nothing is written. When `output` is given the
/// renumbered catalog is written there instead of over the source file.
pub fn renumber(
    store: &CatalogStore,
    dry_run: bool,
    output: Option<&std::path::Path>,
) -> Result<Vec<IdChange>, OperationError> {
    let mut catalog = store.load_resources()?;
    let changes = renumber_all(&mut catalog.resources);
    if dry_run {
        return Ok(changes);
    }
    match output {
        Some(path) => crate::store::write_json_atomic(path, &catalog)?,
        None if changes.is_empty() => {}
        None => store.save_resources(&catalog)?,
    }
    Ok(changes)
}

// ── Playlist Operations ─────────────────────────────────────────────────────

/// Create a playlist, seeding it with snapshots of `seed_ids`.
///
/// Seed ids with no matching resource are skipped without error.
pub fn create_playlist(
    store: &CatalogStore,
    name: &str,
    seed_ids: &[String],
) -> Result<Playlist, OperationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField("name").into());
    }

    let mut resources = Vec::new();
    if !seed_ids.is_empty() {
        let catalog = store.load_resources()?;
        for id in seed_ids {
            match catalog.find(id) {
                Some(r) => resources.push(r.clone()),
                None => log::debug!("Skipping unknown resource id '{}' for playlist '{}'", id, name),
            }
        }
    }

    let playlist = Playlist {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        resources,
    };

    let mut playlists = store.load_playlists()?;
    playlists.playlists.push(playlist.clone());
    store.save_playlists(&playlists)?;
    Ok(playlist)
}

pub fn list_playlists(store: &CatalogStore) -> Result<Vec<Playlist>, OperationError> {
    Ok(store.load_playlists()?.playlists)
}

/// Find a playlist by id, falling back to the first name match.
pub fn view_playlist(store: &CatalogStore, id_or_name: &str) -> Result<Playlist, OperationError> {
    let playlists = store.load_playlists()?;
    playlists
        .find_by_id(id_or_name)
        .or_else(|| playlists.find_by_name(id_or_name))
        .cloned()
        .ok_or_else(|| OperationError::playlist_not_found(id_or_name))
}

/// Append a snapshot of resource `resource_id` to the playlist named `playlist_name`.
pub fn add_to_playlist(
    store: &CatalogStore,
    playlist_name: &str,
    resource_id: &str,
) -> Result<Resource, OperationError> {
    let mut playlists = store.load_playlists()?;
    let playlist = playlists
        .find_by_name_mut(playlist_name)
        .ok_or_else(|| OperationError::playlist_not_found(playlist_name))?;

    let snapshot = store
        .load_resources()?
        .find(resource_id)
        .cloned()
        .ok_or_else(|| OperationError::resource_not_found(resource_id))?;

    playlist.resources.push(snapshot.clone());
    store.save_playlists(&playlists)?;
    Ok(snapshot)
}

/// Remove the first snapshot with `resource_id` from the playlist named `playlist_name`.
pub fn remove_from_playlist(
    store: &CatalogStore,
    playlist_name: &str,
    resource_id: &str,
) -> Result<Resource, OperationError> {
    let mut playlists = store.load_playlists()?;
    let playlist = playlists
        .find_by_name_mut(playlist_name)
        .ok_or_else(|| OperationError::playlist_not_found(playlist_name))?;

    let pos = playlist
        .resources
        .iter()
        .position(|r| r.has_id(resource_id))
        .ok_or_else(|| OperationError::NotFound {
            entity_type: "Playlist entry",
            id: format!("{} in {}", resource_id.trim(), playlist.name),
        })?;
    let removed = playlist.resources.remove(pos);
    store.save_playlists(&playlists)?;
    Ok(removed)
}
