//! JSON persistence layer for the resource catalog.
//!
//! Provides the two-file store and the load-modify-save operations that
//! enforce identity and existence rules.

pub mod operations;
pub mod store;

pub use operations::{
    OperationError, add_resource, add_to_playlist, create_playlist, delete_resource,
    find_resource, insert_resource, list_playlists, pick_random, random_resource,
    remove_from_playlist, renumber, update_status, view_playlist,
};
pub use store::{CatalogStore, PLAYLISTS_FILE, RESOURCES_FILE, StoreError, load_json, write_json_atomic};
