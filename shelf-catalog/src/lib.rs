//! Resource catalog data model, id assignment and read-only views.
//!
//! This crate has no I/O. `shelf-store` persists these types and
//! `shelf-import` merges ingested candidates into them.

pub mod error;
pub mod ids;
pub mod page;
pub mod types;
pub mod view;

pub use error::ValidationError;
pub use ids::{IdChange, next_id, renumber_all};
pub use page::{DEFAULT_PAGE_SIZE, Page, Pager, PagerAction, paginate, total_pages};
pub use types::*;
pub use view::{
    FieldSet, FieldVisibility, FilterCriterion, PlaylistField, ResourceField, filter,
    group_by_genre, project, project_playlist,
};
