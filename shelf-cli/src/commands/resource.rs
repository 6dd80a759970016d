use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelf_catalog::{FilterCriterion, NewResource, Resource, filter, group_by_genre, paginate};

use crate::error::CliError;
use crate::render;
use crate::session::Session;

pub(crate) fn run_add(session: &Session, new: NewResource) -> Result<(), CliError> {
    let resource = shelf_store::add_resource(&session.store, new)?;
    log::info!(
        "Added {} with ID {}",
        resource.title.if_supports_color(Stdout, |t| t.bold()),
        resource.id.if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Print one page of the catalog (`page` is 1-based; out-of-range pages clamp).
pub(crate) fn run_list(session: &Session, page: usize) -> Result<(), CliError> {
    let catalog = session.store.load_resources()?;
    if catalog.is_empty() {
        log::warn!("No resources found.");
        return Ok(());
    }

    let page = paginate(&catalog.resources, session.page_size, page.saturating_sub(1));
    render::print_resource_page(&page, &session.resource_fields, &session.palette);
    Ok(())
}

/// Print the catalog grouped by genre, one table per group.
pub(crate) fn run_list_grouped(session: &Session) -> Result<(), CliError> {
    let catalog = session.store.load_resources()?;
    if catalog.is_empty() {
        log::warn!("No resources found.");
        return Ok(());
    }

    for (genre, members) in group_by_genre(&catalog.resources) {
        let label = if genre.is_empty() { "(no genre)" } else { genre.as_str() };
        let heading = format!("{} ({})", label, members.len());
        match session.palette.genre(&genre) {
            Some(color) => log::info!(
                "{}",
                heading.if_supports_color(Stdout, |t| t.color(color).bold().to_string())
            ),
            None => log::info!("{}", heading.if_supports_color(Stdout, |t| t.bold())),
        }
        render::print_resource_table(&members, &session.resource_fields, &session.palette);
        log::info!("");
    }
    Ok(())
}

pub(crate) fn run_delete(session: &Session, id: &str) -> Result<(), CliError> {
    let removed = shelf_store::delete_resource(&session.store, id)?;
    log::info!(
        "Deleted {} ({})",
        removed.id.if_supports_color(Stdout, |t| t.cyan()),
        removed.title,
    );
    Ok(())
}

pub(crate) fn run_filter(
    session: &Session,
    criterion: FilterCriterion,
    value: &str,
) -> Result<(), CliError> {
    let catalog = session.store.load_resources()?;
    let matches = filter(&catalog.resources, criterion, value);
    if matches.is_empty() {
        log::warn!("No resources with {} '{}'.", criterion, value.trim());
        return Ok(());
    }

    render::print_resource_table(&matches, &session.resource_fields, &session.palette);
    log::info!(
        "{}",
        format!("{} of {} resources", matches.len(), catalog.len())
            .if_supports_color(Stdout, |t| t.dimmed())
    );
    Ok(())
}

pub(crate) fn run_mark(session: &Session, id: &str, status: &str) -> Result<(), CliError> {
    let updated = shelf_store::update_status(&session.store, id, status)?;
    let status = match session.palette.status(&updated.status) {
        Some(color) => updated
            .status
            .if_supports_color(Stdout, |t| t.color(color))
            .to_string(),
        None => updated.status.clone(),
    };
    log::info!(
        "Marked {} as {}",
        updated.id.if_supports_color(Stdout, |t| t.cyan()),
        status
    );
    Ok(())
}

pub(crate) fn run_random(session: &Session) -> Result<(), CliError> {
    match shelf_store::random_resource(&session.store)? {
        Some(resource) => print_pick(&resource),
        None => log::warn!("No resources found."),
    }
    Ok(())
}

fn print_pick(resource: &Resource) {
    log::info!(
        "Random Resource: {} (ID: {})",
        resource.title.if_supports_color(Stdout, |t| t.green()),
        resource.id.if_supports_color(Stdout, |t| t.cyan()),
    );
    if !resource.link.is_empty() {
        log::info!(
            "  {}",
            resource.link.if_supports_color(Stdout, |t| t.dimmed())
        );
    }
}

/// Rebuild ids. Returns how many ids changed.
pub(crate) fn run_renumber(
    session: &Session,
    dry_run: bool,
    output: Option<&Path>,
) -> Result<usize, CliError> {
    let changes = shelf_store::renumber(&session.store, dry_run, output)?;

    if changes.is_empty() {
        log::info!("All ids are already canonical.");
        if let (false, Some(path)) = (dry_run, output) {
            log::info!("Wrote {}", path.display());
        }
        return Ok(0);
    }

    for change in &changes {
        log::info!(
            "  {} {} {}  {}",
            if change.old_id.is_empty() { "(none)" } else { change.old_id.as_str() },
            "\u{2192}".if_supports_color(Stdout, |t| t.dimmed()),
            change.new_id.if_supports_color(Stdout, |t| t.cyan()),
            render::truncate_str(&change.title, 48).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let summary = format!("{} id(s) changed", changes.len());
    if dry_run {
        log::info!(
            "{} {}",
            summary.if_supports_color(Stdout, |t| t.bold()),
            "(dry run, nothing written)".if_supports_color(Stdout, |t| t.yellow()),
        );
    } else {
        let target = output.unwrap_or(session.store.resources_path());
        log::info!(
            "{}; wrote {}",
            summary.if_supports_color(Stdout, |t| t.bold()),
            target.display()
        );
    }
    Ok(changes.len())
}
