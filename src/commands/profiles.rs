//! Profiles command: list profiles or show one profile in detail.
use std::path::Path;

use anyhow::Result;

use super::{CommandSetup, Line, emit};
use crate::cli::GlobalOpts;
use crate::config::{Profile, ProfileStore};
use crate::logging::{Log, Palette};

const TREE_BRANCH: &str = "+-- ";

/// Run the profiles command.
///
/// # Errors
///
/// Returns an error if profiles cannot be loaded or the requested profile
/// does not exist.
pub fn run(global: &GlobalOpts, log: &dyn Log, palette: Palette) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    if let Some(current) = setup.state.profile.as_deref()
        && !setup.store.contains(current)
    {
        log.warn(&format!(
            "Current profile \"{current}\" no longer exists in {}",
            setup.dotdir.display()
        ));
    }
    let lines = match global.profile.as_deref() {
        Some(name) => render_detail(&setup.store, setup.find(name)?, palette),
        None => render_list(
            &setup.store,
            setup.state.profile.as_deref(),
            &setup.dotdir,
            palette,
        ),
    };
    emit(log, &lines);
    Ok(())
}

/// One line per profile, current profile first, then the selection status.
#[must_use]
pub fn render_list(
    store: &ProfileStore,
    current: Option<&str>,
    dotdir: &Path,
    palette: Palette,
) -> Vec<Line> {
    if store.is_empty() {
        return vec![Line::text(format!(
            "No profile files found in {} directory",
            palette.hl(&dotdir.display().to_string())
        ))];
    }

    let current_profile = current.and_then(|name| store.get(name));
    let mut names: Vec<&str> = current_profile.map(|p| p.name.as_str()).into_iter().collect();
    names.extend(store.names().filter(|n| Some(*n) != current));

    let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0) + 1;

    let mut lines: Vec<Line> = names
        .iter()
        .filter_map(|name| store.get(name))
        .map(|profile| {
            let padded = format!("{:<width$}", profile.name);
            let name = if current == Some(profile.name.as_str()) {
                palette.hl(&padded)
            } else {
                padded
            };
            let extends = if profile.extends.is_empty() {
                String::new()
            } else {
                palette.muted(&format!("({})", profile.extends.join(", ")))
            };
            Line::text(format!("{name}{extends}").trim_end())
        })
        .collect();

    lines.push(Line::blank());
    lines.push(Line::text(match current {
        Some(name) => format!("Current profile: {}", palette.hl(name)),
        None => format!(
            "Current profile is not set, use \"{}\" to set current profile",
            palette.hl("dotref init -p PROFILE")
        ),
    }));
    lines
}

/// Inheritance tree plus every merged entry, annotated with its origin.
#[must_use]
pub fn render_detail(store: &ProfileStore, profile: &Profile, palette: Palette) -> Vec<Line> {
    let mut lines = vec![Line::text(palette.hl(&profile.name))];
    render_tree(store, profile, "", palette, &mut lines);

    let merged = store.merged(profile);
    let own = merged.name.as_str();

    render_entries(
        "Variables",
        merged
            .vars
            .iter()
            .map(|v| (v.name.clone(), v.value.clone(), v.origin.as_str())),
        own,
        palette,
        &mut lines,
    );
    render_entries(
        "Create",
        merged.create.iter().map(|c| {
            let mode = c
                .mode
                .filter(|m| *m != 0)
                .map_or_else(|| "default mode".to_string(), |m| format!("0o{m:o}"));
            (c.path.clone(), mode, c.origin.as_str())
        }),
        own,
        palette,
        &mut lines,
    );
    render_entries(
        "Link",
        merged
            .link
            .iter()
            .map(|l| (l.src.clone(), l.dst.clone(), l.origin.as_str())),
        own,
        palette,
        &mut lines,
    );
    render_entries(
        "Template",
        merged
            .template
            .iter()
            .map(|t| (t.src.clone(), t.dst.clone(), t.origin.as_str())),
        own,
        palette,
        &mut lines,
    );
    lines
}

fn render_tree(
    store: &ProfileStore,
    node: &Profile,
    prefix: &str,
    palette: Palette,
    lines: &mut Vec<Line>,
) {
    let parents: Vec<&Profile> = store.parents(node).collect();
    let count = parents.len();
    for (i, parent) in parents.into_iter().enumerate() {
        lines.push(Line::text(format!(
            "{prefix}{TREE_BRANCH}{}",
            palette.muted(&parent.name)
        )));
        let rail = if i + 1 < count { "|" } else { " " };
        let child_prefix = format!("{prefix}{rail:<width$}", width = TREE_BRANCH.len());
        render_tree(store, parent, &child_prefix, palette, lines);
    }
}

fn render_entries<'a>(
    header: &str,
    entries: impl Iterator<Item = (String, String, &'a str)>,
    own: &str,
    palette: Palette,
    lines: &mut Vec<Line>,
) {
    let entries: Vec<(String, String, &str)> = entries.collect();
    if entries.is_empty() {
        return;
    }

    let width = entries
        .iter()
        .map(|(name, _, _)| name.chars().count())
        .max()
        .unwrap_or(0)
        + 1;

    lines.push(Line::blank());
    lines.push(Line::Header(format!("{header}:")));
    for (name, value, origin) in entries {
        let key = format!("{:<width$}", format!("{name}:"));
        let origin = if origin == own {
            String::new()
        } else {
            palette.muted(&format!(" ({origin})"))
        };
        lines.push(Line::text(format!("    {} {value}{origin}", palette.hl(&key))));
    }
}
