//! Rendering of a [`RunReport`] into console lines.
use std::path::Path;

use super::Line;
use crate::logging::Palette;
use crate::resources::{ActionOutcome, ActionState};
use crate::tasks::{RunReport, Section};

/// Width of the bracketed state column.
const STATE_WIDTH: usize = 10;

/// Render the full report for `status`, `sync`, or `unlink`.
#[must_use]
pub fn render(report: &RunReport, palette: Palette) -> Vec<Line> {
    let mut lines = vec![Line::text(format!("Profile: {}", palette.hl(&report.profile)))];

    for section in &report.sections {
        render_section(section, palette, &mut lines);
    }

    let verdict = if report.has_conflicts() {
        "but conflicts were detected"
    } else {
        "and no conflicts were detected"
    };
    lines.push(Line::blank());
    lines.push(Line::text(format!(
        "{} completed successfully {verdict}",
        palette.hl(report.command.as_str())
    )));
    lines
}

fn render_section(section: &Section, palette: Palette, lines: &mut Vec<Line>) {
    lines.push(Line::blank());
    lines.push(Line::Header(format!("{}:", section.name)));

    let left_width = section
        .outcomes
        .iter()
        .map(|o| display_len(&o.primary))
        .max()
        .unwrap_or(0);

    for outcome in &section.outcomes {
        lines.push(Line::Text(render_outcome(outcome, left_width, palette)));
    }
}

fn render_outcome(outcome: &ActionOutcome, left_width: usize, palette: Palette) -> String {
    let label = format!("[{}]", outcome.state.label());
    let state = paint_state(
        outcome.state,
        &format!("{label:<width$}", width = STATE_WIDTH),
        palette,
    );
    let left = highlight_path(&outcome.primary, palette);

    match &outcome.secondary {
        Some(right) => {
            let pad = " ".repeat(left_width.saturating_sub(display_len(&outcome.primary)) + 3);
            format!(
                "    {state} {left}{pad} ->  {}",
                highlight_path(right, palette)
            )
        }
        None => format!("    {state} {left}"),
    }
}

fn paint_state(state: ActionState, text: &str, palette: Palette) -> String {
    match state {
        ActionState::Conflict => palette.bad(text),
        ActionState::Missing | ActionState::Differs => palette.attention(text),
        ActionState::Ok
        | ActionState::Created
        | ActionState::Linked
        | ActionState::Unlinked
        | ActionState::Rendered => palette.good(text),
    }
}

fn display_len(path: &Path) -> usize {
    path.to_string_lossy().chars().count()
}

/// The path with its final component highlighted.
fn highlight_path(path: &Path, palette: Palette) -> String {
    let text = path.to_string_lossy();
    match text.rfind(['/', '\\']) {
        Some(pos) => {
            let (dir, name) = text.split_at(pos + 1);
            format!("{dir}{}", palette.hl(name))
        }
        None => palette.hl(&text),
    }
}
