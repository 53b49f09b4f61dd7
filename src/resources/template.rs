//! Rendered template resource.
use anyhow::{Context as _, Result};
use std::collections::HashMap;
use std::path::PathBuf;

use super::helpers::fs::{ensure_parent_dir, is_present};
use super::helpers::substitute::{SubstituteError, substitute};
use super::{ActionOutcome, ActionState, Command, Resource};
use crate::error::ActionError;

/// A file at `target` whose content is `source` with variables substituted.
#[derive(Debug, Clone)]
pub struct TemplateResource<'a> {
    /// Template path as written in the profile.
    pub source_label: String,
    /// Destination path as written in the profile.
    pub target_label: String,
    /// Resolved template path.
    pub source: PathBuf,
    /// Resolved destination path.
    pub target: PathBuf,
    vars: &'a HashMap<String, String>,
}

impl<'a> TemplateResource<'a> {
    /// Create a new template resource rendering with `vars`.
    #[must_use]
    pub fn new(
        source_label: impl Into<String>,
        target_label: impl Into<String>,
        source: PathBuf,
        target: PathBuf,
        vars: &'a HashMap<String, String>,
    ) -> Self {
        Self {
            source_label: source_label.into(),
            target_label: target_label.into(),
            source,
            target,
            vars,
        }
    }

    fn outcome(&self, state: ActionState) -> ActionOutcome {
        ActionOutcome::pair(state, &self.source_label, &self.target_label)
    }

    /// Render the template into memory.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the template cannot be read, or an
    /// [`ActionError`] if it references an undefined variable or contains
    /// an invalid placeholder.
    pub fn render(&self) -> Result<String> {
        let text = std::fs::read_to_string(&self.source)
            .with_context(|| format!("reading template: {}", self.source.display()))?;
        substitute(&text, self.vars).map_err(|e| {
            let template = self.source_label.clone();
            match e {
                SubstituteError::Undefined(name) => {
                    ActionError::UndefinedVariable { name, template }.into()
                }
                SubstituteError::Invalid { line, column } => ActionError::InvalidPlaceholder {
                    template,
                    line,
                    column,
                }
                .into(),
            }
        })
    }

    fn write(&self, content: &str) -> Result<()> {
        ensure_parent_dir(&self.target)?;
        std::fs::write(&self.target, content)
            .with_context(|| format!("writing rendered file: {}", self.target.display()))
    }
}

impl Resource for TemplateResource<'_> {
    fn description(&self) -> String {
        format!("{} <- {}", self.target.display(), self.source.display())
    }

    fn apply(&self, command: Command) -> Result<ActionOutcome> {
        if !is_present(&self.target) {
            let state = match command {
                Command::Status => ActionState::Missing,
                Command::Unlink => ActionState::Ok,
                Command::Sync => {
                    self.write(&self.render()?)?;
                    ActionState::Rendered
                }
            };
            return Ok(self.outcome(state));
        }

        if !self.target.is_file() {
            return Ok(self.outcome(ActionState::Conflict));
        }

        let rendered = self.render()?;
        let current = std::fs::read(&self.target)
            .with_context(|| format!("reading rendered file: {}", self.target.display()))?;

        let state = if current == rendered.as_bytes() {
            if command == Command::Unlink {
                std::fs::remove_file(&self.target)
                    .with_context(|| format!("removing file: {}", self.target.display()))?;
                ActionState::Unlinked
            } else {
                ActionState::Ok
            }
        } else if command == Command::Sync {
            self.write(&rendered)?;
            ActionState::Rendered
        } else {
            ActionState::Differs
        };
        Ok(self.outcome(state))
    }
}
