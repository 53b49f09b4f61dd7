//! Symlink resource.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::helpers::fs::{ensure_parent_dir, is_present};
use super::{ActionOutcome, ActionState, Command, Resource};
use crate::error::ActionError;

/// A symbolic link at `target` that should resolve to `source`.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// Source path as written in the profile.
    pub source_label: String,
    /// Destination path as written in the profile.
    pub target_label: String,
    /// The source file/directory (what the symlink points to).
    pub source: PathBuf,
    /// The target path (where the symlink will be created).
    pub target: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub fn new(
        source_label: impl Into<String>,
        target_label: impl Into<String>,
        source: PathBuf,
        target: PathBuf,
    ) -> Self {
        Self {
            source_label: source_label.into(),
            target_label: target_label.into(),
            source,
            target,
        }
    }

    fn outcome(&self, state: ActionState) -> ActionOutcome {
        ActionOutcome::pair(state, &self.source_label, &self.target_label)
    }

    /// Source with every symlink resolved.
    fn real_source(&self) -> Result<PathBuf> {
        match dunce::canonicalize(&self.source) {
            Ok(path) => Ok(path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ActionError::SourceNotFound {
                path: self.source_label.clone(),
            }
            .into()),
            Err(e) => Err(e)
                .with_context(|| format!("resolve link source: {}", self.source.display())),
        }
    }
}

impl Resource for SymlinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    fn apply(&self, command: Command) -> Result<ActionOutcome> {
        let source = self.real_source()?;

        if !is_present(&self.target) {
            let state = match command {
                Command::Status => ActionState::Missing,
                Command::Unlink => ActionState::Ok,
                Command::Sync => {
                    ensure_parent_dir(&self.target)?;
                    create_symlink(&source, &self.target)
                        .with_context(|| format!("create link: {}", self.target.display()))?;
                    ActionState::Linked
                }
            };
            return Ok(self.outcome(state));
        }

        // A dangling link cannot be resolved and is left alone.
        if !same_entry(&self.target, &source) {
            return Ok(self.outcome(ActionState::Conflict));
        }

        let is_link = self
            .target
            .symlink_metadata()
            .is_ok_and(|m| m.file_type().is_symlink());
        if command == Command::Unlink && is_link {
            remove_symlink(&self.target)
                .with_context(|| format!("remove link: {}", self.target.display()))?;
            return Ok(self.outcome(ActionState::Unlinked));
        }
        Ok(self.outcome(ActionState::Ok))
    }
}

/// Whether `a` and `b` name the same file once links are followed.
///
/// Hard links to the same file count as the same entry.
fn same_entry(a: &Path, b: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        match (std::fs::metadata(a), std::fs::metadata(b)) {
            (Ok(x), Ok(y)) => x.dev() == y.dev() && x.ino() == y.ino(),
            _ => false,
        }
    }
    #[cfg(not(unix))]
    {
        match (dunce::canonicalize(a), dunce::canonicalize(b)) {
            (Ok(x), Ok(y)) => paths_equal(&x, &y),
            _ => false,
        }
    }
}

/// Compare two paths for equality, handling UNC prefix normalization on Windows.
#[cfg(not(unix))]
fn paths_equal(a: &Path, b: &Path) -> bool {
    let normalize = |p: &Path| -> PathBuf {
        #[cfg(windows)]
        {
            let s = p.to_string_lossy();
            if let Some(stripped) = s.strip_prefix(r"\\?\") {
                return PathBuf::from(stripped);
            }
        }
        p.to_path_buf()
    };

    normalize(a) == normalize(b)
}

/// Create a symlink at `link` pointing to `target`.
///
/// Directory targets get a directory link on Windows; elsewhere the link
/// kind follows the target automatically.
fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link).with_context(|| {
            format!(
                "creating symlink {} -> {}",
                link.display(),
                target.display()
            )
        })?;
    }

    #[cfg(windows)]
    {
        let is_dir = target.is_dir();
        let result = if is_dir {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        };

        if result.is_err() {
            // Junctions need no privilege; file symlinks still do.
            let mut cmd = std::process::Command::new("cmd");
            cmd.args(["/c", "mklink"]);
            if is_dir {
                cmd.arg("/J");
            }
            let output = cmd
                .arg(link)
                .arg(target)
                .output()
                .context("failed to run mklink")?;
            if !output.status.success() {
                anyhow::bail!(
                    "creating symlink {} -> {}: {}",
                    link.display(),
                    target.display(),
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }
        }
    }

    Ok(())
}

/// Remove a symlink, handling platform differences.
///
/// On Windows, directory symlinks must be removed with `remove_dir` (not
/// `remove_file`), so the raw `FILE_ATTRIBUTE_DIRECTORY` flag decides.
fn remove_symlink(path: &Path) -> Result<()> {
    let meta = std::fs::symlink_metadata(path)
        .with_context(|| format!("reading metadata: {}", path.display()))?;
    if is_dir_like(&meta) {
        std::fs::remove_dir(path)
            .with_context(|| format!("removing directory link: {}", path.display()))?;
    } else {
        std::fs::remove_file(path).with_context(|| format!("removing file: {}", path.display()))?;
    }
    Ok(())
}

/// Check if metadata represents a directory-like entry.
fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}
