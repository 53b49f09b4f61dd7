//! Symlink task.
use anyhow::Result;

use super::{Context, Task, apply_resources};
use crate::resources::{ActionOutcome, SymlinkResource};

/// Link profile sources into place.
pub struct LinkPaths;

impl Task for LinkPaths {
    fn name(&self) -> &str {
        "Link"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.profile.link.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<Vec<ActionOutcome>> {
        let resources = ctx
            .profile
            .link
            .iter()
            .map(|spec| {
                Ok(SymlinkResource::new(
                    &spec.src,
                    &spec.dst,
                    ctx.resolve(&spec.src)?,
                    ctx.resolve(&spec.dst)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        apply_resources(ctx, resources)
    }
}
