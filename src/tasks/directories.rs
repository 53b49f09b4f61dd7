//! Directory creation task.
use anyhow::Result;

use super::{Context, Task, apply_resources};
use crate::resources::{ActionOutcome, Command, DirectoryResource};

/// Create the profile's directories. Never runs under `unlink`.
pub struct CreateDirectories;

impl Task for CreateDirectories {
    fn name(&self) -> &str {
        "Create"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.command != Command::Unlink && !ctx.profile.create.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<Vec<ActionOutcome>> {
        let resources = ctx
            .profile
            .create
            .iter()
            .map(|spec| {
                let path = ctx.resolve(&spec.path)?;
                Ok(DirectoryResource::new(&spec.path, path, spec.mode))
            })
            .collect::<Result<Vec<_>>>()?;
        apply_resources(ctx, resources)
    }
}
