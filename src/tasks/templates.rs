//! Template rendering task.
use anyhow::Result;

use super::{Context, Task, apply_resources};
use crate::resources::{ActionOutcome, TemplateResource};

/// Render profile templates with the merged variables.
pub struct RenderTemplates;

impl Task for RenderTemplates {
    fn name(&self) -> &str {
        "Template"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.profile.template.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<Vec<ActionOutcome>> {
        let vars = ctx.profile.variables();
        let resources = ctx
            .profile
            .template
            .iter()
            .map(|spec| {
                Ok(TemplateResource::new(
                    &spec.src,
                    &spec.dst,
                    ctx.resolve(&spec.src)?,
                    ctx.resolve(&spec.dst)?,
                    &vars,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        apply_resources(ctx, resources)
    }
}
