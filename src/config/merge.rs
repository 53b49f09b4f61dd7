//! Flattened (ancestor-inclusive) profile view.
use std::collections::HashMap;

use super::profiles::{CreateSpec, LinkSpec, Profile, TemplateSpec, Variable};

/// The effective view of a profile after folding in all of its ancestors.
///
/// Built by [`ProfileStore::merged`](super::store::ProfileStore::merged);
/// never cached, so it always reflects the loaded definitions.
#[derive(Debug, Clone, Default)]
pub struct MergedProfile {
    /// Name of the profile that was flattened.
    pub name: String,
    /// Direct parents of the flattened profile.
    pub extends: Vec<String>,
    /// Effective variables; names are unique.
    pub vars: Vec<Variable>,
    /// Effective directories; paths are unique.
    pub create: Vec<CreateSpec>,
    /// Effective links; `(src, dst)` pairs are unique.
    pub link: Vec<LinkSpec>,
    /// Effective templates; `(src, dst)` pairs are unique.
    pub template: Vec<TemplateSpec>,
}

impl From<&Profile> for MergedProfile {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            extends: profile.extends.clone(),
            vars: profile.vars.clone(),
            create: profile.create.clone(),
            link: profile.link.clone(),
            template: profile.template.clone(),
        }
    }
}

impl MergedProfile {
    /// Append every entry of an ancestor's flattened view that is not
    /// already present. Entries already in `self` always win.
    pub fn absorb(&mut self, ancestor: Self) {
        let vars: Vec<Variable> = ancestor
            .vars
            .into_iter()
            .filter(|v| !self.vars.iter().any(|own| own.name == v.name))
            .collect();
        self.vars.extend(vars);

        let create: Vec<CreateSpec> = ancestor
            .create
            .into_iter()
            .filter(|c| !self.create.iter().any(|own| own.path == c.path))
            .collect();
        self.create.extend(create);

        let link: Vec<LinkSpec> = ancestor
            .link
            .into_iter()
            .filter(|l| !self.link.contains(l))
            .collect();
        self.link.extend(link);

        let template: Vec<TemplateSpec> = ancestor
            .template
            .into_iter()
            .filter(|t| !self.template.contains(t))
            .collect();
        self.template.extend(template);
    }

    /// Variable mapping used to render templates.
    #[must_use]
    pub fn variables(&self) -> HashMap<String, String> {
        self.vars
            .iter()
            .map(|v| (v.name.clone(), v.value.clone()))
            .collect()
    }
}
