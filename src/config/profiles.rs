//! Profile definitions: one JSON file per profile.
//!
//! Each top-level field is validated separately so that a type error names
//! both the offending field and the profile, e.g.
//! `Failed to load profile "work": invalid "link" field: missing field `dst``.
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ProfileError;

/// A template variable declared in a profile's `vars` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Variable name, referenced as `$name` in templates.
    pub name: String,
    /// Substituted value.
    pub value: String,
    /// Profile that declared the variable.
    pub origin: String,
}

/// A directory to create (`create` entry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSpec {
    /// Target directory; may start with `~`.
    pub path: String,
    /// Permission bits parsed from the octal `mode` string.
    pub mode: Option<u32>,
    /// Profile that declared the entry.
    pub origin: String,
}

/// A symbolic link to establish (`link` entry).
///
/// Equality compares the `(src, dst)` pair only; the origin profile is
/// bookkeeping.
#[derive(Debug, Clone, Eq)]
pub struct LinkSpec {
    /// Path the link points at.
    pub src: String,
    /// Path where the link is created; may start with `~`.
    pub dst: String,
    /// Profile that declared the entry.
    pub origin: String,
}

impl PartialEq for LinkSpec {
    fn eq(&self, other: &Self) -> bool {
        (&self.src, &self.dst) == (&other.src, &other.dst)
    }
}

/// A template to render (`template` entry).
///
/// Equality compares the `(src, dst)` pair only.
#[derive(Debug, Clone, Eq)]
pub struct TemplateSpec {
    /// Template source file.
    pub src: String,
    /// Rendered output path; may start with `~`.
    pub dst: String,
    /// Profile that declared the entry.
    pub origin: String,
}

impl PartialEq for TemplateSpec {
    fn eq(&self, other: &Self) -> bool {
        (&self.src, &self.dst) == (&other.src, &other.dst)
    }
}

/// A named bundle of variables and actions, as declared in one file.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    /// Profile name (the file stem).
    pub name: String,
    /// Parent profile names, in declaration order.
    pub extends: Vec<String>,
    /// Own variables, in declaration order.
    pub vars: Vec<Variable>,
    /// Own directories to create.
    pub create: Vec<CreateSpec>,
    /// Own links.
    pub link: Vec<LinkSpec>,
    /// Own templates.
    pub template: Vec<TemplateSpec>,
}

#[derive(Debug, Deserialize)]
struct CreateEntry {
    name: String,
    mode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SrcDstEntry {
    src: String,
    dst: String,
}

impl Profile {
    /// Load a profile from `path`; the profile name is the file stem.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Io`] if the file cannot be read and
    /// [`ProfileError::Parse`] if its content is not a valid profile.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let name = path
            .file_stem()
            .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
        let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&name, &content)
    }

    /// Parse a profile named `name` from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Parse`] if the JSON is malformed or any field
    /// has the wrong shape.
    pub fn parse(name: &str, content: &str) -> Result<Self, ProfileError> {
        let parse_error = |message: String| ProfileError::Parse {
            profile: name.to_string(),
            message,
        };

        let root: Value = serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;
        let Value::Object(root) = root else {
            return Err(parse_error("profile must be a JSON object".to_string()));
        };

        let extends: Vec<String> =
            field(&root, "extends").map_err(|e| parse_error(format!("\"extends\" {e}")))?;

        let vars: Map<String, Value> =
            field(&root, "vars").map_err(|e| parse_error(format!("\"vars\" {e}")))?;
        let vars = vars
            .into_iter()
            .map(|(var, value)| match value {
                Value::String(value) => Ok(Variable {
                    name: var,
                    value,
                    origin: name.to_string(),
                }),
                _ => Err(parse_error(format!(
                    "variable \"{var}\" must have a string value"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let create: Vec<CreateEntry> =
            field(&root, "create").map_err(|e| parse_error(format!("\"create\" {e}")))?;
        let create = create
            .into_iter()
            .map(|entry| {
                let mode = entry
                    .mode
                    .as_deref()
                    .map(|m| {
                        u32::from_str_radix(m, 8).map_err(|_| {
                            parse_error(format!(
                                "\"create.mode\" of \"{}\" must be an octal integer, got \"{m}\"",
                                entry.name
                            ))
                        })
                    })
                    .transpose()?;
                Ok(CreateSpec {
                    path: entry.name,
                    mode,
                    origin: name.to_string(),
                })
            })
            .collect::<Result<Vec<_>, ProfileError>>()?;

        let link: Vec<SrcDstEntry> =
            field(&root, "link").map_err(|e| parse_error(format!("\"link\" {e}")))?;
        let link = link
            .into_iter()
            .map(|e| LinkSpec {
                src: e.src,
                dst: e.dst,
                origin: name.to_string(),
            })
            .collect();

        let template: Vec<SrcDstEntry> =
            field(&root, "template").map_err(|e| parse_error(format!("\"template\" {e}")))?;
        let template = template
            .into_iter()
            .map(|e| TemplateSpec {
                src: e.src,
                dst: e.dst,
                origin: name.to_string(),
            })
            .collect();

        Ok(Self {
            name: name.to_string(),
            extends,
            vars,
            create,
            link,
            template,
        })
    }
}

/// Deserialize an optional top-level field, treating absent and `null` as
/// the type's default.
fn field<T: DeserializeOwned + Default>(
    root: &Map<String, Value>,
    key: &str,
) -> Result<T, String> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => {
            serde_json::from_value(value.clone()).map_err(|e| format!("field is invalid: {e}"))
        }
    }
}
