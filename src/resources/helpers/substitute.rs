//! `$name` / `${name}` variable substitution.
//!
//! Placeholders are `$` followed by an identifier (`[A-Za-z_][A-Za-z0-9_]*`),
//! optionally wrapped in braces. `$$` is a literal dollar sign. Any other use
//! of `$` is rejected with its 1-based line and column.
use std::collections::HashMap;

/// Why a template could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubstituteError {
    /// A placeholder names a variable missing from the mapping.
    Undefined(String),
    /// A `$` that starts no valid placeholder.
    Invalid {
        /// 1-based line.
        line: usize,
        /// 1-based column, counted in characters.
        column: usize,
    },
}

/// Substitute every placeholder in `text` using `vars`.
///
/// The whole input is validated before anything is returned, so a failure
/// never yields partial output.
///
/// # Errors
///
/// Returns [`SubstituteError::Undefined`] for the first placeholder whose
/// name is not in `vars`, and [`SubstituteError::Invalid`] for the first
/// malformed `$`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use dotref::resources::helpers::substitute::substitute;
///
/// let vars = HashMap::from([("name".to_string(), "world".to_string())]);
/// assert_eq!(substitute("Hello $name, ${name}! $$5", &vars).unwrap(), "Hello world, world! $5");
/// ```
pub fn substitute(text: &str, vars: &HashMap<String, String>) -> Result<String, SubstituteError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('$') {
        let (literal, from_dollar) = rest.split_at(pos);
        out.push_str(literal);
        let after = from_dollar.strip_prefix('$').unwrap_or_default();

        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
            continue;
        }

        let Some((name, tail)) = placeholder(after) else {
            return Err(invalid_at(text, from_dollar));
        };
        let value = vars
            .get(name)
            .ok_or_else(|| SubstituteError::Undefined(name.to_string()))?;
        out.push_str(value);
        rest = tail;
    }

    out.push_str(rest);
    Ok(out)
}

/// Split a placeholder name (bare or braced) off the text following `$`.
fn placeholder(after: &str) -> Option<(&str, &str)> {
    if let Some(inner) = after.strip_prefix('{') {
        let (name, tail) = inner.split_at(identifier_len(inner));
        let tail = tail.strip_prefix('}')?;
        (!name.is_empty()).then_some((name, tail))
    } else {
        let (name, tail) = after.split_at(identifier_len(after));
        (!name.is_empty()).then_some((name, tail))
    }
}

/// Byte length of the identifier at the start of `s` (0 if none).
fn identifier_len(s: &str) -> usize {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return 0,
    }
    chars
        .find(|&(_, c)| !(c == '_' || c.is_ascii_alphanumeric()))
        .map_or(s.len(), |(i, _)| i)
}

/// Location of the `$` that starts `from_dollar`, a suffix of `text`.
fn invalid_at(text: &str, from_dollar: &str) -> SubstituteError {
    let (before, _) = text.split_at(text.len() - from_dollar.len());
    let line = before.matches('\n').count() + 1;
    let current = before.rsplit('\n').next().unwrap_or_default();
    let column = current.chars().count() + 1;
    SubstituteError::Invalid { line, column }
}
