//! Resource path construction
//!
//! Renders collection and instance paths from path parameters. Placeholders
//! use `{name}` syntax, e.g. `/v1/Devices/{device_sid}/Commands`. This is
//! plain substitution over a flat parameter map, not a templating engine.

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Query and path parameters keyed by name
pub type QueryParams = HashMap<String, String>;

/// Regex for matching path placeholders: {name}
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").unwrap());

/// Render a path template with the given parameters
///
/// Every placeholder must resolve; the first one that doesn't fails the
/// whole render with `Error::UndefinedVariable`.
pub fn render(template: &str, params: &QueryParams) -> Result<String> {
    let mut result = template.to_string();

    for cap in PLACEHOLDER_REGEX.captures_iter(template) {
        let placeholder = cap.get(0).unwrap().as_str();
        let name = cap.get(1).unwrap().as_str();

        match params.get(name) {
            Some(value) => {
                result = result.replace(placeholder, value);
            }
            None => return Err(Error::undefined_var(name)),
        }
    }

    Ok(result)
}
