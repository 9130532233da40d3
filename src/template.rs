//! `{{field}}` substitution rendering for template files.
//!
//! The render context is a flat string map built by serializing the
//! generation options (and derived identifiers) with serde. Unset optional
//! fields render as empty strings; unknown placeholders are left untouched so
//! a typo in a template is visible in the output rather than silently eaten.

use anyhow::{Result, anyhow};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Flat key/value context for template substitution.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    vars: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the top-level fields of a serializable struct into the context.
    ///
    /// Scalar fields become strings; `null` (unset options) becomes the empty
    /// string. Nested objects or arrays are rejected since templates only
    /// substitute scalars.
    pub fn extend_from<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let Value::Object(fields) = serde_json::to_value(value)? else {
            return Err(anyhow!("render context source must serialize to an object"));
        };
        for (key, value) in fields {
            let rendered = match value {
                Value::Null => String::new(),
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => {
                    return Err(anyhow!(
                        "context field '{}' is not a scalar: {}",
                        key,
                        other
                    ));
                }
            };
            self.vars.insert(key, rendered);
        }
        Ok(())
    }

    /// Replace every `{{key}}` occurrence with the context value for `key`.
    ///
    /// A single left-to-right scan: substituted values are never rescanned,
    /// so a value that itself contains `{{...}}` is emitted literally.
    pub fn render(&self, template: &str) -> String {
        let mut output = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            output.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}").map(|end| (&after[..end], end)) {
                Some((key, end)) if self.vars.contains_key(key) => {
                    output.push_str(&self.vars[key]);
                    rest = &after[end + 2..];
                }
                // Unknown or unterminated placeholder stays visible.
                _ => {
                    output.push_str("{{");
                    rest = after;
                }
            }
        }
        output.push_str(rest);
        output
    }
}
