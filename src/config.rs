//! Generation options and identifier derivation.
//!
//! A [`GenerateOptions`] is built once by the CLI layer and is immutable for
//! the duration of a run. [`DerivedIdentifiers`] are computed from it before
//! any file operation happens.

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// Target-language profiles the scaffolder knows how to generate.
///
/// This is a closed enum: unsupported language strings are rejected at the
/// CLI boundary by clap, and adding a variant without registering a profile
/// is a compile error in the profile registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Typescript,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Typescript => write!(f, "typescript"),
        }
    }
}

/// Options for one scaffolding run.
///
/// Serializable so the full option set can double as template render context.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOptions {
    /// Human-readable name of the new Cog (e.g. "Widget Maker")
    pub name: Option<String>,
    /// Organization the Cog belongs to (e.g. "Acme Corp")
    pub org: Option<String>,
    /// Target language profile
    pub language: Language,
    /// Render an MIT LICENSE file into the project root
    pub include_mit_license: bool,
    /// Copy the sample step (and its tests) into the project
    pub include_example_step: bool,
}

/// Identifiers derived from the user-supplied name and org.
///
/// Both stay unset when `name` is missing; downstream steps that need them
/// receive an empty string instead.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DerivedIdentifiers {
    /// Slug of `name`, safe for package manifests and paths
    pub package_safe_name: Option<String>,
    /// `org-slug/name-slug`, used to register the Cog with crank
    pub machine_name: Option<String>,
}

impl DerivedIdentifiers {
    /// Derive identifiers from the options. Run once, before any file write.
    pub fn from_options(options: &GenerateOptions) -> Self {
        let package_safe_name = options.name.as_deref().map(slug_safe);
        let machine_name = match (options.org.as_deref(), package_safe_name.as_deref()) {
            (Some(org), Some(package)) => Some(format!("{}/{}", slug_safe(org), package)),
            _ => None,
        };
        Self {
            package_safe_name,
            machine_name,
        }
    }
}

/// Normalize free-form text into a slug safe for filenames and registry IDs.
///
/// Each maximal run of whitespace becomes a single hyphen, every remaining
/// character outside `[A-Za-z0-9-]` is stripped, and the result is
/// lower-cased. Pure and total; the empty string maps to itself.
pub fn slug_safe(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            in_whitespace = false;
            if c.is_ascii_alphanumeric() || c == '-' {
                slug.push(c.to_ascii_lowercase());
            }
        }
    }
    slug
}
