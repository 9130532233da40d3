//! Scaffolding generator for Cog plugin projects.
//!
//! Materializes a new Cog project from a template tree, installs its
//! dependencies, and registers it with the external `crank` tool.

pub mod config;
pub mod generator;
pub mod template;

pub use config::{DerivedIdentifiers, GenerateOptions, Language, slug_safe};
pub use generator::Generator;
