//! Command-line interface for the scaffolder.

use anyhow::Result;
use clap::Parser;
use cog_scaffold::config::{GenerateOptions, Language};
use dialoguer::Input;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cog-scaffold")]
#[command(about = "Scaffold a new Cog plugin project and register it with crank", long_about = None)]
pub struct Cli {
    /// Human-readable name of the new Cog (e.g. "Widget Maker")
    #[arg(long)]
    pub name: Option<String>,

    /// Organization the Cog belongs to (e.g. "Acme Corp")
    #[arg(long)]
    pub org: Option<String>,

    /// Target language profile
    #[arg(long, value_enum, default_value_t = Language::Typescript)]
    pub language: Language,

    /// Render an MIT LICENSE file into the generated project
    #[arg(long)]
    pub include_mit_license: bool,

    /// Include a working example step and its tests
    #[arg(long)]
    pub include_example_step: bool,

    /// Never prompt; missing name/org stay unset
    #[arg(long)]
    pub no_input: bool,

    /// Directory to generate the project into
    #[arg(long, default_value = ".")]
    pub destination: PathBuf,

    /// Template tree root (default: $COG_SCAFFOLD_TEMPLATES, else the
    /// bundled assets directory)
    #[arg(long)]
    pub template_root: Option<PathBuf>,
}

impl Cli {
    /// Build the generation options, prompting for missing name/org unless
    /// `--no-input` was given.
    pub fn resolve_options(&self) -> Result<GenerateOptions> {
        let name = self.resolve_field(&self.name, "Cog name")?;
        let org = self.resolve_field(&self.org, "Organization")?;

        Ok(GenerateOptions {
            name,
            org,
            language: self.language,
            include_mit_license: self.include_mit_license,
            include_example_step: self.include_example_step,
        })
    }

    fn resolve_field(&self, value: &Option<String>, prompt: &str) -> Result<Option<String>> {
        if let Some(value) = value {
            return Ok(Some(value.clone()));
        }
        if self.no_input {
            return Ok(None);
        }
        prompt_optional(prompt)
    }

    /// Resolve the template root: the `--template-root` flag, then
    /// `$COG_SCAFFOLD_TEMPLATES`, then an `assets` directory next to the
    /// installed binary, and finally the crate's own assets (dev builds,
    /// where the binary runs out of target/).
    pub fn template_root(&self) -> PathBuf {
        if let Some(root) = &self.template_root {
            return root.clone();
        }
        if let Ok(root) = std::env::var("COG_SCAFFOLD_TEMPLATES") {
            return PathBuf::from(root);
        }
        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            let installed = dir.join("assets");
            if installed.is_dir() {
                return installed;
            }
        }
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
    }
}

/// Prompt for an optional value; blank input means "leave unset".
fn prompt_optional(prompt: &str) -> Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(format!("{} (leave blank to skip)", prompt))
        .allow_empty(true)
        .interact_text()?;
    let value = value.trim().to_string();
    Ok((!value.is_empty()).then_some(value))
}
