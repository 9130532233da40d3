//! Language profiles: the table mapping a language tag to its template
//! operations, start command, and dependency installer.
//!
//! Adding a language means adding a `Language` variant and a constructor
//! here; the orchestrator's control flow stays untouched.

use crate::config::{GenerateOptions, Language};
use std::path::PathBuf;

/// How a template file lands in the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Byte-for-byte copy
    Verbatim,
    /// `{{field}}` substitution with the run's render context
    Template,
}

/// One scaffolding operation.
///
/// Source paths are relative to the template root, destination paths to the
/// generated project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    CopyFile {
        src: PathBuf,
        dest: PathBuf,
        mode: RenderMode,
    },
    CopyDir {
        src: PathBuf,
        dest: PathBuf,
    },
    WriteFile {
        dest: PathBuf,
        contents: String,
    },
}

fn copy(src: &str, dest: &str) -> Op {
    Op::CopyFile {
        src: src.into(),
        dest: dest.into(),
        mode: RenderMode::Verbatim,
    }
}

fn render(src: &str, dest: &str) -> Op {
    Op::CopyFile {
        src: src.into(),
        dest: dest.into(),
        mode: RenderMode::Template,
    }
}

fn copy_dir(src: &str, dest: &str) -> Op {
    Op::CopyDir {
        src: src.into(),
        dest: dest.into(),
    }
}

fn touch(dest: &str) -> Op {
    Op::WriteFile {
        dest: dest.into(),
        contents: String::new(),
    }
}

/// The dependency-installer invocation for a profile.
#[derive(Debug, Clone, Copy)]
pub struct InstallerCommand {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

/// Everything the orchestrator needs to scaffold one target language.
#[derive(Debug, Clone)]
pub struct Profile {
    pub language: Language,
    /// Command the generated project is started with, passed to crank
    pub start_command: &'static str,
    pub installer: InstallerCommand,
}

/// Look up the profile for a language.
///
/// Exhaustive match: a `Language` variant without a profile here does not
/// compile, so an unsupported language can never silently produce an
/// incomplete project.
pub fn profile_for(language: Language) -> Profile {
    match language {
        Language::Typescript => typescript(),
    }
}

fn typescript() -> Profile {
    Profile {
        language: Language::Typescript,
        start_command: "npm start",
        installer: InstallerCommand {
            program: "npm",
            args: &["install"],
        },
    }
}

impl Profile {
    /// The ordered list of template operations for this profile.
    pub fn ops(&self, options: &GenerateOptions) -> Vec<Op> {
        match self.language {
            Language::Typescript => typescript_ops(options),
        }
    }
}

fn typescript_ops(options: &GenerateOptions) -> Vec<Op> {
    let t = |path: &str| format!("templates/typescript/{}", path);

    let mut ops = vec![
        // Root files.
        copy(&t(".gitignore"), ".gitignore"),
        copy(&t(".dockerignore"), ".dockerignore"),
        copy(&t("tslint.json"), "tslint.json"),
        copy(&t("tsconfig.json"), "tsconfig.json"),
        render(&t("package.json"), "package.json"),
        render(&t("Dockerfile"), "Dockerfile"),
        render(&t("README.md"), "README.md"),
        render(&t(".circleci/config.yml"), ".circleci/config.yml"),
        // Helper scripts.
        copy_dir(&t("scripts"), "scripts"),
        // Core runtime files.
        copy(&t("src/core/grpc-server.ts"), "src/core/grpc-server.ts"),
        copy(&t("src/core/base-step.ts"), "src/core/base-step.ts"),
        copy(&t("src/core/cog.ts"), "src/core/cog.ts"),
        // Client wrapper.
        copy(
            &t("src/client/client-wrapper.ts"),
            "src/client/client-wrapper.ts",
        ),
        // The whole shared proto dir, since the generated project compiles it.
        copy_dir("proto", "src/proto"),
        // Primary test files.
        render(&t("test/core/cog.ts"), "test/core/cog.ts"),
        copy_dir(&t("test/client"), "test/client"),
    ];

    if options.include_example_step {
        ops.push(copy_dir(&t("src/steps"), "src/steps"));
        ops.push(copy_dir(&t("test/steps"), "test/steps"));
    } else {
        // No sample steps: keep the directories present for later population.
        ops.push(touch("src/steps/.gitkeep"));
        ops.push(touch("test/steps/.gitkeep"));
    }

    ops
}
